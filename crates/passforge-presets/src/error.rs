//! Preset store error types for `passforge-presets`.

use passforge_core::ForgeError;
use thiserror::Error;

/// Errors produced by preset store operations.
#[derive(Debug, Error)]
pub enum PresetError {
    /// A stored policy is invalid (delegated from the engine).
    #[error(transparent)]
    Engine(#[from] ForgeError),

    /// No preset with this name.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// Preset name is empty, too long, or has characters outside
    /// `[A-Za-z0-9_-]`.
    #[error("invalid preset name: '{0}'")]
    InvalidName(String),

    /// JSON encoding failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
