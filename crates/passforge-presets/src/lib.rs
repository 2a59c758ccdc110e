//! `passforge-presets` — Named policy presets for PassForge.
//!
//! The caller-side home for generation settings the user wants to reuse.
//! The engine never reads or writes presets; it only receives the policies
//! they contain.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod store;

pub use error::PresetError;
pub use store::{Preset, PolicyPresetStore, PRESETS_FILE};
