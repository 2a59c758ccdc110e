//! Command handlers.
//!
//! Each handler writes its result to the given writer so tests can
//! capture output; logs go through `tracing` to stderr.

pub mod alphabet;
pub mod generate;
pub mod preset;
pub mod score;

use std::path::PathBuf;

use passforge_core::policy::{GenerationPolicy, RequirementsPolicy};
use passforge_presets::PolicyPresetStore;

use crate::cli::{PolicyArgs, RequirementArgs};

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub data_dir: PathBuf,
}

impl Context {
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Presets as currently stored (built-ins when nothing is saved yet).
    #[must_use]
    pub fn store(&self) -> PolicyPresetStore {
        PolicyPresetStore::load(&self.data_dir)
    }
}

/// Policy and requirements from the optional `--preset` plus flag overrides.
pub(crate) fn resolve_policy(
    ctx: &Context,
    policy: &PolicyArgs,
    requirements: &RequirementArgs,
) -> anyhow::Result<(GenerationPolicy, Option<RequirementsPolicy>)> {
    let (generation, required) = match &policy.preset {
        Some(name) => {
            let preset = ctx.store().get(name)?.clone();
            tracing::debug!(preset = %name, "using preset");
            (preset.generation, preset.requirements)
        }
        None => (GenerationPolicy::default(), None),
    };
    Ok((policy.apply(generation), requirements.apply(required)))
}
