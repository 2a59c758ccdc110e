//! `passforge preset …`.

use std::fs;
use std::io::Write;

use anyhow::Context as _;

use passforge_core::policy::GenerationPolicy;
use passforge_presets::{PolicyPresetStore, Preset};

use super::Context;
use crate::cli::{PresetCommand, SavePresetArgs};

/// Dispatch a preset subcommand.
///
/// # Errors
///
/// Fails on unknown names, invalid presets, or I/O errors while saving.
pub fn run(ctx: &Context, command: &PresetCommand, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        PresetCommand::List => list(&ctx.store(), out),
        PresetCommand::Show { name } => {
            let store = ctx.store();
            let preset = store.get(name)?;
            writeln!(out, "{}", serde_json::to_string_pretty(preset)?)?;
            Ok(())
        }
        PresetCommand::Save(args) => save(ctx, args, out),
        PresetCommand::Remove { name } => {
            let mut store = ctx.store();
            store.remove(name)?;
            persist(ctx, &store)?;
            writeln!(out, "removed preset '{name}'")?;
            Ok(())
        }
    }
}

fn list(store: &PolicyPresetStore, out: &mut impl Write) -> anyhow::Result<()> {
    if store.is_empty() {
        writeln!(out, "no presets")?;
        return Ok(());
    }
    for name in store.names() {
        let preset = store.get(name)?;
        writeln!(
            out,
            "{name:<16} {:<15} {}",
            preset.generation.strategy.as_str(),
            preset.description
        )?;
    }
    Ok(())
}

fn save(ctx: &Context, args: &SavePresetArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut store = ctx.store();

    // Base: --preset, else the preset being updated, else defaults.
    let base = match &args.policy.preset {
        Some(from) => Some(store.get(from)?.clone()),
        None => store.get(&args.name).ok().cloned(),
    };
    let (generation, requirements, description) = match base {
        Some(p) => (p.generation, p.requirements, p.description),
        None => (GenerationPolicy::default(), None, String::new()),
    };

    let preset = Preset {
        description: args.description.clone().unwrap_or(description),
        generation: args.policy.apply(generation),
        requirements: args.requirements.apply(requirements),
    };
    let replaced = store.upsert(&args.name, preset)?;
    persist(ctx, &store)?;

    let verb = if replaced.is_some() { "updated" } else { "saved" };
    writeln!(out, "{verb} preset '{}'", args.name)?;
    Ok(())
}

fn persist(ctx: &Context, store: &PolicyPresetStore) -> anyhow::Result<()> {
    fs::create_dir_all(&ctx.data_dir)
        .with_context(|| format!("cannot create data directory {}", ctx.data_dir.display()))?;
    store.save(&ctx.data_dir)?;
    Ok(())
}
