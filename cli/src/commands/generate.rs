//! `passforge generate`.

use std::io::Write;

use anyhow::bail;
use serde::Serialize;
use zeroize::Zeroizing;

use passforge_core::rng::{OsRandom, SecureRandomSource};
use passforge_core::{forge_with, ForgeError, ForgedSecret, GenerateOptions};

use super::{resolve_policy, Context};
use crate::cli::GenerateArgs;

/// Generate with the OS CSPRNG.
///
/// # Errors
///
/// Fails on an unknown preset, an invalid policy, an unavailable random
/// source, or when any requested credential could not be produced.
pub fn run(ctx: &Context, args: &GenerateArgs, out: &mut impl Write) -> anyhow::Result<()> {
    run_with(&mut OsRandom, ctx, args, out)
}

/// [`run`] with an injected random source.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with<R: SecureRandomSource>(
    rng: &mut R,
    ctx: &Context,
    args: &GenerateArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (policy, requirements) = resolve_policy(ctx, &args.policy, &args.requirements)?;
    let options = GenerateOptions {
        max_attempts: args.max_attempts,
        count: args.count,
    };
    tracing::info!(
        strategy = policy.strategy.as_str(),
        count = options.count,
        constrained = requirements.is_some(),
        "generating"
    );
    let batch = forge_with(rng, &policy, requirements.as_ref(), &options)?;

    if args.json {
        write_json(&batch, out)?;
    } else {
        write_plain(&batch, args.analyze, out)?;
    }

    let failures: Vec<&ForgeError> = batch.iter().filter_map(|o| o.as_ref().err()).collect();
    match failures.first() {
        None => Ok(()),
        Some(first) if failures.len() == batch.len() => bail!("no credential generated: {first}"),
        Some(first) => bail!(
            "{} of {} credentials could not be generated: {first}",
            failures.len(),
            batch.len()
        ),
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutcome<'a> {
    Forged(&'a ForgedSecret),
    Failed { error: String },
}

fn write_json(batch: &[Result<ForgedSecret, ForgeError>], out: &mut impl Write) -> anyhow::Result<()> {
    let items: Vec<JsonOutcome<'_>> = batch
        .iter()
        .map(|outcome| match outcome {
            Ok(forged) => JsonOutcome::Forged(forged),
            Err(e) => JsonOutcome::Failed {
                error: e.to_string(),
            },
        })
        .collect();
    let json = Zeroizing::new(serde_json::to_string_pretty(&items)?);
    writeln!(out, "{}", json.as_str())?;
    Ok(())
}

fn write_plain(
    batch: &[Result<ForgedSecret, ForgeError>],
    analyze: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for (index, outcome) in batch.iter().enumerate() {
        let forged = match outcome {
            Ok(forged) => forged,
            Err(e) => {
                tracing::warn!(index, "credential not generated: {e}");
                continue;
            }
        };
        writeln!(out, "{}", forged.candidate.expose())?;
        if analyze {
            write_analysis(forged, out)?;
        }
    }
    Ok(())
}

fn write_analysis(forged: &ForgedSecret, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "  entropy:  {:.1} bits, crack time {} (structural: {:.1} bits, {})",
        forged.entropy.bits,
        forged.entropy.estimated_crack_time,
        forged.structural_entropy.bits,
        forged.structural_entropy.estimated_crack_time
    )?;
    writeln!(
        out,
        "  strength: {} ({}/12)",
        forged.strength.label().as_str(),
        forged.strength.total()
    )?;
    if forged.common_secret {
        writeln!(out, "  warning:  resembles a commonly used password")?;
    }
    Ok(())
}
