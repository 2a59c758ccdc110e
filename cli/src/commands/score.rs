//! `passforge score`.

use std::io::{BufRead, Write};

use anyhow::{bail, Context as _};
use serde::Serialize;
use zeroize::Zeroizing;

use passforge_core::charset::class_symbols;
use passforge_core::validate::ClassCounts;
use passforge_core::{
    estimate_entropy, is_common_secret, score_strength, CharClass, EntropyResult,
    StrengthBreakdown, StrengthLabel, COMMON_SECRETS,
};

use crate::cli::ScoreArgs;

/// Size of the smallest canonical alphabet covering every class present in
/// `secret`.
#[must_use]
pub fn observed_alphabet_size(secret: &str) -> usize {
    let counts = ClassCounts::of(secret);
    CharClass::ALL
        .into_iter()
        .filter(|class| counts.get(*class) > 0)
        .map(|class| class_symbols(class, false, false).len())
        .sum()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    label: StrengthLabel,
    total: u8,
    breakdown: StrengthBreakdown,
    alphabet_size: usize,
    entropy: EntropyResult,
    common_secret: bool,
}

fn read_secret(args: &ScoreArgs, input: &mut impl BufRead) -> anyhow::Result<Zeroizing<String>> {
    if let Some(secret) = args.secret.as_deref().filter(|s| *s != "-") {
        return Ok(Zeroizing::new(secret.to_string()));
    }
    let mut line = Zeroizing::new(String::new());
    let read = input
        .read_line(&mut line)
        .context("failed to read secret from stdin")?;
    if read == 0 {
        bail!("no secret given: pass it as an argument or on stdin");
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Score one secret.
///
/// # Errors
///
/// Fails when no secret is given or output cannot be written.
pub fn run(args: &ScoreArgs, input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    let secret = read_secret(args, input)?;
    let alphabet_size = args
        .alphabet_size
        .unwrap_or_else(|| observed_alphabet_size(&secret));

    let breakdown = score_strength(&secret);
    let report = ScoreReport {
        label: breakdown.label(),
        total: breakdown.total(),
        alphabet_size,
        entropy: estimate_entropy(&secret, alphabet_size),
        common_secret: is_common_secret(&secret, COMMON_SECRETS),
        breakdown,
    };
    drop(secret);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "strength:   {} ({}/12)", report.label.as_str(), report.total)?;
    let rows = [
        ("length", &report.breakdown.length),
        ("variety", &report.breakdown.variety),
        ("complexity", &report.breakdown.complexity),
        ("patterns", &report.breakdown.patterns),
    ];
    for (name, sub) in rows {
        writeln!(out, "  {name:<10} {}/{}  {}", sub.score, sub.max, sub.feedback)?;
    }
    writeln!(
        out,
        "entropy:    {:.1} bits over {} symbols, crack time {}",
        report.entropy.bits, report.alphabet_size, report.entropy.estimated_crack_time
    )?;
    if report.common_secret {
        writeln!(out, "warning:    resembles a commonly used password")?;
    }
    writeln!(out, "suggestions:")?;
    for suggestion in &report.breakdown.suggestions {
        writeln!(out, "  - {suggestion}")?;
    }
    Ok(())
}
