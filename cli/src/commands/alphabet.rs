//! `passforge alphabet`.

use std::io::Write;

use passforge_core::build_alphabet;

use super::{resolve_policy, Context};
use crate::cli::{PolicyArgs, RequirementArgs};

/// Print the alphabet the policy resolves to and its size.
///
/// # Errors
///
/// Fails on an unknown preset or when the policy selects no characters.
#[allow(clippy::cast_precision_loss)]
pub fn run(ctx: &Context, args: &PolicyArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let (policy, _) = resolve_policy(ctx, args, &RequirementArgs::default())?;
    let alphabet = build_alphabet(&policy)?;
    writeln!(out, "{alphabet}")?;
    writeln!(
        out,
        "{} symbols, {:.2} bits per character",
        alphabet.len(),
        (alphabet.len() as f64).log2()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn alphabet(args: &PolicyArgs) -> anyhow::Result<Vec<String>> {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path().to_path_buf());
        let mut out = Vec::new();
        run(&ctx, args, &mut out)?;
        Ok(String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect())
    }

    #[test]
    fn default_is_full_printable_set() {
        let lines = alphabet(&PolicyArgs::default()).unwrap();
        assert_eq!(lines[0].chars().count(), 94);
        assert!(lines[0].starts_with("ABC"));
        assert!(lines[1].starts_with("94 symbols"));
    }

    #[test]
    fn exclusions_shrink_alphabet() {
        let args = PolicyArgs {
            no_symbols: true,
            exclude_similar: true,
            ..PolicyArgs::default()
        };
        let lines = alphabet(&args).unwrap();
        assert_eq!(lines[1], "57 symbols, 5.83 bits per character");
        assert!(!lines[0].contains('0'));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let args = PolicyArgs {
            no_upper: true,
            no_lower: true,
            no_digits: true,
            no_symbols: true,
            ..PolicyArgs::default()
        };
        assert!(alphabet(&args).is_err());
    }
}
