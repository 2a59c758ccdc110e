//! Argument definitions (clap derive).

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use passforge_core::policy::{ClassSelection, GenerationPolicy, RequirementsPolicy, Strategy};
use passforge_core::DEFAULT_MAX_ATTEMPTS;

/// PassForge: generate credentials and judge their strength
#[derive(Parser, Debug)]
#[command(name = "passforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding presets.json
    #[arg(long, global = true, env = "PASSFORGE_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one or more credentials
    Generate(GenerateArgs),

    /// Score an existing secret (reads stdin when SECRET is omitted or "-")
    Score(ScoreArgs),

    /// Print the alphabet a policy resolves to
    Alphabet(PolicyArgs),

    /// Manage stored presets
    #[command(subcommand)]
    Preset(PresetCommand),
}

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List presets
    List,

    /// Print one preset as JSON
    Show {
        name: String,
    },

    /// Create or update a preset from the given flags
    Save(SavePresetArgs),

    /// Delete a preset
    Remove {
        name: String,
    },
}

/// Generation strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Uniform,
    Pattern,
    Passphrase,
    Pronounceable,
    NoConsecutive,
    NoRepeated,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Uniform => Self::Uniform,
            StrategyArg::Pattern => Self::Pattern,
            StrategyArg::Passphrase => Self::Passphrase,
            StrategyArg::Pronounceable => Self::Pronounceable,
            StrategyArg::NoConsecutive => Self::NoConsecutive,
            StrategyArg::NoRepeated => Self::NoRepeated,
        }
    }
}

/// Parse a passphrase separator: a name or a single character.
///
/// # Errors
///
/// Returns a message for anything else.
pub fn parse_separator(s: &str) -> Result<char, String> {
    match s {
        "hyphen" => Ok('-'),
        "space" => Ok(' '),
        "dot" => Ok('.'),
        "underscore" => Ok('_'),
        "comma" => Ok(','),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!(
                    "unknown separator '{other}': expected hyphen, space, dot, underscore, comma or a single character"
                )),
            }
        }
    }
}

/// Flags shaping a [`GenerationPolicy`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Start from a stored preset; other flags override it
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Length in characters
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Generation strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lower: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Drop look-alike glyphs (0 O I l 1)
    #[arg(long)]
    pub exclude_similar: bool,

    /// Drop brackets, quotes, slashes and similar punctuation
    #[arg(long)]
    pub exclude_ambiguous: bool,

    /// Use exactly these characters
    #[arg(long, value_name = "CHARS")]
    pub alphabet: Option<String>,

    /// Token template, e.g. word-number-symbol (implies --strategy pattern)
    #[arg(long, value_name = "TEMPLATE")]
    pub pattern: Option<String>,

    /// Passphrase word count (implies --strategy passphrase)
    #[arg(short, long)]
    pub words: Option<usize>,

    /// Passphrase separator: hyphen, space, dot, underscore, comma or a character
    #[arg(long, value_parser = parse_separator)]
    pub separator: Option<char>,
}

impl PolicyArgs {
    /// Apply these flags on top of `base`.
    #[must_use]
    pub fn apply(&self, mut base: GenerationPolicy) -> GenerationPolicy {
        if let Some(length) = self.length {
            base.length = length;
        }
        let removed = ClassSelection {
            upper: self.no_upper,
            lower: self.no_lower,
            digits: self.no_digits,
            symbols: self.no_symbols,
        };
        base.classes = ClassSelection {
            upper: base.classes.upper && !removed.upper,
            lower: base.classes.lower && !removed.lower,
            digits: base.classes.digits && !removed.digits,
            symbols: base.classes.symbols && !removed.symbols,
        };
        base.exclude_similar |= self.exclude_similar;
        base.exclude_ambiguous |= self.exclude_ambiguous;
        if let Some(alphabet) = &self.alphabet {
            base.custom_alphabet = Some(alphabet.clone());
        }
        if let Some(template) = &self.pattern {
            base.pattern_template = Some(template.clone());
            base.strategy = Strategy::Pattern;
        }
        if let Some(words) = self.words {
            base.passphrase_word_count = Some(words);
            base.strategy = Strategy::Passphrase;
        }
        if let Some(separator) = self.separator {
            base.passphrase_separator = Some(separator);
        }
        if let Some(strategy) = self.strategy {
            base.strategy = strategy.into();
        }
        base
    }
}

/// Flags shaping a [`RequirementsPolicy`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct RequirementArgs {
    /// Reject candidates shorter than this
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Reject candidates longer than this
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Require an uppercase letter
    #[arg(long)]
    pub require_upper: bool,

    /// Require a lowercase letter
    #[arg(long)]
    pub require_lower: bool,

    /// Require a digit
    #[arg(long)]
    pub require_digit: bool,

    /// Require a symbol
    #[arg(long)]
    pub require_symbol: bool,

    /// Minimum number of uppercase letters
    #[arg(long, value_name = "N")]
    pub min_upper: Option<usize>,

    /// Minimum number of lowercase letters
    #[arg(long, value_name = "N")]
    pub min_lower: Option<usize>,

    /// Minimum number of digits
    #[arg(long, value_name = "N")]
    pub min_digit: Option<usize>,

    /// Minimum number of symbols
    #[arg(long, value_name = "N")]
    pub min_symbol: Option<usize>,
}

impl RequirementArgs {
    fn any(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.require_upper
            || self.require_lower
            || self.require_digit
            || self.require_symbol
            || self.min_upper.is_some()
            || self.min_lower.is_some()
            || self.min_digit.is_some()
            || self.min_symbol.is_some()
    }

    /// Apply these flags on top of `base`. `None` stays `None` when no
    /// requirement flag was given.
    #[must_use]
    pub fn apply(&self, base: Option<RequirementsPolicy>) -> Option<RequirementsPolicy> {
        if !self.any() {
            return base;
        }
        let mut req = base.unwrap_or_default();
        if let Some(min) = self.min_length {
            req.min_length = min;
        }
        if let Some(max) = self.max_length {
            req.max_length = max;
        }
        req.require_upper |= self.require_upper;
        req.require_lower |= self.require_lower;
        req.require_digit |= self.require_digit;
        req.require_symbol |= self.require_symbol;
        if let Some(n) = self.min_upper {
            req.min_upper = n;
        }
        if let Some(n) = self.min_lower {
            req.min_lower = n;
        }
        if let Some(n) = self.min_digit {
            req.min_digit = n;
        }
        if let Some(n) = self.min_symbol {
            req.min_symbol = n;
        }
        Some(req)
    }
}

/// Arguments for the `generate` command
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub requirements: RequirementArgs,

    /// Number of independent credentials
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Generate/validate rounds per credential
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Print entropy and strength under each credential
    #[arg(short, long)]
    pub analyze: bool,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `score` command
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Secret to score; prefer stdin to keep it out of shell history
    pub secret: Option<String>,

    /// Alphabet size for the entropy estimate (default: inferred from the
    /// character classes present)
    #[arg(long, value_name = "N")]
    pub alphabet_size: Option<usize>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `preset save`
#[derive(Args, Debug, Clone)]
pub struct SavePresetArgs {
    /// Preset name (letters, digits, '-' and '_')
    pub name: String,

    /// Human description
    #[arg(short, long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub requirements: RequirementArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn strategy_names_match_engine() {
        for arg in StrategyArg::value_variants() {
            let name = arg.to_possible_value().unwrap();
            assert_eq!(name.get_name(), Strategy::from(*arg).as_str());
        }
    }

    #[test]
    fn all_separators_parse() {
        for (name, expected) in [
            ("hyphen", '-'),
            ("space", ' '),
            ("dot", '.'),
            ("underscore", '_'),
            ("comma", ','),
            ("+", '+'),
        ] {
            assert_eq!(parse_separator(name).unwrap(), expected);
        }
    }

    #[test]
    fn unknown_separator_error() {
        let err = parse_separator("banana").unwrap_err();
        assert!(err.contains("unknown separator"));
    }

    #[test]
    fn policy_flags_override_base() {
        let args = PolicyArgs {
            length: Some(24),
            no_symbols: true,
            exclude_similar: true,
            ..PolicyArgs::default()
        };
        let policy = args.apply(GenerationPolicy::default());
        assert_eq!(policy.length, 24);
        assert!(!policy.classes.symbols);
        assert!(policy.classes.upper);
        assert!(policy.exclude_similar);
        assert_eq!(policy.strategy, Strategy::Uniform);
    }

    #[test]
    fn words_and_pattern_imply_strategy() {
        let words = PolicyArgs {
            words: Some(6),
            ..PolicyArgs::default()
        }
        .apply(GenerationPolicy::default());
        assert_eq!(words.strategy, Strategy::Passphrase);
        assert_eq!(words.word_count(), 6);

        let explicit = PolicyArgs {
            pattern: Some("word-digit".into()),
            strategy: Some(StrategyArg::Uniform),
            ..PolicyArgs::default()
        }
        .apply(GenerationPolicy::default());
        assert_eq!(explicit.strategy, Strategy::Uniform);
    }

    #[test]
    fn requirements_absent_without_flags() {
        assert!(RequirementArgs::default().apply(None).is_none());

        let base = RequirementsPolicy {
            min_length: 10,
            ..RequirementsPolicy::default()
        };
        let kept = RequirementArgs::default().apply(Some(base.clone()));
        assert_eq!(kept, Some(base));
    }

    #[test]
    fn requirement_flags_build_policy() {
        let args = RequirementArgs {
            min_length: Some(14),
            require_symbol: true,
            min_digit: Some(2),
            ..RequirementArgs::default()
        };
        let req = args.apply(None).unwrap();
        assert_eq!(req.min_length, 14);
        assert_eq!(req.max_length, 128);
        assert!(req.require_symbol);
        assert_eq!(req.min_digit, 2);
    }

    #[test]
    fn parses_generate_invocation() {
        let cli = Cli::try_parse_from([
            "passforge",
            "generate",
            "-l",
            "20",
            "--no-symbols",
            "--require-digit",
            "-n",
            "3",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.policy.length, Some(20));
                assert!(args.policy.no_symbols);
                assert!(args.requirements.require_digit);
                assert_eq!(args.count, 3);
                assert_eq!(args.max_attempts, DEFAULT_MAX_ATTEMPTS);
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["passforge", "-v", "-q", "preset", "list"]).is_err());
    }
}
