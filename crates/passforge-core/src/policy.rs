//! Generation and requirements policies.
//!
//! Both are plain serde values so the caller layer can persist them as
//! presets; the engine only reads them.

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// Default candidate length.
pub const DEFAULT_LENGTH: usize = 16;

/// Default passphrase word count.
pub const DEFAULT_WORD_COUNT: usize = 5;

/// Default passphrase separator.
pub const DEFAULT_SEPARATOR: char = '-';

/// Upper bound on candidate length and passphrase word count.
pub const MAX_LENGTH: usize = 1024;

/// Which generation strategy turns a policy into a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Independent uniform picks from the alphabet.
    #[default]
    Uniform,
    /// Token template such as `word-number-symbol`.
    Pattern,
    /// Words from the built-in word list joined by a separator.
    Passphrase,
    /// Alternating consonant/vowel syllables.
    Pronounceable,
    /// Uniform, but no symbol equals its predecessor.
    NoConsecutive,
    /// Uniform without replacement.
    NoRepeated,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Uniform,
        Self::Pattern,
        Self::Passphrase,
        Self::Pronounceable,
        Self::NoConsecutive,
        Self::NoRepeated,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Pattern => "pattern",
            Self::Passphrase => "passphrase",
            Self::Pronounceable => "pronounceable",
            Self::NoConsecutive => "no-consecutive",
            Self::NoRepeated => "no-repeated",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ForgeError::InvalidPolicy(format!("unknown strategy '{s}'")))
    }
}

/// Which character classes to include.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSelection {
    /// Include uppercase letters (A-Z).
    pub upper: bool,
    /// Include lowercase letters (a-z).
    pub lower: bool,
    /// Include digits (0-9).
    pub digits: bool,
    /// Include symbols.
    pub symbols: bool,
}

impl Default for ClassSelection {
    fn default() -> Self {
        Self {
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
        }
    }
}

impl ClassSelection {
    /// Whether at least one class is enabled.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.upper || self.lower || self.digits || self.symbols
    }
}

/// Caller-supplied configuration driving generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPolicy {
    /// Requested candidate length in characters (ignored by Pattern and
    /// Passphrase).
    pub length: usize,
    /// Character classes to draw from.
    #[serde(default)]
    pub classes: ClassSelection,
    /// Drop visually similar glyphs (`0 O I l 1`).
    #[serde(default)]
    pub exclude_similar: bool,
    /// Drop structural punctuation from the symbol class.
    #[serde(default)]
    pub exclude_ambiguous: bool,
    /// Explicit alphabet; bypasses classes and exclusions when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_alphabet: Option<String>,
    /// Generation strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Token template for [`Strategy::Pattern`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_template: Option<String>,
    /// Word count for [`Strategy::Passphrase`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase_word_count: Option<usize>,
    /// Separator for [`Strategy::Passphrase`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase_separator: Option<char>,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: ClassSelection::default(),
            exclude_similar: false,
            exclude_ambiguous: false,
            custom_alphabet: None,
            strategy: Strategy::Uniform,
            pattern_template: None,
            passphrase_word_count: None,
            passphrase_separator: None,
        }
    }
}

impl GenerationPolicy {
    /// Uniform policy of `length` over all four classes.
    #[must_use]
    pub fn uniform(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Passphrase policy of `word_count` words.
    #[must_use]
    pub fn passphrase(word_count: usize, separator: char) -> Self {
        Self {
            strategy: Strategy::Passphrase,
            passphrase_word_count: Some(word_count),
            passphrase_separator: Some(separator),
            ..Self::default()
        }
    }

    /// Pattern policy for `template`.
    #[must_use]
    pub fn pattern(template: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Pattern,
            pattern_template: Some(template.into()),
            ..Self::default()
        }
    }

    /// Non-empty custom alphabet, if any.
    #[must_use]
    pub fn custom_alphabet(&self) -> Option<&str> {
        self.custom_alphabet.as_deref().filter(|s| !s.is_empty())
    }

    /// Effective passphrase word count.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.passphrase_word_count.unwrap_or(DEFAULT_WORD_COUNT)
    }

    /// Effective passphrase separator.
    #[must_use]
    pub fn separator(&self) -> char {
        self.passphrase_separator.unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Length a generated candidate is expected to reach, when the strategy
    /// has one.
    #[must_use]
    pub const fn requested_length(&self) -> Option<usize> {
        match self.strategy {
            Strategy::Pattern | Strategy::Passphrase => None,
            _ => Some(self.length),
        }
    }

    /// Check the structural invariants of the policy.
    ///
    /// Alphabet emptiness is checked separately by
    /// [`build_alphabet`](crate::charset::build_alphabet).
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidPolicy`] for an out-of-range length or
    /// word count, or when a Uniform policy enables no class and has no
    /// custom alphabet; [`ForgeError::InvalidPattern`] for a Pattern policy
    /// without a template.
    pub fn check(&self) -> Result<(), ForgeError> {
        match self.strategy {
            Strategy::Passphrase => {
                let words = self.word_count();
                if !(1..=MAX_LENGTH).contains(&words) {
                    return Err(ForgeError::InvalidPolicy(format!(
                        "word count must be between 1 and {MAX_LENGTH}, got {words}"
                    )));
                }
            }
            Strategy::Pattern => {
                if !matches!(self.pattern_template.as_deref(), Some(t) if !t.trim().is_empty()) {
                    return Err(ForgeError::InvalidPattern(
                        "pattern strategy requires a template".to_string(),
                    ));
                }
            }
            _ => {
                if !(1..=MAX_LENGTH).contains(&self.length) {
                    return Err(ForgeError::InvalidPolicy(format!(
                        "length must be between 1 and {MAX_LENGTH}, got {}",
                        self.length
                    )));
                }
            }
        }

        if self.strategy == Strategy::Uniform
            && self.custom_alphabet().is_none()
            && !self.classes.any()
        {
            return Err(ForgeError::InvalidPolicy(
                "at least one character class must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional compliance policy a candidate must satisfy.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementsPolicy {
    /// Minimum length in characters.
    pub min_length: usize,
    /// Maximum length in characters.
    pub max_length: usize,
    /// At least one uppercase letter.
    pub require_upper: bool,
    /// At least one lowercase letter.
    pub require_lower: bool,
    /// At least one digit.
    pub require_digit: bool,
    /// At least one symbol.
    pub require_symbol: bool,
    /// Minimum number of uppercase letters.
    pub min_upper: usize,
    /// Minimum number of lowercase letters.
    pub min_lower: usize,
    /// Minimum number of digits.
    pub min_digit: usize,
    /// Minimum number of symbols.
    pub min_symbol: usize,
}

impl Default for RequirementsPolicy {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 128,
            require_upper: false,
            require_lower: false,
            require_digit: false,
            require_symbol: false,
            min_upper: 0,
            min_lower: 0,
            min_digit: 0,
            min_symbol: 0,
        }
    }
}

impl RequirementsPolicy {
    /// Check the policy is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidRequirements`] when `min_length >
    /// max_length`, when any per-class minimum exceeds `max_length`, or when
    /// the minimums together cannot fit in `max_length`.
    pub fn check(&self) -> Result<(), ForgeError> {
        if self.min_length > self.max_length {
            return Err(ForgeError::InvalidRequirements(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_length, self.max_length
            )));
        }

        let mins = [
            ("uppercase", self.min_upper),
            ("lowercase", self.min_lower),
            ("digit", self.min_digit),
            ("symbol", self.min_symbol),
        ];
        if let Some((name, min)) = mins.iter().find(|(_, min)| *min > self.max_length) {
            return Err(ForgeError::InvalidRequirements(format!(
                "minimum {name} count {min} exceeds maximum length {}",
                self.max_length
            )));
        }

        let total = mins
            .iter()
            .fold(0usize, |acc, (_, min)| acc.saturating_add(*min));
        if total > self.max_length {
            return Err(ForgeError::InvalidRequirements(format!(
                "per-class minimums total {total}, more than maximum length {}",
                self.max_length
            )));
        }
        Ok(())
    }
}
