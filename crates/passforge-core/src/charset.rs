//! Alphabet construction from a [`GenerationPolicy`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;
use crate::policy::GenerationPolicy;

// Canonical classes
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
// All 32 printable ASCII punctuation characters.
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/~`'\"\\";

/// Glyphs easily confused with one another, removed by `exclude_similar`.
pub const SIMILAR: &[char] = &['0', 'O', 'I', 'l', '1'];

/// Structural punctuation, removed from the symbol class by
/// `exclude_ambiguous`.
pub const AMBIGUOUS: &[char] = &[
    '{', '}', '[', ']', '(', ')', '\\', '/', '\'', '"', '~', ',', ';', '.', '<', '>',
];

/// One of the four canonical character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    /// All classes in canonical order (upper → lower → digit → symbol).
    pub const ALL: [Self; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Symbol];

    /// Classify a character. Anything that is not an ASCII letter or digit
    /// counts as a symbol.
    #[must_use]
    pub const fn of(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::Upper
        } else if c.is_ascii_lowercase() {
            Self::Lower
        } else if c.is_ascii_digit() {
            Self::Digit
        } else {
            Self::Symbol
        }
    }

    /// Canonical members of the class before any exclusion.
    #[must_use]
    pub const fn canonical(self) -> &'static str {
        match self {
            Self::Upper => UPPERCASE,
            Self::Lower => LOWERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }

    /// Human-readable plural name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upper => "uppercase letters",
            Self::Lower => "lowercase letters",
            Self::Digit => "digits",
            Self::Symbol => "symbols",
        }
    }
}

/// Ordered set of unique symbols eligible for generation.
///
/// Never empty once returned by [`build_alphabet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build from arbitrary symbols, dropping duplicates while keeping the
    /// first occurrence of each.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::EmptyAlphabet`] if no symbol remains.
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>) -> Result<Self, ForgeError> {
        let mut seen = HashSet::new();
        let symbols: Vec<char> = symbols.into_iter().filter(|c| seen.insert(*c)).collect();
        if symbols.is_empty() {
            return Err(ForgeError::EmptyAlphabet);
        }
        Ok(Self { symbols })
    }

    /// The symbols in order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false` for a constructed alphabet; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `c` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Whether the alphabet has at least one member of `class`.
    #[must_use]
    pub fn has_class(&self, class: CharClass) -> bool {
        self.symbols.iter().any(|c| CharClass::of(*c) == class)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Members of `class` after the policy's exclusions.
#[must_use]
pub fn class_symbols(class: CharClass, exclude_similar: bool, exclude_ambiguous: bool) -> Vec<char> {
    class
        .canonical()
        .chars()
        .filter(|c| !(exclude_similar && SIMILAR.contains(c)))
        .filter(|c| !(exclude_ambiguous && class == CharClass::Symbol && AMBIGUOUS.contains(c)))
        .collect()
}

/// Turn a policy's inclusion and exclusion settings into an [`Alphabet`].
///
/// A non-empty custom alphabet is returned de-duplicated and otherwise
/// verbatim. Otherwise the enabled canonical classes are concatenated in the
/// order upper → lower → digits → symbols after exclusions.
///
/// # Errors
///
/// Returns [`ForgeError::EmptyAlphabet`] if no class is selected or the
/// exclusions removed every selected character.
pub fn build_alphabet(policy: &GenerationPolicy) -> Result<Alphabet, ForgeError> {
    if let Some(custom) = policy.custom_alphabet() {
        return Alphabet::from_symbols(custom.chars());
    }

    let selected = [
        (CharClass::Upper, policy.classes.upper),
        (CharClass::Lower, policy.classes.lower),
        (CharClass::Digit, policy.classes.digits),
        (CharClass::Symbol, policy.classes.symbols),
    ];

    let symbols = selected
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .flat_map(|(class, _)| {
            class_symbols(class, policy.exclude_similar, policy.exclude_ambiguous)
        });
    Alphabet::from_symbols(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ClassSelection;

    fn only(classes: ClassSelection) -> GenerationPolicy {
        GenerationPolicy {
            classes,
            ..GenerationPolicy::default()
        }
    }

    const NONE: ClassSelection = ClassSelection {
        upper: false,
        lower: false,
        digits: false,
        symbols: false,
    };

    #[test]
    fn full_alphabet_has_ninety_four_symbols() {
        let alphabet = build_alphabet(&GenerationPolicy::default()).unwrap();
        assert_eq!(alphabet.len(), 94);
        // Every printable ASCII character except space.
        assert!(('!'..='~').all(|c| alphabet.contains(c)));
    }

    #[test]
    fn classes_concatenate_in_canonical_order() {
        let alphabet = build_alphabet(&only(ClassSelection {
            upper: false,
            lower: true,
            digits: true,
            symbols: false,
        }))
        .unwrap();
        assert_eq!(alphabet.to_string(), format!("{LOWERCASE}{DIGITS}"));
    }

    #[test]
    fn exclude_similar_is_case_sensitive() {
        let policy = GenerationPolicy {
            exclude_similar: true,
            ..GenerationPolicy::default()
        };
        let alphabet = build_alphabet(&policy).unwrap();
        for c in SIMILAR {
            assert!(!alphabet.contains(*c), "similar glyph {c} still present");
        }
        // Only the listed case is removed.
        assert!(alphabet.contains('o'));
        assert!(alphabet.contains('i'));
        assert!(alphabet.contains('L'));
    }

    #[test]
    fn exclude_ambiguous_only_touches_symbols() {
        let policy = GenerationPolicy {
            exclude_ambiguous: true,
            ..GenerationPolicy::default()
        };
        let alphabet = build_alphabet(&policy).unwrap();
        for c in AMBIGUOUS {
            assert!(!alphabet.contains(*c), "ambiguous symbol {c} still present");
        }
        assert!(alphabet.contains('!'));
        assert!(alphabet.contains('|'));
        assert_eq!(
            class_symbols(CharClass::Symbol, false, true)
                .into_iter()
                .collect::<String>(),
            "!@#$%^&*_+-=|:?`"
        );
    }

    #[test]
    fn no_class_is_empty_alphabet() {
        assert_eq!(build_alphabet(&only(NONE)), Err(ForgeError::EmptyAlphabet));
    }

    #[test]
    fn exclude_similar_trims_digits() {
        let digits = GenerationPolicy {
            exclude_similar: true,
            ..only(ClassSelection {
                digits: true,
                ..NONE
            })
        };
        assert_eq!(build_alphabet(&digits).unwrap().to_string(), "23456789");
    }

    #[test]
    fn custom_alphabet_bypasses_classes_and_exclusions() {
        let policy = GenerationPolicy {
            custom_alphabet: Some("aab01Oc".into()),
            exclude_similar: true,
            ..only(NONE)
        };
        let alphabet = build_alphabet(&policy).unwrap();
        assert_eq!(alphabet.to_string(), "ab01Oc");
    }

    #[test]
    fn empty_custom_alphabet_falls_back_to_classes() {
        let policy = GenerationPolicy {
            custom_alphabet: Some(String::new()),
            ..only(ClassSelection {
                digits: true,
                ..NONE
            })
        };
        assert_eq!(build_alphabet(&policy).unwrap().to_string(), DIGITS);
    }

    #[test]
    fn char_class_of() {
        assert_eq!(CharClass::of('Q'), CharClass::Upper);
        assert_eq!(CharClass::of('q'), CharClass::Lower);
        assert_eq!(CharClass::of('7'), CharClass::Digit);
        assert_eq!(CharClass::of('#'), CharClass::Symbol);
        assert_eq!(CharClass::of(' '), CharClass::Symbol);
    }
}
