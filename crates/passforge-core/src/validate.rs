//! Requirements checking and common-secret detection.

use std::fmt;

use serde::Serialize;

use crate::charset::CharClass;
use crate::policy::RequirementsPolicy;

/// Built-in denylist of frequently used secrets.
pub const COMMON_SECRETS: &[&str] = &[
    "password", "passw0rd", "123456", "12345678", "qwerty", "letmein", "admin", "welcome",
    "monkey", "dragon", "iloveyou", "abc123", "football", "baseball", "master", "sunshine",
    "princess", "trustno1", "shadow", "superman", "111111", "123123", "654321", "1q2w3e",
    "zaq12wsx", "qazwsx", "starwars", "login", "freedom", "whatever", "michael", "jordan",
    "harley", "hunter2", "ranger", "buster", "soccer", "batman", "access", "secret",
    "changeme", "default",
];

/// Per-class character counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub upper: usize,
    pub lower: usize,
    pub digit: usize,
    pub symbol: usize,
}

impl ClassCounts {
    /// Count the classes of every character in `s`.
    #[must_use]
    pub fn of(s: &str) -> Self {
        s.chars().fold(Self::default(), |mut counts, c| {
            let slot = match CharClass::of(c) {
                CharClass::Upper => &mut counts.upper,
                CharClass::Lower => &mut counts.lower,
                CharClass::Digit => &mut counts.digit,
                CharClass::Symbol => &mut counts.symbol,
            };
            *slot = slot.saturating_add(1);
            counts
        })
    }

    /// Count for one class.
    #[must_use]
    pub const fn get(&self, class: CharClass) -> usize {
        match class {
            CharClass::Upper => self.upper,
            CharClass::Lower => self.lower,
            CharClass::Digit => self.digit,
            CharClass::Symbol => self.symbol,
        }
    }

    /// Number of classes with at least one character.
    #[must_use]
    pub fn present(&self) -> usize {
        CharClass::ALL.iter().filter(|c| self.get(**c) > 0).count()
    }
}

/// One unmet rule of a [`RequirementsPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum Violation {
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    Missing { class: CharClass },
    TooFew { class: CharClass, min: usize, actual: usize },
}

const fn singular(class: CharClass) -> &'static str {
    match class {
        CharClass::Upper => "uppercase letter",
        CharClass::Lower => "lowercase letter",
        CharClass::Digit => "digit",
        CharClass::Symbol => "symbol",
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min, actual } => {
                write!(f, "must be at least {min} characters long (is {actual})")
            }
            Self::TooLong { max, actual } => {
                write!(f, "must be at most {max} characters long (is {actual})")
            }
            Self::Missing { class } => {
                write!(f, "must contain at least one {}", singular(*class))
            }
            Self::TooFew { class, min, actual } => write!(
                f,
                "must contain at least {min} {} (has {actual})",
                class.label()
            ),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Every unmet rule, in check order.
    pub violations: Vec<Violation>,
}

/// Check `candidate` against `requirements`.
///
/// Checks run in a fixed order (length bounds, required classes, per-class
/// minimums) and every violation is reported, not just the first.
#[must_use]
pub fn validate(candidate: &str, requirements: &RequirementsPolicy) -> ValidationReport {
    let mut violations = Vec::new();
    let length = candidate.chars().count();

    if length < requirements.min_length {
        violations.push(Violation::TooShort {
            min: requirements.min_length,
            actual: length,
        });
    }
    if length > requirements.max_length {
        violations.push(Violation::TooLong {
            max: requirements.max_length,
            actual: length,
        });
    }

    let counts = ClassCounts::of(candidate);
    let rules = [
        (CharClass::Upper, requirements.require_upper, requirements.min_upper),
        (CharClass::Lower, requirements.require_lower, requirements.min_lower),
        (CharClass::Digit, requirements.require_digit, requirements.min_digit),
        (CharClass::Symbol, requirements.require_symbol, requirements.min_symbol),
    ];

    for (class, required, _) in rules {
        if required && counts.get(class) == 0 {
            violations.push(Violation::Missing { class });
        }
    }
    for (class, _, min) in rules {
        let actual = counts.get(class);
        if min > 0 && actual < min {
            violations.push(Violation::TooFew { class, min, actual });
        }
    }

    ValidationReport {
        valid: violations.is_empty(),
        violations,
    }
}

/// Whether `candidate` case-insensitively contains, or is contained in, any
/// denylist entry.
///
/// Advisory only: generation never rejects on this, but callers should
/// surface a hit as a warning. Empty candidates and empty entries never
/// match.
pub fn is_common_secret<I, S>(candidate: &str, denylist: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if candidate.is_empty() {
        return false;
    }
    let candidate = candidate.to_lowercase();
    denylist.into_iter().any(|entry| {
        let entry = entry.as_ref().to_lowercase();
        !entry.is_empty() && (candidate.contains(&entry) || entry.contains(&candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> RequirementsPolicy {
        RequirementsPolicy {
            min_length: 8,
            max_length: 64,
            require_upper: true,
            require_lower: true,
            require_digit: true,
            require_symbol: true,
            ..RequirementsPolicy::default()
        }
    }

    #[test]
    fn compliant_candidate_is_valid() {
        let report = validate("Tr0ub4dor&3x", &strict());
        assert!(report.valid, "{:?}", report.violations);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn collects_every_violation_in_order() {
        let report = validate("abc", &strict());
        assert!(!report.valid);
        assert_eq!(
            report.violations,
            vec![
                Violation::TooShort { min: 8, actual: 3 },
                Violation::Missing {
                    class: CharClass::Upper
                },
                Violation::Missing {
                    class: CharClass::Digit
                },
                Violation::Missing {
                    class: CharClass::Symbol
                },
            ]
        );
    }

    #[test]
    fn minimum_counts_name_threshold() {
        let req = RequirementsPolicy {
            min_digit: 3,
            ..RequirementsPolicy::default()
        };
        let report = validate("abc12", &req);
        assert_eq!(
            report.violations,
            vec![Violation::TooFew {
                class: CharClass::Digit,
                min: 3,
                actual: 2
            }]
        );
        assert_eq!(
            report.violations[0].to_string(),
            "must contain at least 3 digits (has 2)"
        );
    }

    #[test]
    fn too_long_reported() {
        let req = RequirementsPolicy {
            max_length: 4,
            ..RequirementsPolicy::default()
        };
        let report = validate("abcdef", &req);
        assert_eq!(
            report.violations,
            vec![Violation::TooLong { max: 4, actual: 6 }]
        );
    }

    #[test]
    fn class_counts() {
        let counts = ClassCounts::of("aB3$ x");
        assert_eq!(counts.upper, 1);
        assert_eq!(counts.lower, 2);
        assert_eq!(counts.digit, 1);
        assert_eq!(counts.symbol, 2);
        assert_eq!(counts.present(), 4);
    }

    #[test]
    fn common_secret_contains_entry() {
        assert!(is_common_secret("Password123!", ["password"]));
        assert!(is_common_secret("xxQWERTYxx", COMMON_SECRETS));
    }

    #[test]
    fn common_secret_contained_in_entry() {
        assert!(is_common_secret("ASSW", ["password"]));
    }

    #[test]
    fn common_secret_misses() {
        assert!(!is_common_secret("k7#Vq!zR2m", COMMON_SECRETS));
        assert!(!is_common_secret("", ["password"]));
        assert!(!is_common_secret("abc", [""]));
    }

    #[test]
    fn violation_serializes_with_rule_tag() {
        let json = serde_json::to_value(Violation::Missing {
            class: CharClass::Symbol,
        })
        .unwrap();
        assert_eq!(json["rule"], "missing");
        assert_eq!(json["class"], "symbol");
    }
}
