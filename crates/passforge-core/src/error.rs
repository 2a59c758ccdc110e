//! Error types for `passforge-core`.

use thiserror::Error;

use crate::validate::Violation;

/// Errors produced by alphabet construction, generation, and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// The policy selects no usable characters (no class enabled, or the
    /// exclusions removed every character of every selected class).
    #[error("policy selects no usable characters: enable a class or relax exclusions")]
    EmptyAlphabet,

    /// The retry budget ran out before a candidate met the requirements.
    ///
    /// Carries the violations of the *last* attempt for diagnostics.
    #[error(
        "requirements unsatisfiable after {attempts} attempts: {}",
        join_violations(.violations)
    )]
    RequirementsUnsatisfiable {
        /// Number of attempts made.
        attempts: u32,
        /// Violations reported by the final attempt.
        violations: Vec<Violation>,
    },

    /// The OS entropy source failed. Fatal, never retried.
    #[error("secure random source unavailable: {0}")]
    RngUnavailable(String),

    /// A no-repeat candidate ran out of distinct symbols before reaching
    /// the requested length.
    #[error("alphabet exhausted: requested {requested} distinct symbols, only {produced} available")]
    AlphabetExhausted {
        /// Requested candidate length.
        requested: usize,
        /// Length actually produced.
        produced: usize,
    },

    /// Generation policy parameters are out of range.
    #[error("invalid generation policy: {0}")]
    InvalidPolicy(String),

    /// Requirements policy is internally inconsistent.
    #[error("invalid requirements: {0}")]
    InvalidRequirements(String),

    /// Pattern template could not be parsed or resolved.
    #[error("invalid pattern template: {0}")]
    InvalidPattern(String),
}

impl ForgeError {
    /// Whether retrying the same operation can never help.
    ///
    /// Callers batching generation abort on fatal errors instead of
    /// recording them per candidate.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::RngUnavailable(_))
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharClass;

    #[test]
    fn unsatisfiable_lists_every_violation() {
        let err = ForgeError::RequirementsUnsatisfiable {
            attempts: 100,
            violations: vec![
                Violation::TooShort { min: 12, actual: 8 },
                Violation::Missing {
                    class: CharClass::Upper,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("after 100 attempts"));
        assert!(msg.contains("at least 12 characters"));
        assert!(msg.contains("uppercase"));
    }

    #[test]
    fn only_rng_failure_is_fatal() {
        assert!(ForgeError::RngUnavailable("boom".into()).is_fatal());
        assert!(!ForgeError::EmptyAlphabet.is_fatal());
        assert!(!ForgeError::AlphabetExhausted {
            requested: 10,
            produced: 4
        }
        .is_fatal());
    }
}
