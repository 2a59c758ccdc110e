//! Generation strategies.
//!
//! Six strategies share one contract: given a policy and a
//! [`SecureRandomSource`], produce a [`Candidate`]. [`Generator`] resolves
//! the policy once (alphabet, pattern tokens) and then dispatches to the
//! strategy on every call, so the retry loop does no repeated setup.

pub mod passphrase;
pub mod pattern;
pub mod pronounceable;
pub mod sampling;
pub mod wordlist;

pub use passphrase::generate_passphrase;
pub use pattern::{parse_template, PatternPlan, PatternToken};
pub use pronounceable::generate_pronounceable;
pub use sampling::{generate_no_consecutive, generate_no_repeated, generate_uniform};

use crate::candidate::Candidate;
use crate::charset::{build_alphabet, Alphabet};
use crate::error::ForgeError;
use crate::policy::{GenerationPolicy, Strategy};
use crate::rng::SecureRandomSource;

#[derive(Debug, Clone)]
enum Plan {
    Sampled { alphabet: Alphabet, length: usize },
    Pattern(PatternPlan),
    Passphrase { word_count: usize, separator: char },
    Pronounceable { length: usize },
}

/// A policy resolved into a ready-to-run strategy.
#[derive(Debug, Clone)]
pub struct Generator {
    strategy: Strategy,
    plan: Plan,
    nominal_alphabet_size: usize,
}

impl Generator {
    /// Resolve `policy`.
    ///
    /// Sampling strategies (uniform, no-consecutive, no-repeated) need a
    /// non-empty alphabet. Structured strategies ignore class flags, so
    /// when the policy alphabet is empty their nominal alphabet size falls
    /// back to the set of characters the strategy itself can emit.
    ///
    /// # Errors
    ///
    /// - [`ForgeError::InvalidPolicy`] / [`ForgeError::InvalidPattern`] if
    ///   the policy fails [`GenerationPolicy::check`] or its template does
    ///   not parse.
    /// - [`ForgeError::EmptyAlphabet`] if a sampling strategy has no
    ///   usable characters.
    pub fn from_policy(policy: &GenerationPolicy) -> Result<Self, ForgeError> {
        policy.check()?;
        let alphabet = build_alphabet(policy);

        let (plan, fallback_pool) = match policy.strategy {
            Strategy::Uniform | Strategy::NoConsecutive | Strategy::NoRepeated => {
                let alphabet = alphabet.clone()?;
                let size = alphabet.len();
                (
                    Plan::Sampled {
                        alphabet,
                        length: policy.length,
                    },
                    size,
                )
            }
            Strategy::Pattern => {
                let template = policy.pattern_template.as_deref().unwrap_or_default();
                let plan = PatternPlan::new(
                    parse_template(template)?,
                    policy.exclude_similar,
                    policy.exclude_ambiguous,
                )?;
                let pool = plan.pool_size();
                (Plan::Pattern(plan), pool)
            }
            Strategy::Passphrase => {
                let separator = policy.separator();
                (
                    Plan::Passphrase {
                        word_count: policy.word_count(),
                        separator,
                    },
                    passphrase::pool_size(separator),
                )
            }
            Strategy::Pronounceable => (
                Plan::Pronounceable {
                    length: policy.length,
                },
                pronounceable::pool_size(),
            ),
        };

        let nominal_alphabet_size = alphabet.map_or(fallback_pool, |a| a.len());
        Ok(Self {
            strategy: policy.strategy,
            plan,
            nominal_alphabet_size,
        })
    }

    /// Strategy this generator runs.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Alphabet size recorded on candidates (nominal convention).
    #[must_use]
    pub const fn nominal_alphabet_size(&self) -> usize {
        self.nominal_alphabet_size
    }

    /// Produce one candidate.
    ///
    /// # Errors
    ///
    /// Propagates [`ForgeError::RngUnavailable`] from the source.
    pub fn generate<R: SecureRandomSource>(&self, rng: &mut R) -> Result<Candidate, ForgeError> {
        match &self.plan {
            Plan::Sampled { alphabet, length } => match self.strategy {
                Strategy::NoConsecutive => generate_no_consecutive(alphabet, *length, rng),
                Strategy::NoRepeated => generate_no_repeated(alphabet, *length, rng),
                _ => generate_uniform(alphabet, *length, rng),
            },
            Plan::Pattern(plan) => plan.generate(self.nominal_alphabet_size, rng),
            Plan::Passphrase {
                word_count,
                separator,
            } => generate_passphrase(*word_count, *separator, self.nominal_alphabet_size, rng),
            Plan::Pronounceable { length } => {
                generate_pronounceable(*length, self.nominal_alphabet_size, rng)
            }
        }
    }
}
