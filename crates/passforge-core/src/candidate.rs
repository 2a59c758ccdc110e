//! Generated secrets.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

use crate::entropy::{entropy_from_bits, estimate_entropy, EntropyConvention, EntropyResult};
use crate::policy::Strategy;

/// One generated secret plus what is needed to reason about its strength.
///
/// The value is wiped from memory on drop. `Debug` masks it so a candidate
/// can be logged without leaking the secret.
#[derive(Clone)]
pub struct Candidate {
    value: Zeroizing<String>,
    strategy: Strategy,
    alphabet_size: usize,
    requested_length: Option<usize>,
    structural_bits: f64,
}

impl Candidate {
    pub(crate) fn new(
        value: Zeroizing<String>,
        strategy: Strategy,
        alphabet_size: usize,
        structural_bits: f64,
    ) -> Self {
        Self {
            value,
            strategy,
            alphabet_size,
            requested_length: None,
            structural_bits,
        }
    }

    pub(crate) const fn with_requested_length(mut self, length: usize) -> Self {
        self.requested_length = Some(length);
        self
    }

    /// The secret itself.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Strategy that produced the candidate.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Nominal alphabet size: the size of the policy alphabet in effect when
    /// the candidate was generated.
    #[must_use]
    pub const fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Length the caller asked for, for strategies that take one.
    #[must_use]
    pub const fn requested_length(&self) -> Option<usize> {
        self.requested_length
    }

    /// `true` when the generator stopped short of the requested length
    /// (no-repeat generation over a too-small alphabet).
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.requested_length.is_some_and(|n| self.len() < n)
    }

    /// True keyspace of the producing strategy, in bits.
    #[must_use]
    pub const fn structural_bits(&self) -> f64 {
        self.structural_bits
    }

    /// Entropy under the chosen convention.
    #[must_use]
    pub fn entropy(&self, convention: EntropyConvention) -> EntropyResult {
        if self.is_empty() {
            return EntropyResult::NOT_APPLICABLE;
        }
        match convention {
            EntropyConvention::Nominal => estimate_entropy(&self.value, self.alphabet_size),
            EntropyConvention::Structural => entropy_from_bits(self.structural_bits),
        }
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("value", &"***")
            .field("strategy", &self.strategy)
            .field("alphabet_size", &self.alphabet_size)
            .field("requested_length", &self.requested_length)
            .finish_non_exhaustive()
    }
}

/// Serializes the value in clear; only do this at an output boundary.
impl Serialize for Candidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Candidate", 4)?;
        s.serialize_field("value", self.value.as_str())?;
        s.serialize_field("strategy", &self.strategy)?;
        s.serialize_field("alphabetSize", &self.alphabet_size)?;
        s.serialize_field("structuralBits", &self.structural_bits)?;
        s.end()
    }
}
