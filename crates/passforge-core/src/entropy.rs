//! Entropy and brute-force crack-time estimation.
//!
//! The crack-time model assumes an attacker trying 10^9 guesses per second
//! against the full keyspace. It is an order-of-magnitude indicator, not a
//! cryptanalytic cost model.

use std::fmt;

use serde::{Serialize, Serializer};

/// Assumed attacker guess rate.
pub const GUESSES_PER_SECOND: f64 = 1e9;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;
const YEARS_BUCKET_LIMIT: f64 = 31_536_000_000.0;
const BILLION: f64 = 1e9;

/// Which alphabet size feeds the entropy computation.
///
/// `Nominal` uses the size of the policy alphabet regardless of strategy,
/// which overstates entropy for structured strategies (pattern, passphrase,
/// pronounceable, no-repeat). `Structural` uses the strategy's true
/// keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntropyConvention {
    #[default]
    Nominal,
    Structural,
}

/// Estimated time to exhaust the keyspace, bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrackTime {
    /// Less than one second.
    Instant,
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
    Days(u64),
    Years(u64),
    /// Anything from 1000 years upward, in billions of years.
    BillionYears(f64),
    /// Nothing to estimate (empty input).
    NotApplicable,
}

impl CrackTime {
    /// Bucket the time needed to try `2^bits` guesses.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_bits(bits: f64) -> Self {
        let seconds = bits.max(0.0).exp2() / GUESSES_PER_SECOND;
        if seconds < 1.0 {
            Self::Instant
        } else if seconds < MINUTE {
            Self::Seconds(seconds as u64)
        } else if seconds < HOUR {
            Self::Minutes((seconds / MINUTE) as u64)
        } else if seconds < DAY {
            Self::Hours((seconds / HOUR) as u64)
        } else if seconds < YEAR {
            Self::Days((seconds / DAY) as u64)
        } else if seconds < YEARS_BUCKET_LIMIT {
            Self::Years((seconds / YEAR) as u64)
        } else {
            Self::BillionYears(seconds / YEAR / BILLION)
        }
    }
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant => f.write_str("<1s"),
            Self::Seconds(n) => write!(f, "{n} seconds"),
            Self::Minutes(n) => write!(f, "{n} minutes"),
            Self::Hours(n) => write!(f, "{n} hours"),
            Self::Days(n) => write!(f, "{n} days"),
            Self::Years(n) => write!(f, "{n} years"),
            Self::BillionYears(n) if n.is_finite() => write!(f, "{n:.1} billion years"),
            Self::BillionYears(_) => f.write_str("∞ billion years"),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for CrackTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Bits of entropy and the derived crack-time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntropyResult {
    /// log2 of the keyspace size; never negative.
    pub bits: f64,
    pub estimated_crack_time: CrackTime,
}

impl EntropyResult {
    /// Result for empty input.
    pub const NOT_APPLICABLE: Self = Self {
        bits: 0.0,
        estimated_crack_time: CrackTime::NotApplicable,
    };
}

/// Estimate entropy of `candidate` drawn from `alphabet_size` symbols:
/// `bits = length * log2(alphabet_size)`, length counted in characters.
///
/// An empty candidate yields `0` bits and a `N/A` crack time. An alphabet
/// of size 0 or 1 carries no entropy.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_entropy(candidate: &str, alphabet_size: usize) -> EntropyResult {
    let length = candidate.chars().count();
    if length == 0 {
        return EntropyResult::NOT_APPLICABLE;
    }
    let per_symbol = if alphabet_size > 1 {
        (alphabet_size as f64).log2()
    } else {
        0.0
    };
    entropy_from_bits(length as f64 * per_symbol)
}

/// Wrap an already-computed bit count. Negative or NaN input is treated as
/// zero.
#[must_use]
pub fn entropy_from_bits(bits: f64) -> EntropyResult {
    let bits = if bits.is_nan() { 0.0 } else { bits.max(0.0) };
    EntropyResult {
        bits,
        estimated_crack_time: CrackTime::from_bits(bits),
    }
}
