//! Injectable secure randomness.
//!
//! Every generator draws through [`SecureRandomSource`] so production code
//! uses the OS CSPRNG ([`OsRandom`]) while tests can substitute a seeded,
//! reproducible source ([`SeededRandom`]).

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::error::ForgeError;

/// Consecutive rejections tolerated by [`SecureRandomSource::below`] before
/// the source is declared degenerate. A healthy source rejects with
/// probability < 1/2 per draw, so 64 in a row is ~2^-64.
const MAX_REJECTIONS: u32 = 64;

/// A source of uniformly distributed 32-bit words.
///
/// Implementations must be cryptographically secure in production. Failure
/// to obtain entropy is reported as [`ForgeError::RngUnavailable`]; an
/// implementation must never silently fall back to a weaker generator.
pub trait SecureRandomSource {
    /// Next uniformly distributed 32-bit word.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::RngUnavailable`] if the entropy source fails.
    fn next_u32(&mut self) -> Result<u32, ForgeError>;

    /// Uniform index in `0..bound`, free of modulo bias.
    ///
    /// Uses rejection sampling: draws below `2^32 mod bound` are discarded
    /// so every residue class is equally likely.
    ///
    /// # Errors
    ///
    /// - [`ForgeError::EmptyAlphabet`] if `bound` is zero.
    /// - [`ForgeError::InvalidPolicy`] if `bound` exceeds `u32::MAX`.
    /// - [`ForgeError::RngUnavailable`] if the source fails or keeps
    ///   producing rejected values.
    #[allow(clippy::arithmetic_side_effects)]
    fn below(&mut self, bound: usize) -> Result<usize, ForgeError> {
        if bound == 0 {
            return Err(ForgeError::EmptyAlphabet);
        }
        let bound = u32::try_from(bound).map_err(|_| {
            ForgeError::InvalidPolicy(format!("sampling range {bound} exceeds 32 bits"))
        })?;

        // 2^32 mod bound, computed without 64-bit arithmetic.
        let threshold = bound.wrapping_neg() % bound;
        for _ in 0..MAX_REJECTIONS {
            let word = self.next_u32()?;
            if word >= threshold {
                return Ok((word % bound) as usize);
            }
        }
        Err(ForgeError::RngUnavailable(
            "random source produced degenerate output".to_string(),
        ))
    }

    /// Uniformly pick one element of `items`.
    ///
    /// # Errors
    ///
    /// Same as [`below`](Self::below); an empty slice yields
    /// [`ForgeError::EmptyAlphabet`].
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, ForgeError>
    where
        Self: Sized,
    {
        let idx = self.below(items.len())?;
        items.get(idx).ok_or(ForgeError::EmptyAlphabet)
    }
}

/// The operating system CSPRNG.
///
/// Zero-sized and stateless: each call reads fresh bytes from the OS, so a
/// value can be created per call and shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn next_u32(&mut self) -> Result<u32, ForgeError> {
        let mut buf = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| ForgeError::RngUnavailable(e.to_string()))?;
        Ok(u32::from_le_bytes(buf))
    }
}

/// Deterministic source seeded from a `u64`.
///
/// Reproducible output for tests and fixtures. Never use it to produce real
/// secrets: anyone who knows the seed knows the output.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    /// Create a source that always yields the same sequence for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl SecureRandomSource for SeededRandom {
    fn next_u32(&mut self) -> Result<u32, ForgeError> {
        Ok(self.0.next_u32())
    }
}
