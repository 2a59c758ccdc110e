//! Word-based passphrases.

use std::collections::HashSet;

use zeroize::Zeroizing;

use super::wordlist::{WORDS, WORD_COUNT};
use crate::candidate::Candidate;
use crate::error::ForgeError;
use crate::policy::Strategy;
use crate::rng::SecureRandomSource;

/// Distinct characters a passphrase can contain: the letters of the word
/// list plus the separator.
#[must_use]
pub fn pool_size(separator: char) -> usize {
    WORDS
        .iter()
        .flat_map(|w| w.chars())
        .chain(std::iter::once(separator))
        .collect::<HashSet<char>>()
        .len()
}

/// Join `word_count` independently drawn words (repeats allowed) with
/// `separator`.
///
/// # Errors
///
/// Propagates [`ForgeError::RngUnavailable`] from the source.
#[allow(clippy::cast_precision_loss)]
pub fn generate_passphrase<R: SecureRandomSource>(
    word_count: usize,
    separator: char,
    nominal_alphabet_size: usize,
    rng: &mut R,
) -> Result<Candidate, ForgeError> {
    let mut value = Zeroizing::new(String::new());
    for i in 0..word_count {
        if i > 0 {
            value.push(separator);
        }
        value.push_str(rng.pick(&WORDS)?);
    }
    let bits = word_count as f64 * (WORD_COUNT as f64).log2();
    Ok(Candidate::new(
        value,
        Strategy::Passphrase,
        nominal_alphabet_size,
        bits,
    ))
}
