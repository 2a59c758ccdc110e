//! Pronounceable consonant/vowel strings.

use zeroize::Zeroizing;

use super::wordlist::{CONSONANTS, VOWELS};
use crate::candidate::Candidate;
use crate::error::ForgeError;
use crate::policy::Strategy;
use crate::rng::SecureRandomSource;

/// Distinct characters this generator can emit: lowercase consonants and
/// vowels plus the capitalized leading consonant.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn pool_size() -> usize {
    CONSONANTS.len() * 2 + VOWELS.len()
}

/// Alternate consonants (even positions) and vowels (odd positions), then
/// capitalize the first character. Character class flags do not apply.
///
/// `nominal_alphabet_size` is recorded on the candidate for entropy
/// reporting under the nominal convention.
///
/// # Errors
///
/// Propagates [`ForgeError::RngUnavailable`] from the source.
#[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
pub fn generate_pronounceable<R: SecureRandomSource>(
    length: usize,
    nominal_alphabet_size: usize,
    rng: &mut R,
) -> Result<Candidate, ForgeError> {
    let mut value = Zeroizing::new(String::with_capacity(length));
    for i in 0..length {
        let pool = if i % 2 == 0 { CONSONANTS } else { VOWELS };
        let c = *rng.pick(pool)?;
        if i == 0 {
            value.extend(c.to_uppercase());
        } else {
            value.push(c);
        }
    }

    let consonant_slots = length.div_ceil(2);
    let vowel_slots = length / 2;
    let bits = consonant_slots as f64 * (CONSONANTS.len() as f64).log2()
        + vowel_slots as f64 * (VOWELS.len() as f64).log2();

    Ok(
        Candidate::new(value, Strategy::Pronounceable, nominal_alphabet_size, bits)
            .with_requested_length(length),
    )
}
