//! Alphabet-sampling strategies: uniform, no-consecutive, no-repeated.

use zeroize::Zeroizing;

use crate::candidate::Candidate;
use crate::charset::Alphabet;
use crate::error::ForgeError;
use crate::policy::Strategy;
use crate::rng::SecureRandomSource;

/// Redraws allowed per position before a consecutive repeat is accepted.
pub const MAX_CONSECUTIVE_REDRAWS: u32 = 100;

#[allow(clippy::cast_precision_loss)]
fn log2(n: usize) -> f64 {
    if n > 1 {
        (n as f64).log2()
    } else {
        0.0
    }
}

/// `length` independent uniform picks from `alphabet`.
///
/// # Errors
///
/// Propagates [`ForgeError::RngUnavailable`] from the source.
#[allow(clippy::cast_precision_loss)]
pub fn generate_uniform<R: SecureRandomSource>(
    alphabet: &Alphabet,
    length: usize,
    rng: &mut R,
) -> Result<Candidate, ForgeError> {
    let mut value = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        value.push(*rng.pick(alphabet.symbols())?);
    }
    let bits = length as f64 * log2(alphabet.len());
    Ok(Candidate::new(value, Strategy::Uniform, alphabet.len(), bits).with_requested_length(length))
}

/// Uniform picks where no symbol equals the one before it.
///
/// A symbol equal to its predecessor is redrawn up to
/// [`MAX_CONSECUTIVE_REDRAWS`] times; after that the repeat is accepted so
/// generation always terminates. That fallback only triggers in practice for
/// a one-symbol alphabet, and it is logged when it happens.
///
/// # Errors
///
/// Propagates [`ForgeError::RngUnavailable`] from the source.
#[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
pub fn generate_no_consecutive<R: SecureRandomSource>(
    alphabet: &Alphabet,
    length: usize,
    rng: &mut R,
) -> Result<Candidate, ForgeError> {
    let symbols = alphabet.symbols();
    let mut value = Zeroizing::new(String::with_capacity(length));
    let mut previous: Option<char> = None;
    let mut forced = 0usize;

    for _ in 0..length {
        let mut next = *rng.pick(symbols)?;
        let mut redraws = 0;
        while Some(next) == previous && redraws < MAX_CONSECUTIVE_REDRAWS {
            next = *rng.pick(symbols)?;
            redraws += 1;
        }
        if Some(next) == previous {
            forced += 1;
        }
        value.push(next);
        previous = Some(next);
    }

    if forced > 0 {
        tracing::warn!(
            forced,
            alphabet_size = alphabet.len(),
            "accepted consecutive repeats after exhausting redraws"
        );
    }

    let k = alphabet.len();
    let bits = if length == 0 {
        0.0
    } else {
        log2(k) + (length - 1) as f64 * log2(k.saturating_sub(1))
    };
    Ok(
        Candidate::new(value, Strategy::NoConsecutive, k, bits)
            .with_requested_length(length),
    )
}

/// Uniform picks without replacement.
///
/// Stops early once every symbol has been used, so the candidate may be
/// shorter than `length`; check [`Candidate::is_truncated`].
///
/// # Errors
///
/// Propagates [`ForgeError::RngUnavailable`] from the source.
pub fn generate_no_repeated<R: SecureRandomSource>(
    alphabet: &Alphabet,
    length: usize,
    rng: &mut R,
) -> Result<Candidate, ForgeError> {
    let mut pool: Vec<char> = alphabet.symbols().to_vec();
    let mut value = Zeroizing::new(String::with_capacity(length.min(pool.len())));
    let mut bits = 0.0;

    for _ in 0..length {
        if pool.is_empty() {
            break;
        }
        bits += log2(pool.len());
        let idx = rng.below(pool.len())?;
        value.push(pool.swap_remove(idx));
    }

    Ok(
        Candidate::new(value, Strategy::NoRepeated, alphabet.len(), bits)
            .with_requested_length(length),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use std::collections::HashSet;

    fn alphabet(s: &str) -> Alphabet {
        Alphabet::from_symbols(s.chars()).unwrap()
    }

    #[test]
    fn uniform_has_requested_length_from_alphabet() {
        let abc = alphabet("abc");
        let mut rng = SeededRandom::new(1);
        let c = generate_uniform(&abc, 40, &mut rng).unwrap();
        assert_eq!(c.len(), 40);
        assert!(c.expose().chars().all(|ch| abc.contains(ch)));
        assert!(!c.is_truncated());
    }

    #[test]
    fn no_consecutive_never_repeats_neighbours() {
        let ab = alphabet("ab");
        let mut rng = SeededRandom::new(2);
        for _ in 0..50 {
            let c = generate_no_consecutive(&ab, 30, &mut rng).unwrap();
            let chars: Vec<char> = c.expose().chars().collect();
            assert!(chars.windows(2).all(|w| w[0] != w[1]), "{}", c.expose());
        }
    }

    #[test]
    fn no_consecutive_terminates_on_single_symbol() {
        let a = alphabet("a");
        let mut rng = SeededRandom::new(3);
        let c = generate_no_consecutive(&a, 5, &mut rng).unwrap();
        assert_eq!(c.expose(), "aaaaa");
    }

    #[test]
    fn no_repeated_uses_each_symbol_once() {
        let digits = alphabet("0123456789");
        let mut rng = SeededRandom::new(4);
        let c = generate_no_repeated(&digits, 8, &mut rng).unwrap();
        let unique: HashSet<char> = c.expose().chars().collect();
        assert_eq!(unique.len(), 8);
        assert!(!c.is_truncated());
    }

    #[test]
    fn no_repeated_stops_at_alphabet_size() {
        let abc = alphabet("abc");
        let mut rng = SeededRandom::new(5);
        let c = generate_no_repeated(&abc, 10, &mut rng).unwrap();
        assert_eq!(c.len(), 3);
        assert!(c.is_truncated());
        assert_eq!(c.requested_length(), Some(10));
    }

    #[test]
    fn structural_bits_shrink_under_constraints() {
        let ten = alphabet("0123456789");
        let mut rng = SeededRandom::new(6);
        let uniform = generate_uniform(&ten, 6, &mut rng).unwrap();
        let no_consec = generate_no_consecutive(&ten, 6, &mut rng).unwrap();
        let no_repeat = generate_no_repeated(&ten, 6, &mut rng).unwrap();
        assert!(uniform.structural_bits() > no_consec.structural_bits());
        assert!(no_consec.structural_bits() > no_repeat.structural_bits());
        // 10*9*8*7*6*5 = 151200
        assert!((no_repeat.structural_bits() - 151_200f64.log2()).abs() < 1e-9);
    }
}
