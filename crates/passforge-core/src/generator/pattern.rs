//! Template-driven generation such as `word-number-symbol`.

use std::collections::HashSet;
use std::str::FromStr;

use zeroize::Zeroizing;

use super::wordlist::{title_case, WORDS, WORD_COUNT};
use crate::candidate::Candidate;
use crate::charset::{class_symbols, CharClass};
use crate::error::ForgeError;
use crate::policy::Strategy;
use crate::rng::SecureRandomSource;

/// Characters accepted between template tokens.
pub const TEMPLATE_SEPARATORS: &[char] = &['-', '_', ' ', ',', '+', '/', '.'];

const NUMBER_MIN: u32 = 1000;
const NUMBER_SPAN: usize = 9000;

/// One element of a pattern template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternToken {
    /// Title-cased word from the word list.
    Word,
    /// Four-digit number in `1000..=9999`.
    Number,
    Upper,
    Lower,
    Symbol,
}

impl FromStr for PatternToken {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "number" => Ok(Self::Number),
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "symbol" => Ok(Self::Symbol),
            other => Err(ForgeError::InvalidPattern(format!(
                "unknown token '{other}'. Expected one of: word, number, upper, lower, symbol."
            ))),
        }
    }
}

/// Split a template into tokens.
///
/// # Errors
///
/// Returns [`ForgeError::InvalidPattern`] for an unknown token or a
/// template with no tokens.
pub fn parse_template(template: &str) -> Result<Vec<PatternToken>, ForgeError> {
    let tokens = template
        .split(TEMPLATE_SEPARATORS)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<PatternToken>, _>>()?;
    if tokens.is_empty() {
        return Err(ForgeError::InvalidPattern(
            "template contains no tokens".to_string(),
        ));
    }
    Ok(tokens)
}

/// Tokens of a template resolved against the policy's exclusions.
#[derive(Debug, Clone)]
pub struct PatternPlan {
    tokens: Vec<PatternToken>,
    upper: Vec<char>,
    lower: Vec<char>,
    symbol: Vec<char>,
}

impl PatternPlan {
    /// Resolve `tokens`, applying the similar/ambiguous exclusions to the
    /// single-character classes.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidPattern`] if a token's class has no
    /// members left after exclusions.
    pub fn new(
        tokens: Vec<PatternToken>,
        exclude_similar: bool,
        exclude_ambiguous: bool,
    ) -> Result<Self, ForgeError> {
        let plan = Self {
            tokens,
            upper: class_symbols(CharClass::Upper, exclude_similar, exclude_ambiguous),
            lower: class_symbols(CharClass::Lower, exclude_similar, exclude_ambiguous),
            symbol: class_symbols(CharClass::Symbol, exclude_similar, exclude_ambiguous),
        };
        for token in &plan.tokens {
            if plan.class_pool(*token).is_some_and(<[char]>::is_empty) {
                return Err(ForgeError::InvalidPattern(format!(
                    "no characters left for token {token:?} after exclusions"
                )));
            }
        }
        Ok(plan)
    }

    fn class_pool(&self, token: PatternToken) -> Option<&[char]> {
        match token {
            PatternToken::Upper => Some(&self.upper),
            PatternToken::Lower => Some(&self.lower),
            PatternToken::Symbol => Some(&self.symbol),
            PatternToken::Word | PatternToken::Number => None,
        }
    }

    /// Distinct characters the template can produce.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        let mut pool = HashSet::new();
        for token in &self.tokens {
            match token {
                PatternToken::Word => {
                    for word in WORDS {
                        pool.extend(title_case(word).chars());
                        pool.extend(word.chars());
                    }
                }
                PatternToken::Number => pool.extend('0'..='9'),
                other => pool.extend(self.class_pool(*other).unwrap_or_default()),
            }
        }
        pool.len()
    }

    /// True keyspace of the template in bits.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn structural_bits(&self) -> f64 {
        self.tokens
            .iter()
            .map(|token| match token {
                PatternToken::Word => (WORD_COUNT as f64).log2(),
                PatternToken::Number => (NUMBER_SPAN as f64).log2(),
                other => (self.class_pool(*other).map_or(1, <[char]>::len) as f64).log2(),
            })
            .sum()
    }

    /// Produce one candidate: the concatenation of every token's output,
    /// without separators.
    ///
    /// # Errors
    ///
    /// Propagates [`ForgeError::RngUnavailable`] from the source.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn generate<R: SecureRandomSource>(
        &self,
        nominal_alphabet_size: usize,
        rng: &mut R,
    ) -> Result<Candidate, ForgeError> {
        let mut value = Zeroizing::new(String::new());
        for token in &self.tokens {
            match token {
                PatternToken::Word => value.push_str(&title_case(rng.pick(&WORDS)?)),
                PatternToken::Number => {
                    // below() < 9000 fits in u32.
                    let offset = u32::try_from(rng.below(NUMBER_SPAN)?).unwrap_or_default();
                    value.push_str(&(NUMBER_MIN + offset).to_string());
                }
                other => {
                    let pool = self.class_pool(*other).unwrap_or_default();
                    value.push(*rng.pick(pool)?);
                }
            }
        }
        Ok(Candidate::new(
            value,
            Strategy::Pattern,
            nominal_alphabet_size,
            self.structural_bits(),
        ))
    }
}
