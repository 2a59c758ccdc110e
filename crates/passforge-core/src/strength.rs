//! Qualitative strength breakdown for arbitrary secrets.
//!
//! Independent of any generation policy: works on caller-supplied strings
//! as well as generated candidates.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::charset::CharClass;
use crate::validate::ClassCounts;

/// Highest value of every sub-score.
pub const SUB_SCORE_MAX: u8 = 3;

/// Sequences flagged by the pattern check (case-insensitive).
pub const SEQUENTIAL_PATTERNS: &[&str] = &["123", "abc", "qwe"];

/// Length below which a longer secret is suggested.
const SUGGESTED_MIN_LENGTH: usize = 12;

/// Distinct/total ratio below which more variety is suggested.
const SUGGESTED_MIN_RATIO: f64 = 0.6;

/// One dimension of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScore {
    /// 0..=3.
    pub score: u8,
    pub max: u8,
    pub feedback: &'static str,
}

impl SubScore {
    const fn new(score: u8, feedback: &'static str) -> Self {
        Self {
            score,
            max: SUB_SCORE_MAX,
            feedback,
        }
    }
}

/// Improvement advice, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suggestion {
    IncreaseLength,
    AddUppercase,
    AddLowercase,
    AddDigits,
    AddSymbols,
    IncreaseComplexity,
    AvoidRepeats,
    AvoidSequences,
    MixCase,
    /// Emitted alone when nothing else applies.
    NoneNeeded,
}

impl Suggestion {
    const fn for_missing(class: CharClass) -> Self {
        match class {
            CharClass::Upper => Self::AddUppercase,
            CharClass::Lower => Self::AddLowercase,
            CharClass::Digit => Self::AddDigits,
            CharClass::Symbol => Self::AddSymbols,
        }
    }

    /// User-facing text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::IncreaseLength => "Increase length to at least 12 characters",
            Self::AddUppercase => "Add uppercase letters",
            Self::AddLowercase => "Add lowercase letters",
            Self::AddDigits => "Add digits",
            Self::AddSymbols => "Add symbols",
            Self::IncreaseComplexity => "Increase complexity with more distinct characters",
            Self::AvoidRepeats => "Avoid repeating a character three or more times in a row",
            Self::AvoidSequences => "Avoid sequential patterns like 123, abc or qwe",
            Self::MixCase => "Mix uppercase and lowercase letters",
            Self::NoneNeeded => "Strong password: no improvements needed",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Overall rating derived from the summed sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }
}

/// Four sub-scores plus ordered, de-duplicated suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthBreakdown {
    pub length: SubScore,
    pub variety: SubScore,
    pub complexity: SubScore,
    pub patterns: SubScore,
    pub suggestions: Vec<Suggestion>,
}

impl StrengthBreakdown {
    /// Sum of the sub-scores, 0..=12.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn total(&self) -> u8 {
        self.length.score + self.variety.score + self.complexity.score + self.patterns.score
    }

    #[must_use]
    pub const fn label(&self) -> StrengthLabel {
        match self.total() {
            0..=4 => StrengthLabel::Weak,
            5..=7 => StrengthLabel::Fair,
            8..=10 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

fn length_score(length: usize) -> SubScore {
    match length {
        16.. => SubScore::new(3, "Excellent length"),
        12..=15 => SubScore::new(2, "Good length"),
        8..=11 => SubScore::new(1, "Acceptable length, longer is better"),
        _ => SubScore::new(0, "Too short"),
    }
}

fn variety_score(classes: usize) -> SubScore {
    match classes {
        4.. => SubScore::new(3, "Uses all character types"),
        3 => SubScore::new(2, "Uses three character types"),
        2 => SubScore::new(1, "Uses two character types"),
        _ => SubScore::new(0, "Uses a single character type"),
    }
}

fn complexity_score(ratio: f64) -> SubScore {
    if ratio >= 0.8 {
        SubScore::new(3, "Highly varied characters")
    } else if ratio >= SUGGESTED_MIN_RATIO {
        SubScore::new(2, "Varied characters")
    } else if ratio >= 0.4 {
        SubScore::new(1, "Some repeated characters")
    } else {
        SubScore::new(0, "Many repeated characters")
    }
}

fn has_triple_repeat(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn has_sequence(secret: &str) -> bool {
    let lower = secret.to_lowercase();
    SEQUENTIAL_PATTERNS.iter().any(|p| lower.contains(p))
}

fn is_single_case(secret: &str) -> bool {
    !secret.is_empty()
        && (secret.chars().all(|c| c.is_ascii_lowercase())
            || secret.chars().all(|c| c.is_ascii_uppercase()))
}

/// Score `secret` on length, character variety, complexity and patterns.
///
/// Suggestions come in a fixed order: length, missing classes (upper,
/// lower, digit, symbol), complexity, then pattern issues. When none
/// applies the list holds exactly [`Suggestion::NoneNeeded`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_strength(secret: &str) -> StrengthBreakdown {
    let chars: Vec<char> = secret.chars().collect();
    let length = chars.len();
    let counts = ClassCounts::of(secret);

    let distinct = chars.iter().collect::<HashSet<_>>().len();
    let ratio = if length == 0 {
        0.0
    } else {
        distinct as f64 / length as f64
    };

    let repeats = has_triple_repeat(&chars);
    let sequence = has_sequence(secret);
    let single_case = is_single_case(secret);
    let penalties = [repeats, sequence, single_case]
        .iter()
        .filter(|hit| **hit)
        .count();
    let pattern_score = SUB_SCORE_MAX.saturating_sub(u8::try_from(penalties).unwrap_or(u8::MAX));
    let patterns = match pattern_score {
        3 => SubScore::new(3, "No common patterns detected"),
        2 => SubScore::new(2, "One common pattern detected"),
        1 => SubScore::new(1, "Several common patterns detected"),
        _ => SubScore::new(0, "Dominated by common patterns"),
    };

    let mut suggestions = Vec::new();
    let mut suggest = |s: Suggestion| {
        if !suggestions.contains(&s) {
            suggestions.push(s);
        }
    };
    if length < SUGGESTED_MIN_LENGTH {
        suggest(Suggestion::IncreaseLength);
    }
    for class in CharClass::ALL {
        if counts.get(class) == 0 {
            suggest(Suggestion::for_missing(class));
        }
    }
    if ratio < SUGGESTED_MIN_RATIO {
        suggest(Suggestion::IncreaseComplexity);
    }
    if repeats {
        suggest(Suggestion::AvoidRepeats);
    }
    if sequence {
        suggest(Suggestion::AvoidSequences);
    }
    if single_case {
        suggest(Suggestion::MixCase);
    }
    if suggestions.is_empty() {
        suggestions.push(Suggestion::NoneNeeded);
    }

    StrengthBreakdown {
        length: length_score(length),
        variety: variety_score(counts.present()),
        complexity: complexity_score(ratio),
        patterns,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lowercase_scores_low() {
        let b = score_strength("zxmvnbq");
        assert_eq!(b.length.score, 0);
        assert_eq!(b.variety.score, 0);
        assert_eq!(b.complexity.score, 3);
        // single case
        assert_eq!(b.patterns.score, 2);
        assert_eq!(
            b.suggestions,
            vec![
                Suggestion::IncreaseLength,
                Suggestion::AddUppercase,
                Suggestion::AddDigits,
                Suggestion::AddSymbols,
                Suggestion::MixCase,
            ]
        );
    }

    #[test]
    fn length_thresholds() {
        assert_eq!(length_score(7).score, 0);
        assert_eq!(length_score(8).score, 1);
        assert_eq!(length_score(12).score, 2);
        assert_eq!(length_score(16).score, 3);
    }

    #[test]
    fn variety_counts_classes() {
        assert_eq!(score_strength("ab").variety.score, 0);
        assert_eq!(score_strength("aB").variety.score, 1);
        assert_eq!(score_strength("aB3").variety.score, 2);
        assert_eq!(score_strength("aB3$").variety.score, 3);
    }

    #[test]
    fn complexity_thresholds() {
        // 10 chars, 4 distinct → 0.4
        assert_eq!(score_strength("aaabbbccdd").complexity.score, 1);
        // 10 chars, 3 distinct → 0.3
        assert_eq!(score_strength("aaaabbbccc").complexity.score, 0);
        // 5 chars, 3 distinct → 0.6
        assert_eq!(score_strength("aabbc").complexity.score, 2);
    }

    #[test]
    fn every_pattern_costs_one_point() {
        // repeat + sequence + single case
        let b = score_strength("aaaabc");
        assert_eq!(b.patterns.score, 0);
        let tail: Vec<Suggestion> = b.suggestions.iter().rev().take(3).rev().copied().collect();
        assert_eq!(
            tail,
            vec![
                Suggestion::AvoidRepeats,
                Suggestion::AvoidSequences,
                Suggestion::MixCase
            ]
        );
    }

    #[test]
    fn sequences_are_case_insensitive() {
        assert!(has_sequence("xxQWEyy"));
        assert!(has_sequence("A1bC123"));
        assert!(!has_sequence("a1b2c3"));
    }

    #[test]
    fn mixed_content_is_not_single_case() {
        assert!(is_single_case("ABCD"));
        assert!(!is_single_case("abc1"));
        assert!(!is_single_case(""));
    }

    #[test]
    fn strong_secret_gets_single_affirmation() {
        let b = score_strength("k7#Vq!zR2m@Lp9&W");
        assert_eq!(b.total(), 12);
        assert_eq!(b.label(), StrengthLabel::Strong);
        assert_eq!(b.suggestions, vec![Suggestion::NoneNeeded]);
    }

    #[test]
    fn empty_secret_does_not_panic() {
        let b = score_strength("");
        assert_eq!(b.total(), 3);
        assert_eq!(b.suggestions[0], Suggestion::IncreaseLength);
        assert!(b.suggestions.contains(&Suggestion::IncreaseComplexity));
    }

    fn breakdown_totalling(scores: [u8; 4]) -> StrengthBreakdown {
        StrengthBreakdown {
            length: SubScore::new(scores[0], ""),
            variety: SubScore::new(scores[1], ""),
            complexity: SubScore::new(scores[2], ""),
            patterns: SubScore::new(scores[3], ""),
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn label_boundaries() {
        let cases = [
            ([1, 1, 1, 1], 4, StrengthLabel::Weak),
            ([2, 1, 1, 1], 5, StrengthLabel::Fair),
            ([3, 2, 1, 1], 7, StrengthLabel::Fair),
            ([3, 2, 2, 1], 8, StrengthLabel::Good),
            ([3, 3, 3, 1], 10, StrengthLabel::Good),
            ([3, 3, 3, 2], 11, StrengthLabel::Strong),
        ];
        for (scores, total, label) in cases {
            let b = breakdown_totalling(scores);
            assert_eq!(b.total(), total);
            assert_eq!(b.label(), label, "total {total}");
        }
    }

    #[test]
    fn common_word_lands_in_fair() {
        // 8 chars, 7 distinct, lowercase only
        let b = score_strength("password");
        assert_eq!(
            [b.length.score, b.variety.score, b.complexity.score, b.patterns.score],
            [1, 0, 3, 2]
        );
        assert_eq!(b.label(), StrengthLabel::Fair);
    }

    #[test]
    fn suggestions_serialize_as_messages() {
        let json = serde_json::to_value(score_strength("abc")).unwrap();
        assert_eq!(json["length"]["max"], 3);
        assert!(json["suggestions"][0]
            .as_str()
            .unwrap()
            .starts_with("Increase length"));
    }
}
