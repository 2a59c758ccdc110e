//! Built-in word list and syllable alphabets.
//!
//! The word list has exactly 256 entries so each drawn word contributes
//! 8 bits to a passphrase. Words are short, lowercase, and unambiguous when
//! read aloud.

/// Number of entries in [`WORDS`].
pub const WORD_COUNT: usize = 256;

/// Consonants used by the pronounceable generator.
pub const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];

/// Vowels used by the pronounceable generator.
pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Fixed word list for passphrase and pattern generation.
pub const WORDS: [&str; WORD_COUNT] = [
    "able", "acid", "also", "army", "away", "back", "band", "bank",
    "bath", "beat", "belt", "best", "blow", "boat", "body", "book",
    "born", "boss", "bowl", "burn", "busy", "cake", "calm", "card",
    "care", "case", "cast", "cell", "chip", "clay", "coal", "coat",
    "cold", "cool", "cope", "core", "cost", "crop", "dark", "date",
    "deal", "dear", "deck", "deer", "desk", "diet", "dock", "dose",
    "down", "drop", "dual", "duck", "duty", "earn", "ease", "easy",
    "else", "ever", "exit", "fact", "fall", "farm", "fear", "feel",
    "fill", "film", "fine", "firm", "fish", "flag", "flow", "folk",
    "foot", "fort", "free", "frog", "full", "gain", "game", "gear",
    "girl", "give", "glow", "gold", "good", "gray", "grow", "hair",
    "half", "hand", "harm", "hawk", "heat", "herb", "high", "hill",
    "hold", "home", "hood", "hope", "host", "huge", "hunt", "inch",
    "item", "jazz", "joke", "jury", "keen", "kick", "king", "knee",
    "knot", "lake", "land", "lane", "lawn", "leaf", "lean", "lens",
    "lift", "lime", "line", "lion", "live", "load", "lock", "long",
    "lord", "loud", "luck", "mail", "main", "mall", "mark", "mask",
    "meat", "mile", "mind", "mine", "miss", "moon", "more", "most",
    "much", "myth", "name", "near", "neck", "need", "news", "nice",
    "nine", "noon", "nose", "note", "oven", "pace", "page", "pain",
    "palm", "part", "pass", "peak", "pine", "pipe", "plan", "plot",
    "poem", "poet", "pond", "port", "pose", "pour", "pump", "push",
    "quiz", "rack", "rain", "rank", "rate", "real", "reef", "rice",
    "ride", "rise", "risk", "rock", "roof", "room", "rope", "ruby",
    "rush", "safe", "salt", "save", "seal", "seed", "sell", "ship",
    "shop", "show", "sign", "silk", "site", "skin", "slim", "snow",
    "sock", "soft", "song", "soul", "spin", "spot", "stay", "step",
    "stop", "sure", "swim", "tail", "talk", "tank", "task", "team",
    "term", "text", "tide", "time", "tone", "tour", "town", "trip",
    "tube", "tune", "twin", "unit", "upon", "verb", "vote", "wait",
    "wake", "wall", "wash", "wave", "week", "west", "wide", "wind",
    "wing", "wise", "wish", "wood", "word", "work", "year", "zero",
];

/// Title-case a word: first character uppercased, the rest untouched.
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn words_are_unique_lowercase_ascii() {
        let unique: HashSet<&str> = WORDS.iter().copied().collect();
        assert_eq!(unique.len(), WORD_COUNT);
        for word in WORDS {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "unexpected character in '{word}'"
            );
        }
    }

    #[test]
    fn syllable_alphabets_are_disjoint() {
        assert!(CONSONANTS.iter().all(|c| !VOWELS.contains(c)));
        assert_eq!(CONSONANTS.len() + VOWELS.len(), 26);
    }

    #[test]
    fn title_case_handles_edges() {
        assert_eq!(title_case("river"), "River");
        assert_eq!(title_case("x"), "X");
        assert_eq!(title_case(""), "");
    }
}
