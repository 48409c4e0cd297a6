use crate::HeuristicVerdict;

/// Words typical of clickbait / sensational headlines. Matched as
/// lowercase substrings, reported in this order.
pub const SENSATIONAL_WORDS: &[&str] = &[
    "breaking",
    "shocking",
    "unbelievable",
    "you won't believe",
    "miracle",
    "exposed",
    "conspiracy",
    "hoax",
    "cover-up",
    "secret they",
];

/// Outlets whose mention counts as citing a reliable source.
pub const RELIABLE_SOURCES: &[&str] = &[
    "reuters",
    "associated press",
    "ap news",
    "bbc",
    "new york times",
    "nytimes",
    "washington post",
    "the guardian",
    "npr.org",
    "national public radio",
    "bloomberg",
    "nature.com",
    "who.int",
    "cdc.gov",
];

pub const SENSATIONAL_WEIGHT: u8 = 40;
pub const MISSING_SOURCE_WEIGHT: u8 = 30;
pub const CAPITALS_WEIGHT: u8 = 20;

/// Uppercase share above which the capitals rule fires.
pub const CAPITALS_RATIO: f64 = 0.20;

pub const MAX_SCORE: u8 = 100;

/// Score `text` against the fixed rule set. Pure: no I/O, no state.
pub fn score(text: &str) -> HeuristicVerdict {
    let lower = text.to_lowercase();

    let mut score: u32 = 0;
    let mut reasons: Vec<String> = vec![];

    let matched = sensational_matches(&lower);
    if !matched.is_empty() {
        score += SENSATIONAL_WEIGHT as u32;
        reasons.push(format!("sensational words: {}", matched.join(", ")));
    }

    if !cites_reliable_source(&lower) {
        score += MISSING_SOURCE_WEIGHT as u32;
        reasons.push("no reliable sources detected".to_string());
    }

    if capitals_ratio(text) > CAPITALS_RATIO {
        score += CAPITALS_WEIGHT as u32;
        reasons.push("excessive capitals".to_string());
    }

    HeuristicVerdict {
        score: score.min(MAX_SCORE as u32) as u8,
        reasons,
    }
}

/// Expects already-lowercased text.
fn sensational_matches(lower: &str) -> Vec<&'static str> {
    SENSATIONAL_WORDS
        .iter()
        .copied()
        .filter(|w| lower.contains(w))
        .collect()
}

fn cites_reliable_source(lower: &str) -> bool {
    RELIABLE_SOURCES.iter().any(|s| lower.contains(s))
}

/// Share of uppercase characters over all characters (0.0 for empty text).
pub fn capitals_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}
