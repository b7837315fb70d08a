//! Word-level phrase matching
//!
//! Keyword tables in this crate are matched against a normalized word
//! sequence rather than raw substrings, so "cancel" never matches inside
//! "cancellation" and punctuation never splits a phrase.

use unicode_segmentation::UnicodeSegmentation;

/// Lowercased words of `text`, punctuation dropped
///
/// Typographic apostrophes are folded to `'` so "don’t" matches "don't".
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.to_lowercase().replace('\u{2019}', "'"))
        .collect()
}

/// Space-joined, space-padded word sequence: `" yes submit loan "`
pub fn normalize(text: &str) -> String {
    let joined = words(text).join(" ");
    format!(" {} ", joined)
}

/// Whether the normalized text contains `phrase` on word boundaries
///
/// `normalized` must come from [`normalize`]; `phrase` is plain lowercase
/// words separated by single spaces.
pub fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {} ", phrase))
}

/// Whether any phrase of the table occurs in the text
pub fn contains_any(normalized: &str, table: &[&str]) -> bool {
    table.iter().any(|phrase| contains_phrase(normalized, phrase))
}

/// Whether the text has no letters or digits at all
pub fn is_punctuation_only(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// Hedging vocabulary that makes a numeric answer inexact
pub const HEDGE_PHRASES: &[&str] = &[
    "about",
    "around",
    "maybe",
    "roughly",
    "approximately",
    "approx",
    "probably",
    "perhaps",
    "somewhere",
    "something like",
    "or so",
    "give or take",
    "i think",
    "i guess",
    "not sure",
    "ish",
];

/// Whether the answer hedges ("about 5000", "maybe ten percent")
pub fn is_hedged(text: &str) -> bool {
    contains_any(&normalize(text), HEDGE_PHRASES)
}

const MONTH_WORDS: &[&str] = &["month", "months", "mo", "mos", "monthly"];
const YEAR_WORDS: &[&str] = &["year", "years", "yr", "yrs"];

/// Whether the answer is phrased in months
pub fn mentions_months(text: &str) -> bool {
    contains_any(&normalize(text), MONTH_WORDS)
}

/// Whether the answer is phrased in years
pub fn mentions_years(text: &str) -> bool {
    contains_any(&normalize(text), YEAR_WORDS)
}
