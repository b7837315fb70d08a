//! Typed value extraction from user utterances
//!
//! Two extractors back the interpreter:
//! - `extract_number`: digits with separators, `$`, `k`/`thousand`/`grand`
//!   multipliers, negatives, and spelled-out English numbers
//! - `extract_yes_no`: a boolean from affirmative or negative vocabulary
//!
//! Both return `None` when the utterance is ambiguous: two different
//! numbers, or both a "yes" and a "no".
//!
//! ## Static Regex Patterns
//!
//! Patterns are compiled once at program start using `once_cell::sync::Lazy`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::english::parse_number_runs;
use crate::phrases::{contains_any, normalize, words};

/// Amount multiplier for parsing
#[derive(Debug, Clone, Copy)]
enum AmountMultiplier {
    Unit,
    Thousand,
    Million,
}

impl AmountMultiplier {
    fn from_suffix(suffix: Option<&str>) -> Self {
        match suffix.map(str::to_lowercase).as_deref() {
            Some("k") | Some("thousand") | Some("grand") => AmountMultiplier::Thousand,
            Some("million") | Some("mm") => AmountMultiplier::Million,
            _ => AmountMultiplier::Unit,
        }
    }

    fn value(&self) -> f64 {
        match self {
            AmountMultiplier::Unit => 1.0,
            AmountMultiplier::Thousand => 1_000.0,
            AmountMultiplier::Million => 1_000_000.0,
        }
    }
}

// Plan names contain digits that are never answers ("401k", "401(k)", "403b")
static PLAN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b40[13]\s*\(?\s*[kb]\s*\)?").unwrap());

// Signed number with optional currency, separators and multiplier
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<sign>-|\bminus\s+|\bnegative\s+)?\$?\s*(?P<digits>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)(?:\s*(?P<mult>k|thousand|grand|million|mm)\b)?",
    )
    .unwrap()
});

const NEGATIVE_WORDS: &[&str] = &["minus", "negative"];

const UNSURE_PHRASES: &[&str] = &[
    "not sure",
    "unsure",
    "maybe",
    "i don't know",
    "i dont know",
    "don't know",
    "dont know",
    "no idea",
];

const YES_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yea",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "correct",
    "right",
    "absolutely",
    "definitely",
    "affirmative",
    "continue",
    "proceed",
    "go ahead",
    "sounds good",
    "looks good",
    "of course",
    "let's do it",
    "lets do it",
    "please do",
];

/// Agreement phrased with a negation; these win over `NO_PHRASES`
const AFFIRMATIVE_IDIOMS: &[&str] = &[
    "why not",
    "don't mind",
    "dont mind",
    "do not mind",
    "not a problem",
    "no problem",
    "no worries",
    "don't see why not",
];

const NO_PHRASES: &[&str] = &[
    "no",
    "nope",
    "nah",
    "negative",
    "not",
    "don't",
    "dont",
    "do not",
    "no thanks",
    "not now",
    "never",
];

/// Values closer than this are the same number
const SAME_VALUE_EPSILON: f64 = 1e-9;

/// Extract a single number from the utterance
///
/// # Examples
/// ```
/// use plan_assistant_text_processing::slot_extraction::extract_number;
/// assert_eq!(extract_number("$5,000"), Some(5000.0));
/// assert_eq!(extract_number("about 12k"), Some(12000.0));
/// assert_eq!(extract_number("five years"), Some(5.0));
/// assert_eq!(extract_number("5 or 6"), None);
/// ```
pub fn extract_number(text: &str) -> Option<f64> {
    let cleaned = PLAN_NAME.replace_all(text, " ");

    let mut values: Vec<f64> = Vec::new();
    for caps in NUMBER.captures_iter(&cleaned) {
        let Some(digits) = caps.name("digits") else {
            continue;
        };
        let Ok(base) = digits.as_str().replace(',', "").parse::<f64>() else {
            continue;
        };
        let multiplier = AmountMultiplier::from_suffix(caps.name("mult").map(|m| m.as_str()));
        let sign = if caps.name("sign").is_some() { -1.0 } else { 1.0 };
        push_distinct(&mut values, sign * base * multiplier.value());
    }

    if values.is_empty() {
        let words = words(&cleaned);
        let negative = words.iter().any(|w| NEGATIVE_WORDS.contains(&w.as_str()));
        let sign = if negative { -1.0 } else { 1.0 };
        for value in parse_number_runs(words.iter().map(String::as_str)) {
            push_distinct(&mut values, sign * value);
        }
    }

    match values.as_slice() {
        [value] => Some(*value),
        [] => None,
        _ => {
            tracing::trace!(count = values.len(), "Conflicting numbers in utterance");
            None
        },
    }
}

fn push_distinct(values: &mut Vec<f64>, value: f64) {
    if !values.iter().any(|v| (v - value).abs() < SAME_VALUE_EPSILON) {
        values.push(value);
    }
}

/// Extract a yes/no answer
///
/// Returns `None` for uncertain answers ("not sure") and for answers that
/// say both ("yes, no, wait").
pub fn extract_yes_no(text: &str) -> Option<bool> {
    let normalized = normalize(text);

    if contains_any(&normalized, UNSURE_PHRASES) {
        return None;
    }
    if contains_any(&normalized, AFFIRMATIVE_IDIOMS) {
        return Some(true);
    }

    let yes = contains_any(&normalized, YES_PHRASES);
    let no = contains_any(&normalized, NO_PHRASES);

    match (yes, no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}
