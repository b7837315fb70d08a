//! English number words
//!
//! Speech-to-text often spells out small numbers ("five years", "twenty
//! five percent"). These helpers turn a run of number words into a value.

/// Convert a single English number word to its value
///
/// # Examples
/// ```
/// use plan_assistant_text_processing::english::word_to_number;
/// assert_eq!(word_to_number("five"), Some(5.0));
/// assert_eq!(word_to_number("forty"), Some(40.0));
/// assert_eq!(word_to_number("loan"), None);
/// ```
pub fn word_to_number(word: &str) -> Option<f64> {
    match word {
        "zero" => Some(0.0),
        "one" => Some(1.0),
        "two" => Some(2.0),
        "three" => Some(3.0),
        "four" => Some(4.0),
        "five" => Some(5.0),
        "six" => Some(6.0),
        "seven" => Some(7.0),
        "eight" => Some(8.0),
        "nine" => Some(9.0),
        "ten" => Some(10.0),
        "eleven" => Some(11.0),
        "twelve" => Some(12.0),
        "thirteen" => Some(13.0),
        "fourteen" => Some(14.0),
        "fifteen" => Some(15.0),
        "sixteen" => Some(16.0),
        "seventeen" => Some(17.0),
        "eighteen" => Some(18.0),
        "nineteen" => Some(19.0),

        // Tens
        "twenty" => Some(20.0),
        "thirty" => Some(30.0),
        "forty" => Some(40.0),
        "fifty" => Some(50.0),
        "sixty" => Some(60.0),
        "seventy" => Some(70.0),
        "eighty" => Some(80.0),
        "ninety" => Some(90.0),

        _ => None,
    }
}

/// Multiplier words
pub fn scale_word(word: &str) -> Option<f64> {
    match word {
        "hundred" => Some(100.0),
        "thousand" | "grand" => Some(1_000.0),
        "million" => Some(1_000_000.0),
        _ => None,
    }
}

/// Parse every contiguous run of number words in `words`
///
/// "and" is allowed inside a run ("five hundred and twenty"). Each run
/// yields one value.
pub fn parse_number_runs<'a, I>(words: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut runs = Vec::new();
    let mut total = 0.0;
    let mut current = 0.0;
    let mut in_run = false;

    for word in words {
        if let Some(value) = word_to_number(word) {
            current += value;
            in_run = true;
        } else if let Some(scale) = scale_word(word) {
            let base = if in_run && current > 0.0 { current } else { 1.0 };
            if scale >= 1_000.0 {
                total += base * scale;
                current = 0.0;
            } else {
                current = base * scale;
            }
            in_run = true;
        } else if word == "and" && in_run {
            continue;
        } else if in_run {
            runs.push(total + current);
            total = 0.0;
            current = 0.0;
            in_run = false;
        }
    }

    if in_run {
        runs.push(total + current);
    }

    runs
}
