//! Confirmation gate
//!
//! Irreversible submissions need one of a few exact phrases. Matching is
//! case-insensitive equality or containment of a whole allow-listed phrase;
//! a bare "yes", "confirm" or "submit" never passes, and neither does a
//! phrase wrapped in a negation ("I don't want to confirm loan").

use plan_assistant_core::TaskType;
use plan_assistant_text_processing::phrases::{contains_any, normalize};

/// Words that turn an allow-listed phrase into a refusal
const NEGATORS: &[&str] = &[
    "not", "don't", "dont", "do not", "never", "no", "won't", "wont", "cannot", "can't", "cant",
];

/// Loan phrases; the first is the one shown to the user
pub const LOAN_PHRASES: &[&str] = &[
    "yes, submit loan",
    "confirm loan application",
    "yes submit loan",
    "confirm loan",
];

/// Enrollment phrases; the first is the one shown to the user
pub const ENROLLMENT_PHRASES: &[&str] = &[
    "yes, enroll me",
    "confirm enrollment",
    "yes enroll me",
    "confirm my enrollment",
];

/// Allow-list for `task`, empty when the task has no confirmation gate
pub fn allow_list(task: TaskType) -> &'static [&'static str] {
    match task {
        TaskType::Loan => LOAN_PHRASES,
        TaskType::Enrollment => ENROLLMENT_PHRASES,
        TaskType::Withdrawal => &[],
    }
}

/// Phrase the user is asked to say
pub fn required_phrase(task: TaskType) -> Option<&'static str> {
    allow_list(task).first().copied()
}

/// Whether `text` confirms `task`
pub fn matches(task: TaskType, text: &str) -> bool {
    let input = text.trim().to_lowercase();
    if input.is_empty() || contains_any(&normalize(&input), NEGATORS) {
        return false;
    }
    allow_list(task)
        .iter()
        .any(|phrase| input == *phrase || input.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_phrases_accepted() {
        assert!(matches(TaskType::Loan, "yes, submit loan"));
        assert!(matches(TaskType::Loan, "Confirm loan application"));
        assert!(matches(TaskType::Loan, "  YES SUBMIT LOAN "));
        assert!(matches(TaskType::Loan, "ok then, yes, submit loan please"));
    }

    #[test]
    fn test_generic_agreement_rejected() {
        for text in ["yes", "confirm", "submit", "sure, go ahead", "yes submit", "loan"] {
            assert!(!matches(TaskType::Loan, text), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_negated_phrase_rejected() {
        for text in [
            "I don't want to confirm loan",
            "do not confirm loan application",
            "no, not yes submit loan",
            "I won't say yes, submit loan",
        ] {
            assert!(!matches(TaskType::Loan, text), "{:?} should be rejected", text);
        }
        assert!(!matches(TaskType::Enrollment, "never confirm my enrollment"));
        assert!(matches(TaskType::Enrollment, "yes, enroll me now"));
    }

    #[test]
    fn test_phrases_do_not_cross_tasks() {
        assert!(!matches(TaskType::Enrollment, "yes, submit loan"));
        assert!(!matches(TaskType::Loan, "yes, enroll me"));
        assert!(matches(TaskType::Enrollment, "Confirm my enrollment"));
    }

    #[test]
    fn test_withdrawal_has_no_gate() {
        assert!(required_phrase(TaskType::Withdrawal).is_none());
        assert!(!matches(TaskType::Withdrawal, "yes"));
        assert_eq!(required_phrase(TaskType::Loan), Some("yes, submit loan"));
    }
}
