//! Mid-flow change requests
//!
//! "Actually, change the amount" while a task is running rewinds to the
//! named step. The trigger words and the keyword-to-step tables are plain
//! phrase lists so matching stays deterministic.

use plan_assistant_core::{EnrollmentStep, LoanStep, StepId, TaskType, WithdrawalStep};
use plan_assistant_text_processing::phrases::{contains_any, normalize};

/// Words that mark a turn as a change request
pub const TRIGGER_WORDS: &[&str] = &["change", "modify", "update", "different", "instead", "actually"];

const LOAN_TARGETS: &[(&[&str], StepId)] = &[
    (&["amount"], StepId::Loan(LoanStep::Amount)),
    (&["term", "years", "year"], StepId::Loan(LoanStep::Term)),
];

const ENROLLMENT_TARGETS: &[(&[&str], StepId)] = &[
    (&["plan"], StepId::Enrollment(EnrollmentStep::Plan)),
    (
        &["contribution", "percentage", "percent"],
        StepId::Enrollment(EnrollmentStep::Contribution),
    ),
    (
        &["investment", "investments", "allocation"],
        StepId::Enrollment(EnrollmentStep::Investment),
    ),
];

const WITHDRAWAL_TARGETS: &[(&[&str], StepId)] =
    &[(&["amount"], StepId::Withdrawal(WithdrawalStep::Amount))];

fn targets(task: TaskType) -> &'static [(&'static [&'static str], StepId)] {
    match task {
        TaskType::Loan => LOAN_TARGETS,
        TaskType::Enrollment => ENROLLMENT_TARGETS,
        TaskType::Withdrawal => WITHDRAWAL_TARGETS,
    }
}

/// Whether the turn asks to change something already answered
pub fn is_change_request(text: &str) -> bool {
    contains_any(&normalize(text), TRIGGER_WORDS)
}

/// Step of `task` the change request names, if any
pub fn target_step(task: TaskType, text: &str) -> Option<StepId> {
    let normalized = normalize(text);
    targets(task)
        .iter()
        .find(|(keywords, _)| contains_any(&normalized, keywords))
        .map(|(_, step)| *step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_words() {
        assert!(is_change_request("I want to change the amount"));
        assert!(is_change_request("Actually, make it 3 years"));
        assert!(!is_change_request("5000"));
        assert!(!is_change_request("changed my mind about nothing"));
    }

    #[test]
    fn test_loan_targets() {
        assert_eq!(
            target_step(TaskType::Loan, "change the amount"),
            Some(LoanStep::Amount.into())
        );
        assert_eq!(
            target_step(TaskType::Loan, "actually make it 3 years"),
            Some(LoanStep::Term.into())
        );
        assert_eq!(target_step(TaskType::Loan, "change the plan"), None);
    }

    #[test]
    fn test_enrollment_targets() {
        assert_eq!(
            target_step(TaskType::Enrollment, "a different plan"),
            Some(EnrollmentStep::Plan.into())
        );
        assert_eq!(
            target_step(TaskType::Enrollment, "update my contribution percentage"),
            Some(EnrollmentStep::Contribution.into())
        );
        assert_eq!(
            target_step(TaskType::Enrollment, "change the allocation instead"),
            Some(EnrollmentStep::Investment.into())
        );
    }
}
