//! Task and step identifiers
//!
//! Every task type owns a closed set of step identifiers. A `StepId` always
//! names its task, so a step from one task can never be mistaken for a step
//! of another.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A guided transaction the assistant can run turn by turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Borrow against the vested balance
    Loan,
    /// Join a retirement plan
    Enrollment,
    /// Take money out of the account
    Withdrawal,
}

impl TaskType {
    /// All task types, in menu order
    pub const ALL: [TaskType; 3] = [TaskType::Loan, TaskType::Enrollment, TaskType::Withdrawal];

    /// Get task display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskType::Loan => "loan",
            TaskType::Enrollment => "enrollment",
            TaskType::Withdrawal => "withdrawal",
        }
    }

    /// What the user ends up submitting when the task completes
    pub fn artifact(&self) -> &'static str {
        match self {
            TaskType::Loan => "loan application",
            TaskType::Enrollment => "enrollment",
            TaskType::Withdrawal => "withdrawal request",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Steps of the loan task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStep {
    Amount,
    Term,
    RepaymentReview,
    Confirmation,
}

/// Steps of the enrollment task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStep {
    Plan,
    Contribution,
    Investment,
    Review,
    Confirmation,
}

/// Steps of the withdrawal task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStep {
    Amount,
    TaxNotice,
    Requested,
}

/// Step identifier, tagged with the task it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "task", content = "step", rename_all = "snake_case")]
pub enum StepId {
    Loan(LoanStep),
    Enrollment(EnrollmentStep),
    Withdrawal(WithdrawalStep),
}

impl StepId {
    /// Task this step belongs to
    pub fn task(&self) -> TaskType {
        match self {
            StepId::Loan(_) => TaskType::Loan,
            StepId::Enrollment(_) => TaskType::Enrollment,
            StepId::Withdrawal(_) => TaskType::Withdrawal,
        }
    }

    /// Stable dotted name, used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Loan(step) => match step {
                LoanStep::Amount => "loan.amount",
                LoanStep::Term => "loan.term",
                LoanStep::RepaymentReview => "loan.repayment_review",
                LoanStep::Confirmation => "loan.confirmation",
            },
            StepId::Enrollment(step) => match step {
                EnrollmentStep::Plan => "enrollment.plan",
                EnrollmentStep::Contribution => "enrollment.contribution",
                EnrollmentStep::Investment => "enrollment.investment",
                EnrollmentStep::Review => "enrollment.review",
                EnrollmentStep::Confirmation => "enrollment.confirmation",
            },
            StepId::Withdrawal(step) => match step {
                WithdrawalStep::Amount => "withdrawal.amount",
                WithdrawalStep::TaxNotice => "withdrawal.tax_notice",
                WithdrawalStep::Requested => "withdrawal.requested",
            },
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LoanStep> for StepId {
    fn from(step: LoanStep) -> Self {
        StepId::Loan(step)
    }
}

impl From<EnrollmentStep> for StepId {
    fn from(step: EnrollmentStep) -> Self {
        StepId::Enrollment(step)
    }
}

impl From<WithdrawalStep> for StepId {
    fn from(step: WithdrawalStep) -> Self {
        StepId::Withdrawal(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_knows_its_task() {
        assert_eq!(StepId::from(LoanStep::Amount).task(), TaskType::Loan);
        assert_eq!(
            StepId::from(EnrollmentStep::Plan).task(),
            TaskType::Enrollment
        );
        assert_eq!(
            StepId::from(WithdrawalStep::TaxNotice).task(),
            TaskType::Withdrawal
        );
    }

    #[test]
    fn test_step_serialization_is_tagged() {
        let json = serde_json::to_value(StepId::Loan(LoanStep::RepaymentReview)).unwrap();
        assert_eq!(json["task"], "loan");
        assert_eq!(json["step"], "repayment_review");
    }

    #[test]
    fn test_dotted_names_are_unique() {
        let steps: Vec<StepId> = vec![
            LoanStep::Amount.into(),
            LoanStep::Term.into(),
            LoanStep::RepaymentReview.into(),
            LoanStep::Confirmation.into(),
            EnrollmentStep::Plan.into(),
            EnrollmentStep::Contribution.into(),
            EnrollmentStep::Investment.into(),
            EnrollmentStep::Review.into(),
            EnrollmentStep::Confirmation.into(),
            WithdrawalStep::Amount.into(),
            WithdrawalStep::TaxNotice.into(),
            WithdrawalStep::Requested.into(),
        ];
        let names: std::collections::HashSet<_> = steps.iter().map(|s| s.as_str()).collect();
        assert_eq!(names.len(), steps.len());
    }
}
