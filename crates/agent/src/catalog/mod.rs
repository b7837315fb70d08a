//! Step catalog
//!
//! A task is an ordered, possibly branching set of steps. Each
//! `StepDefinition` carries its prompt generator, the input kind it expects,
//! an optional validator or numeric policy, and an optional next-step
//! resolver. The controller only ever reaches steps through a
//! `StepCatalog`, so tasks can be added or re-ordered without touching it.
//!
//! # Example
//!
//! ```
//! use plan_assistant_agent::catalog::{DefaultCatalog, StepCatalog};
//! use plan_assistant_config::{AccountConfig, DialogueConfig};
//! use plan_assistant_core::{LoanStep, StepId, TaskType};
//!
//! let catalog = DefaultCatalog::new(&DialogueConfig::default(), &AccountConfig::default());
//! assert_eq!(
//!     catalog.first_step(TaskType::Loan),
//!     Some(StepId::Loan(LoanStep::Amount))
//! );
//! ```

pub mod enrollment;
pub mod loan;
pub mod withdrawal;

use std::collections::HashMap;
use std::fmt;

use plan_assistant_config::{AccountConfig, DialogueConfig};
use plan_assistant_core::{CollectedData, FieldValue, InputKind, StepErrorKind, StepId, TaskType};

use crate::policy::NumericPolicy;

/// Builds the prompt from the data collected so far and the pending error
pub type PromptFn = Box<dyn Fn(&CollectedData, Option<StepErrorKind>) -> String + Send + Sync>;

/// Turns a raw answer into the stored value
pub type ValidatorFn =
    Box<dyn Fn(&str, &CollectedData) -> Result<FieldValue, StepErrorKind> + Send + Sync>;

/// Picks the step after this one; `None` ends the task
pub type NextStepFn = Box<dyn Fn(&CollectedData) -> Option<StepId> + Send + Sync>;

/// One question within a task
pub struct StepDefinition {
    id: StepId,
    field: &'static str,
    input: InputKind,
    prompt: PromptFn,
    validator: Option<ValidatorFn>,
    policy: Option<NumericPolicy>,
    next: Option<NextStepFn>,
    aborts_on_decline: bool,
}

impl StepDefinition {
    pub fn new<F>(id: impl Into<StepId>, field: &'static str, input: InputKind, prompt: F) -> Self
    where
        F: Fn(&CollectedData, Option<StepErrorKind>) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            field,
            input,
            prompt: Box::new(prompt),
            validator: None,
            policy: None,
            next: None,
            aborts_on_decline: false,
        }
    }

    /// Normalize text answers through `validator`
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str, &CollectedData) -> Result<FieldValue, StepErrorKind> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn with_policy(mut self, policy: NumericPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Resolve the next step from collected data
    pub fn with_next<F>(mut self, next: F) -> Self
    where
        F: Fn(&CollectedData) -> Option<StepId> + Send + Sync + 'static,
    {
        self.next = Some(Box::new(next));
        self
    }

    /// Always continue with `step`
    pub fn then(self, step: impl Into<StepId>) -> Self {
        let step = step.into();
        self.with_next(move |_| Some(step))
    }

    /// A "no" on this yes/no step abandons the task
    pub fn aborts_on_decline(mut self) -> Self {
        self.aborts_on_decline = true;
        self
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    /// Key the answer is stored under in `CollectedData`
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn input(&self) -> InputKind {
        self.input
    }

    pub fn policy(&self) -> Option<&NumericPolicy> {
        self.policy.as_ref()
    }

    pub fn declining_aborts(&self) -> bool {
        self.aborts_on_decline
    }

    pub fn prompt(&self, data: &CollectedData, error: Option<StepErrorKind>) -> String {
        (self.prompt)(data, error)
    }

    /// Run the custom validator, if any
    pub fn validate(
        &self,
        text: &str,
        data: &CollectedData,
    ) -> Option<Result<FieldValue, StepErrorKind>> {
        self.validator.as_ref().map(|validate| validate(text, data))
    }

    pub fn next_step(&self, data: &CollectedData) -> Option<StepId> {
        self.next.as_ref().and_then(|next| next(data))
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("input", &self.input)
            .field("policy", &self.policy)
            .field("aborts_on_decline", &self.aborts_on_decline)
            .finish()
    }
}

/// The steps of one task
#[derive(Debug, Default)]
pub struct TaskSteps {
    first: Option<StepId>,
    steps: HashMap<StepId, StepDefinition>,
}

impl TaskSteps {
    /// Build from steps in order; the first one is the entry point
    pub fn from_steps(steps: impl IntoIterator<Item = StepDefinition>) -> Self {
        let mut task = Self::default();
        for step in steps {
            task.first.get_or_insert(step.id());
            task.steps.insert(step.id(), step);
        }
        task
    }

    pub fn first(&self) -> Option<StepId> {
        self.first
    }

    pub fn get(&self, id: &StepId) -> Option<&StepDefinition> {
        self.steps.get(id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Source of step definitions for every task type
pub trait StepCatalog: Send + Sync {
    /// All steps of `task`, `None` if the task is not offered
    fn steps(&self, task: TaskType) -> Option<&TaskSteps>;

    /// Entry step of `task`
    fn first_step(&self, task: TaskType) -> Option<StepId> {
        self.steps(task).and_then(TaskSteps::first)
    }

    /// Look up one step
    fn step(&self, id: StepId) -> Option<&StepDefinition> {
        self.steps(id.task()).and_then(|steps| steps.get(&id))
    }
}

/// Loan, enrollment and withdrawal steps built from settings
#[derive(Debug)]
pub struct DefaultCatalog {
    tasks: HashMap<TaskType, TaskSteps>,
}

impl DefaultCatalog {
    pub fn new(dialogue: &DialogueConfig, account: &AccountConfig) -> Self {
        let mut tasks = HashMap::new();
        tasks.insert(TaskType::Loan, loan::steps(&dialogue.loan, account));
        tasks.insert(
            TaskType::Enrollment,
            enrollment::steps(&dialogue.enrollment),
        );
        tasks.insert(TaskType::Withdrawal, withdrawal::steps(account));

        tracing::debug!(
            tasks = tasks.len(),
            steps = tasks.values().map(TaskSteps::len).sum::<usize>(),
            "Step catalog built"
        );

        Self { tasks }
    }
}

impl Default for DefaultCatalog {
    fn default() -> Self {
        Self::new(&DialogueConfig::default(), &AccountConfig::default())
    }
}

impl StepCatalog for DefaultCatalog {
    fn steps(&self, task: TaskType) -> Option<&TaskSteps> {
        self.tasks.get(&task)
    }
}

/// "$5,000.00"
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// "6%" or "6.5%"
pub fn format_percent(value: f64) -> String {
    let value = (value * 100.0).round() / 100.0;
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{}%", value)
    }
}

/// Prefix `base` with the explanation for `error`, if it has one
fn with_error_lead<F>(error: Option<StepErrorKind>, lead: F, base: String) -> String
where
    F: Fn(StepErrorKind) -> Option<&'static str>,
{
    match error.and_then(lead) {
        Some(lead) => format!("{} {}", lead, base),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_assistant_core::{EnrollmentStep, LoanStep, WithdrawalStep};

    #[test]
    fn test_default_catalog_entry_points() {
        let catalog = DefaultCatalog::default();
        assert_eq!(
            catalog.first_step(TaskType::Loan),
            Some(LoanStep::Amount.into())
        );
        assert_eq!(
            catalog.first_step(TaskType::Enrollment),
            Some(EnrollmentStep::Plan.into())
        );
        assert_eq!(
            catalog.first_step(TaskType::Withdrawal),
            Some(WithdrawalStep::Amount.into())
        );
    }

    #[test]
    fn test_every_next_step_exists() {
        let catalog = DefaultCatalog::default();
        let data = CollectedData::new();
        for task in TaskType::ALL {
            let steps = catalog.steps(task).unwrap();
            for step in steps.steps.values() {
                assert_eq!(step.id().task(), task);
                if let Some(next) = step.next_step(&data) {
                    assert!(catalog.step(next).is_some(), "{} -> {} missing", step.id(), next);
                }
            }
        }
    }

    #[test]
    fn test_terminal_steps() {
        let catalog = DefaultCatalog::default();
        let data = CollectedData::new();

        let loan_confirm = catalog.step(LoanStep::Confirmation.into()).unwrap();
        assert_eq!(loan_confirm.input(), InputKind::Confirmation);
        assert!(loan_confirm.next_step(&data).is_none());

        let requested = catalog.step(WithdrawalStep::Requested.into()).unwrap();
        assert_eq!(requested.input(), InputKind::None);
        assert!(requested.next_step(&data).is_none());
    }

    #[test]
    fn test_field_keys_are_unique_per_task() {
        let catalog = DefaultCatalog::default();
        for task in TaskType::ALL {
            let steps = catalog.steps(task).unwrap();
            let fields: std::collections::HashSet<_> =
                steps.steps.values().map(|s| s.field()).collect();
            assert_eq!(fields.len(), steps.len());
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(5000.0), "$5,000.00");
        assert_eq!(format_money(125_000.0), "$125,000.00");
        assert_eq!(format_money(47.349), "$47.35");
        assert_eq!(format_money(999.0), "$999.00");
        assert_eq!(format_money(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(6.0), "6%");
        assert_eq!(format_percent(6.5), "6.5%");
    }
}
