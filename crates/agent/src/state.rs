//! Dialogue state
//!
//! The record a `DialogueController` owns and mutates each turn. It is
//! replaced wholesale when a task starts, on cancel and on reset, so nothing
//! from one attempt can leak into the next.

use serde::{Deserialize, Serialize};

use plan_assistant_core::{
    CollectedData, InputKind, InterpreterContext, StepError, StepId, TaskType,
};

/// Coarse lifecycle marker, independent of the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    TaskInProgress,
    Completed,
    Cancelled,
}

/// Everything the controller knows about one conversation
///
/// `active_task` and `active_step` are either both set or both empty, and
/// `collected_data` holds exactly the fields of the steps in `step_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DialogueState {
    pub phase: Phase,
    pub active_task: Option<TaskType>,
    pub active_step: Option<StepId>,
    pub required_input: InputKind,
    pub collected_data: CollectedData,
    /// Last text emitted, for "repeat"
    pub last_prompt: Option<String>,
    /// Steps answered so far in the active task, oldest first
    pub step_history: Vec<StepId>,
    /// Most recent validation failure, cleared by the next accepted answer
    pub last_step_error: Option<StepError>,
    /// Task offered after a general question, started on "take me there"
    pub offered_task: Option<TaskType>,
}

impl DialogueState {
    /// Fresh state positioned at the first step of `task`
    pub fn for_task(task: TaskType, first_step: StepId) -> Self {
        Self {
            phase: Phase::TaskInProgress,
            active_task: Some(task),
            active_step: Some(first_step),
            ..Self::default()
        }
    }

    /// Idle state after the user declined to continue
    pub fn cancelled() -> Self {
        Self {
            phase: Phase::Cancelled,
            ..Self::default()
        }
    }

    pub fn is_task_active(&self) -> bool {
        self.active_task.is_some()
    }

    /// What the interpreter needs to classify the next turn
    pub fn interpreter_context(&self) -> InterpreterContext {
        InterpreterContext::new(self.required_input, self.active_task)
    }

    /// Mark the active task finished
    ///
    /// Collected data stays readable so the caller can persist the
    /// submission; the next task start replaces it.
    pub fn complete(&mut self) {
        self.phase = Phase::Completed;
        self.active_task = None;
        self.active_step = None;
        self.required_input = InputKind::None;
        self.step_history.clear();
        self.last_step_error = None;
        self.offered_task = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_assistant_core::{FieldValue, LoanStep};

    #[test]
    fn test_fresh_task_state() {
        let state = DialogueState::for_task(TaskType::Loan, LoanStep::Amount.into());
        assert_eq!(state.phase, Phase::TaskInProgress);
        assert_eq!(state.active_task, Some(TaskType::Loan));
        assert!(state.collected_data.is_empty());
        assert!(state.step_history.is_empty());
    }

    #[test]
    fn test_complete_keeps_data_and_clears_task() {
        let mut state = DialogueState::for_task(TaskType::Loan, LoanStep::Confirmation.into());
        state
            .collected_data
            .insert("loan_amount".into(), FieldValue::Number(5000.0));
        state.step_history.push(LoanStep::Amount.into());

        state.complete();

        assert_eq!(state.phase, Phase::Completed);
        assert!(state.active_task.is_none());
        assert!(state.active_step.is_none());
        assert!(state.step_history.is_empty());
        assert_eq!(state.collected_data.len(), 1);
    }

    #[test]
    fn test_cancelled_differs_from_default_only_in_phase() {
        let cancelled = DialogueState::cancelled();
        assert_eq!(cancelled.phase, Phase::Cancelled);
        assert_eq!(
            DialogueState {
                phase: Phase::Idle,
                ..cancelled
            },
            DialogueState::default()
        );
    }
}
