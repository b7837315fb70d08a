//! Input kinds and intent tags shared by the interpreter and the controller

use serde::{Deserialize, Serialize};

use crate::task::TaskType;

/// Shape of the next user turn the active step expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Nothing expected (idle, or an informational terminal step)
    #[default]
    None,
    /// A number (amount, years, percentage)
    Number,
    /// A yes/no answer
    YesNo,
    /// Free text, optionally normalized by the step validator
    Text,
    /// An exact confirmation phrase
    Confirmation,
}

impl InputKind {
    /// Whether this kind expects the user to say something
    pub fn expects_input(&self) -> bool {
        !matches!(self, InputKind::None)
    }
}

/// Coarse classification of a user turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "task", rename_all = "snake_case")]
pub enum IntentTag {
    /// Start a guided task
    StartTask(TaskType),
    /// Answer to the current step
    AnswerInput,
    /// Confirmation of a pending submission
    Confirm,
    /// Abandon everything
    Cancel,
    /// Step back one step
    GoBack,
    /// Say the last prompt again
    Repeat,
    /// Question about the plan, outside any task
    GeneralQuestion,
    /// Nothing recognized
    Unknown,
}

impl IntentTag {
    /// Global commands are honored whether or not a task is active
    pub fn is_global_command(&self) -> bool {
        matches!(self, IntentTag::Cancel | IntentTag::GoBack | IntentTag::Repeat)
    }
}

/// What the interpreter is told about the conversation when classifying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterpreterContext {
    /// Input kind the active step expects
    pub required_input: InputKind,
    /// Task currently running, if any
    pub active_task: Option<TaskType>,
}

impl InterpreterContext {
    pub fn new(required_input: InputKind, active_task: Option<TaskType>) -> Self {
        Self {
            required_input,
            active_task,
        }
    }

    /// Context for a conversation with no task running
    pub fn idle() -> Self {
        Self::default()
    }
}
