//! Error types
//!
//! Two families live here. `StepErrorKind` is the conversational taxonomy:
//! it never surfaces as a Rust error, it shapes the next prompt. `Error` is
//! for internal consistency failures (catalog bugs) that end a turn.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::task::{StepId, TaskType};

/// Why a user turn could not be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepErrorKind {
    /// Nothing but whitespace
    Empty,
    /// Too short or punctuation only
    Unintelligible,
    /// Hedged numeric answer ("about", "maybe")
    Ambiguous,
    /// Unparsable or rejected by a step validator
    Invalid,
    /// Outside the allowed range, or not a whole number where one is needed
    OutOfRange,
    /// Zero or below for an amount
    ZeroOrNegative,
    /// Above the absolute cap
    OverMax,
    /// Above what the balance allows
    OverBalance,
    /// Right number, wrong unit (months where years are expected)
    WrongUnit,
    /// Confirmation text did not match an allow-listed phrase
    InvalidConfirmationPhrase,
    /// Catalog lookup failed
    UnknownStepOrTask,
}

impl StepErrorKind {
    /// Everything except catalog failures is recovered by re-prompting
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StepErrorKind::UnknownStepOrTask)
    }

    /// Short human message for `Response::error_message`
    pub fn message(&self) -> &'static str {
        match self {
            StepErrorKind::Empty => "No input received",
            StepErrorKind::Unintelligible => "Input could not be understood",
            StepErrorKind::Ambiguous => "An exact value is needed",
            StepErrorKind::Invalid => "Input is not a valid answer for this step",
            StepErrorKind::OutOfRange => "Value is outside the allowed range",
            StepErrorKind::ZeroOrNegative => "Value must be greater than zero",
            StepErrorKind::OverMax => "Value is above the maximum allowed",
            StepErrorKind::OverBalance => "Value is above what your balance allows",
            StepErrorKind::WrongUnit => "Value is in the wrong unit",
            StepErrorKind::InvalidConfirmationPhrase => "The exact confirmation phrase is required",
            StepErrorKind::UnknownStepOrTask => "Internal error",
        }
    }
}

/// A failed validation, tied to the step it happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepError {
    pub kind: StepErrorKind,
    pub step: StepId,
}

impl StepError {
    pub fn new(kind: StepErrorKind, step: StepId) -> Self {
        Self { kind, step }
    }
}

/// Internal failures
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Task not in catalog: {0}")]
    UnknownTask(TaskType),

    #[error("Step not in catalog: {0}")]
    UnknownStep(StepId),

    #[error("Invalid dialogue state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Conversational kind this failure is reported as
    pub fn kind(&self) -> StepErrorKind {
        StepErrorKind::UnknownStepOrTask
    }
}

pub type Result<T> = std::result::Result<T, Error>;
