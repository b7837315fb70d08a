//! Core types and traits for the plan assistant
//!
//! This crate provides the vocabulary shared by every other crate:
//! - Task types and their closed step identifiers
//! - Input kinds and intent tags
//! - Collected field values
//! - The conversational error taxonomy and internal error type
//! - The structured `Response` returned for every turn
//! - Traits for pluggable input interpretation and response shaping

pub mod error;
pub mod input;
pub mod response;
pub mod task;
pub mod traits;
pub mod value;

pub use error::{Error, Result, StepError, StepErrorKind};
pub use input::{InputKind, IntentTag, InterpreterContext};
pub use response::{Response, UiHint};
pub use task::{EnrollmentStep, LoanStep, StepId, TaskType, WithdrawalStep};
pub use traits::{InputInterpreter, NoopShaper, ResponseShaper};
pub use value::{number_field, text_field, CollectedData, FieldValue};
