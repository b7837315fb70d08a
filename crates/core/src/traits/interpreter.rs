//! Input interpretation trait
//!
//! The controller never parses text itself. Classification and value
//! extraction go through an `InputInterpreter`, so a rule-based
//! implementation can be swapped for a model-backed one without touching
//! the state machine.

use crate::input::{IntentTag, InterpreterContext};

/// Classifies utterances and extracts typed values
///
/// Implementations must be deterministic for a given input and context
/// within one turn.
///
/// # Example
///
/// ```ignore
/// struct AlwaysAnswer;
///
/// impl InputInterpreter for AlwaysAnswer {
///     fn classify(&self, _text: &str, _ctx: &InterpreterContext) -> IntentTag {
///         IntentTag::AnswerInput
///     }
///     fn extract_number(&self, text: &str) -> Option<f64> {
///         text.trim().parse().ok()
///     }
///     fn extract_yes_no(&self, _text: &str) -> Option<bool> {
///         None
///     }
/// }
/// ```
pub trait InputInterpreter: Send + Sync {
    /// Map free text to a coarse intent, given what the dialogue expects
    fn classify(&self, text: &str, context: &InterpreterContext) -> IntentTag;

    /// Extract a single number, or `None` when absent or ambiguous
    fn extract_number(&self, text: &str) -> Option<f64>;

    /// Extract a yes/no answer, or `None` when absent or ambiguous
    fn extract_yes_no(&self, text: &str) -> Option<bool>;
}
