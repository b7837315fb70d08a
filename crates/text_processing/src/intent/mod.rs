//! Rule-based intent classification
//!
//! The default `InputInterpreter`. Utterances are normalized to a word
//! sequence and matched against fixed phrase tables, in priority order:
//!
//! 1. Global commands (cancel, go back, repeat)
//! 2. With a task running, everything else is an answer (or a confirmation
//!    attempt when the step wants the exact phrase)
//! 3. Task starts (withdrawal, enrollment, loan)
//! 4. General questions
//!
//! # Example
//!
//! ```
//! use plan_assistant_core::{InputInterpreter, IntentTag, InterpreterContext, TaskType};
//! use plan_assistant_text_processing::RuleBasedInterpreter;
//!
//! let interpreter = RuleBasedInterpreter::new();
//! let intent = interpreter.classify("I'd like to take out a loan", &InterpreterContext::idle());
//!
//! assert_eq!(intent, IntentTag::StartTask(TaskType::Loan));
//! ```

use plan_assistant_core::{InputInterpreter, InputKind, IntentTag, InterpreterContext, TaskType};

use crate::phrases::{contains_any, normalize};
use crate::slot_extraction;

const CANCEL_PHRASES: &[&str] = &[
    "cancel",
    "stop",
    "quit",
    "exit",
    "abort",
    "never mind",
    "nevermind",
    "forget it",
    "forget about it",
    "start over",
];

/// Whole-utterance forms of "go back"
const GO_BACK_EXACT: &[&str] = &["back", "previous", "undo", "back please", "go back"];

const GO_BACK_PHRASES: &[&str] = &[
    "go back",
    "step back",
    "back up",
    "previous step",
    "previous question",
    "last step",
    "last question",
    "undo that",
];

const REPEAT_PHRASES: &[&str] = &[
    "repeat",
    "say that again",
    "say it again",
    "say again",
    "come again",
    "what did you say",
    "pardon",
    "one more time",
];

/// Task starts, checked in order; withdrawal first so "withdraw from my
/// loan" is not read as a new loan
const TASK_PHRASES: &[(TaskType, &[&str])] = &[
    (
        TaskType::Withdrawal,
        &["withdraw", "withdrawal", "make a withdrawal", "cash out", "take money out"],
    ),
    (
        TaskType::Enrollment,
        &["enroll", "enrol", "enrollment", "enrolment", "sign up", "join the plan", "join a plan"],
    ),
    (TaskType::Loan, &["loan", "loans", "borrow", "borrowing"]),
];

const QUESTION_OPENERS: &[&str] = &[
    "what", "how", "why", "when", "where", "which", "who", "can", "could", "should", "would",
    "is", "are", "do", "does", "will", "tell me", "explain", "ask",
];

const TOPIC_WORDS: &[&str] = &[
    "contribution",
    "contributions",
    "contribute",
    "investment",
    "investments",
    "invest",
    "beneficiary",
    "beneficiaries",
    "match",
    "vesting",
    "balance",
];

/// Default interpreter backed by phrase tables
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInterpreter;

impl RuleBasedInterpreter {
    pub fn new() -> Self {
        Self
    }

    fn is_go_back(normalized: &str) -> bool {
        let trimmed = normalized.trim();
        GO_BACK_EXACT.contains(&trimmed) || contains_any(normalized, GO_BACK_PHRASES)
    }

    fn detect_task(normalized: &str) -> Option<TaskType> {
        TASK_PHRASES
            .iter()
            .find(|(_, table)| contains_any(normalized, table))
            .map(|(task, _)| *task)
    }

    fn is_question(text: &str, normalized: &str) -> bool {
        if text.contains('?') || contains_any(normalized, TOPIC_WORDS) {
            return true;
        }
        QUESTION_OPENERS
            .iter()
            .any(|opener| normalized.trim_start().starts_with(&format!("{} ", opener)))
    }
}

impl InputInterpreter for RuleBasedInterpreter {
    fn classify(&self, text: &str, context: &InterpreterContext) -> IntentTag {
        let normalized = normalize(text);

        let intent = if contains_any(&normalized, CANCEL_PHRASES) {
            IntentTag::Cancel
        } else if Self::is_go_back(&normalized) {
            IntentTag::GoBack
        } else if contains_any(&normalized, REPEAT_PHRASES) {
            IntentTag::Repeat
        } else if context.active_task.is_some() {
            match context.required_input {
                InputKind::Confirmation => IntentTag::Confirm,
                _ => IntentTag::AnswerInput,
            }
        } else if let Some(task) = Self::detect_task(&normalized) {
            IntentTag::StartTask(task)
        } else if Self::is_question(text, &normalized) {
            IntentTag::GeneralQuestion
        } else {
            IntentTag::Unknown
        };

        tracing::trace!(?intent, active_task = ?context.active_task, "Classified utterance");
        intent
    }

    fn extract_number(&self, text: &str) -> Option<f64> {
        slot_extraction::extract_number(text)
    }

    fn extract_yes_no(&self, text: &str) -> Option<bool> {
        slot_extraction::extract_yes_no(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_task(kind: InputKind) -> InterpreterContext {
        InterpreterContext::new(kind, Some(TaskType::Loan))
    }

    #[test]
    fn test_task_starts() {
        let interpreter = RuleBasedInterpreter::new();
        let idle = InterpreterContext::idle();

        assert_eq!(
            interpreter.classify("Take a loan", &idle),
            IntentTag::StartTask(TaskType::Loan)
        );
        assert_eq!(
            interpreter.classify("I want to borrow some money", &idle),
            IntentTag::StartTask(TaskType::Loan)
        );
        assert_eq!(
            interpreter.classify("Enroll in a plan", &idle),
            IntentTag::StartTask(TaskType::Enrollment)
        );
        assert_eq!(
            interpreter.classify("Make a withdrawal", &idle),
            IntentTag::StartTask(TaskType::Withdrawal)
        );
    }

    #[test]
    fn test_global_commands_win_in_any_context() {
        let interpreter = RuleBasedInterpreter::new();

        for context in [
            InterpreterContext::idle(),
            in_task(InputKind::Number),
            in_task(InputKind::Confirmation),
        ] {
            assert_eq!(interpreter.classify("Cancel", &context), IntentTag::Cancel);
            assert_eq!(interpreter.classify("never mind", &context), IntentTag::Cancel);
            assert_eq!(interpreter.classify("go back", &context), IntentTag::GoBack);
            assert_eq!(interpreter.classify("Back", &context), IntentTag::GoBack);
            assert_eq!(interpreter.classify("Repeat", &context), IntentTag::Repeat);
            assert_eq!(
                interpreter.classify("can you say that again", &context),
                IntentTag::Repeat
            );
        }
    }

    #[test]
    fn test_back_inside_a_sentence_is_an_answer() {
        let interpreter = RuleBasedInterpreter::new();
        assert_eq!(
            interpreter.classify("pay it back over 5 years", &in_task(InputKind::Number)),
            IntentTag::AnswerInput
        );
    }

    #[test]
    fn test_active_task_answers() {
        let interpreter = RuleBasedInterpreter::new();

        assert_eq!(
            interpreter.classify("5000", &in_task(InputKind::Number)),
            IntentTag::AnswerInput
        );
        assert_eq!(
            interpreter.classify("yes", &in_task(InputKind::YesNo)),
            IntentTag::AnswerInput
        );
        // A task word mid-task is still an answer
        assert_eq!(
            interpreter.classify("the loan amount is 5000", &in_task(InputKind::Number)),
            IntentTag::AnswerInput
        );
        assert_eq!(
            interpreter.classify("yes, submit loan", &in_task(InputKind::Confirmation)),
            IntentTag::Confirm
        );
        assert_eq!(
            interpreter.classify("yes", &in_task(InputKind::Confirmation)),
            IntentTag::Confirm
        );
    }

    #[test]
    fn test_general_questions() {
        let interpreter = RuleBasedInterpreter::new();
        let idle = InterpreterContext::idle();

        assert_eq!(
            interpreter.classify("Ask about contributions", &idle),
            IntentTag::GeneralQuestion
        );
        assert_eq!(
            interpreter.classify("How do I name a beneficiary", &idle),
            IntentTag::GeneralQuestion
        );
        assert_eq!(
            interpreter.classify("anything new?", &idle),
            IntentTag::GeneralQuestion
        );
    }

    #[test]
    fn test_unknown() {
        let interpreter = RuleBasedInterpreter::new();
        assert_eq!(
            interpreter.classify("purple elephants", &InterpreterContext::idle()),
            IntentTag::Unknown
        );
    }

    #[test]
    fn test_extractors_delegate() {
        let interpreter = RuleBasedInterpreter::new();
        assert_eq!(interpreter.extract_number("$5,000"), Some(5000.0));
        assert_eq!(interpreter.extract_yes_no("yep"), Some(true));
    }
}
