//! Structured controller responses
//!
//! A `Response` is everything the UI layer needs to render one turn: the
//! text to speak or show, a coarse hint about what to display, suggested
//! quick replies, and whether an exact confirmation phrase is pending.

use serde::{Deserialize, Serialize};

use crate::error::StepErrorKind;

/// Rendering hint for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiHint {
    Speaking,
    AwaitingInput,
    ConfirmationRequired,
    Completed,
    Error,
    Idle,
}

impl UiHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiHint::Speaking => "speaking",
            UiHint::AwaitingInput => "awaiting_input",
            UiHint::ConfirmationRequired => "confirmation_required",
            UiHint::Completed => "completed",
            UiHint::Error => "error",
            UiHint::Idle => "idle",
        }
    }
}

/// One turn's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub text: String,
    pub ui_hint: UiHint,
    pub requires_confirmation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<StepErrorKind>,
}

impl Response {
    fn with_hint(text: impl Into<String>, ui_hint: UiHint) -> Self {
        Self {
            text: text.into(),
            ui_hint,
            requires_confirmation: false,
            confirmation_phrase: None,
            quick_replies: Vec::new(),
            error_message: None,
            error_kind: None,
        }
    }

    /// A prompt that waits for the next answer
    pub fn awaiting(text: impl Into<String>) -> Self {
        Self::with_hint(text, UiHint::AwaitingInput)
    }

    /// Informational text, no particular answer expected
    pub fn speaking(text: impl Into<String>) -> Self {
        Self::with_hint(text, UiHint::Speaking)
    }

    /// No task running
    pub fn idle(text: impl Into<String>) -> Self {
        Self::with_hint(text, UiHint::Idle)
    }

    /// Task finished
    pub fn completed(text: impl Into<String>) -> Self {
        Self::with_hint(text, UiHint::Completed)
    }

    /// Submission pending until the user says `phrase`
    pub fn confirmation_required(text: impl Into<String>, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        let mut response = Self::with_hint(text, UiHint::ConfirmationRequired);
        response.requires_confirmation = true;
        response.quick_replies = vec![phrase.clone(), "Cancel".to_string()];
        response.confirmation_phrase = Some(phrase);
        response
    }

    /// Internal failure reported to the caller
    pub fn error(text: impl Into<String>) -> Self {
        Self::with_hint(text, UiHint::Error).with_error(StepErrorKind::UnknownStepOrTask)
    }

    /// Attach a structured error
    pub fn with_error(mut self, kind: StepErrorKind) -> Self {
        self.error_message = Some(kind.message().to_string());
        self.error_kind = Some(kind);
        self
    }

    /// Replace the quick replies
    pub fn with_quick_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quick_replies = replies.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_response_carries_phrase() {
        let response = Response::confirmation_required("Say it", "yes, submit loan");
        assert!(response.requires_confirmation);
        assert_eq!(response.ui_hint, UiHint::ConfirmationRequired);
        assert_eq!(response.confirmation_phrase.as_deref(), Some("yes, submit loan"));
        assert_eq!(response.quick_replies[0], "yes, submit loan");
    }

    #[test]
    fn test_json_shape() {
        let response = Response::awaiting("How much?").with_error(StepErrorKind::OverMax);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["uiHint"], "awaiting_input");
        assert_eq!(json["requiresConfirmation"], false);
        assert_eq!(json["errorKind"], "over_max");
        assert!(json.get("confirmationPhrase").is_none());
        assert!(json.get("quickReplies").is_none());
    }
}
