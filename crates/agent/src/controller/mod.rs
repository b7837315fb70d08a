//! Dialogue controller
//!
//! A synchronous reducer over one `DialogueState`: every call to
//! `handle_user_input` classifies the turn, applies at most one state
//! transition and returns exactly one `Response`.
//!
//! ## Turn order
//!
//! 1. Empty or unintelligible input is answered without touching state
//! 2. Cancel, go back and repeat are honored whether or not a task runs
//! 3. With a task running: change requests, answers, the confirmation gate
//! 4. Without one: task starts, general questions, the menu
//!
//! ## Consistency
//!
//! Each turn works on a staged copy of the state. If a catalog lookup fails
//! part way, the copy is dropped and the caller gets an error response with
//! the state exactly as it was before the turn.

mod navigation;
mod steps;

use std::sync::Arc;

use plan_assistant_config::{AccountConfig, DialogueConfig};
use plan_assistant_core::{
    Error, InputInterpreter, InputKind, IntentTag, NoopShaper, Response, ResponseShaper, Result,
    StepErrorKind, StepId, TaskType,
};
use plan_assistant_text_processing::phrases::is_punctuation_only;
use plan_assistant_text_processing::RuleBasedInterpreter;

use crate::catalog::{DefaultCatalog, StepCatalog};
use crate::state::DialogueState;
use crate::topics::{TopicTable, MENU_REPLIES, MENU_TEXT};

const YES_NO_REPLIES: [&str; 2] = ["Yes", "No"];
const STEP_REPLIES: [&str; 3] = ["Repeat", "Go back", "Cancel"];

const INTERNAL_ERROR_TEXT: &str = "Sorry, something went wrong on my side. Please try again.";

/// Owns one conversation's dialogue state
pub struct DialogueController {
    interpreter: Arc<dyn InputInterpreter>,
    catalog: Arc<dyn StepCatalog>,
    shaper: Arc<dyn ResponseShaper>,
    topics: TopicTable,
    participant_name: String,
    state: DialogueState,
}

impl DialogueController {
    pub fn new(interpreter: Arc<dyn InputInterpreter>, catalog: Arc<dyn StepCatalog>) -> Self {
        Self {
            interpreter,
            catalog,
            shaper: Arc::new(NoopShaper),
            topics: TopicTable::default(),
            participant_name: String::from("there"),
            state: DialogueState::default(),
        }
    }

    /// Rule-based interpreter and the default catalog built from settings
    pub fn from_config(dialogue: &DialogueConfig, account: &AccountConfig) -> Self {
        Self::new(
            Arc::new(RuleBasedInterpreter::new()),
            Arc::new(DefaultCatalog::new(dialogue, account)),
        )
        .with_topics(TopicTable::new(&dialogue.enrollment))
        .with_participant_name(account.participant_name.clone())
    }

    pub fn with_topics(mut self, topics: TopicTable) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_shaper(mut self, shaper: Arc<dyn ResponseShaper>) -> Self {
        self.shaper = shaper;
        self
    }

    pub fn with_participant_name(mut self, name: impl Into<String>) -> Self {
        self.participant_name = name.into();
        self
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    /// Opening message for a new conversation
    pub fn greeting(&self) -> Response {
        let text = format!("Hi {}! {}", self.participant_name, MENU_TEXT);
        self.finish(Response::idle(text).with_quick_replies(MENU_REPLIES.iter().copied()))
    }

    /// Process one user utterance
    pub fn handle_user_input(&mut self, text: &str) -> Response {
        if let Some(kind) = screen_input(text) {
            tracing::debug!(
                ?kind,
                task = ?self.state.active_task,
                "Input rejected before classification"
            );
            let response = self.clarify_input(kind);
            return self.finish(response);
        }

        let context = self.state.interpreter_context();
        let intent = self.interpreter.classify(text, &context);
        tracing::debug!(
            ?intent,
            task = ?self.state.active_task,
            step = ?self.state.active_step,
            required = ?self.state.required_input,
            "Turn classified"
        );

        let response = match intent {
            IntentTag::Cancel => self.transact(|c, state| c.cancel_in(state)),
            IntentTag::GoBack => self.transact(|c, state| c.go_back_in(state)),
            IntentTag::Repeat => self.transact(|c, state| c.repeat_in(state)),
            _ if self.state.is_task_active() => {
                self.transact(|c, state| c.handle_task_turn(state, intent, text))
            },
            _ => self.transact(|c, state| c.handle_idle_turn(state, intent, text)),
        };

        self.finish(response)
    }

    /// Abandon everything; same as the user saying "cancel"
    pub fn cancel(&mut self) -> Response {
        let response = self.transact(|c, state| c.cancel_in(state));
        self.finish(response)
    }

    /// Step back once; same as the user saying "go back"
    pub fn go_back(&mut self) -> Response {
        let response = self.transact(|c, state| c.go_back_in(state));
        self.finish(response)
    }

    /// Return to the idle default without producing a response
    pub fn reset(&mut self) {
        self.state = DialogueState::default();
    }

    /// Run `op` against a staged copy, committing only on success
    fn transact<F>(&mut self, op: F) -> Response
    where
        F: FnOnce(&Self, &mut DialogueState) -> Result<Response>,
    {
        let mut staged = self.state.clone();
        match op(self, &mut staged) {
            Ok(response) => {
                self.state = staged;
                response
            },
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kind = ?err.kind(),
                    task = ?self.state.active_task,
                    step = ?self.state.active_step,
                    "Turn discarded"
                );
                Response::error(INTERNAL_ERROR_TEXT)
            },
        }
    }

    /// Let the shaper reword the text, never the gating
    fn finish(&self, mut response: Response) -> Response {
        let Some(shaped) = self.shaper.shape(&response.text, response.ui_hint) else {
            return response;
        };

        let keeps_phrase = response
            .confirmation_phrase
            .as_deref()
            .map_or(true, |phrase| shaped.to_lowercase().contains(&phrase.to_lowercase()));

        if keeps_phrase {
            response.text = shaped;
        } else {
            tracing::debug!("Shaped text dropped the confirmation phrase, keeping original");
        }
        response
    }

    /// Clarification for empty or unintelligible input
    fn clarify_input(&self, kind: StepErrorKind) -> Response {
        let lead = match kind {
            StepErrorKind::Empty => "I didn't hear anything.",
            _ => "Sorry, I didn't understand that.",
        };

        if self.state.is_task_active() {
            let text = format!("{} You can say repeat, go back or cancel.", lead);
            Response::awaiting(text)
                .with_error(kind)
                .with_quick_replies(STEP_REPLIES)
        } else {
            let text = format!("{} What would you like to do?", lead);
            Response::idle(text)
                .with_error(kind)
                .with_quick_replies(MENU_REPLIES.iter().copied())
        }
    }

    /// Response for presenting a step's prompt, shaped by what it expects
    fn step_response(&self, task: TaskType, prompt: String, input: InputKind) -> Result<Response> {
        let response = match input {
            InputKind::Confirmation => {
                let phrase = crate::confirmation::required_phrase(task).ok_or_else(|| {
                    Error::InvalidState(format!("{} has a confirmation step but no phrases", task))
                })?;
                Response::confirmation_required(prompt, phrase)
            },
            InputKind::YesNo => Response::awaiting(prompt).with_quick_replies(YES_NO_REPLIES),
            InputKind::Number | InputKind::Text => {
                Response::awaiting(prompt).with_quick_replies(STEP_REPLIES)
            },
            InputKind::None => Response::speaking(prompt),
        };
        Ok(response)
    }

    /// Idle response with the topic menu
    fn menu_response(&self, state: &mut DialogueState, lead: &str) -> Response {
        let text = if lead.is_empty() {
            MENU_TEXT.to_string()
        } else {
            format!("{} {}", lead, MENU_TEXT)
        };
        state.last_prompt = Some(text.clone());
        Response::idle(text).with_quick_replies(MENU_REPLIES.iter().copied())
    }
}

/// Active task and step, or an internal error when either is missing
fn active(state: &DialogueState) -> Result<(TaskType, StepId)> {
    match (state.active_task, state.active_step) {
        (Some(task), Some(step)) => Ok((task, step)),
        _ => Err(Error::InvalidState(
            "task and step must be set together".to_string(),
        )),
    }
}

/// Reject input too thin to classify
///
/// A lone digit passes: it is a complete answer to a years question.
fn screen_input(text: &str) -> Option<StepErrorKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(StepErrorKind::Empty);
    }

    let single_digit = trimmed.len() == 1 && trimmed.chars().all(|c| c.is_ascii_digit());
    if (trimmed.chars().count() < 2 && !single_digit) || is_punctuation_only(trimmed) {
        return Some(StepErrorKind::Unintelligible);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_assistant_core::{LoanStep, UiHint};

    use crate::state::Phase;

    fn new_controller() -> DialogueController {
        DialogueController::from_config(&DialogueConfig::default(), &AccountConfig::default())
    }

    #[test]
    fn test_screen_input() {
        assert_eq!(screen_input(""), Some(StepErrorKind::Empty));
        assert_eq!(screen_input("   "), Some(StepErrorKind::Empty));
        assert_eq!(screen_input("x"), Some(StepErrorKind::Unintelligible));
        assert_eq!(screen_input("?!"), Some(StepErrorKind::Unintelligible));
        assert_eq!(screen_input("5"), None);
        assert_eq!(screen_input("no"), None);
    }

    #[test]
    fn test_guard_leaves_state_untouched() {
        let mut controller = new_controller();
        controller.handle_user_input("I want a loan");
        let before = controller.state().clone();

        let response = controller.handle_user_input("  ");
        assert_eq!(response.error_kind, Some(StepErrorKind::Empty));
        assert_eq!(response.quick_replies, STEP_REPLIES);
        assert_eq!(controller.state(), &before);

        let response = controller.handle_user_input("...");
        assert_eq!(response.error_kind, Some(StepErrorKind::Unintelligible));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_idle_guard_is_generic() {
        let mut controller = new_controller();
        let response = controller.handle_user_input("");
        assert_eq!(response.ui_hint, UiHint::Idle);
        assert_eq!(response.quick_replies, MENU_REPLIES);
    }

    #[test]
    fn test_greeting_uses_name() {
        let controller = new_controller().with_participant_name("Dana");
        let response = controller.greeting();
        assert!(response.text.starts_with("Hi Dana!"));
        assert_eq!(response.ui_hint, UiHint::Idle);
    }

    #[test]
    fn test_start_task_presents_first_step() {
        let mut controller = new_controller();
        let response = controller.handle_user_input("I'd like to take a loan");

        assert_eq!(response.ui_hint, UiHint::AwaitingInput);
        assert_eq!(response.quick_replies, STEP_REPLIES);
        assert!(response.text.contains("you can borrow up to"));
        let state = controller.state();
        assert_eq!(state.phase, Phase::TaskInProgress);
        assert_eq!(state.active_step, Some(LoanStep::Amount.into()));
        assert_eq!(state.required_input, InputKind::Number);
        assert_eq!(state.last_prompt.as_deref(), Some(response.text.as_str()));
    }

    struct Shouting;

    impl ResponseShaper for Shouting {
        fn shape(&self, text: &str, _hint: plan_assistant_core::UiHint) -> Option<String> {
            Some(text.to_uppercase())
        }
    }

    struct Dropping;

    impl ResponseShaper for Dropping {
        fn shape(&self, _text: &str, _hint: plan_assistant_core::UiHint) -> Option<String> {
            Some("Please confirm.".to_string())
        }
    }

    #[test]
    fn test_shaper_rewords_text_only() {
        let mut controller = new_controller().with_shaper(Arc::new(Shouting));
        let response = controller.handle_user_input("take a loan");
        assert_eq!(response.text, response.text.to_uppercase());
        assert_eq!(response.ui_hint, UiHint::AwaitingInput);
    }

    #[test]
    fn test_shaper_cannot_drop_confirmation_phrase() {
        let mut controller = new_controller().with_shaper(Arc::new(Dropping));
        for turn in ["take a loan", "5000", "5", "yes"] {
            controller.handle_user_input(turn);
        }
        assert_eq!(controller.state().required_input, InputKind::Confirmation);

        let response = controller.handle_user_input("repeat");
        assert!(response.requires_confirmation);
        assert!(response.text.contains("yes, submit loan"));

        // Uppercasing keeps the phrase, so it is allowed
        let mut controller = new_controller().with_shaper(Arc::new(Shouting));
        for turn in ["take a loan", "5000", "5", "yes"] {
            controller.handle_user_input(turn);
        }
        let response = controller.handle_user_input("repeat");
        assert!(response.text.contains("YES, SUBMIT LOAN"));
    }
}
