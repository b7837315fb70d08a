//! Step processing, answers and the confirmation gate

use plan_assistant_core::{
    Error, FieldValue, InputKind, IntentTag, Response, Result, StepError, StepErrorKind, StepId,
    TaskType,
};
use plan_assistant_text_processing::is_hedged;

use super::{active, DialogueController};
use crate::catalog::StepDefinition;
use crate::state::DialogueState;
use crate::topics::{self, MENU_REPLIES, TAKE_ME_THERE};
use crate::{change, confirmation};

impl DialogueController {
    pub(super) fn lookup(&self, id: StepId) -> Result<&StepDefinition> {
        self.catalog.step(id).ok_or(Error::UnknownStep(id))
    }

    /// Turn while no task is running
    pub(super) fn handle_idle_turn(
        &self,
        state: &mut DialogueState,
        intent: IntentTag,
        text: &str,
    ) -> Result<Response> {
        let offered = state.offered_task.take();

        match intent {
            IntentTag::StartTask(task) => self.start_task(state, task),
            IntentTag::GeneralQuestion => Ok(self.answer_question(state, text)),
            _ => match offered {
                Some(task)
                    if topics::accepts_offer(text)
                        || self.interpreter.extract_yes_no(text) == Some(true) =>
                {
                    self.start_task(state, task)
                },
                _ => Ok(self.menu_response(state, "Sorry, I can't help with that yet.")),
            },
        }
    }

    /// Turn while a task is running
    pub(super) fn handle_task_turn(
        &self,
        state: &mut DialogueState,
        intent: IntentTag,
        text: &str,
    ) -> Result<Response> {
        if change::is_change_request(text) {
            return self.handle_change_request(state, text);
        }

        match intent {
            IntentTag::AnswerInput | IntentTag::Confirm
                if state.required_input == InputKind::Confirmation =>
            {
                self.process_confirmation(state, text)
            },
            IntentTag::AnswerInput => self.process_answer(state, text),
            _ => self.clarify_step(state),
        }
    }

    /// Start `task` from a fresh state
    pub(super) fn start_task(&self, state: &mut DialogueState, task: TaskType) -> Result<Response> {
        let first = self
            .catalog
            .first_step(task)
            .ok_or(Error::UnknownTask(task))?;

        *state = DialogueState::for_task(task, first);
        tracing::info!(?task, "Task started");

        self.process_current_step(state)
    }

    /// Present the active step, or finish the task if it is a terminal step
    pub(super) fn process_current_step(&self, state: &mut DialogueState) -> Result<Response> {
        let (task, id) = active(state)?;
        let step = self.lookup(id)?;

        let prompt = step.prompt(&state.collected_data, None);
        state.required_input = step.input();
        state.last_prompt = Some(prompt.clone());

        let next = step.next_step(&state.collected_data);
        if let Some(next) = next {
            self.lookup(next)?;
        }

        tracing::debug!(?task, step = %id, input = ?step.input(), "Presenting step");

        match (next, step.input()) {
            (None, InputKind::None) => {
                tracing::info!(?task, fields = state.collected_data.len(), "Task completed");
                state.complete();
                Ok(Response::completed(prompt).with_quick_replies(MENU_REPLIES.iter().copied()))
            },
            _ => self.step_response(task, prompt, step.input()),
        }
    }

    /// Validate an answer for the active step and advance on success
    pub(super) fn process_answer(&self, state: &mut DialogueState, text: &str) -> Result<Response> {
        let (task, id) = active(state)?;
        let step = self.lookup(id)?;

        let parsed = match step.input() {
            InputKind::Number => self.parse_number(step, text),
            InputKind::YesNo => match self.interpreter.extract_yes_no(text) {
                Some(false) if step.declining_aborts() => return Ok(self.abort(state, task)),
                Some(answer) => Ok(FieldValue::Bool(answer)),
                None => Err(StepErrorKind::Invalid),
            },
            InputKind::Text => step
                .validate(text, &state.collected_data)
                .unwrap_or_else(|| Ok(FieldValue::Text(text.trim().to_string()))),
            InputKind::Confirmation => return self.process_confirmation(state, text),
            InputKind::None => Err(StepErrorKind::Invalid),
        };

        match parsed {
            Ok(value) => self.accept(state, step, value),
            Err(kind) => self.reject(state, task, step, kind),
        }
    }

    fn parse_number(
        &self,
        step: &StepDefinition,
        text: &str,
    ) -> std::result::Result<FieldValue, StepErrorKind> {
        let value = match self.interpreter.extract_number(text) {
            Some(value) => value,
            None if is_hedged(text) => return Err(StepErrorKind::Ambiguous),
            None => return Err(StepErrorKind::Invalid),
        };

        let value = match step.policy() {
            Some(policy) => policy.check(value, text)?,
            None => value,
        };

        Ok(FieldValue::Number(value))
    }

    fn accept(
        &self,
        state: &mut DialogueState,
        step: &StepDefinition,
        value: FieldValue,
    ) -> Result<Response> {
        tracing::debug!(step = %step.id(), field = step.field(), "Answer accepted");

        state.last_step_error = None;
        state
            .collected_data
            .insert(step.field().to_string(), value);
        state.step_history.push(step.id());

        match step.next_step(&state.collected_data) {
            Some(next) => {
                state.active_step = Some(next);
                self.process_current_step(state)
            },
            None => Ok(self.complete(state, step.id().task())),
        }
    }

    fn reject(
        &self,
        state: &mut DialogueState,
        task: TaskType,
        step: &StepDefinition,
        kind: StepErrorKind,
    ) -> Result<Response> {
        tracing::debug!(step = %step.id(), ?kind, "Answer rejected");

        state.last_step_error = Some(StepError::new(kind, step.id()));
        let prompt = step.prompt(&state.collected_data, Some(kind));
        state.last_prompt = Some(prompt.clone());

        Ok(self.step_response(task, prompt, step.input())?.with_error(kind))
    }

    /// Exact-phrase gate before an irreversible submission
    pub(super) fn process_confirmation(
        &self,
        state: &mut DialogueState,
        text: &str,
    ) -> Result<Response> {
        let (task, id) = active(state)?;
        let step = self.lookup(id)?;

        if confirmation::matches(task, text) {
            return Ok(self.complete(state, task));
        }

        self.reject(state, task, step, StepErrorKind::InvalidConfirmationPhrase)
    }

    fn complete(&self, state: &mut DialogueState, task: TaskType) -> Response {
        tracing::info!(?task, fields = state.collected_data.len(), "Task completed");
        state.complete();

        let text = format!(
            "All done! Your {} has been submitted. Is there anything else I can help with?",
            task.artifact()
        );
        state.last_prompt = Some(text.clone());
        Response::completed(text).with_quick_replies(MENU_REPLIES.iter().copied())
    }

    /// User declined a "continue?" step
    fn abort(&self, state: &mut DialogueState, task: TaskType) -> Response {
        tracing::info!(?task, step = ?state.active_step, "Task declined");
        *state = DialogueState::cancelled();

        let lead = format!("No problem, I've stopped your {}.", task.display_name());
        self.menu_response(state, &lead)
    }

    /// Answer a general question, offering the related task when there is one
    fn answer_question(&self, state: &mut DialogueState, text: &str) -> Response {
        let Some(topic) = self.topics.find(text) else {
            return self.menu_response(state, "");
        };

        tracing::debug!(topic = topic.id, "General question answered");
        state.last_prompt = Some(topic.answer.clone());

        match topic.offer {
            Some(task) => {
                state.offered_task = Some(task);
                Response::speaking(topic.answer.as_str())
                    .with_quick_replies([TAKE_ME_THERE, "No thanks"])
            },
            None => Response::speaking(topic.answer.as_str())
                .with_quick_replies(MENU_REPLIES.iter().copied()),
        }
    }

    /// Anything mid-task that is not an answer
    fn clarify_step(&self, state: &mut DialogueState) -> Result<Response> {
        let (task, id) = active(state)?;
        let step = self.lookup(id)?;

        let text = format!(
            "Let's finish your {} first. {}",
            task.display_name(),
            step.prompt(&state.collected_data, None)
        );
        state.last_prompt = Some(text.clone());
        self.step_response(task, text, step.input())
    }
}
