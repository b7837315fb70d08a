//! Cancel, go back, repeat and mid-flow changes

use plan_assistant_core::{Response, Result};

use super::{active, DialogueController};
use crate::change;
use crate::state::DialogueState;
use crate::topics::{MENU_REPLIES, MENU_TEXT};

impl DialogueController {
    /// Full reset to the idle default
    pub(super) fn cancel_in(&self, state: &mut DialogueState) -> Result<Response> {
        if let Some(task) = state.active_task {
            tracing::info!(?task, step = ?state.active_step, "Task cancelled");
        }
        *state = DialogueState::default();

        let text = format!("Okay, I've cancelled that. {}", MENU_TEXT);
        Ok(Response::idle(text).with_quick_replies(MENU_REPLIES.iter().copied()))
    }

    /// Rewind one step, purging the answers that step and the one being left produced
    ///
    /// At the first step nothing is rewound: the prompt is shown again and
    /// the user is asked whether to keep going.
    pub(super) fn go_back_in(&self, state: &mut DialogueState) -> Result<Response> {
        if !state.is_task_active() {
            return Ok(self.menu_response(state, "There's nothing to go back to."));
        }
        let (task, current) = active(state)?;

        let Some(previous) = state.step_history.pop() else {
            let step = self.lookup(current)?;
            let text = format!(
                "You're at the first step of your {}. Would you like to keep going? {}",
                task.display_name(),
                step.prompt(&state.collected_data, None)
            );
            state.last_step_error = None;
            state.last_prompt = Some(text.clone());
            return self.step_response(task, text, step.input());
        };

        for id in [current, previous] {
            let field = self.lookup(id)?.field();
            state.collected_data.remove(field);
        }
        state.active_step = Some(previous);
        state.last_step_error = None;

        tracing::debug!(?task, from = %current, to = %previous, "Stepped back");
        self.process_current_step(state)
    }

    /// Say the last prompt again, verbatim
    pub(super) fn repeat_in(&self, state: &mut DialogueState) -> Result<Response> {
        let Some(prompt) = state.last_prompt.clone() else {
            let text = format!("There's nothing to repeat yet. {}", MENU_TEXT);
            return Ok(Response::speaking(text).with_quick_replies(MENU_REPLIES.iter().copied()));
        };

        match state.active_task {
            Some(task) => self.step_response(task, prompt, state.required_input),
            None => Ok(Response::idle(prompt).with_quick_replies(MENU_REPLIES.iter().copied())),
        }
    }

    /// "Actually, change the amount": rewind to the named step
    ///
    /// The target's answer and every answer after it are purged. Naming the
    /// current step treats the turn as a fresh answer; naming a step not yet
    /// reached keeps the user where they are. With no recognizable target
    /// this is an ordinary step back.
    pub(super) fn handle_change_request(
        &self,
        state: &mut DialogueState,
        text: &str,
    ) -> Result<Response> {
        let (task, current) = active(state)?;

        let Some(target) = change::target_step(task, text) else {
            tracing::debug!(?task, "Change request names no step, stepping back");
            return self.go_back_in(state);
        };

        if target == current {
            return self.process_answer(state, text);
        }

        let Some(index) = state.step_history.iter().position(|id| *id == target) else {
            let step = self.lookup(current)?;
            let text = format!(
                "We haven't got to that yet. {}",
                step.prompt(&state.collected_data, None)
            );
            state.last_prompt = Some(text.clone());
            return self.step_response(task, text, step.input());
        };

        let mut purged: Vec<_> = state.step_history.drain(index..).collect();
        purged.push(current);
        for id in purged {
            let field = self.lookup(id)?.field();
            state.collected_data.remove(field);
        }
        state.active_step = Some(target);
        state.last_step_error = None;

        tracing::info!(?task, from = %current, to = %target, "Change requested");

        let mut response = self.process_current_step(state)?;
        response.text = format!("Sure, let's change that. {}", response.text);
        Ok(response)
    }
}
