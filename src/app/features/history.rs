use crate::a11y::Channel;
use crate::app::{
    action::{Action, UpdateResult},
    state::AppState,
};
use crate::domain::feedback::UiFeedback;
use std::time::Instant;

/// Read-only history review. Every review step speaks the entry it lands on;
/// review on an empty buffer does nothing. Buffer switches re-announce the
/// buffer summary even when the switch clamps at an end, so the listener
/// always hears where they are.
pub fn update(
    state: &mut AppState,
    action: &Action,
    _fx: &mut dyn UiFeedback,
    now: Instant,
) -> UpdateResult {
    match action {
        Action::HistoryReview(delta) => {
            let text = state.history.review_move(*delta).map(|e| e.text.clone());
            speak(state, text, now);
            UpdateResult::Handled(None)
        }
        Action::HistoryPage(backward) => {
            let text = state.history.review_page(*backward).map(|e| e.text.clone());
            speak(state, text, now);
            UpdateResult::Handled(None)
        }
        Action::HistoryEdge(oldest) => {
            let text = state.history.review_edge(*oldest).map(|e| e.text.clone());
            speak(state, text, now);
            UpdateResult::Handled(None)
        }
        Action::HistoryBuffer(delta) => {
            state.history.switch(*delta);
            let summary = state.history.current_buffer().summary();
            state.announce(&summary, Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn speak(state: &mut AppState, text: Option<String>, now: Instant) {
    if let Some(text) = text {
        state.announce(&text, Channel::Assertive, now);
    }
}
