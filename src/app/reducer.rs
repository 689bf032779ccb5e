use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};
use crate::a11y::Channel;
use crate::domain::feedback::{PendingFeedback, UiFeedback};
use std::time::Instant;

type Feature =
    for<'a> fn(&mut AppState<'a>, &Action, &mut dyn UiFeedback, Instant) -> UpdateResult;

const FEATURES: [Feature; 5] = [
    features::menu::update,
    features::history::update,
    features::compose::update,
    features::session::update,
    features::ui::update,
];

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    update_at(state, action, Instant::now())
}

/// Runs `action` through the feature chain, then applies whatever feedback
/// the handler recorded. Split from `update` so tests can steer the clock.
pub fn update_at(state: &mut AppState, action: Action, now: Instant) -> Option<Command> {
    let mut fx = PendingFeedback::default();
    let command = dispatch(state, &action, &mut fx, now);
    settle(state, fx, now);
    command
}

fn dispatch(
    state: &mut AppState,
    action: &Action,
    fx: &mut dyn UiFeedback,
    now: Instant,
) -> Option<Command> {
    for feature in FEATURES {
        match feature(state, action, fx, now) {
            UpdateResult::Handled(command) => return command,
            UpdateResult::NotHandled => {}
        }
    }
    tracing::debug!(?action, "action fell through the reducer chain");
    None
}

/// Boundary repeats become polite announcements; cues queue up for the loop
/// to sound once the frame settles.
fn settle(state: &mut AppState, fx: PendingFeedback, now: Instant) {
    if let Some(text) = fx.boundary_text {
        state.announce(&text, Channel::Polite, now);
    }
    for name in fx.server_sounds {
        tracing::debug!(name, "server sound");
        state.pending_cues.push(crate::domain::models::SoundCue::Server);
    }
    state.pending_cues.extend(fx.cues);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MenuItem, SoundCue};
    use crate::domain::protocol::{ServerEvent, WireMenuItem};

    const MARKER: char = '\u{200B}';

    fn polite_text(state: &mut AppState) -> Option<String> {
        state
            .announcer
            .take_ready()
            .into_iter()
            .find(|c| c.channel == Channel::Polite)
            .map(|c| c.text.trim_end_matches(MARKER).to_string())
    }

    #[test]
    fn boundary_repeat_is_applied_as_a_polite_announcement() {
        let mut state = AppState::default();
        state.menu.replace(
            "main".into(),
            vec![MenuItem::new("Play"), MenuItem::new("Quit")],
            None,
            0,
            Default::default(),
            true,
        );

        let now = Instant::now();
        let command = update_at(&mut state, Action::MoveSelection(-1), now);

        assert_eq!(command, None);
        assert_eq!(state.pending_cues, vec![SoundCue::Move]);
        assert_eq!(polite_text(&mut state).as_deref(), Some("Play"));
    }

    #[test]
    fn menu_push_then_activation_round_trip() {
        let mut state = AppState::default();
        let now = Instant::now();

        update_at(
            &mut state,
            Action::Server(ServerEvent::Menu {
                menu_id: "lobby".into(),
                items: vec![WireMenuItem::Plain("Sit down".into())],
                selection_id: None,
                position: 0,
                escape_behavior: Default::default(),
                multiletter: true,
            }),
            now,
        );

        let command = update_at(&mut state, Action::ActivateSelection, now);

        assert_eq!(
            command,
            Some(Command::SendMenuSelection {
                menu_id: "lobby".into(),
                selection: 1,
                selection_id: None,
            })
        );
        assert!(state.pending_cues.contains(&SoundCue::Activate));
    }

    #[test]
    fn server_sound_queues_a_cue() {
        let mut state = AppState::default();

        update_at(
            &mut state,
            Action::Server(ServerEvent::PlaySound {
                name: "deal".into(),
            }),
            Instant::now(),
        );

        assert_eq!(state.pending_cues, vec![SoundCue::Server]);
    }

    #[test]
    fn quit_action_is_handled_by_the_chain() {
        let mut state = AppState::default();
        update_at(&mut state, Action::Quit, Instant::now());
        assert!(state.should_quit);
    }
}
