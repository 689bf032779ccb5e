use crate::a11y::Channel;
use crate::app::{
    action::{Action, UpdateResult},
    state::{AppState, Focus, HelpState},
};
use crate::domain::feedback::UiFeedback;
use std::time::Instant;

/// Focus movement, the help overlay and app-level housekeeping. Every focus
/// change speaks the pane it lands on; a silent focus jump strands the
/// listener.
pub fn update(
    state: &mut AppState,
    action: &Action,
    _fx: &mut dyn UiFeedback,
    now: Instant,
) -> UpdateResult {
    match action {
        Action::CycleFocus => {
            state.focus = state.focus.next();
            let text = focus_label(state);
            state.announce(&text, Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        Action::FocusInput => {
            state.focus = Focus::Input;
            state.announce("Compose line", Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        Action::FocusHistory => {
            state.focus = Focus::History;
            let text = focus_label(state);
            state.announce(&text, Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        Action::ToggleHelp => {
            let text = if state.help.is_some() {
                state.help = None;
                "Help closed"
            } else {
                state.help = Some(HelpState::default());
                "Help"
            };
            state.announce(text, Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        Action::ScrollHelp(delta) => {
            if let Some(help) = &mut state.help {
                help.scroll = if *delta < 0 {
                    help.scroll.saturating_sub(delta.unsigned_abs())
                } else {
                    help.scroll.saturating_add(*delta as u16)
                };
            }
            UpdateResult::Handled(None)
        }
        Action::Quit => {
            state.should_quit = true;
            UpdateResult::Handled(None)
        }
        Action::Tick => {
            state.tick_status(now);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn focus_label(state: &AppState) -> String {
    match state.focus {
        Focus::Menu => {
            let item = state.menu.current_item_text();
            if item.is_empty() {
                "Menu".to_string()
            } else {
                format!("Menu: {item}")
            }
        }
        Focus::Input => "Compose line".to_string(),
        Focus::History => format!("History, {}", state.history.current_buffer().summary()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::PendingFeedback;

    const MARKER: char = '\u{200B}';

    fn assertive_text(state: &mut AppState) -> Option<String> {
        state
            .announcer
            .take_ready()
            .into_iter()
            .find(|c| c.channel == Channel::Assertive)
            .map(|c| c.text.trim_end_matches(MARKER).to_string())
    }

    #[test]
    fn focus_cycles_menu_input_history() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(&mut state, &Action::CycleFocus, &mut fx, Instant::now());
        assert_eq!(state.focus, Focus::Input);

        update(&mut state, &Action::CycleFocus, &mut fx, Instant::now());
        assert_eq!(state.focus, Focus::History);

        update(&mut state, &Action::CycleFocus, &mut fx, Instant::now());
        assert_eq!(state.focus, Focus::Menu);
    }

    #[test]
    fn focus_change_speaks_the_destination() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(&mut state, &Action::CycleFocus, &mut fx, Instant::now());

        assert_eq!(assertive_text(&mut state).as_deref(), Some("Compose line"));
    }

    #[test]
    fn help_toggles_open_and_closed() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(&mut state, &Action::ToggleHelp, &mut fx, Instant::now());
        assert!(state.help.is_some());

        update(&mut state, &Action::ToggleHelp, &mut fx, Instant::now());
        assert!(state.help.is_none());
    }

    #[test]
    fn help_scroll_saturates_at_the_top() {
        let mut state = AppState::default();
        state.help = Some(HelpState { scroll: 1 });
        let mut fx = PendingFeedback::default();

        update(&mut state, &Action::ScrollHelp(-5), &mut fx, Instant::now());
        assert_eq!(state.help.as_ref().unwrap().scroll, 0);

        update(&mut state, &Action::ScrollHelp(3), &mut fx, Instant::now());
        assert_eq!(state.help.as_ref().unwrap().scroll, 3);
    }

    #[test]
    fn tick_expires_the_status_line() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        let start = Instant::now();
        state.set_status("saved", start);

        update(&mut state, &Action::Tick, &mut fx, start);
        assert_eq!(state.status_message.as_deref(), Some("saved"));

        update(
            &mut state,
            &Action::Tick,
            &mut fx,
            start + std::time::Duration::from_secs(7),
        );
        assert_eq!(state.status_message, None);
    }
}
