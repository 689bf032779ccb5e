use crate::a11y::Channel;
use crate::app::{
    action::{Action, UpdateResult},
    state::{AppState, Focus},
};
use crate::domain::feedback::UiFeedback;
use crate::domain::models::MenuItem;
use crate::domain::protocol::ServerEvent;
use chrono::Local;
use std::time::Instant;

const ACTIVITY_BUFFER: &str = "activity";
const CHAT_BUFFER: &str = "chats";
const SPEECH_BUFFER: &str = "misc";

/// Applies everything that arrives from the link reader task. Server events
/// only ever touch state; outbound traffic stays with the user-driven
/// features.
pub fn update(
    state: &mut AppState,
    action: &Action,
    fx: &mut dyn UiFeedback,
    now: Instant,
) -> UpdateResult {
    match action {
        Action::Server(event) => {
            apply(state, event, fx, now);
            UpdateResult::Handled(None)
        }
        Action::ConnectionLost(reason) => {
            state.connected = false;
            let text = if reason.is_empty() {
                "Connection lost".to_string()
            } else {
                format!("Connection lost: {reason}")
            };
            state.history.add(ACTIVITY_BUFFER, &text, Local::now());
            state.set_status(text.clone(), now);
            state.announce(&text, Channel::Assertive, now);
            UpdateResult::Handled(None)
        }
        Action::LinkError(message) => {
            state.set_status(message.clone(), now);
            state.announce(message, Channel::Polite, now);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn apply(state: &mut AppState, event: &ServerEvent, fx: &mut dyn UiFeedback, now: Instant) {
    match event {
        ServerEvent::AuthorizeSuccess { username } => {
            state.connected = true;
            let text = if username.is_empty() {
                "Logged in".to_string()
            } else {
                state.username = Some(username.clone());
                format!("Logged in as {username}")
            };
            log_and_announce(state, ACTIVITY_BUFFER, &text, Channel::Polite, now);
        }
        ServerEvent::Menu {
            menu_id,
            items,
            selection_id,
            position,
            escape_behavior,
            multiletter,
        } => {
            let items: Vec<MenuItem> = items.iter().cloned().map(MenuItem::from).collect();
            state.menu.replace(
                menu_id.clone(),
                items,
                selection_id.as_deref(),
                *position,
                *escape_behavior,
                *multiletter,
            );
            let text = state.menu.current_item_text().to_string();
            state.announce(&text, Channel::Polite, now);
        }
        ServerEvent::Speak { text, buffer } => {
            let target = buffer.as_deref().unwrap_or(SPEECH_BUFFER);
            log_and_announce(state, target, text, Channel::Polite, now);
        }
        ServerEvent::Chat {
            convo,
            sender,
            message,
        } => {
            let mut line = String::new();
            if !convo.is_empty() {
                line.push_str(&format!("[{convo}] "));
            }
            if !sender.is_empty() {
                line.push_str(&format!("{sender}: "));
            }
            line.push_str(message);
            log_and_announce(state, CHAT_BUFFER, &line, Channel::Polite, now);
        }
        ServerEvent::RequestInput {
            input_id,
            prompt,
            default_value,
            read_only,
        } => {
            state.input.begin_prompt(input_id, prompt, default_value, *read_only);
            state.focus = Focus::Input;
            let text = match (prompt.is_empty(), *read_only && !default_value.is_empty()) {
                (true, _) => "Input requested".to_string(),
                (false, true) => format!("{prompt} {default_value}"),
                (false, false) => prompt.clone(),
            };
            state.announce(&text, Channel::Assertive, now);
        }
        ServerEvent::PlaySound { name } => {
            fx.server_sound(name);
        }
        ServerEvent::ClearUi => {
            state.menu.clear();
            // Superseded by the item announcement if a menu push follows in
            // the same frame.
            state.announce("Screen cleared", Channel::Polite, now);
        }
        ServerEvent::Pong => match state.ping_sent_at.take() {
            Some(at) => {
                let ms = now.duration_since(at).as_millis();
                let text = format!("Pong: {ms} ms");
                state.set_status(text.clone(), now);
                state.announce(&text, Channel::Polite, now);
            }
            None => tracing::debug!("pong without an outstanding ping"),
        },
        ServerEvent::Disconnect { message, reconnect } => {
            state.connected = false;
            let text = if message.is_empty() {
                "Disconnected by server".to_string()
            } else {
                message.clone()
            };
            state.history.add(ACTIVITY_BUFFER, &text, Local::now());
            state.set_status(text.clone(), now);
            // A disconnect always speaks, muted or not.
            state.announce(&text, Channel::Assertive, now);
            if *reconnect {
                tracing::info!("server requested a reconnect; not supported");
            }
        }
        ServerEvent::ServerStatus { mode, message } => {
            let text = if message.is_empty() {
                mode.clone()
            } else {
                message.clone()
            };
            if !text.is_empty() {
                state.set_status(text.clone(), now);
                log_and_announce(state, ACTIVITY_BUFFER, &text, Channel::Polite, now);
            }
        }
        ServerEvent::Unknown => {
            tracing::debug!("ignoring unrecognized server event");
        }
    }
}

/// Records to history, then speaks only when the buffer is unmuted.
fn log_and_announce(state: &mut AppState, buffer: &str, text: &str, channel: Channel, now: Instant) {
    let audible = state.history.add(buffer, text, Local::now());
    if audible {
        state.announce(text, channel, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::PendingFeedback;
    use crate::domain::models::EscapeBehavior;
    use crate::domain::protocol::WireMenuItem;
    use std::time::Duration;

    const MARKER: char = '\u{200B}';

    fn committed(state: &mut AppState) -> Vec<(Channel, String)> {
        state
            .announcer
            .take_ready()
            .into_iter()
            .map(|c| (c.channel, c.text.trim_end_matches(MARKER).to_string()))
            .collect()
    }

    fn menu_event() -> ServerEvent {
        ServerEvent::Menu {
            menu_id: "lobby".into(),
            items: vec![
                WireMenuItem::Plain("Join table".into()),
                WireMenuItem::Tagged {
                    text: "Leave".into(),
                    id: Some("leave".into()),
                },
            ],
            selection_id: Some("leave".into()),
            position: 0,
            escape_behavior: EscapeBehavior::EscapeEvent,
            multiletter: false,
        }
    }

    #[test]
    fn menu_push_replaces_state_and_announces_selection() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(menu_event()),
            &mut fx,
            Instant::now(),
        );

        assert_eq!(state.menu.menu_id, "lobby");
        assert_eq!(state.menu.len(), 2);
        assert_eq!(state.menu.selection, 1);
        assert!(!state.menu.multiletter);
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Polite, "Leave".to_string())]
        );
    }

    #[test]
    fn speak_lands_in_named_buffer_and_speaks() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::Speak {
                text: "Hearts are broken".into(),
                buffer: Some("table".into()),
            }),
            &mut fx,
            Instant::now(),
        );

        let table = state
            .history
            .buffers
            .iter()
            .find(|b| b.name == "table")
            .unwrap();
        assert_eq!(table.entries.len(), 1);
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Polite, "Hearts are broken".to_string())]
        );
    }

    #[test]
    fn muted_buffer_records_without_speaking() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        state.history.toggle_mute("table");

        update(
            &mut state,
            &Action::Server(ServerEvent::Speak {
                text: "quietly".into(),
                buffer: Some("table".into()),
            }),
            &mut fx,
            Instant::now(),
        );

        let table = state
            .history
            .buffers
            .iter()
            .find(|b| b.name == "table")
            .unwrap();
        assert_eq!(table.entries.len(), 1);
        assert!(committed(&mut state).is_empty());
    }

    #[test]
    fn chat_is_prefixed_with_convo_and_sender() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::Chat {
                convo: "table".into(),
                sender: "ada".into(),
                message: "nice lead".into(),
            }),
            &mut fx,
            Instant::now(),
        );

        let chats = state
            .history
            .buffers
            .iter()
            .find(|b| b.name == "chats")
            .unwrap();
        assert_eq!(chats.entries[0].text, "[table] ada: nice lead");
    }

    #[test]
    fn request_input_focuses_the_compose_line() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::RequestInput {
                input_id: "wager".into(),
                prompt: "How much?".into(),
                default_value: "10".into(),
                read_only: false,
            }),
            &mut fx,
            Instant::now(),
        );

        assert_eq!(state.focus, Focus::Input);
        assert_eq!(state.input.text(), "10");
        assert_eq!(
            state.input.pending.as_ref().map(|p| p.input_id.as_str()),
            Some("wager")
        );
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Assertive, "How much?".to_string())]
        );
    }

    #[test]
    fn read_only_prompt_speaks_its_text() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::RequestInput {
                input_id: "rules".into(),
                prompt: "House rules".into(),
                default_value: "No table talk".into(),
                read_only: true,
            }),
            &mut fx,
            Instant::now(),
        );

        assert!(state.input.is_read_only());
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Assertive, "House rules No table talk".to_string())]
        );
    }

    #[test]
    fn pong_reports_latency_once() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        let sent = Instant::now();
        state.ping_sent_at = Some(sent);

        update(
            &mut state,
            &Action::Server(ServerEvent::Pong),
            &mut fx,
            sent + Duration::from_millis(42),
        );

        assert_eq!(state.ping_sent_at, None);
        assert_eq!(state.status_message.as_deref(), Some("Pong: 42 ms"));

        // A second pong with no ping outstanding changes nothing.
        update(
            &mut state,
            &Action::Server(ServerEvent::Pong),
            &mut fx,
            sent + Duration::from_millis(100),
        );
        assert_eq!(state.status_message.as_deref(), Some("Pong: 42 ms"));
    }

    #[test]
    fn disconnect_speaks_even_when_activity_is_muted() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        state.connected = true;
        state.history.toggle_mute("activity");

        update(
            &mut state,
            &Action::Server(ServerEvent::Disconnect {
                message: "Server going down".into(),
                reconnect: false,
            }),
            &mut fx,
            Instant::now(),
        );

        assert!(!state.connected);
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Assertive, "Server going down".to_string())]
        );
    }

    #[test]
    fn play_sound_reaches_the_feedback_hook() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::PlaySound {
                name: "deal".into(),
            }),
            &mut fx,
            Instant::now(),
        );

        assert_eq!(fx.server_sounds, vec!["deal".to_string()]);
    }

    #[test]
    fn clear_ui_empties_the_menu() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        update(
            &mut state,
            &Action::Server(menu_event()),
            &mut fx,
            Instant::now(),
        );

        update(
            &mut state,
            &Action::Server(ServerEvent::ClearUi),
            &mut fx,
            Instant::now(),
        );

        assert!(state.menu.is_empty());
        assert_eq!(state.menu.menu_id, "");
    }

    #[test]
    fn authorize_success_records_the_session() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();

        update(
            &mut state,
            &Action::Server(ServerEvent::AuthorizeSuccess {
                username: "ada".into(),
            }),
            &mut fx,
            Instant::now(),
        );

        assert!(state.connected);
        assert_eq!(state.username.as_deref(), Some("ada"));
        assert_eq!(
            committed(&mut state),
            vec![(Channel::Polite, "Logged in as ada".to_string())]
        );
    }

    #[test]
    fn connection_lost_goes_to_activity_and_status() {
        let mut state = AppState::default();
        let mut fx = PendingFeedback::default();
        state.connected = true;

        update(
            &mut state,
            &Action::ConnectionLost("read error".into()),
            &mut fx,
            Instant::now(),
        );

        assert!(!state.connected);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Connection lost: read error")
        );
        let activity = state
            .history
            .buffers
            .iter()
            .find(|b| b.name == "activity")
            .unwrap();
        assert_eq!(activity.entries[0].text, "Connection lost: read error");
    }
}
