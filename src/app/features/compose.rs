use crate::a11y::Channel;
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    features::menu,
    state::{AppState, Focus, HelpState},
};
use crate::domain::feedback::UiFeedback;
use crossterm::event::KeyCode;
use std::time::Instant;

/// The compose line. Plain text goes out as local chat, a leading `/` runs a
/// slash command, and while a server prompt is pending Enter answers it.
pub fn update(
    state: &mut AppState,
    action: &Action,
    fx: &mut dyn UiFeedback,
    now: Instant,
) -> UpdateResult {
    match action {
        Action::EditorInput(key) => {
            if state.input.is_read_only() && edits_text(key.code) {
                return UpdateResult::Handled(None);
            }
            state.input.text_area.input(*key);
            UpdateResult::Handled(None)
        }
        Action::SubmitInput => UpdateResult::Handled(submit(state, fx, now)),
        _ => UpdateResult::NotHandled,
    }
}

fn edits_text(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete | KeyCode::Tab
    )
}

fn submit(state: &mut AppState, fx: &mut dyn UiFeedback, now: Instant) -> Option<Command> {
    let read_only = state.input.is_read_only();
    let (text, pending) = state.input.take();

    if let Some(pending) = pending {
        state.focus = Focus::Menu;
        if read_only {
            return None;
        }
        return Some(Command::SendEditbox {
            text,
            input_id: pending.input_id,
        });
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        return run_slash(state, fx, rest, now);
    }
    Some(Command::SendChat {
        convo: "local".into(),
        message: trimmed.to_string(),
    })
}

fn run_slash(
    state: &mut AppState,
    fx: &mut dyn UiFeedback,
    input: &str,
    now: Instant,
) -> Option<Command> {
    let (command, args) = match input.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (input, ""),
    };
    let command = command.to_lowercase();

    match command.as_str() {
        "help" | "keyhelp" => {
            state.help = Some(HelpState::default());
            None
        }
        "quit" => {
            state.should_quit = true;
            None
        }
        "ping" => {
            state.ping_sent_at = Some(now);
            Some(Command::SendPing)
        }
        "select" => {
            match args.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if menu::set_selection(&mut state.menu, fx, n - 1) {
                        let text = state.menu.current_item_text().to_string();
                        state.announce(&text, Channel::Polite, now);
                    }
                }
                _ => notify(state, "Usage: /select N", now),
            }
            None
        }
        "escape" => {
            let before = state.menu.selection;
            let command = menu::dispatch_escape(&mut state.menu, fx, false, false, false);
            if state.menu.selection != before {
                let text = state.menu.current_item_text().to_string();
                state.announce(&text, Channel::Polite, now);
            }
            command
        }
        "keybind" => {
            let mut tokens = args.split_whitespace();
            let Some(key) = tokens.next() else {
                notify(state, "Usage: /keybind KEY [ctrl] [alt] [shift]", now);
                return None;
            };
            let mut control = false;
            let mut alt = false;
            let mut shift = false;
            for flag in tokens {
                match flag.to_lowercase().as_str() {
                    "ctrl" | "control" => control = true,
                    "alt" => alt = true,
                    "shift" => shift = true,
                    _ => {}
                }
            }
            Some(Command::SendKeybind(state.menu.keybind(
                key.to_lowercase(),
                control,
                alt,
                shift,
            )))
        }
        "local" | "global" => {
            if args.is_empty() {
                notify(state, &format!("Usage: /{command} MESSAGE"), now);
                return None;
            }
            Some(Command::SendChat {
                convo: command,
                message: args.to_string(),
            })
        }
        "mute" => {
            let name = if args.is_empty() {
                state.history.current_buffer().name.clone()
            } else {
                args.to_string()
            };
            let text = match state.history.toggle_mute(&name) {
                Some(true) => format!("{name} muted"),
                Some(false) => format!("{name} unmuted"),
                None => format!("No buffer named {name}"),
            };
            notify(state, &text, now);
            None
        }
        "clear" => {
            let text = if args.is_empty() {
                state.history.clear_all();
                "History cleared".to_string()
            } else if state.history.clear(args) {
                format!("{args} cleared")
            } else {
                format!("No buffer named {args}")
            };
            notify(state, &text, now);
            None
        }
        "multiletter" => {
            state.multiletter_override = !state.multiletter_override;
            let text = if state.multiletter_override {
                "Multi-letter navigation on"
            } else {
                "Multi-letter navigation off"
            };
            notify(state, text, now);
            None
        }
        // Anything else is the server's business.
        _ => Some(Command::SendSlashCommand {
            command,
            args: args.to_string(),
        }),
    }
}

fn notify(state: &mut AppState, text: &str, now: Instant) {
    state.set_status(text.to_string(), now);
    state.announce(text, Channel::Polite, now);
}
