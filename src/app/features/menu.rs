use crate::a11y::Channel;
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, MenuState},
};
use crate::domain::feedback::UiFeedback;
use crate::domain::models::{EscapeBehavior, SoundCue};
use std::time::{Duration, Instant};

/// Menu navigation, type-ahead, activation and escape dispatch. A handled
/// action that moves the selection also queues a polite announcement of the
/// newly selected item.
pub fn update(
    state: &mut AppState,
    action: &Action,
    fx: &mut dyn UiFeedback,
    now: Instant,
) -> UpdateResult {
    let before = state.menu.selection;
    let result = match action {
        Action::MoveSelection(delta) => {
            move_selection(&mut state.menu, fx, *delta);
            UpdateResult::Handled(None)
        }
        Action::SelectIndex(index) => {
            // Clicks land here with any pane focused.
            state.focus = crate::app::state::Focus::Menu;
            set_selection(&mut state.menu, fx, *index);
            UpdateResult::Handled(None)
        }
        Action::SelectLast => {
            let last = state.menu.len().saturating_sub(1);
            set_selection(&mut state.menu, fx, last);
            UpdateResult::Handled(None)
        }
        Action::TypeAhead(ch) => {
            let idle = state.config.multiletter_idle();
            handle_type_navigation(&mut state.menu, fx, *ch, idle, now);
            UpdateResult::Handled(None)
        }
        Action::ActivateSelection => UpdateResult::Handled(activate_selection(&state.menu, fx)),
        Action::EscapePressed {
            control,
            alt,
            shift,
        } => UpdateResult::Handled(dispatch_escape(&mut state.menu, fx, *control, *alt, *shift)),
        Action::SendKeybind {
            key,
            control,
            alt,
            shift,
        } => UpdateResult::Handled(Some(Command::SendKeybind(state.menu.keybind(
            key.clone(),
            *control,
            *alt,
            *shift,
        )))),
        _ => return UpdateResult::NotHandled,
    };

    if state.menu.selection != before {
        let text = state.menu.current_item_text().to_string();
        state.announce(&text, Channel::Polite, now);
    }
    result
}

/// Clamps `index` into range and moves the selection there. Fires the move
/// cue only when the selection actually changes. An empty menu pins the
/// selection to 0 and stays silent.
pub fn set_selection(menu: &mut MenuState, fx: &mut dyn UiFeedback, index: usize) -> bool {
    if menu.is_empty() {
        menu.selection = 0;
        return false;
    }
    let clamped = index.min(menu.len() - 1);
    if clamped == menu.selection {
        return false;
    }
    menu.selection = clamped;
    fx.cue(SoundCue::Move);
    true
}

/// Relative move, clamped at both ends. Hitting an edge without moving is a
/// boundary repeat: the move cue still fires and the current item's text is
/// handed back for re-announcement.
pub fn move_selection(menu: &mut MenuState, fx: &mut dyn UiFeedback, delta: isize) -> bool {
    if menu.is_empty() {
        menu.selection = 0;
        return false;
    }
    let len = menu.len() as isize;
    let target = (menu.selection as isize + delta).clamp(0, len - 1) as usize;
    if target == menu.selection {
        fx.cue(SoundCue::Move);
        fx.boundary_repeat(menu.current_item_text());
        return false;
    }
    set_selection(menu, fx, target)
}

/// Multi-letter type-ahead. The buffer resets after an idle gap, then the
/// pressed character is appended lowercased. While the buffer is longer than
/// one character and the current item still matches it, the selection stays
/// put; otherwise the scan runs forward from the next item, wrapping, and
/// lands on the first prefix match. No match leaves the selection alone.
pub fn handle_type_navigation(
    menu: &mut MenuState,
    fx: &mut dyn UiFeedback,
    ch: char,
    idle: Duration,
    now: Instant,
) {
    let stale = menu
        .last_keystroke
        .map_or(true, |at| now.duration_since(at) > idle);
    if stale {
        menu.search_buffer.clear();
    }
    for lower in ch.to_lowercase() {
        menu.search_buffer.push(lower);
    }
    menu.last_keystroke = Some(now);

    if menu.is_empty() {
        return;
    }
    if menu.search_buffer.chars().count() > 1
        && starts_with_ignore_case(menu.current_item_text(), &menu.search_buffer)
    {
        return;
    }
    let len = menu.len();
    for offset in 1..=len {
        let idx = (menu.selection + offset) % len;
        if starts_with_ignore_case(&menu.items[idx].text, &menu.search_buffer) {
            set_selection(menu, fx, idx);
            return;
        }
    }
}

/// Reports the current item to the server. The activation cue fires before
/// the command is handed back, so it precedes the send. Nothing happens on
/// an empty menu.
pub fn activate_selection(menu: &MenuState, fx: &mut dyn UiFeedback) -> Option<Command> {
    let selection = menu.menu_index()?;
    fx.cue(SoundCue::Activate);
    Some(Command::SendMenuSelection {
        menu_id: menu.menu_id.clone(),
        selection,
        selection_id: menu.current_item_id(),
    })
}

/// Resolves Escape against the active menu's declared behavior.
pub fn dispatch_escape(
    menu: &mut MenuState,
    fx: &mut dyn UiFeedback,
    control: bool,
    alt: bool,
    shift: bool,
) -> Option<Command> {
    match menu.escape_behavior {
        EscapeBehavior::EscapeEvent => Some(Command::SendEscape {
            menu_id: menu.wire_id(),
        }),
        EscapeBehavior::SelectLastOption => select_last_and_report(menu, fx),
        EscapeBehavior::Keybind => Some(Command::SendKeybind(
            menu.keybind("escape", control, alt, shift),
        )),
    }
}

/// `select_last_option` jumps to the final item and reports it like an
/// activation. An empty menu sends nothing.
fn select_last_and_report(menu: &mut MenuState, fx: &mut dyn UiFeedback) -> Option<Command> {
    if menu.is_empty() {
        return None;
    }
    set_selection(menu, fx, menu.len() - 1);
    Some(Command::SendMenuSelection {
        menu_id: menu.menu_id.clone(),
        selection: menu.len(),
        selection_id: menu.current_item_id(),
    })
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(prefix)
}
