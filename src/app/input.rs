use crate::app::{
    action::Action,
    keys,
    state::{AppState, Focus},
    ui,
};
use crate::components::menu_list;
use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};
use std::time::Instant;

const DOUBLE_CLICK_MS: u128 = 500;

/// Turns one terminal event into at most one action. Order matters: the help
/// overlay first, then the focused pane's own keys, then escape dispatch,
/// and only then the outbound keybind qualification.
pub fn map_event_to_action(
    event: Event,
    state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }
    }

    match event {
        Event::Key(key) => map_key(key, state),
        Event::Mouse(mouse) => map_mouse(mouse, state, terminal_size),
        _ => None,
    }
}

fn map_key(key: KeyEvent, state: &AppState<'_>) -> Option<Action> {
    let mods = keys::Mods::from_event(key.modifiers);

    // Terminal convention, never forwarded.
    if mods.control && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Some(Action::Quit);
    }

    if state.help.is_some() {
        return map_help_key(key.code);
    }

    match state.focus {
        Focus::Menu => map_menu_key(key, mods, state),
        Focus::Input => map_input_key(key, mods, state),
        Focus::History => map_history_key(key, mods, state),
    }
}

fn map_help_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::ToggleHelp),
        KeyCode::Up => Some(Action::ScrollHelp(-1)),
        KeyCode::Down => Some(Action::ScrollHelp(1)),
        KeyCode::PageUp => Some(Action::ScrollHelp(-10)),
        KeyCode::PageDown => Some(Action::ScrollHelp(10)),
        _ => None,
    }
}

fn map_menu_key(key: KeyEvent, mods: keys::Mods, state: &AppState<'_>) -> Option<Action> {
    if !mods.any() {
        match key.code {
            KeyCode::Up => return Some(Action::MoveSelection(-1)),
            KeyCode::Down => return Some(Action::MoveSelection(1)),
            KeyCode::Home => return Some(Action::SelectIndex(0)),
            KeyCode::End => return Some(Action::SelectLast),
            KeyCode::Enter => return Some(Action::ActivateSelection),
            KeyCode::Backspace => {
                // At the root there is nothing to back out of.
                if state.menu.menu_id == state.config.interface.root_menu_id {
                    return None;
                }
                return Some(escape_action(mods));
            }
            _ => {}
        }
    }

    if key.code == KeyCode::Esc {
        return Some(escape_action(mods));
    }
    if key.code == KeyCode::Tab {
        return Some(Action::CycleFocus);
    }

    // Shift participates in producing the character, so only control and
    // alt take a printable key away from type-ahead. Space stays a dispatch
    // key; it never joins the search buffer.
    if !mods.control && !mods.alt && state.multiletter_active() {
        if let Some(ch) = keys::printable(key.code) {
            if ch != ' ' {
                return Some(Action::TypeAhead(ch));
            }
        }
    }

    qualify(key.code, mods, state)
}

fn map_input_key(key: KeyEvent, mods: keys::Mods, state: &AppState<'_>) -> Option<Action> {
    match key.code {
        // Escape and function keys punch through a typing target.
        KeyCode::Esc => Some(escape_action(mods)),
        KeyCode::F(_) => qualify(key.code, mods, state),
        KeyCode::Tab => Some(Action::CycleFocus),
        KeyCode::Enter => Some(Action::SubmitInput),
        _ => Some(Action::EditorInput(key)),
    }
}

fn map_history_key(key: KeyEvent, mods: keys::Mods, state: &AppState<'_>) -> Option<Action> {
    if !mods.any() {
        match key.code {
            KeyCode::Up => return Some(Action::HistoryReview(-1)),
            KeyCode::Down => return Some(Action::HistoryReview(1)),
            KeyCode::PageUp => return Some(Action::HistoryPage(true)),
            KeyCode::PageDown => return Some(Action::HistoryPage(false)),
            KeyCode::Home => return Some(Action::HistoryEdge(true)),
            KeyCode::End => return Some(Action::HistoryEdge(false)),
            KeyCode::Left => return Some(Action::HistoryBuffer(-1)),
            KeyCode::Right => return Some(Action::HistoryBuffer(1)),
            // Swallowed during review so a stray press cannot escape a menu.
            KeyCode::Backspace => return None,
            _ => {}
        }
    }

    if key.code == KeyCode::Esc {
        return Some(escape_action(mods));
    }
    if key.code == KeyCode::Tab {
        return Some(Action::CycleFocus);
    }

    qualify(key.code, mods, state)
}

fn escape_action(mods: keys::Mods) -> Action {
    Action::EscapePressed {
        control: mods.control,
        alt: mods.alt,
        shift: mods.shift,
    }
}

/// Final gate for outbound key presses. Unrecognized keys drop here; bare
/// printables drop too while multi-letter navigation has them reserved.
fn qualify(code: KeyCode, mods: keys::Mods, state: &AppState<'_>) -> Option<Action> {
    let key = keys::normalize(code)?;
    if keys::is_function_like(&key) || !state.multiletter_active() || mods.any() {
        return Some(Action::SendKeybind {
            key,
            control: mods.control,
            alt: mods.alt,
            shift: mods.shift,
        });
    }
    None
}

fn map_mouse(mouse: MouseEvent, state: &AppState<'_>, terminal_size: Size) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let layout = ui::get_layout(area);
    let menu_area = layout.body[0];
    let history_area = layout.body[1];
    let input_area = layout.main[2];

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if hits(history_area, mouse.column, mouse.row) {
                Some(Action::HistoryReview(-1))
            } else {
                Some(Action::MoveSelection(-1))
            }
        }
        MouseEventKind::ScrollDown => {
            if hits(history_area, mouse.column, mouse.row) {
                Some(Action::HistoryReview(1))
            } else {
                Some(Action::MoveSelection(1))
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let now = Instant::now();
            let is_double_click = state
                .last_click_time
                .is_some_and(|t| now.duration_since(t).as_millis() < DOUBLE_CLICK_MS)
                && state.last_click_pos == Some((mouse.column, mouse.row));

            if hits(menu_area, mouse.column, mouse.row) {
                if is_double_click {
                    // The first click already selected this row.
                    return Some(Action::ActivateSelection);
                }
                let visible = menu_area.height.saturating_sub(2) as usize;
                let offset = menu_list::scroll_offset(state.menu.selection, visible);
                let clicked = (mouse.row - (menu_area.y + 1)) as usize + offset;
                if clicked < state.menu.len() {
                    Some(Action::SelectIndex(clicked))
                } else {
                    None
                }
            } else if hits(input_area, mouse.column, mouse.row) {
                Some(Action::FocusInput)
            } else if hits(history_area, mouse.column, mouse.row) {
                Some(Action::FocusHistory)
            } else {
                None
            }
        }
        _ => None,
    }
}

// Inside the pane's border.
fn hits(area: Rect, column: u16, row: u16) -> bool {
    area.width > 1
        && area.height > 1
        && column > area.x
        && column < area.x + area.width - 1
        && row > area.y
        && row < area.y + area.height - 1
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
