use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::history_panel::HistoryPanel;
use crate::components::input_line::InputLine;
use crate::components::menu_list::MenuList;
use crate::components::modals::help::{self, HelpModal};
use crate::components::modals::helpers::dim_area;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub struct AppLayout {
    pub main: Vec<Rect>,
    pub body: Vec<Rect>,
}

/// Screen regions shared by drawing and mouse hit-testing. `main` holds the
/// vertical bands, `body` the menu / history split of the middle band.
pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Compose line
            Constraint::Length(2), // Live region
        ])
        .split(area)
        .to_vec();

    let body = if main.len() > 1 {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main[1])
            .to_vec()
    } else {
        vec![Rect::default(), Rect::default()]
    };

    AppLayout { main, body }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    // Keep the overlay scroll inside the table.
    if let Some(help_state) = &mut app_state.help {
        help_state.scroll = help_state.scroll.min(help::line_count().saturating_sub(1));
    }

    let layout = get_layout(f.area());
    let state: &AppState = app_state;
    let theme = &state.theme;

    if layout.main[0].width > 0 && layout.main[0].height > 0 {
        f.render_widget(Header { state, theme }, layout.main[0]);
    }

    if layout.body[0].width > 0 && layout.body[0].height > 0 {
        f.render_widget(MenuList { state, theme }, layout.body[0]);
    }

    if layout.body[1].width > 0 && layout.body[1].height > 0 {
        f.render_widget(HistoryPanel { state, theme }, layout.body[1]);
    }

    if layout.main[2].width > 0 && layout.main[2].height > 0 {
        f.render_widget(InputLine { state, theme }, layout.main[2]);
    }

    if layout.main.len() > 3 && layout.main[3].width > 0 && layout.main[3].height > 0 {
        f.render_widget(Footer { state, theme }, layout.main[3]);
    }

    if let Some(help_state) = &state.help {
        let area = f.area();
        dim_area(f.buffer_mut(), area);
        f.render_widget(
            HelpModal {
                theme,
                scroll: help_state.scroll,
            },
            area,
        );
    }
}
