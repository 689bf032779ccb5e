use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Menu",
        &[
            ("\u{2191} / \u{2193}", "Move the selection"),
            ("Home / End", "Jump to the first / last option"),
            ("Enter", "Choose the selected option"),
            ("Backspace / Esc", "Leave the current menu"),
            ("a..z", "Jump to an option by its first letters"),
            ("Space / F1..F12", "Send the key to the server"),
        ],
    ),
    (
        "History",
        &[
            ("\u{2190} / \u{2192}", "Previous / next buffer"),
            ("\u{2191} / \u{2193}", "Read older / newer entries"),
            ("PageUp / PageDown", "Jump ten entries"),
            ("Home / End", "Oldest / newest entry"),
        ],
    ),
    (
        "Compose",
        &[("Enter", "Send the line"), ("Esc", "Back to the menu")],
    ),
    (
        "Commands",
        &[
            ("/help", "This overlay"),
            ("/quit", "Leave the client"),
            ("/ping", "Measure server latency"),
            ("/select N", "Pick menu option N"),
            ("/escape", "Same as the Escape key"),
            ("/keybind KEY [ctrl|alt|shift]", "Send a raw key"),
            ("/local MSG, /global MSG", "Chat"),
            ("/mute [BUFFER]", "Toggle a buffer's speech"),
            ("/clear [BUFFER]", "Clear history"),
            ("/multiletter", "Toggle letter navigation"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("Tab", "Next pane"),
            ("Ctrl+C", "Quit"),
            ("\u{2191} / \u{2193}", "Scroll this overlay"),
            ("Esc / q", "Close this overlay"),
        ],
    ),
];

/// Total rows the overlay can show, used to clamp the scroll position.
#[must_use]
pub fn line_count() -> u16 {
    let rows: usize = SECTIONS.iter().map(|(_, items)| items.len() + 2).sum();
    rows.saturating_sub(1) as u16
}

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
    pub scroll: u16,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYS & COMMANDS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows: Vec<Row> = Vec::new();
        for (i, (name, items)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
            }
            rows.push(Row::new(vec![
                Cell::from(Span::styled(*name, category_style)),
                Cell::from(""),
            ]));
            for (key, desc) in *items {
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(format!(" {key}"), key_style)),
                    Cell::from(Span::styled(*desc, desc_style)),
                ]));
            }
        }

        let rows: Vec<Row> = rows.into_iter().skip(self.scroll as usize).collect();

        let table = Table::new(rows, [Constraint::Length(30), Constraint::Min(0)]).block(block);

        table.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::line_count;

    #[test]
    fn line_count_covers_every_section_row() {
        // Section headers, their items, and the blank rows between sections.
        let expected: usize = super::SECTIONS
            .iter()
            .map(|(_, items)| items.len() + 2)
            .sum::<usize>()
            - 1;
        assert_eq!(line_count() as usize, expected);
    }
}
