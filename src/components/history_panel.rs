use crate::app::state::{AppState, Focus};
use crate::components::menu_list::scroll_offset;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HistoryPanel<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for HistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let buffer = self.state.history.current_buffer();
        let focused = self.state.focus == Focus::History;

        let mut title_spans = vec![
            Span::styled(" History ", self.theme.header_item),
            Span::styled(format!("{} ", buffer.name), self.theme.dimmed),
        ];
        if buffer.muted {
            title_spans.push(Span::styled("(muted) ", self.theme.status_warn));
        }
        if let Some(cursor) = buffer.cursor {
            title_spans.push(Span::styled(
                format!("{}/{} ", cursor + 1, buffer.entries.len()),
                self.theme.footer_segment_key,
            ));
        }

        let block = Block::default()
            .title(Line::from(title_spans))
            .borders(Borders::ALL)
            .border_style(if focused {
                self.theme.border_focus
            } else {
                self.theme.border
            });

        let visible = area.height.saturating_sub(2) as usize;
        // Reviewing pins the window to the cursor, otherwise the newest
        // entries win.
        let offset = match buffer.cursor {
            Some(cursor) => scroll_offset(cursor, visible),
            None => buffer.entries.len().saturating_sub(visible),
        };

        let lines: Vec<Line> = buffer
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, entry)| {
                let text_style = if buffer.cursor == Some(i) {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%H:%M:%S ").to_string(),
                        self.theme.timestamp,
                    ),
                    Span::styled(entry.text.as_str(), text_style),
                ])
            })
            .collect();

        Paragraph::new(Text::from(lines)).block(block).render(area, buf);
    }
}
