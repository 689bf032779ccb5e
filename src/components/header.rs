use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let server = &self.state.config.server;

        let mut spans = vec![
            Span::styled(" PARLOR ", self.theme.header_logo),
            Span::styled(
                format!(" {}:{} ", server.host, server.port),
                self.theme.header_item,
            ),
        ];

        if let Some(username) = &self.state.username {
            spans.push(Span::styled(format!("@{username} "), self.theme.header));
        }

        if self.state.connected {
            spans.push(Span::styled("online ", self.theme.header_active));
        } else {
            spans.push(Span::styled("offline ", self.theme.header_warn));
        }

        if let Some(status) = &self.state.status_message {
            spans.push(Span::styled("| ", self.theme.dimmed));
            spans.push(Span::styled(status.as_str(), self.theme.status_info));
        }

        // Fill rest of line
        spans.push(Span::styled(
            " ".repeat(area.width as usize),
            self.theme.header,
        ));

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
