use crate::app::state::{AppState, Focus};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// The compose field. Shows the server's prompt as the pane title while a
/// text request is pending.
pub struct InputLine<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for InputLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == Focus::Input;

        let mut title_spans = Vec::new();
        match &self.state.input.pending {
            Some(pending) if !pending.prompt.is_empty() => {
                title_spans.push(Span::styled(
                    format!(" {} ", pending.prompt),
                    self.theme.header_item,
                ));
            }
            Some(_) => title_spans.push(Span::styled(" Input ", self.theme.header_item)),
            None => title_spans.push(Span::styled(" Compose ", self.theme.header_item)),
        }
        if self.state.input.is_read_only() {
            title_spans.push(Span::styled("(read only) ", self.theme.status_warn));
        }

        let block = Block::default()
            .title(Line::from(title_spans))
            .borders(Borders::ALL)
            .border_style(if focused {
                self.theme.border_focus
            } else {
                self.theme.border
            });

        let inner = block.inner(area);
        block.render(area, buf);
        (&self.state.input.text_area).render(inner, buf);
    }
}
