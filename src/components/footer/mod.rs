use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

/// The live region. Screen readers watch these two rows for changes, and
/// everything the app speaks lands here. The rows carry bare text with no
/// chrome so review cursors read them clean.
pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                self.state.live_polite.as_str(),
                self.theme.live_polite,
            )),
            Line::from(Span::styled(
                self.state.live_assertive.as_str(),
                self.theme.live_assertive,
            )),
        ];

        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}
