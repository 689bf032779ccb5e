use crate::app::state::{AppState, Focus};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// First item row shown for a given selection and window height. The
/// selection sticks to the last visible row once the list starts scrolling,
/// so mouse hit-testing and drawing share this function.
#[must_use]
pub fn scroll_offset(selection: usize, visible: usize) -> usize {
    if visible == 0 {
        return selection;
    }
    selection.saturating_sub(visible - 1)
}

pub struct MenuList<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for MenuList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let menu = &self.state.menu;
        let focused = self.state.focus == Focus::Menu;

        let mut title_spans = vec![Span::styled(" Menu ", self.theme.header_item)];
        if !menu.menu_id.is_empty() {
            title_spans.push(Span::styled(format!("{} ", menu.menu_id), self.theme.dimmed));
        }
        if !menu.search_buffer.is_empty() {
            title_spans.push(Span::styled(
                format!("/{} ", menu.search_buffer),
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
        let offset = scroll_offset(menu.selection, visible);

        let lines: Vec<Line> = if menu.items.is_empty() {
            vec![Line::from(Span::styled("(no options)", self.theme.dimmed))]
        } else {
            menu.items
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, item)| {
                    if i == menu.selection {
                        Line::from(Span::styled(
                            format!("> {}", item.text),
                            self.theme.list_selected,
                        ))
                    } else {
                        Line::from(Span::styled(
                            format!("  {}", item.text),
                            self.theme.list_item,
                        ))
                    }
                })
                .collect()
        };

        Paragraph::new(Text::from(lines)).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::scroll_offset;

    #[test]
    fn selection_inside_window_needs_no_scroll() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
    }

    #[test]
    fn selection_past_window_pins_to_last_row() {
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(25, 10), 16);
    }

    #[test]
    fn degenerate_window_follows_selection() {
        assert_eq!(scroll_offset(7, 0), 7);
        assert_eq!(scroll_offset(7, 1), 7);
    }
}
