use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use tui_textarea::{CursorMove, TextArea};

#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}

/// An input prompt the server is waiting on. Read-only prompts show text the
/// user can arrow through but never submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInput {
    pub input_id: String,
    pub prompt: String,
    pub read_only: bool,
}

/// The single-line compose field at the bottom of the screen. Doubles as the
/// answer field for server text prompts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState<'a> {
    pub text_area: AppTextArea<'a>,
    pub pending: Option<PendingInput>,
}

impl InputState<'_> {
    /// Current contents as one line. The compose field never holds newlines;
    /// Enter is intercepted before it reaches the editor.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_area.lines().join(" ")
    }

    pub fn set_text(&mut self, text: &str) {
        let mut area = TextArea::new(vec![text.to_string()]);
        area.move_cursor(CursorMove::End);
        self.text_area = AppTextArea(area);
    }

    /// Drains the field, leaving it empty. The pending prompt, if any, is
    /// cleared as well.
    pub fn take(&mut self) -> (String, Option<PendingInput>) {
        let text = self.text();
        self.text_area = AppTextArea::default();
        (text, self.pending.take())
    }

    pub fn begin_prompt(&mut self, input_id: &str, prompt: &str, default_value: &str, read_only: bool) {
        self.set_text(default_value);
        self.pending = Some(PendingInput {
            input_id: input_id.to_string(),
            prompt: prompt.to_string(),
            read_only,
        });
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.read_only)
    }
}
