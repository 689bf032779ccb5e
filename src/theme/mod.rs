use ratatui::style::{Color, Modifier, Style};

/// Named colors drawn from the terminal's own 16-color palette. Staying out
/// of truecolor keeps the user's terminal contrast settings in charge of the
/// final rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub subtext: Color,
    pub dim: Color,
    pub accent: Color,
    pub focus: Color,
    pub ok: Color,
    pub warn: Color,
    pub error: Color,
}

pub const HIGH_CONTRAST: Palette = Palette {
    text: Color::White,
    subtext: Color::Gray,
    dim: Color::DarkGray,
    accent: Color::Yellow,
    focus: Color::Cyan,
    ok: Color::Green,
    warn: Color::Yellow,
    error: Color::Red,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header: Style,
    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,
    pub header_warn: Style,

    pub list_item: Style,
    pub list_selected: Style,

    pub timestamp: Style,
    pub dimmed: Style,

    pub live_polite: Style,
    pub live_assertive: Style,

    pub status_info: Style,
    pub status_warn: Style,

    pub footer_segment_key: Style,
}

impl Theme {
    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.dim),
            border_focus: Style::default().fg(p.focus),

            header: Style::default().fg(p.subtext),
            header_logo: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            header_item: Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            header_active: Style::default().fg(p.ok).add_modifier(Modifier::BOLD),
            header_warn: Style::default().fg(p.error).add_modifier(Modifier::BOLD),

            list_item: Style::default().fg(p.text),
            list_selected: Style::default()
                .fg(p.text)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),

            timestamp: Style::default().fg(p.dim),
            dimmed: Style::default().fg(p.dim),

            live_polite: Style::default().fg(p.subtext).add_modifier(Modifier::ITALIC),
            live_assertive: Style::default().fg(p.text).add_modifier(Modifier::BOLD),

            status_info: Style::default().fg(p.focus),
            status_warn: Style::default().fg(p.warn).add_modifier(Modifier::BOLD),

            footer_segment_key: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(&HIGH_CONTRAST)
    }
}
