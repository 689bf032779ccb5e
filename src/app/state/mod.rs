use crate::a11y::{Announcer, Channel, Committed};
use crate::app::config::Config;
use crate::domain::models::SoundCue;
use std::time::Instant;

pub mod history;
pub mod input;
pub mod menu;

// Re-exports
pub use history::{HistoryBuffer, HistoryEntry, HistoryState, AGGREGATE_BUFFER};
pub use input::{AppTextArea, InputState, PendingInput};
pub use menu::MenuState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Focus {
    Menu,    // The server-driven menu list
    Input,   // The compose line
    History, // Read-only log review
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Focus::Menu => Focus::Input,
            Focus::Input => Focus::History,
            Focus::History => Focus::Menu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HelpState {
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Session & Status ---
    pub should_quit: bool,
    pub connected: bool,
    pub username: Option<String>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,
    pub ping_sent_at: Option<Instant>,

    // --- Menu (the server's source of truth) ---
    pub menu: MenuState,
    // Local toggle layered over the per-menu flag.
    pub multiletter_override: bool,

    // --- History ---
    pub history: HistoryState,

    // --- Speech ---
    pub announcer: Announcer,
    pub live_polite: String,
    pub live_assertive: String,
    /// Sound cues recorded during the last update, drained by the event loop.
    pub pending_cues: Vec<SoundCue>,

    // --- Compose Line ---
    pub input: InputState<'a>,

    // --- Focus & Overlays ---
    pub focus: Focus,
    pub help: Option<HelpState>,

    // --- Click Tracking ---
    pub last_click_time: Option<Instant>,
    pub last_click_pos: Option<(u16, u16)>,

    // --- Config ---
    pub config: Config,
    pub theme: crate::theme::Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            announcer: Announcer::new(config.announce_debounce()),
            config,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.help.is_some()
    }

    /// Type-ahead is live only when both the menu payload and the local
    /// toggle allow it.
    #[must_use]
    pub fn multiletter_active(&self) -> bool {
        self.menu.multiletter && self.multiletter_override
    }

    pub fn announce(&mut self, text: &str, channel: Channel, now: Instant) {
        self.announcer.announce(text, channel, now);
    }

    /// Live-line write for one committed announcement. The speech analog of
    /// replacing a live region's content.
    pub fn apply_committed(&mut self, committed: Committed) {
        match committed.channel {
            Channel::Polite => self.live_polite = committed.text,
            Channel::Assertive => self.live_assertive = committed.text,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, now: Instant) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(now + std::time::Duration::from_secs(6));
    }

    pub fn tick_status(&mut self, now: Instant) {
        if let Some(deadline) = self.status_clear_time {
            if now >= deadline {
                self.status_message = None;
                self.status_clear_time = None;
            }
        }
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            connected: false,
            username: None,
            status_message: None,
            status_clear_time: None,
            ping_sent_at: None,
            menu: MenuState::default(),
            multiletter_override: true,
            history: HistoryState::default(),
            announcer: Announcer::default(),
            live_polite: String::new(),
            live_assertive: String::new(),
            pending_cues: Vec::new(),
            input: InputState::default(),
            focus: Focus::Menu,
            help: None,
            last_click_time: None,
            last_click_pos: None,
            config: Config::default(),
            theme: crate::theme::Theme::default(),
        }
    }
}
