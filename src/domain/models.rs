use serde::Serialize;

// --- Menu data ---

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuItem {
    pub id: Option<String>,
    pub text: String,
}

impl MenuItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
        }
    }
}

/// What an Escape (or menu-focused Backspace) press does for the active menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeBehavior {
    EscapeEvent,
    SelectLastOption,
    #[default]
    Keybind,
}

impl EscapeBehavior {
    /// Unrecognized wire values fall back to the default keybind behavior.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "escape_event" => Self::EscapeEvent,
            "select_last_option" => Self::SelectLastOption,
            _ => Self::Keybind,
        }
    }
}

impl<'de> serde::Deserialize<'de> for EscapeBehavior {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

// --- Outbound key presses ---

/// One qualifying key press, tagged with the menu context at press time.
/// `menu_index` is 1-based and `None` exactly when the menu has no items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeybindCommand {
    pub key: String,
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    pub menu_id: Option<String>,
    pub menu_index: Option<usize>,
    pub menu_item_id: Option<String>,
}

// --- Local feedback ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Move,
    Activate,
    /// Named effect requested by the server.
    Server,
}
