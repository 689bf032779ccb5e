use crate::domain::models::{EscapeBehavior, KeybindCommand, MenuItem};
use serde::{Deserialize, Serialize};

pub const PROTOCOL_MAJOR: u32 = 11;
pub const PROTOCOL_MINOR: u32 = 0;
pub const PROTOCOL_PATCH: u32 = 0;

// --- Outbound ---

/// Packets this client produces. Tag and field names are the wire contract;
/// the server rejects anything it does not recognize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientPacket {
    Authorize {
        username: String,
        password: String,
        major: u32,
        minor: u32,
        patch: u32,
    },
    /// Reports a selection, 1-based.
    Menu {
        menu_id: String,
        selection: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        selection_id: Option<String>,
    },
    Escape {
        menu_id: Option<String>,
    },
    Keybind(KeybindCommand),
    Chat {
        convo: String,
        message: String,
    },
    Editbox {
        text: String,
        input_id: String,
    },
    SlashCommand {
        command: String,
        args: String,
    },
    Ping,
}

impl ClientPacket {
    pub fn authorize(username: &str, password: &str) -> Self {
        Self::Authorize {
            username: username.to_string(),
            password: password.to_string(),
            major: PROTOCOL_MAJOR,
            minor: PROTOCOL_MINOR,
            patch: PROTOCOL_PATCH,
        }
    }
}

// --- Inbound ---

/// Menu rows arrive either as bare strings or as `{text, id}` objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireMenuItem {
    Plain(String),
    Tagged {
        text: String,
        #[serde(default)]
        id: Option<String>,
    },
}

impl From<WireMenuItem> for MenuItem {
    fn from(wire: WireMenuItem) -> Self {
        match wire {
            WireMenuItem::Plain(text) => MenuItem::new(text),
            WireMenuItem::Tagged { text, id } => MenuItem { id, text },
        }
    }
}

fn default_true() -> bool {
    true
}

/// Events the server pushes. Types this client does not handle map to
/// `Unknown` and are ignored downstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    AuthorizeSuccess {
        #[serde(default)]
        username: String,
    },
    Menu {
        #[serde(default)]
        menu_id: String,
        #[serde(default)]
        items: Vec<WireMenuItem>,
        #[serde(default)]
        selection_id: Option<String>,
        #[serde(default)]
        position: usize,
        #[serde(default)]
        escape_behavior: EscapeBehavior,
        #[serde(default = "default_true")]
        multiletter: bool,
    },
    Speak {
        text: String,
        #[serde(default)]
        buffer: Option<String>,
    },
    Chat {
        #[serde(default)]
        convo: String,
        #[serde(default)]
        sender: String,
        message: String,
    },
    RequestInput {
        input_id: String,
        #[serde(default)]
        prompt: String,
        #[serde(default)]
        default_value: String,
        #[serde(default)]
        read_only: bool,
    },
    PlaySound {
        name: String,
    },
    ClearUi,
    Pong,
    Disconnect {
        #[serde(default)]
        message: String,
        #[serde(default)]
        reconnect: bool,
    },
    ServerStatus {
        #[serde(default)]
        mode: String,
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

/// One wire line -> one event. Malformed lines are logged and dropped; the
/// session must survive anything the socket produces.
pub fn parse_event(line: &str) -> Option<ServerEvent> {
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::debug!(error = %err, line, "discarding unparseable server line");
            None
        }
    }
}
