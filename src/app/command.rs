use crate::app::action::Action;
use crate::domain::link::ServerLink;
use crate::domain::models::KeybindCommand;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Side effects the reducer can request. Each one maps to a single outbound
/// packet; the loop hands them to `handle_command`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SendMenuSelection {
        menu_id: String,
        selection: usize, // 1-based
        selection_id: Option<String>,
    },
    SendEscape {
        menu_id: Option<String>,
    },
    SendKeybind(KeybindCommand),
    SendChat {
        convo: String,
        message: String,
    },
    SendEditbox {
        text: String,
        input_id: String,
    },
    SendSlashCommand {
        command: String,
        args: String,
    },
    SendPing,
    SendAuthorize {
        username: String,
        password: String,
    },
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Command::SendMenuSelection { .. } => "menu selection",
            Command::SendEscape { .. } => "escape",
            Command::SendKeybind(_) => "keybind",
            Command::SendChat { .. } => "chat",
            Command::SendEditbox { .. } => "input",
            Command::SendSlashCommand { .. } => "command",
            Command::SendPing => "ping",
            Command::SendAuthorize { .. } => "authorize",
        }
    }
}

/// Runs one command on a background task. Failures come back through the
/// action channel; the UI thread is never blocked on the socket.
pub fn handle_command(command: Command, link: Arc<dyn ServerLink>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let label = command.label();
        let result = match command {
            Command::SendMenuSelection {
                menu_id,
                selection,
                selection_id,
            } => {
                link.send_menu_selection(&menu_id, selection, selection_id)
                    .await
            }
            Command::SendEscape { menu_id } => link.send_escape(menu_id).await,
            Command::SendKeybind(keybind) => link.send_keybind(keybind).await,
            Command::SendChat { convo, message } => link.send_chat(&convo, &message).await,
            Command::SendEditbox { text, input_id } => link.send_editbox(&text, &input_id).await,
            Command::SendSlashCommand { command, args } => {
                link.send_slash_command(&command, &args).await
            }
            Command::SendPing => link.send_ping().await,
            Command::SendAuthorize { username, password } => {
                link.send_authorize(&username, &password).await
            }
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, command = label, "outbound send failed");
            let _ = tx.send(Action::LinkError(format!("{label} failed: {err}"))).await;
        }
    });
}
