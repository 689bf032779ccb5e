use crate::domain::link::ServerLink;
use crate::domain::models::KeybindCommand;

use anyhow::Result;
use async_trait::async_trait;

/// Offline stand-in. Accepts every packet and drops it, so the whole UI can
/// be exercised without a server on the other end.
pub struct NullLink;

#[async_trait]
impl ServerLink for NullLink {
    async fn send_authorize(&self, username: &str, _password: &str) -> Result<()> {
        tracing::debug!(username, "offline: authorize dropped");
        Ok(())
    }

    async fn send_menu_selection(
        &self,
        menu_id: &str,
        selection: usize,
        _selection_id: Option<String>,
    ) -> Result<()> {
        tracing::debug!(menu_id, selection, "offline: menu selection dropped");
        Ok(())
    }

    async fn send_escape(&self, _menu_id: Option<String>) -> Result<()> {
        Ok(())
    }

    async fn send_keybind(&self, command: KeybindCommand) -> Result<()> {
        tracing::debug!(key = %command.key, "offline: keybind dropped");
        Ok(())
    }

    async fn send_chat(&self, _convo: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    async fn send_editbox(&self, _text: &str, _input_id: &str) -> Result<()> {
        Ok(())
    }

    async fn send_slash_command(&self, _command: &str, _args: &str) -> Result<()> {
        Ok(())
    }

    async fn send_ping(&self) -> Result<()> {
        Ok(())
    }
}
