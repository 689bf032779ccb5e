use crate::domain::models::KeybindCommand;
use anyhow::Result;
use async_trait::async_trait;

/// Outbound half of the session. One method per packet the UI layer can
/// produce; implementations own framing and transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerLink: Send + Sync {
    async fn send_authorize(&self, username: &str, password: &str) -> Result<()>;

    // Reports a menu selection, 1-based.
    async fn send_menu_selection(
        &self,
        menu_id: &str,
        selection: usize,
        selection_id: Option<String>,
    ) -> Result<()>;

    async fn send_escape(&self, menu_id: Option<String>) -> Result<()>;

    async fn send_keybind(&self, command: KeybindCommand) -> Result<()>;

    async fn send_chat(&self, convo: &str, message: &str) -> Result<()>;

    async fn send_editbox(&self, text: &str, input_id: &str) -> Result<()>;

    async fn send_slash_command(&self, command: &str, args: &str) -> Result<()>;

    async fn send_ping(&self) -> Result<()>;
}
