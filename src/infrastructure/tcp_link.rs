use crate::app::action::Action;
use crate::domain::link::ServerLink;
use crate::domain::models::KeybindCommand;
use crate::domain::protocol::{parse_event, ClientPacket};

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};

/// JSON-lines transport. One packet per line out, one event per line in;
/// the read half pumps straight into the action channel from its own task.
pub struct TcpLink {
    writer: Mutex<Box<dyn AsyncWrite + Send + Unpin>>,
}

impl TcpLink {
    pub async fn connect(host: &str, port: u16, tx: mpsc::Sender<Action>) -> Result<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        tracing::info!(host, port, "connected");
        Ok(Self::over(stream, tx))
    }

    /// Wraps an established stream. Tests drive this with in-memory pipes;
    /// `connect` is the production path.
    pub fn over<S>(stream: S, tx: mpsc::Sender<Action>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        spawn_reader(read_half, tx);
        Self {
            writer: Mutex::new(Box::new(write_half)),
        }
    }

    async fn send(&self, packet: &ClientPacket) -> Result<()> {
        let mut line = serde_json::to_string(packet)?;
        line.push('\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

/// Reads wire lines until the socket dies, forwarding parsed events. The
/// final action is always `ConnectionLost` so the session learns why its
/// menus stopped coming.
pub fn spawn_reader<R>(reader: R, tx: mpsc::Sender<Action>)
where
    R: AsyncRead + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(event) = parse_event(&line) {
                        if tx.send(Action::Server(event)).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => {
                    let _ = tx
                        .send(Action::ConnectionLost(
                            "server closed the connection".to_string(),
                        ))
                        .await;
                    break;
                }
                Err(err) => {
                    let _ = tx.send(Action::ConnectionLost(err.to_string())).await;
                    break;
                }
            }
        }
    });
}

#[async_trait]
impl ServerLink for TcpLink {
    async fn send_authorize(&self, username: &str, password: &str) -> Result<()> {
        self.send(&ClientPacket::authorize(username, password)).await
    }

    async fn send_menu_selection(
        &self,
        menu_id: &str,
        selection: usize,
        selection_id: Option<String>,
    ) -> Result<()> {
        self.send(&ClientPacket::Menu {
            menu_id: menu_id.to_string(),
            selection,
            selection_id,
        })
        .await
    }

    async fn send_escape(&self, menu_id: Option<String>) -> Result<()> {
        self.send(&ClientPacket::Escape { menu_id }).await
    }

    async fn send_keybind(&self, command: KeybindCommand) -> Result<()> {
        self.send(&ClientPacket::Keybind(command)).await
    }

    async fn send_chat(&self, convo: &str, message: &str) -> Result<()> {
        self.send(&ClientPacket::Chat {
            convo: convo.to_string(),
            message: message.to_string(),
        })
        .await
    }

    async fn send_editbox(&self, text: &str, input_id: &str) -> Result<()> {
        self.send(&ClientPacket::Editbox {
            text: text.to_string(),
            input_id: input_id.to_string(),
        })
        .await
    }

    async fn send_slash_command(&self, command: &str, args: &str) -> Result<()> {
        self.send(&ClientPacket::SlashCommand {
            command: command.to_string(),
            args: args.to_string(),
        })
        .await
    }

    async fn send_ping(&self) -> Result<()> {
        self.send(&ClientPacket::Ping).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::protocol::ServerEvent;
    use tokio::io::duplex;

    #[tokio::test]
    async fn outbound_packets_are_json_lines() {
        let (client, server) = duplex(1024);
        let (tx, _rx) = mpsc::channel(8);
        let link = TcpLink::over(client, tx);

        link.send_menu_selection("lobby", 2, None).await.unwrap();
        link.send_ping().await.unwrap();

        let (server_read, _server_write) = tokio::io::split(server);
        let mut lines = BufReader::new(server_read).lines();
        assert_eq!(
            lines.next_line().await.unwrap().unwrap(),
            r#"{"type":"menu","menu_id":"lobby","selection":2}"#
        );
        assert_eq!(
            lines.next_line().await.unwrap().unwrap(),
            r#"{"type":"ping"}"#
        );
    }

    #[tokio::test]
    async fn inbound_lines_become_server_actions() {
        let (client, server) = duplex(1024);
        let (tx, mut rx) = mpsc::channel(8);
        let _link = TcpLink::over(client, tx);

        let (_server_read, mut server_write) = tokio::io::split(server);
        server_write
            .write_all(b"{\"type\":\"pong\"}\n")
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            Action::Server(ServerEvent::Pong)
        );
    }

    #[tokio::test]
    async fn garbage_lines_are_skipped() {
        let (client, server) = duplex(1024);
        let (tx, mut rx) = mpsc::channel(8);
        let _link = TcpLink::over(client, tx);

        let (_server_read, mut server_write) = tokio::io::split(server);
        server_write.write_all(b"not json at all\n").await.unwrap();
        server_write
            .write_all(b"{\"type\":\"speak\",\"text\":\"Your deal\"}\n")
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            Action::Server(ServerEvent::Speak {
                text: "Your deal".to_string(),
                buffer: None,
            })
        );
    }

    #[tokio::test]
    async fn closed_socket_reports_connection_lost() {
        let (client, server) = duplex(1024);
        let (tx, mut rx) = mpsc::channel(8);
        let _link = TcpLink::over(client, tx);

        drop(server);

        match rx.recv().await.unwrap() {
            Action::ConnectionLost(reason) => assert!(!reason.is_empty()),
            other => panic!("expected ConnectionLost, got {other:?}"),
        }
    }
}
