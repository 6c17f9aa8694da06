//! Cloneable handle for outgoing messages.

use anyhow::Result;
use async_trait::async_trait;
use porygon_driver::{Choice, ChoiceSender};
use porygon_protocol::{ClientCommand, ClientMessage};
use tokio::sync::mpsc;

use crate::auth;

/// Sends commands to the server through the connection's outgoing queue.
///
/// Clones freely; battle drivers hold one as their [`ChoiceSender`].
#[derive(Clone)]
pub struct WireSender {
    outgoing: mpsc::Sender<String>,
}

impl WireSender {
    pub(crate) fn new(outgoing: mpsc::Sender<String>) -> Self {
        Self { outgoing }
    }

    /// Send a raw wire-format string.
    pub async fn send_raw(&self, message: String) -> Result<()> {
        self.outgoing
            .send(message)
            .await
            .map_err(|_| anyhow::anyhow!("connection closed"))
    }

    async fn send_command(&self, room_id: Option<String>, command: ClientCommand) -> Result<()> {
        self.send_raw(ClientMessage { room_id, command }.to_wire_format())
            .await
    }

    /// Log in with username and password using the received challstr.
    pub async fn login(&self, username: &str, password: &str, challstr: &str) -> Result<()> {
        let assertion = auth::get_assertion(username, password, challstr).await?;
        self.send_command(
            Some(String::new()),
            ClientCommand::TrustedLogin {
                username: username.to_string(),
                assertion,
            },
        )
        .await
    }

    /// Search the ladder for a format.
    pub async fn search(&self, format: &str) -> Result<()> {
        self.send_command(None, ClientCommand::Search(format.to_string()))
            .await
    }

    pub async fn cancel_search(&self) -> Result<()> {
        self.send_command(None, ClientCommand::CancelSearch).await
    }

    /// Challenge a user to a battle.
    pub async fn challenge(&self, username: &str, format: &str) -> Result<()> {
        self.send_command(
            None,
            ClientCommand::Challenge {
                username: username.to_string(),
                format: format.to_string(),
            },
        )
        .await
    }

    pub async fn forfeit(&self, room: &str) -> Result<()> {
        self.send_command(Some(room.to_string()), ClientCommand::Forfeit)
            .await
    }

    /// Turn the battle timer on or off.
    pub async fn timer(&self, room: &str, on: bool) -> Result<()> {
        self.send_command(Some(room.to_string()), ClientCommand::Timer(on))
            .await
    }

    pub async fn join_room(&self, room: &str) -> Result<()> {
        self.send_command(None, ClientCommand::JoinRoom(room.to_string()))
            .await
    }

    pub async fn leave_room(&self, room: &str) -> Result<()> {
        self.send_command(None, ClientCommand::LeaveRoom(room.to_string()))
            .await
    }

    /// Send a chat message to a room.
    pub async fn chat(&self, room: &str, message: &str) -> Result<()> {
        self.send_command(
            Some(room.to_string()),
            ClientCommand::Chat(message.to_string()),
        )
        .await
    }
}

#[async_trait]
impl ChoiceSender for WireSender {
    async fn send_choice(&self, room_id: &str, choice: Choice, rqid: Option<u64>) -> Result<()> {
        self.send_command(
            Some(room_id.to_string()),
            ClientCommand::Choose {
                choice: choice.to_string(),
                rqid,
            },
        )
        .await
    }
}
