//! Async Pokemon Showdown client.
//!
//! Thin glue between the websocket and the battle machinery: a
//! [`Connection`] turns server chunks into event vectors, a
//! [`RoomDispatcher`] routes them to per-battle drivers, and a
//! [`WireSender`] carries everything outbound. A minimal bot is a loop:
//!
//! ```no_run
//! # use anyhow::Result;
//! # async fn run(mut client: porygon_client::Client,
//! #              mut dispatcher: porygon_client::RoomDispatcher) -> Result<()> {
//! loop {
//!     let events = client.next_events().await?;
//!     for (room, outcome) in dispatcher.dispatch(events).await? {
//!         println!("{room} ended: {outcome:?}");
//!     }
//! }
//! # }
//! ```

pub mod auth;
pub mod connection;
pub mod dispatcher;
pub mod sender;

use anyhow::Result;
use tokio::sync::mpsc;

pub use connection::{Connection, ReconnectPolicy, SHOWDOWN_URL};
pub use dispatcher::{AgentFactory, RoomDispatcher};
pub use porygon_protocol::{ClientCommand, ClientMessage, RoomEvent};
pub use sender::WireSender;

/// A connected client: the websocket plus its outgoing queue.
pub struct Client {
    connection: Connection,
    outgoing: mpsc::Receiver<String>,
    sender: WireSender,
}

impl Client {
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(url, ReconnectPolicy::default()).await
    }

    pub async fn connect_with(url: &str, policy: ReconnectPolicy) -> Result<Self> {
        let connection = Connection::connect(url.to_string(), policy).await?;
        let (tx, rx) = mpsc::channel(64);
        Ok(Self {
            connection,
            outgoing: rx,
            sender: WireSender::new(tx),
        })
    }

    /// A cloneable handle for sending commands.
    pub fn sender(&self) -> WireSender {
        self.sender.clone()
    }

    /// Flush queued outgoing messages and wait for the next server chunk.
    pub async fn next_events(&mut self) -> Result<Vec<RoomEvent>> {
        let Self {
            connection,
            outgoing,
            ..
        } = self;
        loop {
            tokio::select! {
                events = connection.recv() => return events,
                Some(message) = outgoing.recv() => connection.send(message).await?,
            }
        }
    }
}
