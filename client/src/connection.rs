//! Websocket connection with automatic reconnection.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use porygon_protocol::{RoomEvent, parse_chunk};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// The main Showdown simulator endpoint.
pub const SHOWDOWN_URL: &str = "wss://sim3.psim.us/showdown/websocket";

/// Reconnection behavior after a dropped connection.
pub struct ReconnectPolicy {
    pub max_attempts: Option<usize>,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Some(5),
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// A websocket connection to the simulator.
///
/// Pings are answered inline; close frames and stream errors trigger the
/// reconnect policy. Note that battles in progress do not survive a
/// reconnect on the server side.
pub struct Connection {
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    url: String,
    reconnect_policy: ReconnectPolicy,
}

impl Connection {
    pub async fn connect(url: String, policy: ReconnectPolicy) -> Result<Self> {
        let ws_stream = Self::establish(&url)
            .await
            .with_context(|| format!("failed to connect to {url}"))?;

        Ok(Self {
            ws_stream,
            url,
            reconnect_policy: policy,
        })
    }

    async fn establish(url: &str) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>> {
        let (ws_stream, _) = connect_async(url)
            .await
            .context("websocket handshake failed")?;
        Ok(ws_stream)
    }

    async fn reconnect(&mut self) -> Result<()> {
        let mut delay = self.reconnect_policy.initial_delay;
        let mut attempt = 1;

        loop {
            if let Some(max) = self.reconnect_policy.max_attempts
                && attempt > max
            {
                anyhow::bail!("failed to reconnect to {} after {max} attempts", self.url);
            }

            tokio::time::sleep(delay).await;

            match Self::establish(&self.url).await {
                Ok(ws_stream) => {
                    self.ws_stream = ws_stream;
                    return Ok(());
                }
                Err(error) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = ?self.reconnect_policy.max_attempts,
                        %error,
                        "reconnection attempt failed"
                    );
                    attempt += 1;
                    delay = Duration::from_secs_f64(
                        delay.as_secs_f64() * self.reconnect_policy.backoff_multiplier,
                    )
                    .min(self.reconnect_policy.max_delay);
                }
            }
        }
    }

    /// Receive the next server chunk, parsed into room events.
    ///
    /// The returned vector ends with one halt marker per room that
    /// appeared in the chunk.
    pub async fn recv(&mut self) -> Result<Vec<RoomEvent>> {
        loop {
            match self.ws_stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(parse_chunk(&text)),
                Some(Ok(Message::Ping(data))) => {
                    self.ws_stream
                        .send(Message::Pong(data))
                        .await
                        .context("failed to send pong")?;
                }
                Some(Ok(Message::Close(_))) | None => {
                    self.reconnect()
                        .await
                        .context("connection lost and reconnection failed")?;
                }
                Some(Ok(_)) => continue,
                Some(Err(error)) => {
                    tracing::error!(%error, "websocket error, attempting reconnect");
                    self.reconnect()
                        .await
                        .context("websocket error and reconnection failed")?;
                }
            }
        }
    }

    pub async fn send(&mut self, message: String) -> Result<()> {
        self.ws_stream
            .send(Message::Text(message))
            .await
            .context("failed to send message")
    }
}
