//! Choice submission and verdict plumbing.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::choice::Choice;

/// The network layer's side of choice submission.
#[async_trait]
pub trait ChoiceSender: Send + Sync {
    async fn send_choice(&self, room_id: &str, choice: Choice, rqid: Option<u64>) -> Result<()>;
}

/// The server's answer to a submitted choice.
///
/// The server never positively acknowledges an accepted choice; acceptance
/// is inferred from the next battle event. Rejections arrive as `|error|`
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The choice was accepted; the battle moved on.
    Accepted,
    /// A switch was refused: the active pokemon is trapped. A refreshed
    /// request follows.
    Trapped,
    /// A move was refused: the slot is disabled or out of PP. A refreshed
    /// request follows.
    Disabled,
    /// The choice was rejected outright; try the next preference.
    Retry,
}

/// The battle task's submission path.
///
/// Owned by the battle task. Each submission registers a one-shot verdict
/// channel with the driver before the choice goes out, so the driver can
/// resolve it from whatever the server sends back. At most one submission
/// may be in flight at a time.
pub struct Executor {
    room_id: String,
    sender: Arc<dyn ChoiceSender>,
    registrations: mpsc::UnboundedSender<oneshot::Sender<Verdict>>,
}

impl Executor {
    pub(crate) fn new(
        room_id: String,
        sender: Arc<dyn ChoiceSender>,
        registrations: mpsc::UnboundedSender<oneshot::Sender<Verdict>>,
    ) -> Self {
        Self {
            room_id,
            sender,
            registrations,
        }
    }

    /// Submit a choice and wait for the server's verdict.
    ///
    /// The verdict channel is registered before the send so the driver
    /// cannot observe the server's response first. A network-level send
    /// failure degenerates to [`Verdict::Retry`]; dropping our receiver
    /// lets the driver discard the stale registration.
    pub async fn submit(
        &self,
        choice: Choice,
        rqid: Option<u64>,
        note: Option<String>,
    ) -> Result<Verdict> {
        let (tx, rx) = oneshot::channel();
        self.registrations
            .send(tx)
            .ok()
            .context("battle driver is gone")?;

        debug!(room = %self.room_id, %choice, rqid, note, "submitting choice");
        if let Err(error) = self.sender.send_choice(&self.room_id, choice, rqid).await {
            warn!(room = %self.room_id, %choice, %error, "choice send failed");
            return Ok(Verdict::Retry);
        }

        rx.await.context("decision abandoned before a verdict")
    }
}
