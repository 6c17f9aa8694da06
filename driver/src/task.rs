//! The per-battle decision task.

use anyhow::{Context, Result, bail};
use porygon_battle::{BattleState, EventRegistry};
use porygon_protocol::{Request, RoomEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::choice::derive_choices;
use crate::executor::{Executor, Verdict};

/// How a battle task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    /// The event channel closed before the game ended.
    Aborted,
}

/// Consume the ordered event stream for one battle until it ends.
///
/// Halt markers are block boundaries for the driver's reordering and carry
/// no information here. Decision requests run the decision cycle; every
/// other event mutates the tracked state through the registry.
pub(crate) async fn run_battle(
    room_id: String,
    username: String,
    mut agent: Box<dyn Agent>,
    executor: Executor,
    mut events: mpsc::Receiver<RoomEvent>,
) -> Result<Outcome> {
    let registry = EventRegistry::standard();
    let mut state = BattleState::new(username);

    while let Some(event) = events.recv().await {
        if event.is_halt() {
            continue;
        }
        if event.name() == "request" {
            decide(agent.as_mut(), &executor, &mut state, &event, &mut events)
                .await
                .with_context(|| format!("decision failed in {room_id}"))?;
            continue;
        }

        registry.apply(&mut state, &event);
        if state.ended {
            let outcome = match state.we_won() {
                Some(true) => Outcome::Win,
                Some(false) => Outcome::Loss,
                None => Outcome::Tie,
            };
            debug!(room = %room_id, ?outcome, turn = state.turn, "battle ended");
            return Ok(outcome);
        }
    }

    debug!(room = %room_id, "event channel closed before game end");
    Ok(Outcome::Aborted)
}

/// The decision cycle for one released request.
///
/// A rejection with a refreshed request (trapped switch, disabled move)
/// stays inside this cycle: the refreshed request replaces the current one
/// without opening a new decision point. A plain rejection walks down the
/// agent's preference order.
async fn decide(
    agent: &mut dyn Agent,
    executor: &Executor,
    state: &mut BattleState,
    event: &RoomEvent,
    events: &mut mpsc::Receiver<RoomEvent>,
) -> Result<()> {
    let Some(mut request) = Request::from_event(event) else {
        return Ok(());
    };

    'request: loop {
        if !request.needs_decision() {
            return Ok(());
        }
        state.update_from_request(&request);

        let mut choices = derive_choices(&request);
        if choices.is_empty() {
            debug!(turn = state.turn, "request offers no choices; skipping");
            return Ok(());
        }

        loop {
            let note = agent.decide(state, &mut choices).await?;
            let Some(&choice) = choices.first() else {
                bail!("agent emptied the choice list");
            };

            match executor.submit(choice, request.rqid, note).await? {
                Verdict::Accepted => return Ok(()),
                Verdict::Retry => {
                    let rejected = choices.remove(0);
                    warn!(turn = state.turn, %rejected, "choice rejected; trying next");
                    if choices.is_empty() {
                        bail!("every legal choice was rejected");
                    }
                }
                verdict @ (Verdict::Trapped | Verdict::Disabled) => {
                    debug!(turn = state.turn, %choice, ?verdict, "choice unavailable");
                    let Some(refreshed) = events.recv().await else {
                        return Ok(());
                    };
                    match Request::from_event(&refreshed) {
                        Some(r) => {
                            request = r;
                            continue 'request;
                        }
                        None => bail!("expected a refreshed request after {verdict:?}"),
                    }
                }
            }
        }
    }
}
