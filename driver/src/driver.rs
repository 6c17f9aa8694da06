//! The connection-facing half of a battle.

use std::sync::Arc;

use anyhow::Result;
use porygon_protocol::RoomEvent;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::executor::{ChoiceSender, Executor, Verdict};
use crate::task::{Outcome, run_battle};

/// A protocol-ordering invariant was violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// Two different decision requests arrived in one event block.
    #[error("conflicting decision requests in one event block")]
    RequestMismatch,
    /// An event block that should carry a decision request ended without
    /// one.
    #[error("event block ended without a decision request")]
    MissingRequest,
    /// A second decision point opened while a submission was still
    /// unproven.
    #[error("a decision is already outstanding")]
    OutstandingDecision,
    /// The battle finished while a submission was still awaiting its
    /// verdict.
    #[error("battle finished with an unresolved decision")]
    UnresolvedDecision,
    /// The battle task panicked or was cancelled.
    #[error("battle task panicked")]
    TaskPanicked,
}

/// Which kind of choice the server refused with a guarded rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unavailable {
    Move,
    Switch,
}

/// Drives one battle room: buffers the decision request within each event
/// block, forwards progress events to the battle task, and resolves
/// submission verdicts from the server's responses.
///
/// The driver and its task communicate over a capacity-1 event channel;
/// verdict channels are registered by the task through an unbounded side
/// channel and resolved here. [`handle`](Self::handle) is called for every
/// event routed to this room, [`halt`](Self::halt) once per room per
/// server chunk.
pub struct BattleDriver {
    room_id: String,
    /// Between the start event and win/tie.
    battling: bool,
    /// A progress event was forwarded since the last halt.
    progressed: bool,
    /// A released or submitted decision has not yet been proven accepted.
    awaiting: bool,
    /// The decision request buffered for the current event block.
    pending_request: Option<RoomEvent>,
    /// Set by an `[Unavailable choice]` error; consumed by the refreshed
    /// request that follows it.
    unavailable: Option<Unavailable>,
    /// The in-flight decision was rejected and resumed within this block,
    /// so its boundary is not a new decision point.
    resumed: bool,
    events: Option<mpsc::Sender<RoomEvent>>,
    registered: Option<oneshot::Sender<Verdict>>,
    registrations: mpsc::UnboundedReceiver<oneshot::Sender<Verdict>>,
    task: Option<JoinHandle<Result<Outcome>>>,
}

impl BattleDriver {
    /// Spawn the battle task and return its driver.
    ///
    /// `username` is our login name, used to claim a side from the player
    /// events. Requires a tokio runtime.
    pub fn new(
        room_id: impl Into<String>,
        username: impl Into<String>,
        agent: Box<dyn Agent>,
        sender: Arc<dyn ChoiceSender>,
    ) -> Self {
        let room_id = room_id.into();
        let (event_tx, event_rx) = mpsc::channel(1);
        let (reg_tx, reg_rx) = mpsc::unbounded_channel();

        let executor = Executor::new(room_id.clone(), sender, reg_tx);
        let task = tokio::spawn(run_battle(
            room_id.clone(),
            username.into(),
            agent,
            executor,
            event_rx,
        ));

        Self {
            room_id,
            battling: false,
            progressed: false,
            awaiting: false,
            pending_request: None,
            unavailable: None,
            resumed: false,
            events: Some(event_tx),
            registered: None,
            registrations: reg_rx,
            task: Some(task),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Whether the battle proper is running (between start and win/tie).
    pub fn is_battling(&self) -> bool {
        self.battling
    }

    /// Process one event addressed to this room.
    ///
    /// Decision requests are buffered until [`halt`](Self::halt); error
    /// and timer events resolve the in-flight verdict; progress events are
    /// forwarded to the task; anything else is dropped.
    pub async fn handle(&mut self, event: RoomEvent) -> Result<()> {
        self.sync_verdict()?;

        match event.name() {
            "request" => self.handle_request(event).await,
            "error" => {
                self.handle_error(&event);
                Ok(())
            }
            "inactive" | "inactiveoff" => {
                // timer chatter means the server moved past our submission
                self.resolve(Verdict::Accepted);
                self.awaiting = false;
                Ok(())
            }
            name if is_progress_event(name) => {
                match name {
                    "start" => self.battling = true,
                    "win" | "tie" => self.battling = false,
                    _ => {}
                }
                self.resolve(Verdict::Accepted);
                self.awaiting = false;
                self.progressed = true;
                self.forward(event).await;
                Ok(())
            }
            name => {
                debug!(room = %self.room_id, name, "event dropped");
                Ok(())
            }
        }
    }

    /// End of this room's event block.
    ///
    /// Releases the buffered decision request to the task. A halt while a
    /// decision is still unproven means the server opened a second
    /// decision point, which the submission model cannot represent - with
    /// one exception: a block that only rejected the submission (an error
    /// event, plus the refreshed request after a guarded rejection)
    /// continues the same decision, so its boundary passes.
    pub async fn halt(&mut self) -> Result<()> {
        self.sync_verdict()?;
        let resumed = std::mem::take(&mut self.resumed);
        if !self.battling {
            return Ok(());
        }
        if self.awaiting {
            if resumed {
                return Ok(());
            }
            return Err(DriverError::OutstandingDecision.into());
        }
        if !self.progressed {
            return Ok(());
        }
        self.progressed = false;

        let request = self
            .pending_request
            .take()
            .ok_or(DriverError::MissingRequest)?;
        if self.forward(request).await {
            self.awaiting = true;
        }
        Ok(())
    }

    /// Wait for the battle task to finish and return its outcome.
    ///
    /// Closes the event channel first so a task still waiting for events
    /// unwinds as [`Outcome::Aborted`].
    pub async fn finish(&mut self) -> Result<Outcome> {
        self.sync_verdict()?;
        // awaiting covers a released decision the task has not submitted
        // yet; joining with either set would deadlock against the task.
        if self.awaiting || self.registered.is_some() {
            return Err(DriverError::UnresolvedDecision.into());
        }
        self.events = None;
        self.join_task().await?
    }

    /// Tear the battle down without waiting for the server.
    ///
    /// Drops the event channel and every verdict channel, so the task
    /// unwinds from wherever it is blocked. An in-flight decision is
    /// abandoned, not resolved, and the outcome degrades to
    /// [`Outcome::Aborted`].
    pub async fn force_finish(&mut self) -> Result<Outcome> {
        self.events = None;
        self.registered = None;
        while self.registrations.try_recv().is_ok() {}
        self.awaiting = false;
        self.battling = false;

        match self.join_task().await? {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                debug!(room = %self.room_id, %error, "battle task unwound");
                Ok(Outcome::Aborted)
            }
        }
    }

    async fn join_task(&mut self) -> Result<Result<Outcome>> {
        let task = self.task.take().ok_or(DriverError::TaskPanicked)?;
        task.await.map_err(|_| DriverError::TaskPanicked.into())
    }

    async fn handle_request(&mut self, event: RoomEvent) -> Result<()> {
        if event.arg(0).map(str::is_empty).unwrap_or(true) {
            return Ok(());
        }

        if let Some(kind) = self.unavailable.take() {
            // refreshed request after a guarded rejection: queue it before
            // the verdict wakes the task, so the task finds it immediately
            self.forward(event).await;
            self.resolve(match kind {
                Unavailable::Switch => Verdict::Trapped,
                Unavailable::Move => Verdict::Disabled,
            });
            self.resumed = true;
            return Ok(());
        }

        match &self.pending_request {
            None => {
                // a fresh request also proves the previous choice landed
                self.resolve(Verdict::Accepted);
                self.awaiting = false;
                self.pending_request = Some(event);
                Ok(())
            }
            Some(pending) if pending.args == event.args => Ok(()),
            Some(_) => Err(DriverError::RequestMismatch.into()),
        }
    }

    fn handle_error(&mut self, event: &RoomEvent) {
        let text = event.arg(0).unwrap_or("");
        if text.starts_with("[Unavailable choice]") {
            self.unavailable = Some(if text.contains("switch") {
                Unavailable::Switch
            } else {
                Unavailable::Move
            });
            self.resumed = true;
        } else if text.starts_with("[Invalid choice]") {
            self.resolve(Verdict::Retry);
            self.resumed = true;
        } else {
            warn!(room = %self.room_id, text, "unhandled error event");
        }
    }

    /// Send an event to the task. Returns false once the task has
    /// finished; for a game-ending block that is the normal shutdown path.
    async fn forward(&mut self, event: RoomEvent) -> bool {
        let Some(tx) = &self.events else {
            return false;
        };
        if tx.send(event).await.is_err() {
            debug!(room = %self.room_id, "battle task finished; event dropped");
            self.events = None;
            self.battling = false;
            return false;
        }
        true
    }

    /// Pull any newly registered verdict channels from the task.
    ///
    /// Registrations whose receiver is already gone (the send failed on
    /// the task side) are discarded. Two live registrations at once means
    /// the task opened a second decision, which is a driver bug surfaced
    /// as [`DriverError::OutstandingDecision`].
    fn sync_verdict(&mut self) -> Result<(), DriverError> {
        while let Ok(tx) = self.registrations.try_recv() {
            if tx.is_closed() {
                continue;
            }
            if self.registered.is_some() {
                return Err(DriverError::OutstandingDecision);
            }
            self.registered = Some(tx);
        }
        Ok(())
    }

    fn resolve(&mut self, verdict: Verdict) {
        if let Some(tx) = self.registered.take() {
            let _ = tx.send(verdict);
        }
    }
}

/// Battle events the task consumes, via the state registry or as plain
/// proof of progress. Chat, join/leave, and other room housekeeping never
/// reach the task.
fn is_progress_event(name: &str) -> bool {
    matches!(
        name,
        "player"
            | "teamsize"
            | "gametype"
            | "gen"
            | "tier"
            | "rated"
            | "rule"
            | "clearpoke"
            | "poke"
            | "teampreview"
            | "start"
            | "turn"
            | "upkeep"
            | "switch"
            | "drag"
            | "replace"
            | "swap"
            | "faint"
            | "move"
            | "cant"
            | "detailschange"
            | "-formechange"
            | "-transform"
            | "-damage"
            | "-heal"
            | "-sethp"
            | "-status"
            | "-curestatus"
            | "-cureteam"
            | "-boost"
            | "-unboost"
            | "-setboost"
            | "-clearboost"
            | "-clearallboost"
            | "-invertboost"
            | "-copyboost"
            | "-swapboost"
            | "-start"
            | "-end"
            | "-singleturn"
            | "-singlemove"
            | "-activate"
            | "-weather"
            | "-fieldstart"
            | "-fieldend"
            | "-sidestart"
            | "-sideend"
            | "-item"
            | "-enditem"
            | "-ability"
            | "-endability"
            | "-crit"
            | "-supereffective"
            | "-resisted"
            | "-immune"
            | "-miss"
            | "-fail"
            | "-prepare"
            | "-mustrecharge"
            | "-hitcount"
            | "win"
            | "tie"
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use porygon_battle::BattleState;
    use tokio::sync::{Mutex, mpsc};
    use tokio::time::timeout;

    use super::*;
    use crate::choice::Choice;

    const ROOM: &str = "battle-gen4randombattle-1";
    const US: &str = "porygon2";

    const TURN_REQUEST: &str = r#"{
        "rqid": 3,
        "active": [{"moves": [
            {"move": "Thunderbolt", "id": "thunderbolt", "pp": 24, "maxpp": 24},
            {"move": "Shadow Ball", "id": "shadowball", "pp": 24, "maxpp": 24}
        ]}],
        "side": {"name": "porygon2", "id": "p2", "pokemon": [
            {"ident": "p2: Jolteon", "details": "Jolteon, L83, M", "condition": "240/240", "active": true,
             "moves": ["thunderbolt", "shadowball"], "baseAbility": "voltabsorb", "item": "leftovers"},
            {"ident": "p2: Ludicolo", "details": "Ludicolo, L84, F", "condition": "280/280",
             "moves": ["surf"], "baseAbility": "swiftswim", "item": "lifeorb"}
        ]}
    }"#;

    const TRAPPED_REQUEST: &str = r#"{
        "rqid": 4,
        "active": [{"trapped": true, "moves": [
            {"move": "Thunderbolt", "id": "thunderbolt", "pp": 24, "maxpp": 24},
            {"move": "Shadow Ball", "id": "shadowball", "pp": 24, "maxpp": 24}
        ]}],
        "side": {"name": "porygon2", "id": "p2", "pokemon": [
            {"ident": "p2: Jolteon", "details": "Jolteon, L83, M", "condition": "240/240", "active": true,
             "moves": ["thunderbolt", "shadowball"], "baseAbility": "voltabsorb", "item": "leftovers"},
            {"ident": "p2: Ludicolo", "details": "Ludicolo, L84, F", "condition": "280/280",
             "moves": ["surf"], "baseAbility": "swiftswim", "item": "lifeorb"}
        ]}
    }"#;

    struct ChannelSender {
        sent: mpsc::UnboundedSender<(Choice, Option<u64>)>,
    }

    #[async_trait]
    impl ChoiceSender for ChannelSender {
        async fn send_choice(
            &self,
            _room_id: &str,
            choice: Choice,
            rqid: Option<u64>,
        ) -> Result<()> {
            self.sent
                .send((choice, rqid))
                .map_err(|_| anyhow::anyhow!("test channel closed"))
        }
    }

    /// Keeps the derived order and records the turn it was invoked on.
    struct OrderKeeper {
        turns_seen: Arc<Mutex<Vec<u32>>>,
    }

    #[async_trait]
    impl Agent for OrderKeeper {
        async fn decide(
            &mut self,
            state: &BattleState,
            _choices: &mut Vec<Choice>,
        ) -> Result<Option<String>> {
            self.turns_seen.lock().await.push(state.turn);
            Ok(None)
        }
    }

    /// Never comes back with a decision.
    struct Stalls;

    #[async_trait]
    impl Agent for Stalls {
        async fn decide(
            &mut self,
            _state: &BattleState,
            _choices: &mut Vec<Choice>,
        ) -> Result<Option<String>> {
            std::future::pending().await
        }
    }

    /// Prefers switching whenever a switch is legal.
    struct SwitchHappy;

    #[async_trait]
    impl Agent for SwitchHappy {
        async fn decide(
            &mut self,
            _state: &BattleState,
            choices: &mut Vec<Choice>,
        ) -> Result<Option<String>> {
            choices.sort_by_key(Choice::is_move);
            Ok(None)
        }
    }

    fn event(line: &str) -> RoomEvent {
        RoomEvent::new(ROOM, line.split('|').map(str::to_string).collect())
    }

    fn request_event(json: &str) -> RoomEvent {
        RoomEvent::new(ROOM, vec!["request".to_string(), json.to_string()])
    }

    fn driver_with(
        agent: impl Agent + 'static,
    ) -> (BattleDriver, mpsc::UnboundedReceiver<(Choice, Option<u64>)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = BattleDriver::new(ROOM, US, Box::new(agent), Arc::new(ChannelSender { sent: tx }));
        (driver, rx)
    }

    fn order_keeper() -> (OrderKeeper, Arc<Mutex<Vec<u32>>>) {
        let turns = Arc::new(Mutex::new(Vec::new()));
        (
            OrderKeeper {
                turns_seen: turns.clone(),
            },
            turns,
        )
    }

    async fn recv_choice(
        rx: &mut mpsc::UnboundedReceiver<(Choice, Option<u64>)>,
    ) -> (Choice, Option<u64>) {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no choice submitted in time")
            .expect("choice channel closed")
    }

    async fn start_battle(driver: &mut BattleDriver) {
        for line in [
            "player|p1|rival|1",
            "player|p2|porygon2|266",
            "teamsize|p1|6",
            "teamsize|p2|6",
            "start",
            "switch|p1a: Skarmory|Skarmory, L88, M|100/100",
            "switch|p2a: Jolteon|Jolteon, L83, M|240/240",
            "turn|1",
        ] {
            driver.handle(event(line)).await.unwrap();
        }
    }

    fn driver_error(error: &anyhow::Error) -> Option<&DriverError> {
        error.downcast_ref::<DriverError>()
    }

    #[tokio::test]
    async fn test_request_released_after_event_block() {
        let (agent, turns) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        // The request arrives before the events it depends on.
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        start_battle(&mut driver).await;
        driver.halt().await.unwrap();

        let (choice, rqid) = recv_choice(&mut sent).await;
        assert_eq!(rqid, Some(3));
        assert_eq!(choice, Choice::Move(1));
        // The agent saw the block's events already applied.
        assert_eq!(*turns.lock().await, vec![1]);
    }

    #[tokio::test]
    async fn test_double_halt_is_fatal() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();

        let error = driver.halt().await.unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::OutstandingDecision));
    }

    #[tokio::test]
    async fn test_halt_without_request_is_fatal() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        start_battle(&mut driver).await;
        let error = driver.halt().await.unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::MissingRequest));
    }

    #[tokio::test]
    async fn test_halt_before_start_is_noop() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        assert!(!driver.is_battling());
    }

    #[tokio::test]
    async fn test_duplicate_request_benign_mismatch_fatal() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();

        let error = driver
            .handle(request_event(TRAPPED_REQUEST))
            .await
            .unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::RequestMismatch));
    }

    #[tokio::test]
    async fn test_empty_request_ignored() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(event("request|")).await.unwrap();
        let error = driver.halt().await.unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::MissingRequest));
    }

    #[tokio::test]
    async fn test_trapped_round_trip() {
        let (mut driver, mut sent) = driver_with(SwitchHappy);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();

        let (first, _) = recv_choice(&mut sent).await;
        assert_eq!(first, Choice::Switch(2));

        driver
            .handle(event(
                "error|[Unavailable choice] Can't switch: The active Pok\u{e9}mon is trapped",
            ))
            .await
            .unwrap();
        driver.handle(request_event(TRAPPED_REQUEST)).await.unwrap();

        // The refreshed request stays inside the same decision point.
        let (second, rqid) = recv_choice(&mut sent).await;
        assert!(second.is_move());
        assert_eq!(rqid, Some(4));
    }

    #[tokio::test]
    async fn test_halt_after_guarded_rejection_is_benign() {
        let (mut driver, mut sent) = driver_with(SwitchHappy);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        // The rejection arrives in its own chunk, so the dispatcher will
        // call halt() for it; that block continues the same decision.
        driver
            .handle(event(
                "error|[Unavailable choice] Can't switch: The active Pok\u{e9}mon is trapped",
            ))
            .await
            .unwrap();
        driver.handle(request_event(TRAPPED_REQUEST)).await.unwrap();
        recv_choice(&mut sent).await;
        driver.halt().await.unwrap();

        // Only the rejection block passes; the next empty boundary is
        // still a second decision point.
        let error = driver.halt().await.unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::OutstandingDecision));
    }

    #[tokio::test]
    async fn test_halt_after_invalid_choice_is_benign() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        driver
            .handle(event("error|[Invalid choice] There's nothing to choose"))
            .await
            .unwrap();
        recv_choice(&mut sent).await;
        driver.halt().await.unwrap();
    }

    #[tokio::test]
    async fn test_retry_walks_preferences() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();

        let (first, _) = recv_choice(&mut sent).await;
        assert_eq!(first, Choice::Move(1));

        driver
            .handle(event("error|[Invalid choice] There's nothing to choose"))
            .await
            .unwrap();

        let (second, _) = recv_choice(&mut sent).await;
        assert_eq!(second, Choice::Move(2));
    }

    #[tokio::test]
    async fn test_inactive_counts_as_acceptance() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        driver
            .handle(event("inactive|porygon2 has 120 seconds left"))
            .await
            .unwrap();
        // Room chatter is dropped without consequence.
        driver.handle(event("c|rival|gl hf")).await.unwrap();

        // The decision is proven accepted, so the chunk boundary passes.
        driver.halt().await.unwrap();
    }

    #[tokio::test]
    async fn test_win_outcome() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        for line in [
            "move|p2a: Jolteon|Thunderbolt|p1a: Skarmory",
            "-damage|p1a: Skarmory|0 fnt",
            "faint|p1a: Skarmory",
            "win|porygon2",
        ] {
            driver.handle(event(line)).await.unwrap();
        }

        assert!(!driver.is_battling());
        assert_eq!(driver.finish().await.unwrap(), Outcome::Win);
    }

    #[tokio::test]
    async fn test_finish_with_unresolved_decision_is_fatal() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        let error = driver.finish().await.unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::UnresolvedDecision));
    }

    #[tokio::test]
    async fn test_finish_while_agent_deciding_is_fatal() {
        let (mut driver, _sent) = driver_with(Stalls);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();

        // The released decision has not produced a submission yet; joining
        // the task now would wait on the agent forever.
        let result = timeout(Duration::from_secs(5), driver.finish()).await;
        let error = result.expect("finish() must not block").unwrap_err();
        assert_eq!(driver_error(&error), Some(&DriverError::UnresolvedDecision));
    }

    #[tokio::test]
    async fn test_force_finish_unwinds_in_flight_decision() {
        let (agent, _) = order_keeper();
        let (mut driver, mut sent) = driver_with(agent);

        start_battle(&mut driver).await;
        driver.handle(request_event(TURN_REQUEST)).await.unwrap();
        driver.halt().await.unwrap();
        recv_choice(&mut sent).await;

        assert_eq!(driver.force_finish().await.unwrap(), Outcome::Aborted);
    }

    #[tokio::test]
    async fn test_abandoned_battle_aborts() {
        let (agent, _) = order_keeper();
        let (mut driver, _sent) = driver_with(agent);

        start_battle(&mut driver).await;
        assert_eq!(driver.finish().await.unwrap(), Outcome::Aborted);
    }
}
