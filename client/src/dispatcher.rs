//! Routing of parsed events to per-battle drivers.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use porygon_driver::{Agent, BattleDriver, Outcome};
use porygon_protocol::RoomEvent;
use tracing::{debug, info};

use crate::sender::WireSender;

/// Builds a fresh agent for each battle that starts.
pub type AgentFactory = Box<dyn FnMut() -> Box<dyn Agent> + Send>;

/// Owns every running battle and routes parsed chunks to them.
///
/// Battle rooms get a driver created on first sight and torn down on game
/// end or room deinit. Halt markers become per-room [`BattleDriver::halt`]
/// calls, so each driver sees its own block boundaries. Events for
/// non-battle rooms are ignored; the caller handles global concerns like
/// the login challstr.
pub struct RoomDispatcher {
    username: String,
    sender: WireSender,
    agents: AgentFactory,
    drivers: HashMap<String, BattleDriver>,
}

impl RoomDispatcher {
    pub fn new(username: impl Into<String>, sender: WireSender, agents: AgentFactory) -> Self {
        Self {
            username: username.into(),
            sender,
            agents,
            drivers: HashMap::new(),
        }
    }

    pub fn active_battles(&self) -> usize {
        self.drivers.len()
    }

    /// Route one parsed chunk. Returns the battles that ended with it.
    pub async fn dispatch(&mut self, events: Vec<RoomEvent>) -> Result<Vec<(String, Outcome)>> {
        let mut finished = Vec::new();

        for event in events {
            if !event.room_id.starts_with("battle-") {
                continue;
            }

            if event.is_halt() {
                if let Some(driver) = self.drivers.get_mut(&event.room_id) {
                    driver
                        .halt()
                        .await
                        .with_context(|| format!("desync in {}", event.room_id))?;
                }
                continue;
            }

            match event.name() {
                "deinit" | "expire" => {
                    if let Some(mut driver) = self.drivers.remove(&event.room_id) {
                        let outcome = driver.force_finish().await?;
                        debug!(room = %event.room_id, ?outcome, "battle room closed");
                        finished.push((event.room_id.clone(), outcome));
                    }
                }
                "win" | "tie" => {
                    let room_id = event.room_id.clone();
                    if let Some(mut driver) = self.drivers.remove(&room_id) {
                        driver.handle(event).await?;
                        let outcome = driver.finish().await?;
                        info!(room = %room_id, ?outcome, "battle finished");
                        finished.push((room_id, outcome));
                    }
                }
                _ => {
                    let room_id = event.room_id.clone();
                    let Some(driver) = self.driver_for(&event) else {
                        // trailing chatter in a room whose battle is gone
                        debug!(room = %room_id, name = %event.name(), "no battle here; dropped");
                        continue;
                    };
                    driver
                        .handle(event)
                        .await
                        .with_context(|| format!("desync in {room_id}"))?;
                }
            }
        }

        Ok(finished)
    }

    /// Look up the room's driver, creating one only for events that open a
    /// battle. Stray events in a driverless room (chat, the rating lines
    /// trailing a win) get `None` instead of a phantom battle.
    fn driver_for(&mut self, event: &RoomEvent) -> Option<&mut BattleDriver> {
        if !self.drivers.contains_key(&event.room_id) && !opens_battle(event) {
            return None;
        }
        let Self {
            username,
            sender,
            agents,
            drivers,
        } = self;
        Some(drivers.entry(event.room_id.clone()).or_insert_with_key(|room| {
            debug!(room = %room, "new battle room");
            BattleDriver::new(
                room.clone(),
                username.clone(),
                agents(),
                Arc::new(sender.clone()),
            )
        }))
    }
}

/// Events that mark the start of a battle room: the room init line and the
/// earliest battle-setup events the server may send with it.
fn opens_battle(event: &RoomEvent) -> bool {
    match event.name() {
        "init" => event.arg(0) == Some("battle"),
        "player" | "request" => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use porygon_battle::BattleState;
    use porygon_driver::Choice;
    use porygon_protocol::parse_chunk;
    use tokio::sync::mpsc;

    use super::*;

    struct Idle;

    #[async_trait]
    impl Agent for Idle {
        async fn decide(
            &mut self,
            _state: &BattleState,
            _choices: &mut Vec<Choice>,
        ) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn dispatcher() -> RoomDispatcher {
        let (tx, _rx) = mpsc::channel(16);
        RoomDispatcher::new(
            "porygon2",
            WireSender::new(tx),
            Box::new(|| Box::new(Idle)),
        )
    }

    #[tokio::test]
    async fn test_stray_room_chatter_spawns_no_battle() {
        let mut dispatcher = dispatcher();

        // The chat and raw rating lines that trail a finished battle.
        let events = parse_chunk(
            ">battle-gen4randombattle-42\n|c|\u{2606}rival|gg\n|raw|Ladder updating...\n",
        );
        let finished = dispatcher.dispatch(events).await.unwrap();

        assert!(finished.is_empty());
        assert_eq!(dispatcher.active_battles(), 0);
    }

    #[tokio::test]
    async fn test_init_spawns_driver_and_deinit_tears_down() {
        let mut dispatcher = dispatcher();

        let events = parse_chunk(
            ">battle-gen4randombattle-42\n|init|battle\n|player|p1|rival|1\n|player|p2|porygon2|266\n",
        );
        dispatcher.dispatch(events).await.unwrap();
        assert_eq!(dispatcher.active_battles(), 1);

        let events = parse_chunk(">battle-gen4randombattle-42\n|deinit\n");
        let finished = dispatcher.dispatch(events).await.unwrap();
        assert_eq!(
            finished,
            vec![("battle-gen4randombattle-42".to_string(), Outcome::Aborted)]
        );
        assert_eq!(dispatcher.active_battles(), 0);
    }
}
