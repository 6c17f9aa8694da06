//! Random battle bot.
//!
//! Logs in with the credentials from `PS_USERNAME` / `PS_PASSWORD`,
//! searches for one gen 4 random battle, and plays it to the end with a
//! uniformly random agent.

use anyhow::{Context, Result};
use async_trait::async_trait;
use porygon_battle::BattleState;
use porygon_client::{Client, RoomDispatcher, SHOWDOWN_URL};
use porygon_driver::{Agent, Choice};
use rand::seq::SliceRandom;

struct RandomAgent;

#[async_trait]
impl Agent for RandomAgent {
    async fn decide(
        &mut self,
        _state: &BattleState,
        choices: &mut Vec<Choice>,
    ) -> Result<Option<String>> {
        choices.shuffle(&mut rand::thread_rng());
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let username = std::env::var("PS_USERNAME").context("PS_USERNAME not set")?;
    let password = std::env::var("PS_PASSWORD").context("PS_PASSWORD not set")?;

    let mut client = Client::connect(SHOWDOWN_URL).await?;
    let sender = client.sender();
    let mut dispatcher = RoomDispatcher::new(
        &username,
        sender.clone(),
        Box::new(|| Box::new(RandomAgent)),
    );

    println!("Connected to {SHOWDOWN_URL}");

    loop {
        let events = client.next_events().await?;

        for event in &events {
            if event.name() == "challstr" {
                // The challstr value itself contains pipes.
                let challstr = event.args[1..].join("|");
                println!("Logging in as {username}...");
                sender.login(&username, &password, &challstr).await?;
                sender.search("gen4randombattle").await?;
            }
        }

        for (room, outcome) in dispatcher.dispatch(events).await? {
            println!("[{room}] finished: {outcome:?}");
            sender.leave_room(&room).await?;
            return Ok(());
        }
    }
}
