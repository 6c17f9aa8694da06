//! The decision-making seam.

use anyhow::Result;
use async_trait::async_trait;
use porygon_battle::BattleState;

use crate::choice::Choice;

/// A battle decision maker.
///
/// The driver hands the agent the tracked battle state and the legal
/// choices for the current decision point. The agent reorders `choices` in
/// place from most to least preferred; it must not remove entries, because
/// the runner walks down the list when the server rejects a choice. The
/// returned string, if any, is attached to the submission log line.
#[async_trait]
pub trait Agent: Send {
    async fn decide(
        &mut self,
        state: &BattleState,
        choices: &mut Vec<Choice>,
    ) -> Result<Option<String>>;
}
