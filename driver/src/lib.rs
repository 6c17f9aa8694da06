//! Per-battle decision synchronization.
//!
//! The server streams battle events and decision requests over a shared
//! websocket, and it makes no ordering promise between the two within a
//! message: a `|request|` for turn N routinely arrives *before* the events
//! that resolve turn N-1. This crate re-establishes the order a decision
//! maker needs. Each battle gets a [`BattleDriver`] on the connection side
//! and a dedicated tokio task on the decision side:
//!
//! ```text
//!   connection        BattleDriver              battle task
//!   ----------        ------------              -----------
//!   events       -->  handle(event)   --+
//!   (per chunk)       buffers request   |  capacity-1 channel
//!                     forwards progress +-->  recv() -> apply / decide
//!   chunk end    -->  halt()                     |
//!                     releases the request       v
//!                                             Agent::decide
//!                                             Executor::submit --> wire
//!                     verdict oneshot  <-----------+
//!                     resolved by the next
//!                     server response
//! ```
//!
//! The driver holds each decision request until the end of the event block
//! it arrived in, so the task always sees the events before the request
//! that depends on them. Submissions resolve to a [`Verdict`]: the server
//! never acknowledges an accepted choice, so any subsequent battle event
//! counts as proof of acceptance, while `|error|` events map to the
//! rejection verdicts.

pub mod agent;
pub mod choice;
pub mod driver;
pub mod executor;
pub mod task;

pub use agent::Agent;
pub use choice::{Choice, derive_choices};
pub use driver::{BattleDriver, DriverError};
pub use executor::{ChoiceSender, Executor, Verdict};
pub use task::Outcome;
