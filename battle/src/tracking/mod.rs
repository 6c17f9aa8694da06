//! Battle state tracking from room events

mod registry;
mod state;

pub use registry::EventRegistry;
pub use state::BattleState;
