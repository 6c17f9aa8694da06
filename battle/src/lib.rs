//! Battle state tracking and domain types for Pokemon Showdown.
//!
//! This crate maintains an internally consistent model of a battle whose
//! opponent state is only partially observable: the opponent's roster is
//! revealed one pokemon at a time, HP may be percentage-only, and movesets
//! fill in as moves are used.
//!
//! # Overview
//!
//! `porygon-battle` sits between `porygon-protocol` (wire format) and the
//! decision layer:
//!
//! ```text
//! porygon-protocol (wire format)
//!        │
//!        ▼
//! porygon-battle (domain types + event application) ← THIS CRATE
//!        │
//!        └─> porygon-driver (decision synchronization over tracked state)
//! ```
//!
//! # Main Types
//!
//! - [`BattleState`] - the full tracked battle, two [`Side`]s from one
//!   player's perspective
//! - [`Team`] - fixed six-slot roster with reveal-on-demand entries
//! - [`Pokemon`] - one roster entry: identity, [`Hp`], status, moveset,
//!   and a volatile bag destroyed on every switch
//! - [`EventRegistry`] - map from event name to state-mutation handler;
//!   unknown events are no-ops
//!
//! # Example Usage
//!
//! ```ignore
//! use porygon_battle::{BattleState, EventRegistry};
//!
//! let registry = EventRegistry::standard();
//! let mut state = BattleState::new("my-username");
//!
//! for event in events {
//!     registry.apply(&mut state, &event);
//! }
//!
//! if let Some(active) = state.us().team.active() {
//!     println!("active: {} at {}%", active.species, active.hp.percent());
//! }
//! ```

pub mod tracking;
pub mod types;

pub use tracking::{BattleState, EventRegistry};
pub use types::{
    BoostTable, FieldState, Hp, Move, Moveset, Pokemon, Side, SideCondition, SideConditionState,
    Status, Team, TeamSlot, Terrain, Volatile, Weather,
};

// Re-export commonly used protocol types.
pub use porygon_protocol::{Condition, Player, PokemonDetails, PokemonIdent, Stat};
