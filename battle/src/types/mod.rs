//! Domain types for battle state tracking

mod conditions;
mod field;
mod hp;
mod pokemon;
mod side;
mod stats;
mod status;
mod team;

pub use conditions::{SideCondition, SideConditionState, Terrain, Weather};
pub use field::FieldState;
pub use hp::Hp;
pub use pokemon::{Move, Moveset, Pokemon, VolatileState};
pub use side::Side;
pub use stats::BoostTable;
pub use status::{Status, Volatile};
pub use team::{Team, TeamSlot};
