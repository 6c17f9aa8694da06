//! Pokemon state types

use std::collections::HashSet;

use porygon_protocol::{Condition, PokemonDetails};

use super::hp::Hp;
use super::stats::BoostTable;
use super::status::{Status, Volatile};

/// Maximum number of move slots.
pub const MAX_MOVES: usize = 4;

/// A single known move with PP tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Move ID (lowercase, no spaces).
    pub id: String,
    pub pp: u32,
    pub max_pp: u32,
}

/// The revealed portion of a pokemon's moveset, in reveal order.
///
/// For the opponent this fills in one move at a time as moves are used; for
/// our own side it is completed from request data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Moveset {
    moves: Vec<Move>,
}

impl Moveset {
    /// Record a move as known, if not already. Returns the slot.
    pub fn reveal(&mut self, id: &str) -> Option<&mut Move> {
        let id = normalize_move(id);
        if let Some(index) = self.moves.iter().position(|m| m.id == id) {
            return self.moves.get_mut(index);
        }
        if self.moves.len() >= MAX_MOVES {
            return None;
        }
        self.moves.push(Move {
            id,
            // PP unknown until reported; filled in from request data for us.
            pp: 0,
            max_pp: 0,
        });
        self.moves.last_mut()
    }

    /// Record full PP info for a move (from request data).
    pub fn set_pp(&mut self, id: &str, pp: u32, max_pp: u32) {
        if let Some(slot) = self.reveal(id) {
            slot.pp = pp;
            slot.max_pp = max_pp;
        }
    }

    /// Deduct PP for a used move, revealing it if needed.
    pub fn deduct(&mut self, id: &str, amount: u32) {
        if let Some(slot) = self.reveal(id) {
            slot.pp = slot.pp.saturating_sub(amount);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Move> {
        let id = normalize_move(id);
        self.moves.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Normalize a move name or ID to the canonical lowercase form.
fn normalize_move(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Per-switch state, destroyed on switch-out and recreated on switch-in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatileState {
    /// Stat boost stages.
    pub boosts: BoostTable,
    /// Active volatile conditions.
    pub conditions: HashSet<Volatile>,
    /// Species this pokemon has transformed into, if any.
    pub transformed: Option<String>,
}

impl VolatileState {
    pub fn has(&self, v: &Volatile) -> bool {
        self.conditions.contains(v)
    }

    pub fn add(&mut self, v: Volatile) {
        self.conditions.insert(v);
    }

    pub fn remove(&mut self, v: &Volatile) -> bool {
        self.conditions.remove(v)
    }
}

/// One revealed roster entry.
///
/// Persistent fields (species, level, moveset, major status) survive across
/// switches; `volatile` is reset every time the pokemon leaves the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    /// Species name (including forme).
    pub species: String,
    /// Nickname, if different from species.
    pub nickname: Option<String>,
    /// Level (1-100).
    pub level: u8,
    /// Gender ('M', 'F', or None).
    pub gender: Option<char>,
    pub hp: Hp,
    /// Major (non-volatile) status condition.
    pub status: Option<Status>,
    pub fainted: bool,
    pub moveset: Moveset,
    /// Revealed ability, if any.
    pub ability: Option<String>,
    /// Revealed item, if any.
    pub item: Option<String>,
    /// Whether the revealed item has been consumed.
    pub item_consumed: bool,
    /// Per-switch state.
    pub volatile: VolatileState,
}

impl Pokemon {
    pub fn new(species: impl Into<String>, level: u8) -> Self {
        Self {
            species: species.into(),
            nickname: None,
            level,
            gender: None,
            hp: Hp::default(),
            status: None,
            fainted: false,
            moveset: Moveset::default(),
            ability: None,
            item: None,
            item_consumed: false,
            volatile: VolatileState::default(),
        }
    }

    /// Create from a protocol details string, keeping the nickname when it
    /// differs from the species.
    pub fn from_details(details: &PokemonDetails, name: &str) -> Self {
        let mut pokemon = Self::new(details.species.clone(), details.level.unwrap_or(100));
        pokemon.gender = details.gender;
        if !name.is_empty() && name != details.species {
            pokemon.nickname = Some(name.to_string());
        }
        pokemon
    }

    /// Display name (nickname if set, otherwise species).
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species)
    }

    /// Whether a protocol-reported name refers to this pokemon.
    pub fn matches(&self, name: &str) -> bool {
        self.name() == name || self.species == name
    }

    /// Apply an HP/status condition from an event argument.
    pub fn apply_condition(&mut self, condition: &Condition) {
        self.hp.set(condition.current, condition.max);

        match condition.status.as_deref() {
            Some("fnt") => self.faint(),
            Some(token) => self.status = Status::from_protocol(token),
            // Absence of a status token in an hp update does not cure.
            None => {}
        }
    }

    pub fn faint(&mut self) {
        self.fainted = true;
        self.hp.set(0, None);
        self.status = None;
        self.volatile = VolatileState::default();
    }

    pub fn is_alive(&self) -> bool {
        !self.fainted && !self.hp.is_empty()
    }

    /// Called when this pokemon leaves the field.
    pub fn on_switch_out(&mut self) {
        self.volatile = VolatileState::default();
    }

    pub fn record_ability(&mut self, ability: &str) {
        self.ability = Some(ability.to_string());
    }

    pub fn record_item(&mut self, item: &str) {
        self.item = Some(item.to_string());
        self.item_consumed = false;
    }

    pub fn consume_item(&mut self) {
        self.item_consumed = true;
    }
}
