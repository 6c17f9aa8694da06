//! Battle request types.
//!
//! These types model the JSON payload of `|request|` messages: the server's
//! enumeration of the legal choices available at the current decision point,
//! plus full information about our own side.

use serde::Deserialize;

use crate::event::RoomEvent;
use crate::fields::Player;

/// A battle request asking the player to make a decision.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request ID for synchronization.
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves.
    #[serde(default)]
    pub active: Option<Vec<ActiveSlot>>,

    /// Information about the player's side/team.
    pub side: Option<RequestSide>,

    /// Which slots need to switch.
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    /// Whether this is team preview.
    #[serde(default)]
    pub team_preview: bool,

    /// Whether we're waiting for the opponent.
    #[serde(default)]
    pub wait: bool,
}

impl Request {
    /// Parse the JSON payload of a `|request|` event. Empty or unparseable
    /// payloads yield `None`.
    pub fn from_event(event: &RoomEvent) -> Option<Self> {
        let json = event.arg(0)?;
        if json.is_empty() {
            return None;
        }
        serde_json::from_str(json).ok()
    }

    /// Check if this request requires a decision.
    pub fn needs_decision(&self) -> bool {
        !self.wait && (self.team_preview || self.force_switch.is_some() || self.active.is_some())
    }

    /// Check if this is a force switch request.
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .map(|fs| fs.iter().any(|&b| b))
            .unwrap_or(false)
    }

    /// The first active slot, if any (singles).
    pub fn active_slot(&self) -> Option<&ActiveSlot> {
        self.active.as_ref().and_then(|a| a.first())
    }
}

/// Information about an active pokemon in battle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSlot {
    /// Available moves.
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    /// Whether the pokemon is trapped.
    #[serde(default)]
    pub trapped: bool,

    /// Whether the pokemon might be trapped by an unrevealed effect.
    #[serde(default)]
    pub maybe_trapped: bool,
}

impl ActiveSlot {
    /// Available (non-disabled, with PP) moves with their 0-based indices.
    pub fn available_moves(&self) -> impl Iterator<Item = (usize, &MoveSlot)> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.disabled && m.pp > 0)
    }

    /// Check if the pokemon can switch out.
    pub fn can_switch(&self) -> bool {
        !self.trapped && !self.maybe_trapped
    }
}

/// A move slot on an active pokemon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Display name of the move.
    #[serde(rename = "move")]
    pub name: String,

    /// Move ID (lowercase, no spaces).
    pub id: String,

    /// Current PP. Moves locked by a multi-turn effect omit it.
    #[serde(default)]
    pub pp: u32,

    /// Maximum PP.
    #[serde(rename = "maxpp", default)]
    pub max_pp: u32,

    /// Whether the move is disabled.
    #[serde(default)]
    pub disabled: bool,
}

/// Information about the player's side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSide {
    /// Player's display name.
    pub name: String,

    /// Player ID (p1, p2).
    pub id: String,

    /// Pokemon on this side.
    #[serde(default)]
    pub pokemon: Vec<RequestPokemon>,
}

impl RequestSide {
    /// Get the player enum.
    pub fn player(&self) -> Option<Player> {
        Player::parse(&self.id)
    }
}

/// A pokemon on the player's side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPokemon {
    /// Pokemon identifier (e.g., "p1: Pikachu").
    pub ident: String,

    /// Details string (species, level, gender, shiny).
    pub details: String,

    /// Current condition (HP/MaxHP status).
    pub condition: String,

    /// Whether this pokemon is currently active.
    #[serde(default)]
    pub active: bool,

    /// Known moves (move IDs).
    #[serde(default)]
    pub moves: Vec<String>,

    /// Base ability.
    #[serde(default)]
    pub base_ability: String,

    /// Held item.
    #[serde(default)]
    pub item: String,
}

impl RequestPokemon {
    /// Check if the pokemon is fainted.
    pub fn is_fainted(&self) -> bool {
        self.condition == "0 fnt" || self.condition.ends_with(" fnt")
    }

    /// Get current HP as a fraction (current, max).
    pub fn hp(&self) -> Option<(u32, u32)> {
        let hp_part = self.condition.split_whitespace().next()?;
        let (current, max) = hp_part.split_once('/')?;
        Some((current.parse().ok()?, max.parse().ok()?))
    }

    /// Get the status token (if any).
    pub fn status(&self) -> Option<&str> {
        self.condition.split_whitespace().nth(1)
    }

    /// Get the species name from details.
    pub fn species(&self) -> &str {
        self.details.split(',').next().unwrap_or(&self.details)
    }

    /// Get the nickname from the ident.
    pub fn name(&self) -> &str {
        self.ident.split_once(": ").map(|(_, n)| n).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST_JSON: &str = r#"{
        "rqid": 3,
        "active": [{
            "moves": [
                {"move": "Thunderbolt", "id": "thunderbolt", "pp": 24, "maxpp": 24, "target": "normal", "disabled": false},
                {"move": "Substitute", "id": "substitute", "pp": 0, "maxpp": 16, "target": "self", "disabled": false},
                {"move": "Encore", "id": "encore", "pp": 8, "maxpp": 8, "target": "normal", "disabled": true}
            ],
            "trapped": false
        }],
        "side": {
            "name": "porygon2",
            "id": "p2",
            "pokemon": [
                {"ident": "p2: Jolteon", "details": "Jolteon, L83, M", "condition": "240/240", "active": true,
                 "moves": ["thunderbolt", "substitute", "encore"], "baseAbility": "voltabsorb", "item": "leftovers"},
                {"ident": "p2: Weezing", "details": "Weezing, L88, F", "condition": "0 fnt", "active": false,
                 "moves": ["sludgebomb"], "baseAbility": "levitate", "item": ""}
            ]
        }
    }"#;

    fn request_event(json: &str) -> RoomEvent {
        RoomEvent::new(
            "battle-1",
            vec!["request".to_string(), json.to_string()],
        )
    }

    #[test]
    fn test_parse_request() {
        let request = Request::from_event(&request_event(REQUEST_JSON)).unwrap();

        assert_eq!(request.rqid, Some(3));
        assert!(request.needs_decision());
        assert!(!request.is_force_switch());

        let active = request.active_slot().unwrap();
        let available: Vec<_> = active.available_moves().collect();
        // Substitute is out of PP, Encore is disabled.
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].0, 0);
        assert_eq!(available[0].1.id, "thunderbolt");
        assert!(active.can_switch());
    }

    #[test]
    fn test_parse_request_side() {
        let request = Request::from_event(&request_event(REQUEST_JSON)).unwrap();
        let side = request.side.unwrap();

        assert_eq!(side.player(), Some(Player::P2));
        assert_eq!(side.pokemon.len(), 2);

        let jolteon = &side.pokemon[0];
        assert_eq!(jolteon.species(), "Jolteon");
        assert_eq!(jolteon.name(), "Jolteon");
        assert_eq!(jolteon.hp(), Some((240, 240)));
        assert!(!jolteon.is_fainted());

        let weezing = &side.pokemon[1];
        assert!(weezing.is_fainted());
        assert_eq!(weezing.hp(), None);
        assert_eq!(weezing.status(), Some("fnt"));
    }

    #[test]
    fn test_empty_payload() {
        assert!(Request::from_event(&request_event("")).is_none());
    }

    #[test]
    fn test_wait_request() {
        let request = Request::from_event(&request_event(r#"{"wait": true}"#)).unwrap();
        assert!(!request.needs_decision());
    }
}
