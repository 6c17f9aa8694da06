//! BattleState - the tracked battle from one player's perspective

use porygon_protocol::{Condition, Player, PokemonDetails, PokemonIdent, Request};

use crate::types::{FieldState, Pokemon, Side};

/// A battle reconstructed from server events.
///
/// Maintains the perspective of one player: our side has exact information
/// (filled in from request data), the opponent's side is revealed
/// progressively. The state is mutated exclusively through
/// [`EventRegistry::apply`](super::EventRegistry::apply) and
/// [`update_from_request`](BattleState::update_from_request).
#[derive(Debug, Clone, PartialEq)]
pub struct BattleState {
    /// Our login name, used to claim a side on the player event.
    our_username: String,

    /// Which player we are, once known.
    our_player: Option<Player>,

    /// Both sides, indexed by player (p1 = 0, p2 = 1).
    sides: [Side; 2],

    /// Global field state.
    pub field: FieldState,

    /// Current turn number (0 = not started).
    pub turn: u32,

    /// Generation (1-9).
    pub generation: u8,

    /// Format/tier name.
    pub tier: String,

    /// Whether the battle proper has started.
    pub started: bool,

    /// Whether the battle has ended.
    pub ended: bool,

    /// Winner's username (if ended and not a tie).
    pub winner: Option<String>,

    /// Whether the battle ended in a tie.
    pub tie: bool,
}

impl BattleState {
    pub fn new(our_username: impl Into<String>) -> Self {
        Self {
            our_username: our_username.into(),
            our_player: None,
            sides: [Side::new(), Side::new()],
            field: FieldState::new(),
            turn: 0,
            generation: 4,
            tier: String::new(),
            started: false,
            ended: false,
            winner: None,
            tie: false,
        }
    }

    pub fn our_username(&self) -> &str {
        &self.our_username
    }

    /// Which player we are. Defaults to P1 until a player or request event
    /// establishes the real perspective.
    pub fn our_player(&self) -> Player {
        self.our_player.unwrap_or(Player::P1)
    }

    pub fn set_perspective(&mut self, player: Player) {
        self.our_player = Some(player);
    }

    pub fn side(&self, player: Player) -> &Side {
        &self.sides[side_index(player)]
    }

    pub fn side_mut(&mut self, player: Player) -> &mut Side {
        &mut self.sides[side_index(player)]
    }

    /// Our side.
    pub fn us(&self) -> &Side {
        self.side(self.our_player())
    }

    pub fn us_mut(&mut self) -> &mut Side {
        self.side_mut(self.our_player())
    }

    /// The opponent's side.
    pub fn them(&self) -> &Side {
        self.side(self.our_player().opponent())
    }

    pub fn them_mut(&mut self) -> &mut Side {
        self.side_mut(self.our_player().opponent())
    }

    /// Find a pokemon by protocol identifier.
    pub fn find_pokemon_mut(&mut self, ident: &PokemonIdent) -> Option<&mut Pokemon> {
        self.side_mut(ident.player).team.find_mut(&ident.name)
    }

    /// Whether we won. `None` while the battle is in progress or tied.
    pub fn we_won(&self) -> Option<bool> {
        if !self.ended || self.tie {
            return None;
        }
        self.winner
            .as_deref()
            .map(|winner| winner == self.our_username)
    }

    /// Reconcile our side against the full information in a request.
    ///
    /// Sets our perspective from the request's side id, sizes the team if
    /// the teamsize event has not arrived yet, and fills in exact HP,
    /// status, movesets, abilities, and items for every pokemon listed.
    pub fn update_from_request(&mut self, request: &Request) {
        let Some(side_info) = &request.side else {
            return;
        };
        let Some(player) = side_info.player() else {
            return;
        };

        self.set_perspective(player);

        let side = self.side_mut(player);
        side.username = side_info.name.clone();
        side.team.ensure_size(side_info.pokemon.len());

        for req_pokemon in &side_info.pokemon {
            let details = PokemonDetails::parse(&req_pokemon.details);
            let name = req_pokemon.name();

            let Some(pokemon) = side.team.find_or_reveal(name, &details) else {
                continue;
            };

            if let Some((current, max)) = req_pokemon.hp() {
                pokemon.hp.set(current, Some(max));
            }
            if let Some(condition) = Condition::parse(&req_pokemon.condition) {
                if condition.is_fainted() {
                    pokemon.faint();
                } else {
                    pokemon.status = condition
                        .status
                        .as_deref()
                        .and_then(crate::types::Status::from_protocol);
                }
            }
            for move_id in &req_pokemon.moves {
                pokemon.moveset.reveal(move_id);
            }
            if !req_pokemon.base_ability.is_empty() {
                pokemon.record_ability(&req_pokemon.base_ability);
            }
            if !req_pokemon.item.is_empty() {
                pokemon.record_item(&req_pokemon.item);
            }
        }

        // Exact PP info only appears on the active slot.
        if let Some(active_slot) = request.active_slot()
            && let Some(active) = self.side_mut(player).team.active_mut()
        {
            for move_slot in &active_slot.moves {
                active.moveset.set_pp(&move_slot.id, move_slot.pp, move_slot.max_pp);
            }
        }
    }
}

fn side_index(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}
