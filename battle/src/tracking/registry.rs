//! Event-name → handler dispatch for battle state mutation.
//!
//! Each handler is an in-place mutation of [`BattleState`] with a documented
//! domain. The handler set is intentionally partial: the protocol evolves,
//! and applying an event with no registered handler is a no-op, never fatal.
//! New event kinds are added by registering a handler, without touching the
//! dispatch core.

use std::collections::HashMap;

use porygon_protocol::{
    Condition, Player, PokemonDetails, PokemonIdent, RoomEvent, Stat,
};

use super::state::BattleState;
use crate::types::{SideCondition, Status, Volatile, Weather};

/// A state-mutation handler for one event kind.
pub type Handler = fn(&mut BattleState, &RoomEvent);

/// Registry of per-event-kind state mutation handlers.
pub struct EventRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl EventRegistry {
    /// An empty registry. Useful for tests; most callers want
    /// [`standard`](Self::standard).
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The standard handler set.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        // Initialization.
        registry.register("player", on_player);
        registry.register("teamsize", on_teamsize);
        registry.register("gen", on_gen);
        registry.register("tier", on_tier);
        registry.register("start", on_start);
        registry.register("turn", on_turn);

        // Major actions.
        registry.register("switch", on_switch);
        registry.register("drag", on_switch);
        registry.register("faint", on_faint);
        registry.register("move", on_move);
        registry.register("detailschange", on_details_change);
        registry.register("-formechange", on_details_change);
        registry.register("-transform", on_transform);

        // HP and status.
        registry.register("-damage", on_hp_change);
        registry.register("-heal", on_hp_change);
        registry.register("-sethp", on_hp_change);
        registry.register("-status", on_status);
        registry.register("-curestatus", on_cure_status);
        registry.register("-cureteam", on_cure_team);

        // Boosts.
        registry.register("-boost", on_boost);
        registry.register("-unboost", on_unboost);
        registry.register("-setboost", on_set_boost);
        registry.register("-clearboost", on_clear_boost);
        registry.register("-clearallboost", on_clear_all_boost);
        registry.register("-invertboost", on_invert_boost);
        registry.register("-copyboost", on_copy_boost);
        registry.register("-swapboost", on_swap_boost);

        // Volatiles.
        registry.register("-start", on_volatile_start);
        registry.register("-end", on_volatile_end);

        // Field and side conditions.
        registry.register("-weather", on_weather);
        registry.register("-fieldstart", on_field_start);
        registry.register("-fieldend", on_field_end);
        registry.register("-sidestart", on_side_start);
        registry.register("-sideend", on_side_end);

        // Items and abilities.
        registry.register("-item", on_item);
        registry.register("-enditem", on_end_item);
        registry.register("-ability", on_ability);
        registry.register("-endability", on_end_ability);

        // Battle end.
        registry.register("win", on_win);
        registry.register("tie", on_tie);

        registry
    }

    /// Register (or replace) the handler for an event name.
    pub fn register(&mut self, name: &'static str, handler: Handler) {
        self.handlers.insert(name, handler);
    }

    /// Whether a handler is registered for an event name.
    pub fn handles(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Apply an event to the state. Unregistered event kinds are no-ops.
    pub fn apply(&self, state: &mut BattleState, event: &RoomEvent) {
        if let Some(handler) = self.handlers.get(event.name()) {
            handler(state, event);
        }
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// === Argument helpers ===

fn ident(event: &RoomEvent, index: usize) -> Option<PokemonIdent> {
    event.arg(index).and_then(PokemonIdent::parse)
}

fn condition(event: &RoomEvent, index: usize) -> Option<Condition> {
    event.arg(index).and_then(Condition::parse)
}

/// Parse the player out of a side argument like "p2: username".
fn side_player(s: &str) -> Option<Player> {
    Player::parse(s.get(..2)?)
}

// === Initialization ===

/// `|player|PLAYER|USERNAME|AVATAR|RATING` - names a side; claims our
/// perspective when the username is ours.
fn on_player(state: &mut BattleState, event: &RoomEvent) {
    let Some(player) = event.arg(0).and_then(Player::parse) else {
        return;
    };
    let Some(username) = event.arg(1) else {
        return;
    };
    if username == state.our_username() {
        state.set_perspective(player);
    }
    state.side_mut(player).username = username.to_string();
}

/// `|teamsize|PLAYER|NUMBER` - sizes a roster. Arrives once per side at
/// battle init; re-sizing later would discard every reveal so far.
fn on_teamsize(state: &mut BattleState, event: &RoomEvent) {
    let Some(player) = event.arg(0).and_then(Player::parse) else {
        return;
    };
    let Some(size) = event.arg(1).and_then(|s| s.parse().ok()) else {
        return;
    };
    state.side_mut(player).team.set_size(size);
}

fn on_gen(state: &mut BattleState, event: &RoomEvent) {
    if let Some(generation) = event.arg(0).and_then(|s| s.parse().ok()) {
        state.generation = generation;
    }
}

fn on_tier(state: &mut BattleState, event: &RoomEvent) {
    if let Some(tier) = event.arg(0) {
        state.tier = tier.to_string();
    }
}

fn on_start(state: &mut BattleState, _event: &RoomEvent) {
    state.started = true;
}

fn on_turn(state: &mut BattleState, event: &RoomEvent) {
    if let Some(turn) = event.arg(0).and_then(|s| s.parse().ok()) {
        state.turn = turn;
    }
}

// === Major actions ===

/// `|switch|POKEMON|DETAILS|CONDITION` (also `|drag|`) - brings a pokemon
/// onto the field, revealing a roster slot on first sight.
fn on_switch(state: &mut BattleState, event: &RoomEvent) {
    let Some(ident) = ident(event, 0) else {
        return;
    };
    let details = event.arg(1).map(PokemonDetails::parse).unwrap_or_default();
    let condition = condition(event, 2);

    state
        .side_mut(ident.player)
        .team
        .switch_in(&ident.name, &details, condition.as_ref());
}

/// `|faint|POKEMON`
fn on_faint(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.faint();
    }
}

/// `|move|POKEMON|MOVE|TARGET` - reveals the move and deducts PP. Moves
/// executed by another effect (a `[from]` tag) cost no PP.
fn on_move(state: &mut BattleState, event: &RoomEvent) {
    let Some(ident) = ident(event, 0) else {
        return;
    };
    let Some(move_name) = event.arg(1) else {
        return;
    };
    let called = event.kwarg("from").is_some();
    if let Some(pokemon) = state.find_pokemon_mut(&ident) {
        if called {
            pokemon.moveset.reveal(move_name);
        } else {
            pokemon.moveset.deduct(move_name, 1);
        }
    }
}

/// `|detailschange|POKEMON|DETAILS|CONDITION` and `|-formechange|` - forme
/// change, persistent or temporary.
fn on_details_change(state: &mut BattleState, event: &RoomEvent) {
    let Some(ident) = ident(event, 0) else {
        return;
    };
    let details = event.arg(1).map(PokemonDetails::parse).unwrap_or_default();
    let condition = condition(event, 2);

    if let Some(pokemon) = state.find_pokemon_mut(&ident) {
        if !details.species.is_empty() {
            pokemon.species = details.species;
        }
        if let Some(condition) = condition {
            pokemon.apply_condition(&condition);
        }
    }
}

/// `|-transform|POKEMON|SPECIES`
fn on_transform(state: &mut BattleState, event: &RoomEvent) {
    let Some(ident) = ident(event, 0) else {
        return;
    };
    let species = event
        .arg(1)
        .and_then(PokemonIdent::parse)
        .map(|target| target.name);

    if let Some(pokemon) = state.find_pokemon_mut(&ident) {
        pokemon.volatile.transformed = species;
        pokemon.volatile.add(Volatile::Transformed);
    }
}

// === HP and status ===

/// `|-damage|POKEMON|CONDITION`, `|-heal|`, `|-sethp|`
fn on_hp_change(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(condition) = condition(event, 1)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.apply_condition(&condition);
    }
}

/// `|-status|POKEMON|STATUS`
fn on_status(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(status) = event.arg(1).and_then(Status::from_protocol)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.status = Some(status);
    }
}

/// `|-curestatus|POKEMON|STATUS`
fn on_cure_status(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.status = None;
    }
}

/// `|-cureteam|POKEMON` - clears major status on the whole roster.
fn on_cure_team(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0) {
        state.side_mut(ident.player).team.cure_all();
    }
}

// === Boosts ===

/// `|-boost|POKEMON|STAT|AMOUNT` - the result clamps to [-6, 6].
fn on_boost(state: &mut BattleState, event: &RoomEvent) {
    apply_boost(state, event, 1);
}

/// `|-unboost|POKEMON|STAT|AMOUNT`
fn on_unboost(state: &mut BattleState, event: &RoomEvent) {
    apply_boost(state, event, -1);
}

fn apply_boost(state: &mut BattleState, event: &RoomEvent, sign: i8) {
    if let Some(ident) = ident(event, 0)
        && let Some(stat) = event.arg(1).and_then(Stat::parse)
        && let Some(amount) = event.arg(2).and_then(|s| s.parse::<i8>().ok())
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.boosts.boost(stat, sign * amount);
    }
}

/// `|-setboost|POKEMON|STAT|AMOUNT`
fn on_set_boost(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(stat) = event.arg(1).and_then(Stat::parse)
        && let Some(amount) = event.arg(2).and_then(|s| s.parse::<i8>().ok())
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.boosts.set(stat, amount);
    }
}

/// `|-clearboost|POKEMON`
fn on_clear_boost(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.boosts.clear();
    }
}

/// `|-clearallboost` - clears boosts on both actives.
fn on_clear_all_boost(state: &mut BattleState, _event: &RoomEvent) {
    for player in [Player::P1, Player::P2] {
        if let Some(active) = state.side_mut(player).team.active_mut() {
            active.volatile.boosts.clear();
        }
    }
}

/// `|-invertboost|POKEMON`
fn on_invert_boost(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.boosts.invert();
    }
}

/// `|-copyboost|SOURCE|TARGET` - SOURCE copies TARGET's boosts (Psych Up).
fn on_copy_boost(state: &mut BattleState, event: &RoomEvent) {
    let (Some(receiver), Some(origin)) = (ident(event, 0), ident(event, 1)) else {
        return;
    };
    let Some(boosts) = state
        .find_pokemon_mut(&origin)
        .map(|p| p.volatile.boosts.clone())
    else {
        return;
    };
    if let Some(pokemon) = state.find_pokemon_mut(&receiver) {
        pokemon.volatile.boosts.copy_from(&boosts);
    }
}

/// `|-swapboost|SOURCE|TARGET|STATS` - swaps the listed stat boosts
/// (all seven if the list is absent).
fn on_swap_boost(state: &mut BattleState, event: &RoomEvent) {
    let (Some(source), Some(target)) = (ident(event, 0), ident(event, 1)) else {
        return;
    };
    let stats: Vec<Stat> = match event.arg(2) {
        Some(list) => list.split(", ").filter_map(Stat::parse).collect(),
        None => vec![
            Stat::Atk,
            Stat::Def,
            Stat::Spa,
            Stat::Spd,
            Stat::Spe,
            Stat::Accuracy,
            Stat::Evasion,
        ],
    };

    let Some(source_boosts) = state
        .find_pokemon_mut(&source)
        .map(|p| p.volatile.boosts.clone())
    else {
        return;
    };
    let Some(target_boosts) = state
        .find_pokemon_mut(&target)
        .map(|p| p.volatile.boosts.clone())
    else {
        return;
    };

    if let Some(pokemon) = state.find_pokemon_mut(&source) {
        for &stat in &stats {
            pokemon.volatile.boosts.set(stat, target_boosts.get(stat));
        }
    }
    if let Some(pokemon) = state.find_pokemon_mut(&target) {
        for &stat in &stats {
            pokemon.volatile.boosts.set(stat, source_boosts.get(stat));
        }
    }
}

// === Volatiles ===

/// `|-start|POKEMON|EFFECT`
fn on_volatile_start(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(effect) = event.arg(1)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.add(Volatile::from_protocol(effect));
    }
}

/// `|-end|POKEMON|EFFECT`
fn on_volatile_end(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(effect) = event.arg(1)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.remove(&Volatile::from_protocol(effect));
    }
}

// === Field and side conditions ===

/// `|-weather|WEATHER` - upkeep ticks do not change the tracked weather.
fn on_weather(state: &mut BattleState, event: &RoomEvent) {
    if event.kwarg("upkeep").is_some() {
        return;
    }
    state.field.weather = event.arg(0).and_then(Weather::from_protocol);
}

/// `|-fieldstart|EFFECT`
fn on_field_start(state: &mut BattleState, event: &RoomEvent) {
    if let Some(effect) = event.arg(0) {
        state.field.start(effect);
    }
}

/// `|-fieldend|EFFECT`
fn on_field_end(state: &mut BattleState, event: &RoomEvent) {
    if let Some(effect) = event.arg(0) {
        state.field.end(effect);
    }
}

/// `|-sidestart|SIDE|CONDITION`
fn on_side_start(state: &mut BattleState, event: &RoomEvent) {
    if let Some(player) = event.arg(0).and_then(side_player)
        && let Some(cond) = event.arg(1).and_then(SideCondition::from_protocol)
    {
        state.side_mut(player).add_condition(cond);
    }
}

/// `|-sideend|SIDE|CONDITION`
fn on_side_end(state: &mut BattleState, event: &RoomEvent) {
    if let Some(player) = event.arg(0).and_then(side_player)
        && let Some(cond) = event.arg(1).and_then(SideCondition::from_protocol)
    {
        state.side_mut(player).remove_condition(cond);
    }
}

// === Items and abilities ===

/// `|-item|POKEMON|ITEM`
fn on_item(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(item) = event.arg(1)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.record_item(item);
    }
}

/// `|-enditem|POKEMON|ITEM`
fn on_end_item(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.consume_item();
    }
}

/// `|-ability|POKEMON|ABILITY` - a reveal overrides any prior inference.
fn on_ability(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(ability) = event.arg(1)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.record_ability(ability);
    }
}

/// `|-endability|POKEMON` - ability suppressed (Gastro Acid).
fn on_end_ability(state: &mut BattleState, event: &RoomEvent) {
    if let Some(ident) = ident(event, 0)
        && let Some(pokemon) = state.find_pokemon_mut(&ident)
    {
        pokemon.volatile.add(Volatile::GastroAcid);
    }
}

// === Battle end ===

/// `|win|USER`
fn on_win(state: &mut BattleState, event: &RoomEvent) {
    state.ended = true;
    state.winner = event.arg(0).map(str::to_string);
}

/// `|tie`
fn on_tie(state: &mut BattleState, _event: &RoomEvent) {
    state.ended = true;
    state.tie = true;
}
