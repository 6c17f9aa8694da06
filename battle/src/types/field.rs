//! Global field state

use std::collections::HashSet;

use super::conditions::{Terrain, Weather};

/// Field-level state shared by both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    /// Active weather, if any.
    pub weather: Option<Weather>,
    /// Active terrain, if any.
    pub terrain: Option<Terrain>,
    /// Other field-wide pseudo-weather effects (Trick Room, Gravity, ...),
    /// keyed by normalized effect name.
    pub effects: HashSet<String>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `-fieldstart` effect string.
    pub fn start(&mut self, effect: &str) {
        if let Some(terrain) = Terrain::from_protocol(effect) {
            self.terrain = Some(terrain);
        } else {
            self.effects.insert(normalize(effect));
        }
    }

    /// Apply a `-fieldend` effect string.
    pub fn end(&mut self, effect: &str) {
        if let Some(terrain) = Terrain::from_protocol(effect) {
            if self.terrain == Some(terrain) {
                self.terrain = None;
            }
        } else {
            self.effects.remove(&normalize(effect));
        }
    }

    /// Whether a pseudo-weather effect is active.
    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.contains(&normalize(effect))
    }
}

fn normalize(effect: &str) -> String {
    let clean = effect.strip_prefix("move: ").unwrap_or(effect);
    clean.to_lowercase().replace([' ', '-'], "")
}
