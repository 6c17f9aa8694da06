//! Side (player) state

use std::collections::HashMap;

use super::conditions::{SideCondition, SideConditionState};
use super::team::Team;

/// One player's side of the battle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Side {
    /// Player's username, once known.
    pub username: String,

    /// This side's roster.
    pub team: Team,

    /// Side conditions (hazards, screens, etc.).
    pub conditions: HashMap<SideCondition, SideConditionState>,
}

impl Side {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the side has a condition.
    pub fn has_condition(&self, cond: SideCondition) -> bool {
        self.conditions.contains_key(&cond)
    }

    /// Get layers for a condition (0 if not present).
    pub fn condition_layers(&self, cond: SideCondition) -> u8 {
        self.conditions.get(&cond).map_or(0, |s| s.layers)
    }

    /// Add a side condition (or a layer of a stackable one).
    /// Returns true if anything changed.
    pub fn add_condition(&mut self, cond: SideCondition) -> bool {
        if let Some(state) = self.conditions.get_mut(&cond) {
            state.add_layer(cond)
        } else {
            self.conditions.insert(cond, SideConditionState::new());
            true
        }
    }

    /// Remove a side condition entirely.
    pub fn remove_condition(&mut self, cond: SideCondition) -> bool {
        self.conditions.remove(&cond).is_some()
    }

    /// Check if any entry hazards are set.
    pub fn has_hazards(&self) -> bool {
        self.conditions.keys().any(|c| c.is_hazard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_layering() {
        let mut side = Side::new();

        assert!(side.add_condition(SideCondition::Spikes));
        assert!(side.add_condition(SideCondition::Spikes));
        assert!(side.add_condition(SideCondition::Spikes));
        assert!(!side.add_condition(SideCondition::Spikes));
        assert_eq!(side.condition_layers(SideCondition::Spikes), 3);

        assert!(side.add_condition(SideCondition::StealthRock));
        assert!(!side.add_condition(SideCondition::StealthRock));
        assert!(side.has_hazards());

        assert!(side.remove_condition(SideCondition::Spikes));
        assert!(!side.has_condition(SideCondition::Spikes));
        assert_eq!(side.condition_layers(SideCondition::Spikes), 0);
    }

    #[test]
    fn test_new_side_is_empty() {
        let side = Side::new();
        assert!(!side.has_hazards());
        assert_eq!(side.team.revealed_count(), 0);
    }
}
