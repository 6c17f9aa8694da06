//! Roster tracking with reveal-on-demand slots

use porygon_protocol::{Condition, PokemonDetails};

use super::pokemon::Pokemon;

/// One of the six fixed roster slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TeamSlot {
    /// Beyond the team's size; can never hold a pokemon.
    #[default]
    Nonexistent,
    /// Within the team's size but not yet identified.
    Unrevealed,
    /// A concrete, identified pokemon.
    Revealed(Pokemon),
}

/// A side's roster.
///
/// Invariants: `revealed <= size`; slots `[0, revealed)` are concrete;
/// slots `[size, 6)` are nonexistent; slot 0 is the active pokemon once any
/// reveal has occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    size: usize,
    slots: [TeamSlot; 6],
    revealed: usize,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the roster size, clamped to 1..=6. Resets every slot, so calling
    /// this after reveals have started throws away the entire roster; it is
    /// meant to be called exactly once, from the teamsize event.
    pub fn set_size(&mut self, size: usize) {
        self.size = size.clamp(1, 6);
        self.revealed = 0;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = if i < self.size {
                TeamSlot::Unrevealed
            } else {
                TeamSlot::Nonexistent
            };
        }
    }

    /// Set the size only if it has not been set yet.
    pub fn ensure_size(&mut self, size: usize) {
        if self.size == 0 {
            self.set_size(size);
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Consume the next unrevealed slot for a newly identified pokemon.
    /// No-op (returns `None`) when the whole roster is already revealed.
    pub fn reveal(&mut self, name: &str, details: &PokemonDetails) -> Option<&mut Pokemon> {
        if self.revealed >= self.size {
            return None;
        }
        let index = self.revealed;
        self.slots[index] = TeamSlot::Revealed(Pokemon::from_details(details, name));
        self.revealed += 1;
        match &mut self.slots[index] {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    /// Match an already-revealed entry by name or species, revealing a new
    /// slot if there is no match. `None` if revealing would exceed the size.
    pub fn find_or_reveal(
        &mut self,
        name: &str,
        details: &PokemonDetails,
    ) -> Option<&mut Pokemon> {
        let index = match self.find_revealed(name, &details.species) {
            Some(index) => index,
            None => {
                self.reveal(name, details)?;
                self.revealed - 1
            }
        };
        match &mut self.slots[index] {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    /// Bring a pokemon onto the field, matching an already-revealed entry by
    /// name or species (first match wins; same-species duplicates are not
    /// distinguishable at this layer) or revealing a new slot. The previous
    /// active's volatile state is destroyed. Returns `None` if revealing
    /// would exceed the team size.
    pub fn switch_in(
        &mut self,
        name: &str,
        details: &PokemonDetails,
        condition: Option<&Condition>,
    ) -> Option<&mut Pokemon> {
        let index = match self.find_revealed(name, &details.species) {
            Some(index) => index,
            None => {
                self.reveal(name, details)?;
                self.revealed - 1
            }
        };

        if index != 0 {
            if let TeamSlot::Revealed(outgoing) = &mut self.slots[0] {
                outgoing.on_switch_out();
            }
            self.slots.swap(0, index);
        }

        let TeamSlot::Revealed(active) = &mut self.slots[0] else {
            return None;
        };

        // Details can change between switch-ins (forme changes).
        active.species = details.species.clone();
        if let Some(level) = details.level {
            active.level = level;
        }
        if let Some(condition) = condition {
            active.apply_condition(condition);
        }
        Some(active)
    }

    /// The active pokemon (slot 0), if anything has been revealed.
    pub fn active(&self) -> Option<&Pokemon> {
        match &self.slots[0] {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut Pokemon> {
        match &mut self.slots[0] {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    /// Find a revealed pokemon by protocol-reported name.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Pokemon> {
        self.slots.iter_mut().find_map(|slot| match slot {
            TeamSlot::Revealed(pokemon) if pokemon.matches(name) => Some(pokemon),
            _ => None,
        })
    }

    /// Iterate over revealed pokemon, active first.
    pub fn revealed(&self) -> impl Iterator<Item = &Pokemon> {
        self.slots.iter().filter_map(|slot| match slot {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        })
    }

    pub fn revealed_mut(&mut self) -> impl Iterator<Item = &mut Pokemon> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            TeamSlot::Revealed(pokemon) => Some(pokemon),
            _ => None,
        })
    }

    /// Clear major status on every revealed pokemon (heal-bell style).
    pub fn cure_all(&mut self) {
        for pokemon in self.revealed_mut() {
            pokemon.status = None;
        }
    }

    pub fn alive_count(&self) -> usize {
        self.revealed().filter(|p| p.is_alive()).count()
    }

    fn find_revealed(&self, name: &str, species: &str) -> Option<usize> {
        self.slots.iter().position(|slot| match slot {
            TeamSlot::Revealed(pokemon) => pokemon.matches(name) || pokemon.species == species,
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(species: &str) -> PokemonDetails {
        PokemonDetails::parse(species)
    }

    #[test]
    fn test_set_size_clamps() {
        let mut team = Team::new();
        team.set_size(9);
        assert_eq!(team.size(), 6);

        team.set_size(0);
        assert_eq!(team.size(), 1);
    }

    #[test]
    fn test_reveal_respects_size() {
        let mut team = Team::new();
        team.set_size(2);

        assert!(team.reveal("Zapdos", &details("Zapdos")).is_some());
        assert!(team.reveal("Suicune", &details("Suicune")).is_some());
        assert_eq!(team.revealed_count(), 2);

        // Revealing beyond the size is a no-op.
        assert!(team.reveal("Mew", &details("Mew")).is_none());
        assert_eq!(team.revealed_count(), 2);
    }

    #[test]
    fn test_reveal_invariant_holds() {
        let mut team = Team::new();
        team.set_size(3);
        for name in ["A", "B", "C", "D", "E"] {
            team.switch_in(name, &details(name), None);
            assert!(team.revealed_count() <= team.size());
            assert!(team.active().is_some());
        }
    }

    #[test]
    fn test_switch_in_matches_revealed() {
        let mut team = Team::new();
        team.set_size(6);

        team.switch_in("Zapdos", &details("Zapdos"), None);
        team.switch_in("Suicune", &details("Suicune"), None);
        assert_eq!(team.active().unwrap().species, "Suicune");
        assert_eq!(team.revealed_count(), 2);

        // Switching Zapdos back in matches the existing entry, no new reveal.
        team.switch_in("Zapdos", &details("Zapdos"), None);
        assert_eq!(team.active().unwrap().species, "Zapdos");
        assert_eq!(team.revealed_count(), 2);
    }

    #[test]
    fn test_switch_resets_outgoing_volatile() {
        use crate::types::Volatile;

        let mut team = Team::new();
        team.set_size(6);

        team.switch_in("Zapdos", &details("Zapdos"), None);
        team.active_mut().unwrap().volatile.add(Volatile::Substitute);

        team.switch_in("Suicune", &details("Suicune"), None);

        let zapdos = team.revealed().find(|p| p.species == "Zapdos").unwrap();
        assert!(zapdos.volatile.conditions.is_empty());
    }

    #[test]
    fn test_switch_in_applies_condition() {
        let mut team = Team::new();
        team.set_size(6);

        let condition = Condition::parse("85/100").unwrap();
        team.switch_in("Skarmory", &details("Skarmory"), Some(&condition));
        let active = team.active().unwrap();
        assert_eq!(active.hp.current, 85);
        assert_eq!(active.hp.max, 100);
    }

    #[test]
    fn test_set_size_again_loses_roster() {
        let mut team = Team::new();
        team.set_size(6);
        team.switch_in("Zapdos", &details("Zapdos"), None);

        team.set_size(6);
        assert_eq!(team.revealed_count(), 0);
        assert!(team.active().is_none());
    }

    #[test]
    fn test_cure_all() {
        use crate::types::Status;

        let mut team = Team::new();
        team.set_size(6);
        team.switch_in("Zapdos", &details("Zapdos"), None);
        team.switch_in("Suicune", &details("Suicune"), None);
        for pokemon in team.revealed_mut() {
            pokemon.status = Some(Status::Paralysis);
        }

        team.cure_all();
        assert!(team.revealed().all(|p| p.status.is_none()));
    }
}
