//! Stat boost stages

use porygon_protocol::Stat;

/// Stat boost stages (-6 to +6), part of a pokemon's volatile state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoostTable {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl BoostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get stage for a stat.
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6).
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(-6, 6);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
            Stat::Accuracy => self.accuracy = clamped,
            Stat::Evasion => self.evasion = clamped,
        }
    }

    /// Apply a boost to a stat, returns the actual change applied.
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = (current + amount).clamp(-6, 6);
        self.set(stat, new_value);
        new_value - current
    }

    /// Apply an unboost (negative boost) to a stat.
    pub fn unboost(&mut self, stat: Stat, amount: i8) -> i8 {
        self.boost(stat, -amount)
    }

    /// Reset all stages to 0.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Invert all stages (Topsy-Turvy).
    pub fn invert(&mut self) {
        for stat in Self::ALL {
            self.set(stat, -self.get(stat));
        }
    }

    /// Copy stages from another table (Psych Up).
    pub fn copy_from(&mut self, other: &BoostTable) {
        *self = other.clone();
    }

    /// Check if all stats are at 0.
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    const ALL: [Stat; 7] = [
        Stat::Atk,
        Stat::Def,
        Stat::Spa,
        Stat::Spd,
        Stat::Spe,
        Stat::Accuracy,
        Stat::Evasion,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stages_are_zero() {
        let boosts = BoostTable::new();
        assert!(boosts.is_clear());
        assert_eq!(boosts.get(Stat::Atk), 0);
    }

    #[test]
    fn test_boost_clamps_and_reports_change() {
        let mut boosts = BoostTable::new();

        assert_eq!(boosts.boost(Stat::Atk, 2), 2);
        assert_eq!(boosts.atk, 2);

        boosts.atk = 5;
        assert_eq!(boosts.boost(Stat::Atk, 3), 1);
        assert_eq!(boosts.atk, 6);

        assert_eq!(boosts.boost(Stat::Atk, 1), 0);
    }

    #[test]
    fn test_unboost() {
        let mut boosts = BoostTable::new();
        assert_eq!(boosts.unboost(Stat::Def, 2), -2);
        assert_eq!(boosts.def, -2);

        boosts.def = -5;
        assert_eq!(boosts.unboost(Stat::Def, 3), -1);
        assert_eq!(boosts.def, -6);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut boosts = BoostTable::new();
        boosts.set(Stat::Spe, 10);
        assert_eq!(boosts.spe, 6);
        boosts.set(Stat::Spe, -10);
        assert_eq!(boosts.spe, -6);
    }

    #[test]
    fn test_invert() {
        let mut boosts = BoostTable::new();
        boosts.set(Stat::Atk, 3);
        boosts.set(Stat::Spe, -2);

        boosts.invert();
        assert_eq!(boosts.atk, -3);
        assert_eq!(boosts.spe, 2);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut source = BoostTable::new();
        source.set(Stat::Spa, 2);

        let mut target = BoostTable::new();
        target.copy_from(&source);
        assert_eq!(target, source);

        target.clear();
        assert!(target.is_clear());
    }
}
