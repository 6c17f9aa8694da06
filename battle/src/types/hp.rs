//! Hit point tracking

/// Hit points for a tracked pokemon.
///
/// For our own side both values are exact; for the opponent the server only
/// reports percentages, so `max` is 100 and `current` is the percentage.
/// The invariant `current <= max` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hp {
    pub current: u32,
    pub max: u32,
}

impl Hp {
    /// Full HP with the given maximum.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Update current HP, and max if a new max is reported. Current is
    /// clamped into `[0, max]`.
    pub fn set(&mut self, current: u32, max: Option<u32>) {
        if let Some(max) = max {
            self.max = max;
        }
        self.current = current.min(self.max);
    }

    /// Current HP as a percentage (0-100).
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            0
        } else {
            self.current * 100 / self.max
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

impl Default for Hp {
    fn default() -> Self {
        // Percentage scale until an exact max is reported.
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_current() {
        let mut hp = Hp::new(100);
        hp.set(250, None);
        assert_eq!(hp.current, 100);

        hp.set(250, Some(200));
        assert_eq!(hp.current, 200);
        assert_eq!(hp.max, 200);

        hp.set(0, None);
        assert_eq!(hp.current, 0);
        assert_eq!(hp.max, 200);
    }

    #[test]
    fn test_set_without_max_keeps_old_max() {
        let mut hp = Hp::new(331);
        hp.set(57, None);
        assert_eq!(hp.current, 57);
        assert_eq!(hp.max, 331);
    }

    #[test]
    fn test_clamp_holds_for_extreme_inputs() {
        let mut hp = Hp::new(100);
        hp.set(u32::MAX, None);
        assert!(hp.current <= hp.max);

        hp.set(u32::MAX, Some(u32::MAX));
        assert!(hp.current <= hp.max);

        hp.set(5, Some(0));
        assert_eq!(hp.current, 0);
        assert_eq!(hp.percent(), 0);
    }

    #[test]
    fn test_percent() {
        let mut hp = Hp::new(200);
        hp.set(150, None);
        assert_eq!(hp.percent(), 75);
        assert!(!hp.is_empty());

        hp.set(0, None);
        assert!(hp.is_empty());
    }
}
