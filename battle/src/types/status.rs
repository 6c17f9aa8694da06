//! Status conditions (volatile and non-volatile)

/// Non-volatile status conditions (persist through switching).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadPoison, // Toxic
    Sleep,
}

impl Status {
    /// Parse from protocol token ("brn", "frz", "par", "psn", "tox", "slp").
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s {
            "brn" => Some(Status::Burn),
            "frz" => Some(Status::Freeze),
            "par" => Some(Status::Paralysis),
            "psn" => Some(Status::Poison),
            "tox" => Some(Status::BadPoison),
            "slp" => Some(Status::Sleep),
            _ => None,
        }
    }

    /// Convert to protocol token.
    pub fn to_protocol(&self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::BadPoison => "tox",
            Status::Sleep => "slp",
        }
    }
}

/// Volatile status conditions (cleared on switching).
///
/// The handler set is intentionally partial; effects we do not model
/// explicitly are tracked by their normalized protocol name so they still
/// round-trip through start/end events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Volatile {
    Confusion,
    Taunt,
    Encore,
    Disable,
    Torment,
    Infatuation,
    Trapped,
    PartialTrap,
    LeechSeed,
    Curse,
    PerishSong,
    Nightmare,
    Substitute,
    FocusEnergy,
    Ingrain,
    AquaRing,
    MagnetRise,
    Yawn,
    GastroAcid,
    Transformed,
    /// Anything else, keyed by normalized effect name.
    Other(String),
}

impl Volatile {
    /// Parse from a protocol effect string (e.g. "confusion",
    /// "move: Taunt", "Substitute").
    pub fn from_protocol(s: &str) -> Self {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "confusion" => Volatile::Confusion,
            "taunt" => Volatile::Taunt,
            "encore" => Volatile::Encore,
            "disable" => Volatile::Disable,
            "torment" => Volatile::Torment,
            "attract" | "infatuation" => Volatile::Infatuation,
            "trapped" | "meanlook" | "spiderweb" | "block" => Volatile::Trapped,
            "partiallytrapped" | "bind" | "wrap" | "firespin" | "clamp" | "whirlpool"
            | "sandtomb" | "magmastorm" => Volatile::PartialTrap,
            "leechseed" => Volatile::LeechSeed,
            "curse" => Volatile::Curse,
            "perishsong" | "perish3" | "perish2" | "perish1" | "perish0" => Volatile::PerishSong,
            "nightmare" => Volatile::Nightmare,
            "substitute" => Volatile::Substitute,
            "focusenergy" => Volatile::FocusEnergy,
            "ingrain" => Volatile::Ingrain,
            "aquaring" => Volatile::AquaRing,
            "magnetrise" => Volatile::MagnetRise,
            "yawn" => Volatile::Yawn,
            "gastroacid" => Volatile::GastroAcid,
            "transform" => Volatile::Transformed,
            _ => Volatile::Other(normalized),
        }
    }

    /// Whether this effect prevents switching out.
    pub fn traps(&self) -> bool {
        matches!(
            self,
            Volatile::Trapped | Volatile::PartialTrap | Volatile::Ingrain
        )
    }
}
