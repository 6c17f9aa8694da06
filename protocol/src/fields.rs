//! Field types shared across battle protocol events.

use std::str::FromStr;

use crate::ParseError;

/// Player in a battle (p1 or p2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    /// The other player.
    pub fn opponent(&self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu").
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonIdent {
    /// Player who owns this pokemon.
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive).
    pub position: Option<char>,
    /// Pokemon's name/nickname.
    pub name: String,
}

impl PokemonIdent {
    /// Parse an identifier string like "p1a: Pikachu" or "p1: Pikachu".
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        let player = Player::parse(pos_part.get(..2)?)?;
        let position = pos_part.chars().nth(2);

        Some(PokemonIdent {
            player,
            position,
            name: name.to_string(),
        })
    }
}

/// Pokemon details string (species, level, gender, shiny).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny".
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let parts: Vec<&str> = s.split(", ").collect();

        if let Some(species) = parts.first() {
            details.species = species.to_string();
        }

        for part in parts.iter().skip(1) {
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().ok();
            } else if *part == "M" {
                details.gender = Some('M');
            } else if *part == "F" {
                details.gender = Some('F');
            } else if *part == "shiny" {
                details.shiny = true;
            }
        }

        details
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt").
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Current HP (raw value for our side, percentage for the opponent).
    pub current: u32,
    /// Max HP (if known; percentage conditions omit it).
    pub max: Option<u32>,
    /// Status token (slp, par, brn, psn, tox, frz, fnt).
    pub status: Option<String>,
}

impl Condition {
    /// Parse a condition string like "100/100", "50/100 slp", or "0 fnt".
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let hp_part = parts.next()?;
        let status = parts.next().map(str::to_string);

        if let Some((current, max)) = hp_part.split_once('/') {
            Some(Condition {
                current: current.parse().ok()?,
                max: Some(max.parse().ok()?),
                status,
            })
        } else {
            Some(Condition {
                current: hp_part.parse().ok()?,
                max: None,
                status,
            })
        }
    }

    /// Whether this condition marks a fainted pokemon.
    pub fn is_fainted(&self) -> bool {
        self.status.as_deref() == Some("fnt")
    }
}

/// Boostable stat abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidFormat(s.to_string()))
    }
}

impl FromStr for PokemonIdent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidFormat(s.to_string()))
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_parse() {
        assert_eq!(Player::parse("p1"), Some(Player::P1));
        assert_eq!(Player::parse("p2"), Some(Player::P2));
        assert_eq!(Player::parse("p3"), None);
        assert_eq!(Player::P1.opponent(), Player::P2);
    }

    #[test]
    fn test_ident_parse() {
        let ident = PokemonIdent::parse("p1a: Sparky").unwrap();
        assert_eq!(ident.player, Player::P1);
        assert_eq!(ident.position, Some('a'));
        assert_eq!(ident.name, "Sparky");

        let bench = PokemonIdent::parse("p2: Skarmory").unwrap();
        assert_eq!(bench.player, Player::P2);
        assert_eq!(bench.position, None);

        assert!(PokemonIdent::parse("garbage").is_none());
    }

    #[test]
    fn test_details_parse() {
        let details = PokemonDetails::parse("Pikachu, L50, M, shiny");
        assert_eq!(details.species, "Pikachu");
        assert_eq!(details.level, Some(50));
        assert_eq!(details.gender, Some('M'));
        assert!(details.shiny);

        let bare = PokemonDetails::parse("Arceus");
        assert_eq!(bare.species, "Arceus");
        assert_eq!(bare.level, None);
        assert_eq!(bare.gender, None);
    }

    #[test]
    fn test_condition_parse() {
        let full = Condition::parse("50/100 slp").unwrap();
        assert_eq!(full.current, 50);
        assert_eq!(full.max, Some(100));
        assert_eq!(full.status.as_deref(), Some("slp"));

        let fainted = Condition::parse("0 fnt").unwrap();
        assert_eq!(fainted.current, 0);
        assert_eq!(fainted.max, None);
        assert!(fainted.is_fainted());

        assert!(Condition::parse("").is_none());
        assert!(Condition::parse("abc/def").is_none());
    }

    #[test]
    fn test_from_str_reports_input() {
        let error = "p3a: Missingno".parse::<PokemonIdent>().unwrap_err();
        assert!(error.to_string().contains("p3a: Missingno"));
        assert!("p2".parse::<Player>().is_ok());
        assert!("240/240".parse::<Condition>().is_ok());
    }

    #[test]
    fn test_stat_parse() {
        assert_eq!(Stat::parse("atk"), Some(Stat::Atk));
        assert_eq!(Stat::parse("evasion"), Some(Stat::Evasion));
        assert_eq!(Stat::parse("hp"), None);
        assert_eq!(Stat::Spe.as_str(), "spe");
    }
}
