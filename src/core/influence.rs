//! Factions and influence requirements

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The five factions of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    Fire,
    Time,
    Justice,
    Primal,
    Shadow,
}

impl Faction {
    pub const ALL: [Faction; 5] = [
        Faction::Fire,
        Faction::Time,
        Faction::Justice,
        Faction::Primal,
        Faction::Shadow,
    ];

    /// Single-letter pip symbol used in influence notation
    pub fn symbol(self) -> char {
        match self {
            Faction::Fire => 'F',
            Faction::Time => 'T',
            Faction::Justice => 'J',
            Faction::Primal => 'P',
            Faction::Shadow => 'S',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Faction::Fire => "Fire",
            Faction::Time => "Time",
            Faction::Justice => "Justice",
            Faction::Primal => "Primal",
            Faction::Shadow => "Shadow",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Faction {
    type Err = crate::DeckError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fire" | "f" => Ok(Faction::Fire),
            "time" | "t" => Ok(Faction::Time),
            "justice" | "j" => Ok(Faction::Justice),
            "primal" | "p" => Ok(Faction::Primal),
            "shadow" | "s" => Ok(Faction::Shadow),
            _ => Err(crate::DeckError::ParseError(format!("Invalid faction: {s}"))),
        }
    }
}

/// Influence requirement of a card (e.g. "{F}{F}{J}" = 2 Fire + 1 Justice)
/// Copy-eligible since it's just 5 u8 fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Influence {
    pub fire: u8,
    pub time: u8,
    pub justice: u8,
    pub primal: u8,
    pub shadow: u8,
}

impl Influence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse influence notation like "{F}{F}" or "FFJ"
    ///
    /// Every faction letter counts as one pip; braces and anything else are ignored.
    pub fn from_string(s: &str) -> Self {
        let mut influence = Influence::new();
        for c in s.chars() {
            match c {
                'F' => influence.fire = influence.fire.saturating_add(1),
                'T' => influence.time = influence.time.saturating_add(1),
                'J' => influence.justice = influence.justice.saturating_add(1),
                'P' => influence.primal = influence.primal.saturating_add(1),
                'S' => influence.shadow = influence.shadow.saturating_add(1),
                _ => {}
            }
        }
        influence
    }

    /// Pip count for a faction (0 when absent)
    pub fn pips(&self, faction: Faction) -> u8 {
        match faction {
            Faction::Fire => self.fire,
            Faction::Time => self.time,
            Faction::Justice => self.justice,
            Faction::Primal => self.primal,
            Faction::Shadow => self.shadow,
        }
    }

    pub fn set_pips(&mut self, faction: Faction, count: u8) {
        match faction {
            Faction::Fire => self.fire = count,
            Faction::Time => self.time = count,
            Faction::Justice => self.justice = count,
            Faction::Primal => self.primal = count,
            Faction::Shadow => self.shadow = count,
        }
    }

    /// Total number of pips across all factions
    pub fn total(&self) -> u32 {
        Faction::ALL.iter().map(|&f| self.pips(f) as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Factions with at least one pip, in declaration order
    pub fn factions(&self) -> SmallVec<[Faction; 2]> {
        Faction::ALL
            .iter()
            .copied()
            .filter(|&f| self.pips(f) > 0)
            .collect()
    }
}

/// Renders pips as "{F}{F}{J}", factions ordered by name
impl fmt::Display for Influence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut by_name = Faction::ALL;
        by_name.sort_by_key(|faction| faction.name());
        for faction in by_name {
            for _ in 0..self.pips(faction) {
                write!(f, "{{{}}}", faction.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_braced_pips() {
        let inf = Influence::from_string("{F}{F}{J}");
        assert_eq!(inf.fire, 2);
        assert_eq!(inf.justice, 1);
        assert_eq!(inf.total(), 3);
    }

    #[test]
    fn test_factions_derived_from_pips() {
        let inf = Influence::from_string("TTS");
        assert_eq!(inf.factions().as_slice(), &[Faction::Time, Faction::Shadow]);
        assert!(Influence::from_string("").factions().is_empty());
    }

    #[test]
    fn test_display_orders_by_faction_name() {
        let inf = Influence::from_string("{T}{F}{F}");
        assert_eq!(inf.to_string(), "{F}{F}{T}");
        assert_eq!(Influence::new().to_string(), "");
    }

    #[test]
    fn test_faction_from_str() {
        assert_eq!("fire".parse::<Faction>().unwrap(), Faction::Fire);
        assert_eq!("S".parse::<Faction>().unwrap(), Faction::Shadow);
        assert!("water".parse::<Faction>().is_err());
    }
}
