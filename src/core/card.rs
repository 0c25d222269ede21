//! Card types and catalog records

use crate::core::{CardName, Faction, Influence};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Card types in the game
///
/// Unrecognized sheet values are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Unit,
    Spell,
    Power,
    Weapon,
    Relic,
    Curse,
    Site,
    Other(String),
}

impl CardType {
    /// Parse a type name from the sheet ("Unit", "power", ...)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "unit" => CardType::Unit,
            "spell" => CardType::Spell,
            "power" => CardType::Power,
            "weapon" => CardType::Weapon,
            "relic" => CardType::Relic,
            "curse" => CardType::Curse,
            "site" => CardType::Site,
            _ => CardType::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CardType::Unit => "Unit",
            CardType::Spell => "Spell",
            CardType::Power => "Power",
            CardType::Weapon => "Weapon",
            CardType::Relic => "Relic",
            CardType::Curse => "Curse",
            CardType::Site => "Site",
            CardType::Other(s) => s,
        }
    }

    /// Types whose records carry attack/health
    pub fn has_combat_stats(&self) -> bool {
        matches!(self, CardType::Unit | CardType::Weapon)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical card record from the catalog
///
/// Records are owned by the catalog and never mutated by deck processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: CardName,
    pub cost: u32,
    pub card_type: CardType,
    pub influence: Influence,
    pub attack: Option<i32>,
    pub health: Option<i32>,
    pub rarity: String,
    pub text: String,
    pub deck_buildable: bool,
    pub image_url: Option<String>,
    /// Set number as printed in export identifiers ("3" => "Set3")
    pub set_number: Option<String>,
    /// Collector id within the set
    pub eternal_id: Option<String>,
}

impl CardRecord {
    /// Minimal record with sheet defaults (Common, deck-buildable, no stats)
    pub fn new(name: impl Into<CardName>, cost: u32, card_type: CardType) -> Self {
        CardRecord {
            name: name.into(),
            cost,
            card_type,
            influence: Influence::new(),
            attack: None,
            health: None,
            rarity: "Common".to_string(),
            text: String::new(),
            deck_buildable: true,
            image_url: None,
            set_number: None,
            eternal_id: None,
        }
    }

    pub fn with_influence(mut self, influence: Influence) -> Self {
        self.influence = influence;
        self
    }

    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = Some(attack);
        self.health = Some(health);
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_set(mut self, set_number: impl Into<String>, eternal_id: impl Into<String>) -> Self {
        self.set_number = Some(set_number.into());
        self.eternal_id = Some(eternal_id.into());
        self
    }

    pub fn is_unit(&self) -> bool {
        self.card_type == CardType::Unit
    }

    pub fn is_power(&self) -> bool {
        self.card_type == CardType::Power
    }

    /// Basic sigils are the only cards exempt from the copy limit
    pub fn is_sigil(&self) -> bool {
        self.is_power() && self.name.as_str().contains("Sigil")
    }

    pub fn factions(&self) -> SmallVec<[Faction; 2]> {
        self.influence.factions()
    }

    /// Set label used by the game client's import format ("Set1")
    pub fn set_label(&self) -> String {
        format!("Set{}", self.set_number.as_deref().unwrap_or("1"))
    }

    /// Collector id used by the game client's import format
    pub fn collector_id(&self) -> &str {
        self.eternal_id.as_deref().unwrap_or("1")
    }

    /// Cost and influence as written in pipe-format deck lines ("1{F}")
    pub fn cost_notation(&self) -> String {
        format!("{}{}", self.cost, self.influence)
    }

    /// Stats column of pipe-format deck lines
    pub fn stats_notation(&self) -> String {
        match self.card_type {
            CardType::Unit => format!(
                "{}/{}",
                self.attack.unwrap_or(0),
                self.health.unwrap_or(0)
            ),
            CardType::Weapon if self.attack.is_some() => format!(
                "+{}/+{}",
                self.attack.unwrap_or(0),
                self.health.unwrap_or(0)
            ),
            CardType::Spell => "Spell".to_string(),
            CardType::Relic => "Relic".to_string(),
            _ => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigil_requires_power_type() {
        let sigil = CardRecord::new("Fire Sigil", 0, CardType::Power);
        assert!(sigil.is_sigil());

        let unit = CardRecord::new("Sigil Keeper", 2, CardType::Unit);
        assert!(!unit.is_sigil());
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let t = CardType::parse("Spell Relic");
        assert_eq!(t, CardType::Other("Spell Relic".to_string()));
        assert_eq!(t.to_string(), "Spell Relic");
        assert_eq!(CardType::parse("weapon"), CardType::Weapon);
    }

    #[test]
    fn test_set_identifiers_default() {
        let card = CardRecord::new("Torch", 1, CardType::Spell);
        assert_eq!(card.set_label(), "Set1");
        assert_eq!(card.collector_id(), "1");

        let card = card.with_set("3", "42");
        assert_eq!(card.set_label(), "Set3");
        assert_eq!(card.collector_id(), "42");
    }

    #[test]
    fn test_notation_columns() {
        let torch = CardRecord::new("Torch", 1, CardType::Spell)
            .with_influence(Influence::from_string("{F}"));
        assert_eq!(torch.cost_notation(), "1{F}");
        assert_eq!(torch.stats_notation(), "Spell");

        let unit = CardRecord::new("Oni Ronin", 2, CardType::Unit).with_stats(3, 1);
        assert_eq!(unit.stats_notation(), "3/1");

        let weapon = CardRecord::new("Rapid Shot", 1, CardType::Weapon).with_stats(1, 0);
        assert_eq!(weapon.stats_notation(), "+1/+0");

        let power = CardRecord::new("Fire Sigil", 0, CardType::Power);
        assert_eq!(power.stats_notation(), "N/A");
        assert_eq!(power.factions().len(), 0);
    }
}
