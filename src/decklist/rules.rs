//! Deck construction rules

use crate::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Construction rule set; every field has a default so partial JSON works
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub min_cards: u32,
    pub max_cards: u32,
    /// Minimum fraction of power cards (1/3 by default)
    pub min_power_ratio: f64,
    /// Copy limit for every card except sigils
    pub max_copies: u32,
    pub max_market_cards: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            min_cards: 75,
            max_cards: 150,
            min_power_ratio: 1.0 / 3.0,
            max_copies: 4,
            max_market_cards: 5,
        }
    }
}

impl RuleConfig {
    /// Parse a (possibly partial) rule set from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: RuleConfig = serde_json::from_str(json)?;
        rules.check()?;
        Ok(rules)
    }

    /// Load a (possibly partial) rule set from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(DeckError::IoError)?;
        Self::from_json_str(&content)
    }

    /// Reject rule sets that can't produce meaningful results
    pub fn check(&self) -> Result<()> {
        if self.min_cards > self.max_cards {
            return Err(DeckError::InvalidArgument(format!(
                "min_cards ({}) is greater than max_cards ({})",
                self.min_cards, self.max_cards
            )));
        }
        if !(0.0..=1.0).contains(&self.min_power_ratio) {
            return Err(DeckError::InvalidArgument(format!(
                "min_power_ratio must be between 0 and 1, got {}",
                self.min_power_ratio
            )));
        }
        if self.max_copies == 0 {
            return Err(DeckError::InvalidArgument(
                "max_copies must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest power count that satisfies the ratio for a deck size
    pub fn min_power_cards(&self, total_cards: u32) -> u32 {
        (total_cards as f64 * self.min_power_ratio).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RuleConfig::default();
        assert_eq!(rules.min_cards, 75);
        assert_eq!(rules.max_cards, 150);
        assert_eq!(rules.max_copies, 4);
        assert_eq!(rules.max_market_cards, 5);
        assert_eq!(rules.min_power_cards(75), 25);
        assert!(rules.check().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = RuleConfig::from_json_str(r#"{"min_cards": 40, "max_copies": 3}"#).unwrap();
        assert_eq!(rules.min_cards, 40);
        assert_eq!(rules.max_copies, 3);
        assert_eq!(rules.max_cards, 150);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let rules = RuleConfig {
            min_cards: 200,
            ..RuleConfig::default()
        };
        assert!(matches!(rules.check(), Err(DeckError::InvalidArgument(_))));
        assert!(RuleConfig::from_json_str(r#"{"min_power_ratio": 1.5}"#).is_err());
        assert!(RuleConfig::from_json_str(r#"{"max_copies": 0}"#).is_err());
        assert!(RuleConfig::from_json_str("not json").is_err());
    }
}
