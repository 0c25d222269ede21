//! Power card classification
//!
//! Deck text is aggregated without guaranteed catalog access, so by default a
//! card counts as power when its name contains one of a fixed set of words.
//! That heuristic misfires on names like "Powerhouse"; when a catalog is
//! available, `CatalogPowerClassifier` uses the real card type instead.

use crate::loader::CardCatalog;

/// Case-sensitive name fragments of power-producing cards
pub const POWER_KEYWORDS: [&str; 12] = [
    "Sigil", "Power", "Seat", "Banner", "Crest", "Waystone", "Painting", "Cylix", "Standard",
    "Insignia", "Vow", "Etchings",
];

/// Decides whether a parsed card name is a power card
pub trait PowerClassifier {
    fn is_power_card(&self, name: &str) -> bool;
}

/// Name-keyword heuristic (no catalog needed)
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordPowerClassifier;

impl PowerClassifier for KeywordPowerClassifier {
    fn is_power_card(&self, name: &str) -> bool {
        POWER_KEYWORDS.iter().any(|kw| name.contains(kw))
    }
}

/// Uses the catalog's card type, falling back to keywords for unknown names
pub struct CatalogPowerClassifier<'a, C: CardCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CardCatalog + ?Sized> CatalogPowerClassifier<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        CatalogPowerClassifier { catalog }
    }
}

impl<C: CardCatalog + ?Sized> PowerClassifier for CatalogPowerClassifier<'_, C> {
    fn is_power_card(&self, name: &str) -> bool {
        match self.catalog.lookup(name) {
            Some(card) => card.is_power(),
            None => KeywordPowerClassifier.is_power_card(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardRecord, CardType};
    use crate::loader::CardDatabase;

    #[test]
    fn test_keyword_heuristic() {
        let c = KeywordPowerClassifier;
        assert!(c.is_power_card("Fire Sigil"));
        assert!(c.is_power_card("Seat of Glory"));
        assert!(c.is_power_card("Amber Waystone"));
        assert!(c.is_power_card("Etchings of Tryst"));
        assert!(!c.is_power_card("Torch"));
        // case-sensitive
        assert!(!c.is_power_card("fire sigil"));
    }

    #[test]
    fn test_keyword_heuristic_false_positive() {
        // Documented misfire: non-power names containing a keyword
        assert!(KeywordPowerClassifier.is_power_card("Powerhouse Brute"));
        assert!(KeywordPowerClassifier.is_power_card("Standard Bearer"));
    }

    #[test]
    fn test_keyword_heuristic_false_negative() {
        // Power cards whose names carry no keyword
        assert!(!KeywordPowerClassifier.is_power_card("Diplomatic Stamp"));
    }

    #[test]
    fn test_catalog_classifier_uses_card_type() {
        let db = CardDatabase::from_records([
            CardRecord::new("Powerhouse Brute", 4, CardType::Unit),
            CardRecord::new("Diplomatic Stamp", 0, CardType::Power),
        ]);
        let c = CatalogPowerClassifier::new(&db);

        assert!(!c.is_power_card("Powerhouse Brute"));
        assert!(c.is_power_card("Diplomatic Stamp"));
        // unknown names fall back to keywords
        assert!(c.is_power_card("Shadow Sigil"));
        assert!(!c.is_power_card("Unknown Card"));
    }
}
