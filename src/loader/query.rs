//! Catalog search filters

use crate::core::{CardRecord, CardType, Faction};
use crate::loader::CardDatabase;

/// Filter over catalog records; empty fields don't filter
#[derive(Debug, Clone, Default)]
pub struct CardQuery {
    /// Case-insensitive substring of the card name
    pub name_contains: Option<String>,
    pub factions: Vec<Faction>,
    /// Require every listed faction instead of any of them
    pub require_all_factions: bool,
    /// With exactly one faction requested, keep only mono-faction cards
    pub exclude_multifaction: bool,
    pub card_types: Vec<CardType>,
    pub max_cost: Option<u32>,
    /// Case-insensitive substring of the rules text
    pub text_contains: Option<String>,
}

impl CardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, query: impl Into<String>) -> Self {
        self.name_contains = Some(query.into());
        self
    }

    pub fn faction(mut self, faction: Faction) -> Self {
        self.factions.push(faction);
        self
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_types.push(card_type);
        self
    }

    pub fn max_cost(mut self, cost: u32) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn text(mut self, query: impl Into<String>) -> Self {
        self.text_contains = Some(query.into());
        self
    }

    /// Check a single record against every active filter
    pub fn matches(&self, card: &CardRecord) -> bool {
        if let Some(query) = &self.name_contains {
            if !card.name.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }

        if !self.factions.is_empty() {
            let card_factions = card.factions();
            let hit = if self.require_all_factions {
                self.factions.iter().all(|f| card_factions.contains(f))
            } else {
                self.factions.iter().any(|f| card_factions.contains(f))
            };
            if !hit {
                return false;
            }
            if self.exclude_multifaction && self.factions.len() == 1 && card_factions.len() != 1 {
                return false;
            }
        }

        if !self.card_types.is_empty() && !self.card_types.contains(&card.card_type) {
            return false;
        }

        if let Some(max) = self.max_cost {
            if card.cost > max {
                return false;
            }
        }

        if let Some(query) = &self.text_contains {
            if !card.text.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }

        true
    }

    /// Run the query against a database, results ordered by name
    pub fn run<'a>(&self, db: &'a CardDatabase) -> Vec<&'a CardRecord> {
        let mut results: Vec<&CardRecord> = db.iter().filter(|c| self.matches(c)).collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Influence;

    fn sample_db() -> CardDatabase {
        CardDatabase::from_records([
            CardRecord::new("Torch", 1, CardType::Spell)
                .with_influence(Influence::from_string("F")),
            CardRecord::new("Oni Ronin", 2, CardType::Unit)
                .with_influence(Influence::from_string("F"))
                .with_stats(3, 1),
            CardRecord::new("Rakano Outlaw", 3, CardType::Unit)
                .with_influence(Influence::from_string("FJ"))
                .with_stats(3, 3),
            CardRecord::new("Fire Sigil", 0, CardType::Power),
        ])
    }

    #[test]
    fn test_name_filter_case_insensitive() {
        let db = sample_db();
        let hits = CardQuery::new().name("TORCH").run(&db);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_str(), "Torch");
    }

    #[test]
    fn test_faction_any_and_all() {
        let db = sample_db();
        let any = CardQuery::new().faction(Faction::Fire).run(&db);
        assert_eq!(any.len(), 3);

        let mut all = CardQuery::new().faction(Faction::Fire).faction(Faction::Justice);
        all.require_all_factions = true;
        let hits = all.run(&db);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_str(), "Rakano Outlaw");
    }

    #[test]
    fn test_exclude_multifaction() {
        let db = sample_db();
        let mut query = CardQuery::new().faction(Faction::Fire);
        query.exclude_multifaction = true;
        let hits = query.run(&db);
        let names: Vec<_> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Oni Ronin", "Torch"]);
    }

    #[test]
    fn test_type_and_cost_filters() {
        let db = sample_db();
        let hits = CardQuery::new().card_type(CardType::Unit).max_cost(2).run(&db);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_str(), "Oni Ronin");
    }
}
