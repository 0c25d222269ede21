//! Card catalog for looking up card records
//!
//! Provides case-insensitive lookup of card records by name. Deck processing
//! only ever reads through the `CardCatalog` trait; loading and caching belong
//! to whoever constructs the catalog.

use crate::core::{lookup_key, CardRecord};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Read-only name -> record mapping consumed by deck processing
pub trait CardCatalog {
    /// Look up a card by name (case-insensitive)
    fn lookup(&self, name: &str) -> Option<&CardRecord>;

    /// Look up a card by name, requiring the exact printed spelling
    fn lookup_exact(&self, name: &str) -> Option<&CardRecord> {
        self.lookup(name)
            .filter(|card| card.name.as_str() == name.trim())
    }

    /// Look up with an explicit case-sensitivity choice
    fn lookup_with(&self, name: &str, case_insensitive: bool) -> Option<&CardRecord> {
        if case_insensitive {
            self.lookup(name)
        } else {
            self.lookup_exact(name)
        }
    }
}

/// In-memory catalog keyed by normalized card name
#[derive(Debug, Clone, Default)]
pub struct CardDatabase {
    cards: FxHashMap<String, CardRecord>,
}

impl CardDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        CardDatabase {
            cards: FxHashMap::default(),
        }
    }

    /// Build a database from records; later duplicates replace earlier ones
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Self {
        let mut db = CardDatabase::new();
        for record in records {
            db.add_card(record);
        }
        db
    }

    /// Add a single card record to the database
    pub fn add_card(&mut self, card: CardRecord) {
        self.cards.insert(card.name.lookup_key(), card);
    }

    /// Check if a card exists in the database
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(&lookup_key(name))
    }

    /// Iterate over all records (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }

    /// Total number of cards in database
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardCatalog for CardDatabase {
    fn lookup(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(&lookup_key(name))
    }
}

impl<C: CardCatalog + ?Sized> CardCatalog for &C {
    fn lookup(&self, name: &str) -> Option<&CardRecord> {
        (**self).lookup(name)
    }
}

impl<C: CardCatalog + ?Sized> CardCatalog for Arc<C> {
    fn lookup(&self, name: &str) -> Option<&CardRecord> {
        (**self).lookup(name)
    }
}

/// Reloadable catalog shared between threads
///
/// Readers take a snapshot (`Arc` clone under a short read lock) and perform
/// all lookups against it, so a concurrent `replace` never blocks a running
/// validation or export; those simply finish on the snapshot they started with.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<CardDatabase>>>,
}

impl SharedCatalog {
    pub fn new(db: CardDatabase) -> Self {
        SharedCatalog {
            current: Arc::new(RwLock::new(Arc::new(db))),
        }
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<CardDatabase> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a reloaded catalog; existing snapshots are unaffected
    pub fn replace(&self, db: CardDatabase) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(db);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;

    #[test]
    fn test_empty_database() {
        let db = CardDatabase::new();
        assert_eq!(db.len(), 0);
        assert!(db.is_empty());
        assert!(db.lookup("Torch").is_none());
    }

    #[test]
    fn test_manual_add() {
        let mut db = CardDatabase::new();
        db.add_card(CardRecord::new("Test Card", 1, CardType::Spell));

        assert_eq!(db.len(), 1);
        assert!(db.contains("Test Card"));
        assert!(db.contains("test card")); // Case insensitive

        let card = db.lookup("TEST CARD").unwrap();
        assert_eq!(card.name.as_str(), "Test Card");
    }

    #[test]
    fn test_lookup_exact_respects_case() {
        let db = CardDatabase::from_records([CardRecord::new("Torch", 1, CardType::Spell)]);
        assert!(db.lookup_with("torch", true).is_some());
        assert!(db.lookup_with("torch", false).is_none());
        assert!(db.lookup_with("Torch", false).is_some());
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedCatalog::new(CardDatabase::from_records([CardRecord::new(
            "Torch",
            1,
            CardType::Spell,
        )]));

        let before = shared.snapshot();
        shared.replace(CardDatabase::new());

        assert!(before.lookup("Torch").is_some());
        assert!(shared.snapshot().lookup("Torch").is_none());
    }
}
