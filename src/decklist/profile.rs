//! Catalog-backed deck profile
//!
//! The aggregate only knows names and counts. Resolving it against the
//! catalog gives accurate power counts, curve and faction spread.

use crate::core::Faction;
use crate::decklist::aggregate::DeckAggregate;
use crate::loader::CardCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckProfile {
    /// Cards whose catalog type is Power
    pub power_cards: u32,
    /// Known non-power cards (by quantity)
    pub spell_and_unit_cards: u32,
    /// Average cost of known non-power cards, weighted by quantity
    pub average_cost: f64,
    /// Cards carrying at least one pip of each faction
    pub faction_counts: BTreeMap<Faction, u32>,
    /// Names the catalog does not know, in deck order
    pub unknown_cards: Vec<String>,
}

impl DeckProfile {
    pub fn resolve<C: CardCatalog + ?Sized>(aggregate: &DeckAggregate, catalog: &C) -> Self {
        let mut profile = DeckProfile::default();
        let mut total_cost: u64 = 0;

        for (name, &count) in &aggregate.card_counts {
            let Some(card) = catalog.lookup(name) else {
                profile.unknown_cards.push(name.clone());
                continue;
            };

            if card.is_power() {
                profile.power_cards = profile.power_cards.saturating_add(count);
            } else {
                profile.spell_and_unit_cards = profile.spell_and_unit_cards.saturating_add(count);
                total_cost += u64::from(card.cost) * u64::from(count);
            }

            for faction in card.factions() {
                let total = profile.faction_counts.entry(faction).or_insert(0);
                *total = total.saturating_add(count);
            }
        }

        if profile.spell_and_unit_cards > 0 {
            profile.average_cost = total_cost as f64 / f64::from(profile.spell_and_unit_cards);
        }

        profile
    }

    /// Factions present in the deck, most cards first
    pub fn main_factions(&self) -> Vec<Faction> {
        let mut factions: Vec<_> = self.faction_counts.iter().collect();
        factions.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        factions.into_iter().map(|(&f, _)| f).collect()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.unknown_cards.is_empty()
    }
}
