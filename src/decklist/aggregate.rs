//! Deck aggregation
//!
//! Folds deck text into per-card counts and running totals. One aggregate is
//! built per validation call and carries no state across calls.

use crate::decklist::classifier::{is_market_marker, is_metadata_line};
use crate::decklist::line::{classify_line, LineParse};
use crate::decklist::power::{KeywordPowerClassifier, PowerClassifier};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters of a failed line kept for diagnostics
pub const FAILED_LINE_PREVIEW: usize = 50;

/// A non-blank, non-comment line that was neither metadata nor a card entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    /// Trimmed line text, truncated to `FAILED_LINE_PREVIEW` characters
    pub text: String,
}

impl fmt::Display for FailedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: '{}...'", self.line_number, self.text)
    }
}

/// Totals and per-card counts for one deck text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckAggregate {
    pub total_cards: u32,
    pub power_cards: u32,
    /// Cards listed after a MARKET header (also included in `total_cards`)
    pub market_cards: u32,
    /// Card name -> total quantity, in first-seen order
    pub card_counts: IndexMap<String, u32>,
    pub parsed_line_count: usize,
    pub metadata_line_count: usize,
    /// Card lines with quantity 0, dropped without being counted
    pub zero_quantity_lines: usize,
    pub failed_lines: Vec<FailedLine>,
}

impl DeckAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct card names
    pub fn unique_cards(&self) -> usize {
        self.card_counts.len()
    }

    /// Quantity recorded for a card name (0 if absent)
    pub fn count_of(&self, name: &str) -> u32 {
        self.card_counts.get(name).copied().unwrap_or(0)
    }

    /// Fraction of cards that are power cards (0.0 for an empty deck)
    pub fn power_ratio(&self) -> f64 {
        if self.total_cards == 0 {
            0.0
        } else {
            self.power_cards as f64 / self.total_cards as f64
        }
    }

    /// Record one parsed entry
    ///
    /// Returns false, recording nothing, when the entry would push the deck
    /// total past `u32::MAX`. Every other counter is bounded by the total.
    fn add_entry(&mut self, quantity: u32, name: &str, is_power: bool, in_market: bool) -> bool {
        let Some(total) = self.total_cards.checked_add(quantity) else {
            return false;
        };
        self.total_cards = total;
        if is_power {
            self.power_cards += quantity;
        }
        if in_market {
            self.market_cards += quantity;
        }
        *self.card_counts.entry(name.to_string()).or_insert(0) += quantity;
        self.parsed_line_count += 1;
        true
    }

    fn push_failed(&mut self, line_number: usize, line: &str) {
        self.failed_lines.push(FailedLine {
            line_number,
            text: line.chars().take(FAILED_LINE_PREVIEW).collect(),
        });
    }
}

/// Aggregate deck lines using the keyword power heuristic
pub fn aggregate<I, S>(lines: I) -> DeckAggregate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate_with(lines, &KeywordPowerClassifier)
}

/// Aggregate a whole deck text using the keyword power heuristic
pub fn aggregate_text(text: &str) -> DeckAggregate {
    aggregate(text.lines())
}

/// Aggregate deck lines with a caller-chosen power classifier
pub fn aggregate_with<I, S, P>(lines: I, classifier: &P) -> DeckAggregate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: PowerClassifier + ?Sized,
{
    let mut agg = DeckAggregate::new();
    let mut in_market = false;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if is_metadata_line(line) {
            agg.metadata_line_count += 1;
            if is_market_marker(line) {
                in_market = true;
            }
            continue;
        }

        match classify_line(line) {
            LineParse::Entry(entry) => {
                let is_power = classifier.is_power_card(&entry.raw_name);
                if !agg.add_entry(entry.quantity, &entry.raw_name, is_power, in_market) {
                    agg.push_failed(idx + 1, line);
                }
            }
            LineParse::ZeroQuantity(_) => agg.zero_quantity_lines += 1,
            LineParse::Skipped => {}
            LineParse::Unparseable => {
                if !line.starts_with('#') {
                    agg.push_failed(idx + 1, line);
                }
            }
        }
    }

    agg
}
