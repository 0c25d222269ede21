//! Export to the game client's import format
//!
//! ```text
//! FORMAT:Throne
//! 4 Torch (Set1 #8)
//! --------------MARKET---------------
//! 1 Vara's Favor (Set2 #101)
//! ```
//!
//! The header token and the market separator are read by the client
//! byte-for-byte. Names missing from the catalog are exported with a
//! placeholder id instead of failing the export.

use crate::decklist::classifier::is_metadata_line;
use crate::decklist::line::{parse_line, ParsedEntry};
use crate::loader::CardCatalog;
use crate::DeckError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header prefix of an exported deck
pub const FORMAT_HEADER: &str = "FORMAT:";

/// Line separating the main deck from the market
pub const MARKET_SEPARATOR: &str = "--------------MARKET---------------";

/// Identifier used when a card isn't in the catalog
pub const PLACEHOLDER_SET: &str = "Set1";
pub const PLACEHOLDER_ID: &str = "1";

/// Game formats understood by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Throne,
    Expedition,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Throne => "Throne",
            ExportFormat::Expedition => "Expedition",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = DeckError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "throne" => Ok(ExportFormat::Throne),
            "expedition" => Ok(ExportFormat::Expedition),
            _ => Err(DeckError::InvalidArgument(format!(
                "Unknown export format: {s} (expected Throne or Expedition)"
            ))),
        }
    }
}

/// One exported card line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub entry: ParsedEntry,
    pub set_label: String,
    pub collector_id: String,
    /// False when the placeholder id was used
    pub found: bool,
}

impl fmt::Display for ExportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} #{})",
            self.entry.quantity, self.entry.raw_name, self.set_label, self.collector_id
        )
    }
}

/// A deck resolved against the catalog, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDeck {
    pub format_label: String,
    pub main_deck: Vec<ExportLine>,
    pub market: Vec<ExportLine>,
}

impl ExportedDeck {
    /// Entries that fell back to the placeholder id
    pub fn missing_cards(&self) -> Vec<&str> {
        self.main_deck
            .iter()
            .chain(self.market.iter())
            .filter(|l| !l.found)
            .map(|l| l.entry.raw_name.as_str())
            .collect()
    }

    /// Render in the client's import format
    pub fn render(&self) -> String {
        let mut output = format!("{FORMAT_HEADER}{}\n", self.format_label);
        output.push_str(&join_lines(&self.main_deck));

        if !self.market.is_empty() {
            output.push('\n');
            output.push_str(MARKET_SEPARATOR);
            output.push('\n');
            output.push_str(&join_lines(&self.market));
        }

        output
    }
}

fn join_lines(lines: &[ExportLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse deck text and resolve every entry against the catalog
pub fn build_export<C: CardCatalog + ?Sized>(
    deck_text: &str,
    format_label: &str,
    catalog: &C,
) -> ExportedDeck {
    let mut main_deck = Vec::new();
    let mut market = Vec::new();
    let mut in_market = false;

    for line in deck_text.trim().lines() {
        if line.to_uppercase().contains("MARKET") {
            in_market = true;
            continue;
        }

        if line.trim().is_empty() || is_metadata_line(line) {
            continue;
        }

        if let Some(entry) = parse_line(line) {
            let export_line = resolve(entry, catalog);
            if in_market {
                market.push(export_line);
            } else {
                main_deck.push(export_line);
            }
        }
    }

    ExportedDeck {
        format_label: format_label.to_string(),
        main_deck,
        market,
    }
}

fn resolve<C: CardCatalog + ?Sized>(entry: ParsedEntry, catalog: &C) -> ExportLine {
    match catalog.lookup(&entry.raw_name) {
        Some(card) => ExportLine {
            set_label: card.set_label(),
            collector_id: card.collector_id().to_string(),
            found: true,
            entry,
        },
        None => ExportLine {
            set_label: PLACEHOLDER_SET.to_string(),
            collector_id: PLACEHOLDER_ID.to_string(),
            found: false,
            entry,
        },
    }
}

/// Convert deck text into the client's import format
pub fn export_deck<C: CardCatalog + ?Sized>(
    deck_text: &str,
    format_label: &str,
    catalog: &C,
) -> String {
    build_export(deck_text, format_label, catalog).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardRecord, CardType};
    use crate::loader::CardDatabase;

    fn catalog() -> CardDatabase {
        CardDatabase::from_records([
            CardRecord::new("Torch", 1, CardType::Spell).with_set("1", "8"),
            CardRecord::new("Fire Sigil", 0, CardType::Power).with_set("1", "1"),
            CardRecord::new("Vara's Favor", 1, CardType::Spell).with_set("2", "101"),
        ])
    }

    #[test]
    fn test_main_deck_only() {
        let out = export_deck("4 Torch\n25 Fire Sigil", "Throne", &catalog());
        assert_eq!(out, "FORMAT:Throne\n4 Torch (Set1 #8)\n25 Fire Sigil (Set1 #1)");
    }

    #[test]
    fn test_market_section() {
        let text = "=== DECK ===\n4x Torch\nMARKET:\n1 Vara's Favor";
        let out = export_deck(text, "Expedition", &catalog());
        assert_eq!(
            out,
            "FORMAT:Expedition\n4 Torch (Set1 #8)\n--------------MARKET---------------\n1 Vara's Favor (Set2 #101)"
        );
    }

    #[test]
    fn test_missing_card_uses_placeholder() {
        let export = build_export("4 Torch\n2 Unknown Card", "Throne", &catalog());
        assert_eq!(export.missing_cards(), vec!["Unknown Card"]);
        assert_eq!(
            export.render(),
            "FORMAT:Throne\n4 Torch (Set1 #8)\n2 Unknown Card (Set1 #1)"
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let out = export_deck("4 torch", "Throne", &catalog());
        assert_eq!(out, "FORMAT:Throne\n4 torch (Set1 #8)");
    }

    #[test]
    fn test_reexport_strips_existing_identifiers() {
        let out = export_deck("4 Torch (Set1 #8)", "Throne", &catalog());
        assert_eq!(out, "FORMAT:Throne\n4 Torch (Set1 #8)");
    }

    #[test]
    fn test_empty_deck() {
        assert_eq!(export_deck("", "Throne", &catalog()), "FORMAT:Throne\n");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("throne".parse::<ExportFormat>().unwrap(), ExportFormat::Throne);
        assert_eq!(ExportFormat::Expedition.to_string(), "Expedition");
        assert!("draft".parse::<ExportFormat>().is_err());
    }
}
