//! Card sheet loader (tab-separated spreadsheet export)
//!
//! The card spreadsheet is exported as TSV with a header row. Columns are
//! matched by header name, so column order and extra columns don't matter.

use crate::core::{CardName, CardRecord, CardType, Influence};
use crate::loader::CardDatabase;
use crate::{DeckError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Card sheet loader for .tsv exports
pub struct SheetLoader;

impl SheetLoader {
    /// Load a catalog from a TSV file
    pub fn load_from_file(path: &Path) -> Result<CardDatabase> {
        let content = fs::read_to_string(path).map_err(DeckError::IoError)?;
        Self::parse(&content)
    }

    /// Load a catalog from a TSV file without blocking the runtime
    pub async fn load_from_file_async(path: &Path) -> Result<CardDatabase> {
        let content = tokio::fs::read_to_string(path).await?;
        let db = tokio::task::spawn_blocking(move || Self::parse(&content)).await??;
        Ok(db)
    }

    /// Parse a whole sheet into a catalog
    ///
    /// Rows without a name and rows that aren't deck-buildable are skipped.
    pub fn parse(content: &str) -> Result<CardDatabase> {
        Ok(CardDatabase::from_records(Self::parse_records(content)?))
    }

    /// Parse a whole sheet into records, keeping only deck-buildable cards
    pub fn parse_records(content: &str) -> Result<Vec<CardRecord>> {
        let mut lines = content.lines().filter(|l| !l.trim().is_empty());

        let header_line = lines
            .next()
            .ok_or_else(|| DeckError::InvalidCardFormat("Empty card sheet".to_string()))?;
        let headers: Vec<&str> = header_line.split('\t').map(str::trim).collect();

        if !headers.contains(&"Name") {
            return Err(DeckError::InvalidCardFormat(
                "Card sheet has no Name column".to_string(),
            ));
        }

        let mut records = Vec::new();
        for line in lines {
            let row: HashMap<&str, &str> = headers
                .iter()
                .copied()
                .zip(line.split('\t').map(str::trim))
                .collect();

            if let Some(record) = Self::parse_row(&row) {
                if record.deck_buildable {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    /// Convert one sheet row (header -> cell) into a record
    pub fn parse_row(row: &HashMap<&str, &str>) -> Option<CardRecord> {
        let cell = |key: &str| row.get(key).copied().unwrap_or("");

        let name = cell("Name");
        if name.is_empty() {
            return None;
        }

        let deck_buildable = match row.get("DeckBuildable") {
            Some(v) if !v.is_empty() => v.eq_ignore_ascii_case("TRUE"),
            _ => true,
        };

        // Non-numeric costs ("X", blanks) count as 0
        let cost = cell("Cost").parse().unwrap_or(0);

        let card_type = match cell("Type") {
            "" => CardType::Unit,
            t => CardType::parse(t),
        };

        let rarity = match cell("Rarity") {
            "" => "Common".to_string(),
            r => r.to_string(),
        };

        let (attack, health) = if card_type.has_combat_stats() {
            (parse_stat(cell("Attack")), parse_stat(cell("Health")))
        } else {
            (None, None)
        };

        let optional = |key: &str| match cell(key) {
            "" => None,
            v => Some(v.to_string()),
        };

        Some(CardRecord {
            name: CardName::new(name),
            cost,
            card_type,
            influence: Influence::from_string(cell("Influence")),
            attack,
            health,
            rarity,
            text: cell("CardText").to_string(),
            deck_buildable,
            image_url: optional("ImageUrl"),
            set_number: optional("SetNumber"),
            eternal_id: optional("EternalID"),
        })
    }
}

fn parse_stat(s: &str) -> Option<i32> {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
