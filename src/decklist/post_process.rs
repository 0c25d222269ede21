//! Catalog-driven correction of pipe-format deck lines
//!
//! Generated decks often carry wrong costs, stats or rarities in the pipe
//! columns. Known cards are rewritten to the catalog's canonical line:
//!
//! ```text
//! 4x Torch | 1{F} | Spell | Common
//! ```
//!
//! Everything else (metadata, blank lines, lines without pipes, unknown cards)
//! is passed through untouched.

use crate::core::CardRecord;
use crate::decklist::classifier::is_metadata_line;
use crate::decklist::line::space1;
use crate::loader::CardCatalog;
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt},
    sequence::{terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Corrections listed individually in a report
pub const REPORT_DETAIL_LIMIT: usize = 10;

/// A pipe column that disagreed with the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectedField {
    Influence,
    Stats,
    Rarity,
}

impl CorrectedField {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectedField::Influence => "influence",
            CorrectedField::Stats => "stats",
            CorrectedField::Rarity => "rarity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionKind {
    /// Name not in the catalog; the line was kept as written
    NotFound,
    /// Line rewritten; lists the columns that were wrong (may be empty when
    /// only the name spelling or layout changed)
    Rewritten(Vec<CorrectedField>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// 1-based line number in the trimmed input
    pub line_number: usize,
    pub card_name: String,
    pub kind: CorrectionKind,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CorrectionKind::NotFound => write!(
                f,
                "Line {}: '{}' not found in card database",
                self.line_number, self.card_name
            ),
            CorrectionKind::Rewritten(fields) => {
                let fields: Vec<_> = fields.iter().map(|c| c.as_str()).collect();
                write!(
                    f,
                    "Line {}: {} - fixed: {}",
                    self.line_number,
                    self.card_name,
                    fields.join(", ")
                )
            }
        }
    }
}

/// Per-category counters; a line with several wrong columns counts in each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionStats {
    pub total_corrections: usize,
    pub cards_not_found: usize,
    pub influence_fixes: usize,
    pub stats_fixes: usize,
    pub rarity_fixes: usize,
}

impl CorrectionStats {
    fn record(&mut self, kind: &CorrectionKind) {
        self.total_corrections += 1;
        match kind {
            CorrectionKind::NotFound => self.cards_not_found += 1,
            CorrectionKind::Rewritten(fields) => {
                for field in fields {
                    match field {
                        CorrectedField::Influence => self.influence_fixes += 1,
                        CorrectedField::Stats => self.stats_fixes += 1,
                        CorrectedField::Rarity => self.rarity_fixes += 1,
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostProcessResult {
    pub text: String,
    pub corrections: Vec<Correction>,
    pub stats: CorrectionStats,
}

impl PostProcessResult {
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Summary of the corrections, listing at most `REPORT_DETAIL_LIMIT`
    pub fn report(&self) -> String {
        if self.corrections.is_empty() {
            return "No corrections needed".to_string();
        }

        let stats = &self.stats;
        let mut out = format!("Total corrections: {}\n", stats.total_corrections);
        let counters = [
            ("Cards not found", stats.cards_not_found),
            ("Influence fixes", stats.influence_fixes),
            ("Stats fixes", stats.stats_fixes),
            ("Rarity fixes", stats.rarity_fixes),
        ];
        for (label, count) in counters {
            if count > 0 {
                out.push_str(&format!("{label}: {count}\n"));
            }
        }

        out.push_str("\nDetails:\n");
        for (i, correction) in self.corrections.iter().take(REPORT_DETAIL_LIMIT).enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, correction));
        }

        let hidden = self.corrections.len().saturating_sub(REPORT_DETAIL_LIMIT);
        if hidden > 0 {
            out.push_str(&format!("... and {hidden} more corrections\n"));
        }

        out
    }
}

/// Rewrites pipe-format lines against a catalog
pub struct DeckPostProcessor<'a, C: CardCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CardCatalog + ?Sized> DeckPostProcessor<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        DeckPostProcessor { catalog }
    }

    /// Canonical pipe line for a card
    pub fn canonical_line(quantity: u32, card: &CardRecord) -> String {
        format!(
            "{}x {} | {} | {} | {}",
            quantity,
            card.name,
            card.cost_notation(),
            card.stats_notation(),
            card.rarity
        )
    }

    pub fn fix(&self, deck_text: &str) -> PostProcessResult {
        let mut fixed = Vec::new();
        let mut corrections = Vec::new();
        let mut stats = CorrectionStats::default();

        for (idx, line) in deck_text.trim().lines().enumerate() {
            if line.trim().is_empty() || is_metadata_line(line) {
                fixed.push(line.to_string());
                continue;
            }

            match self.fix_line(line) {
                Some((new_line, Some(kind), card_name)) => {
                    stats.record(&kind);
                    corrections.push(Correction {
                        line_number: idx + 1,
                        card_name,
                        kind,
                    });
                    fixed.push(new_line);
                }
                Some((new_line, None, _)) => fixed.push(new_line),
                None => fixed.push(line.to_string()),
            }
        }

        PostProcessResult {
            text: fixed.join("\n"),
            corrections,
            stats,
        }
    }

    /// `None` when the line isn't a pipe-format card line
    fn fix_line(&self, line: &str) -> Option<(String, Option<CorrectionKind>, String)> {
        if !line.contains('|') {
            return None;
        }

        let parts: Vec<&str> = line.split('|').collect();
        let (quantity, name) = pipe_head(parts[0].trim())?;

        let Some(card) = self.catalog.lookup(name) else {
            return Some((
                line.to_string(),
                Some(CorrectionKind::NotFound),
                name.to_string(),
            ));
        };

        let canonical = Self::canonical_line(quantity, card);
        if line.trim() == canonical {
            return Some((line.to_string(), None, card.name.to_string()));
        }

        let mut fields = Vec::new();
        if parts.len() >= 4 {
            if parts[1].trim() != card.cost_notation() {
                fields.push(CorrectedField::Influence);
            }
            if parts[2].trim() != card.stats_notation() {
                fields.push(CorrectedField::Stats);
            }
            if parts[3].trim() != card.rarity {
                fields.push(CorrectedField::Rarity);
            }
        }

        Some((
            canonical,
            Some(CorrectionKind::Rewritten(fields)),
            card.name.to_string(),
        ))
    }
}

/// `<qty>[x] <name>` in the first pipe column
fn pipe_head(input: &str) -> Option<(u32, &str)> {
    let (name, quantity) = quantity_prefix(input).ok()?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((quantity, name))
    }
}

fn quantity_prefix(input: &str) -> IResult<&str, u32> {
    terminated(
        map_res(digit1, str::parse::<u32>),
        tuple((opt(char('x')), space1)),
    )(input)
}
