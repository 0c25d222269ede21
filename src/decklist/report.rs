//! Validation reports
//!
//! Bundles everything one validation call produces: the detected dialect,
//! the aggregate and the rule verdict.

use crate::decklist::aggregate::{aggregate_text, aggregate_with, DeckAggregate};
use crate::decklist::dialect::{detect_dialect, DeckDialect};
use crate::decklist::power::PowerClassifier;
use crate::decklist::rules::RuleConfig;
use crate::decklist::validator::{validate, ValidationResult};
use crate::logger::{DeckLogger, VerbosityLevel};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub dialect: DeckDialect,
    pub aggregate: DeckAggregate,
    pub result: ValidationResult,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.result.valid
    }

    /// One-line verdict
    pub fn verdict(&self) -> String {
        if self.result.valid {
            format!(
                "DECK VALID: {} cards, {} powers ({:.1}%)",
                self.aggregate.total_cards,
                self.aggregate.power_cards,
                self.aggregate.power_ratio() * 100.0
            )
        } else {
            "DECK INVALID:".to_string()
        }
    }

    /// Human-readable report: detected dialect, verdict, then violations
    pub fn summary(&self) -> String {
        let mut out = format!("Detected format: {}\n", self.dialect);
        out.push_str(&self.verdict());
        if !self.result.valid {
            out.push('\n');
            out.push_str(&self.result.violations.join("\n"));
        }
        out
    }

    /// Write the report through a logger
    ///
    /// Verdict at Minimal, violations at Normal, counters and per-line
    /// diagnostics at Verbose.
    pub fn log_to(&self, logger: &DeckLogger) {
        logger.log(VerbosityLevel::Minimal, Some("verdict"), &self.verdict());
        for violation in &self.result.violations {
            logger.log(VerbosityLevel::Normal, Some("violation"), violation);
        }

        let agg = &self.aggregate;
        logger.log(
            VerbosityLevel::Verbose,
            Some("stats"),
            &format!(
                "format={} parsed={} metadata={} failed={} unique={} market={}",
                self.dialect,
                agg.parsed_line_count,
                agg.metadata_line_count,
                agg.failed_lines.len(),
                agg.unique_cards(),
                agg.market_cards
            ),
        );

        #[cfg(feature = "verbose-logging")]
        {
            for (name, count) in &agg.card_counts {
                logger.log(
                    VerbosityLevel::Verbose,
                    Some("card"),
                    &format!("{count}x {name}"),
                );
            }
            for failed in &agg.failed_lines {
                logger.log(VerbosityLevel::Verbose, Some("line"), &failed.to_string());
            }
        }
    }
}

/// Build a report from an already-aggregated deck
pub fn report_for(
    dialect: DeckDialect,
    aggregate: DeckAggregate,
    rules: &RuleConfig,
) -> Result<ValidationReport> {
    let result = validate(&aggregate, rules)?;
    Ok(ValidationReport {
        dialect,
        aggregate,
        result,
    })
}

/// Detect, aggregate and validate deck text with the keyword power heuristic
pub fn validate_text(text: &str, rules: &RuleConfig) -> Result<ValidationReport> {
    report_for(detect_dialect(text), aggregate_text(text), rules)
}

/// Same as `validate_text` with a caller-chosen power classifier
pub fn validate_text_with<P: PowerClassifier + ?Sized>(
    text: &str,
    rules: &RuleConfig,
    classifier: &P,
) -> Result<ValidationReport> {
    report_for(
        detect_dialect(text),
        aggregate_with(text.lines(), classifier),
        rules,
    )
}
