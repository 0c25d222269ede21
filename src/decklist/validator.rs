//! Rule validation over an aggregated deck
//!
//! Every check runs unconditionally so one pass reports every problem.
//! Violations are data, not errors: the only failure is a malformed rule set.

use crate::decklist::aggregate::DeckAggregate;
use crate::decklist::rules::RuleConfig;
use crate::Result;
use serde::{Deserialize, Serialize};

/// More failed lines than this are reported as a single summary
pub const FAILED_LINE_REPORT_LIMIT: usize = 3;

/// Pass/fail plus human-readable reasons, in check order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<String>) -> Self {
        ValidationResult {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Validate an aggregate against a rule set
pub fn validate(aggregate: &DeckAggregate, rules: &RuleConfig) -> Result<ValidationResult> {
    rules.check()?;

    let mut violations = Vec::new();
    let total = aggregate.total_cards;

    if total < rules.min_cards {
        violations.push(format!(
            "Deck has only {} cards (minimum {})",
            total, rules.min_cards
        ));
    } else if total > rules.max_cards {
        violations.push(format!(
            "Deck has {} cards (maximum {})",
            total, rules.max_cards
        ));
    }

    if total > 0 {
        let ratio = aggregate.power_ratio();
        if ratio < rules.min_power_ratio {
            violations.push(format!(
                "Only {} power cards ({:.1}%). Minimum: {} ({:.0}%)",
                aggregate.power_cards,
                ratio * 100.0,
                rules.min_power_cards(total),
                rules.min_power_ratio * 100.0
            ));
        }
    }

    for (name, &count) in &aggregate.card_counts {
        if count > rules.max_copies && !name.contains("Sigil") {
            violations.push(format!(
                "'{}' has {} copies (maximum {})",
                name, count, rules.max_copies
            ));
        }
    }

    let failed = &aggregate.failed_lines;
    if failed.len() > FAILED_LINE_REPORT_LIMIT {
        violations.push(format!("Could not parse {} lines", failed.len()));
    } else {
        for line in failed {
            violations.push(format!("Unparsed line: {line}"));
        }
    }

    if aggregate.market_cards > rules.max_market_cards {
        violations.push(format!(
            "Market has {} cards (maximum {})",
            aggregate.market_cards, rules.max_market_cards
        ));
    }

    Ok(ValidationResult::from_violations(violations))
}
