//! Deck-list parsing, validation and export
//!
//! Text flows through line classification and parsing into an aggregate,
//! which the validator checks against a `RuleConfig`. Export and the
//! post-processor reuse the same line parser against a card catalog.

pub mod aggregate;
pub mod classifier;
pub mod dialect;
pub mod export;
pub mod line;
pub mod post_process;
pub mod power;
pub mod profile;
pub mod report;
pub mod rules;
pub mod validator;

pub use aggregate::{aggregate, aggregate_text, aggregate_with, DeckAggregate, FailedLine};
pub use classifier::{is_market_marker, is_metadata_line};
pub use dialect::{detect_dialect, DeckDialect};
pub use export::{build_export, export_deck, ExportFormat, ExportedDeck};
pub use line::{classify_line, parse_line, LineParse, ParsedEntry};
pub use post_process::{DeckPostProcessor, PostProcessResult};
pub use power::{CatalogPowerClassifier, KeywordPowerClassifier, PowerClassifier};
pub use profile::DeckProfile;
pub use report::{validate_text, validate_text_with, ValidationReport};
pub use rules::RuleConfig;
pub use validator::{validate, ValidationResult};
