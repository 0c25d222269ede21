//! Deck text dialect detection
//!
//! Informational only: parsing accepts every dialect regardless of what is
//! detected here.

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::opt,
    sequence::tuple,
    IResult,
};
use crate::decklist::line::space1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading lines inspected
pub const DETECTION_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeckDialect {
    /// `4x Torch | 1{F} | Spell | Common`, labelled `new_pipe_format`
    PipeFormat,
    /// `4 Torch (Set1 #8)`
    ExportFormat,
    /// `4 Torch` / `4x Torch`
    SimpleFormat,
    #[default]
    Unknown,
}

impl DeckDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            DeckDialect::PipeFormat => "new_pipe_format",
            DeckDialect::ExportFormat => "export_format",
            DeckDialect::SimpleFormat => "simple_format",
            DeckDialect::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeckDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the dialect from the first matching line of the detection window
pub fn detect_dialect(text: &str) -> DeckDialect {
    text.trim()
        .lines()
        .take(DETECTION_WINDOW)
        .find_map(line_dialect)
        .unwrap_or_default()
}

fn line_dialect(line: &str) -> Option<DeckDialect> {
    if line.contains('|') && line.contains(['{', '}']) {
        Some(DeckDialect::PipeFormat)
    } else if contains_set_annotation(line) {
        Some(DeckDialect::ExportFormat)
    } else if simple_entry(line).is_ok() {
        Some(DeckDialect::SimpleFormat)
    } else {
        None
    }
}

/// `(Set<digits> #<digits>)` anywhere in the line
fn contains_set_annotation(line: &str) -> bool {
    line.match_indices('(')
        .any(|(idx, _)| set_annotation(&line[idx..]).is_ok())
}

fn set_annotation(input: &str) -> IResult<&str, ()> {
    let (rest, _) = tuple((
        tag("(Set"),
        digit1,
        multispace0,
        char('#'),
        digit1,
        char(')'),
    ))(input)?;
    Ok((rest, ()))
}

/// `<digits>[x]<space><word char>` at the start of the line
fn simple_entry(input: &str) -> IResult<&str, ()> {
    let (rest, _) = tuple((digit1, opt(char('x')), space1, word_start))(input)?;
    Ok((rest, ()))
}

fn word_start(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_format() {
        let text = "=== DECK ===\n4x Torch | 1{F} | Spell | Common";
        assert_eq!(detect_dialect(text), DeckDialect::PipeFormat);
    }

    #[test]
    fn test_export_format() {
        assert_eq!(detect_dialect("4 Torch (Set1 #8)"), DeckDialect::ExportFormat);
        assert_eq!(detect_dialect("4 Torch (Set12#8)"), DeckDialect::ExportFormat);
    }

    #[test]
    fn test_simple_format() {
        assert_eq!(detect_dialect("UNITS:\n4x Torch"), DeckDialect::SimpleFormat);
        assert_eq!(detect_dialect("4 Torch"), DeckDialect::SimpleFormat);
        assert_eq!(detect_dialect("4\u{a0}Torch"), DeckDialect::SimpleFormat);
    }

    #[test]
    fn test_first_matching_line_decides() {
        let text = "4 Torch\n4 Torch (Set1 #8)";
        assert_eq!(detect_dialect(text), DeckDialect::SimpleFormat);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(detect_dialect(""), DeckDialect::Unknown);
        assert_eq!(detect_dialect("Torch x4\nTorch"), DeckDialect::Unknown);
        // pipes without braces are not the pipe dialect
        assert_eq!(detect_dialect("Torch | Spell"), DeckDialect::Unknown);
    }

    #[test]
    fn test_window_limit() {
        let mut text = "Torch\n".repeat(DETECTION_WINDOW);
        text.push_str("4 Torch");
        assert_eq!(detect_dialect(&text), DeckDialect::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeckDialect::PipeFormat.to_string(), "new_pipe_format");
        assert_eq!(DeckDialect::Unknown.to_string(), "unknown");
    }
}
