//! Deck line parsing
//!
//! Extracts `(quantity, name)` from one line of deck text. Accepted dialects:
//!
//! - `4 Torch` / `4x Torch`
//! - `Torch x4`
//! - `4 Seek Power (Set1 #408)` (parenthesized set info is dropped)
//! - `4x Torch | 1{F} | N/A | Common` (only the first pipe segment is read)
//! - `Torch` (bare name, quantity 1)

use crate::decklist::classifier::is_metadata_line;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map_res, opt, rest},
    sequence::{terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

/// A card reference recovered from one line, not yet checked against a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub quantity: u32,
    pub raw_name: String,
}

impl ParsedEntry {
    pub fn new(quantity: u32, raw_name: impl Into<String>) -> Self {
        ParsedEntry {
            quantity,
            raw_name: raw_name.into(),
        }
    }
}

/// Outcome of parsing one line, distinguishing the ways a line yields no entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    Entry(ParsedEntry),
    /// Blank or metadata line
    Skipped,
    /// Recognized card line with quantity 0; contributes nothing
    ZeroQuantity(String),
    Unparseable,
}

/// Parse a line into a card entry
///
/// Returns `None` for blank, metadata, zero-quantity and unparseable lines.
pub fn parse_line(line: &str) -> Option<ParsedEntry> {
    match classify_line(line) {
        LineParse::Entry(entry) => Some(entry),
        _ => None,
    }
}

/// Parse a line, reporting why no entry was produced
pub fn classify_line(line: &str) -> LineParse {
    let line = line.trim();
    if line.is_empty() || is_metadata_line(line) {
        return LineParse::Skipped;
    }

    let candidate = match line.split_once('|') {
        Some((head, _)) => {
            let head = head.trim();
            if let Some(found) = match_quantity(head) {
                return into_parse(found);
            }
            head
        }
        None => line,
    };

    let cleaned = strip_parenthesized(candidate);
    let cleaned = cleaned.trim();

    if let Some(found) = match_quantity(cleaned) {
        return into_parse(found);
    }

    match cleaned.chars().next() {
        Some(c) if c.is_alphabetic() => LineParse::Entry(ParsedEntry::new(1, cleaned)),
        _ => LineParse::Unparseable,
    }
}

fn into_parse((quantity, name): (u32, &str)) -> LineParse {
    if quantity == 0 {
        LineParse::ZeroQuantity(name.to_string())
    } else {
        LineParse::Entry(ParsedEntry::new(quantity, name))
    }
}

/// Try the leading-quantity form, then the trailing-quantity form
fn match_quantity(text: &str) -> Option<(u32, &str)> {
    leading_quantity(text).or_else(|| trailing_quantity(text))
}

/// `4 Torch` or `4x Torch`
fn leading_quantity(text: &str) -> Option<(u32, &str)> {
    let (_, (quantity, name)) = leading_quantity_parser(text).ok()?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((quantity, name))
    }
}

fn leading_quantity_parser(input: &str) -> IResult<&str, (u32, &str)> {
    tuple((
        terminated(
            map_res(digit1, str::parse::<u32>),
            tuple((opt(char('x')), space1)),
        ),
        rest,
    ))(input)
}

/// One or more whitespace characters, including non-breaking spaces
pub(crate) fn space1(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

/// `Torch x4`, `Torch x 4`, `Torchx4`
fn trailing_quantity(text: &str) -> Option<(u32, &str)> {
    let head = text.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &text[head.len()..];
    if digits.is_empty() {
        return None;
    }

    let name = head.trim_end().strip_suffix('x')?.trim_end();
    if name.is_empty() {
        return None;
    }

    let quantity = digits.parse().ok()?;
    Some((quantity, name.trim()))
}

/// Remove every `( ... )` span (set/collector annotations)
///
/// An unclosed `(` is kept as text.
pub fn strip_parenthesized(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
