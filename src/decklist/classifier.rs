//! Metadata line detection
//!
//! Decides whether a line of deck text is a header, separator or section
//! label rather than a card entry. This is a layered heuristic, evaluated in
//! order; the first rule that matches wins.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, opt},
    sequence::{delimited, tuple},
    IResult,
};

/// Separator tokens that mark a line as decoration
pub const SEPARATORS: [&str; 3] = ["===", "---", "***"];

/// Upper-cased keywords that mark section headers and notes
pub const METADATA_KEYWORDS: [&str; 14] = [
    "DECK",
    "MARKET",
    "STRATEGY",
    "HOW TO PLAY",
    "COMO JOGAR",
    "UNITS",
    "SPELLS",
    "POWERS",
    "WEAPONS",
    "RELICS",
    "MAIN",
    "SIDEBOARD",
    "FORMAT",
    "ESTRATÉGIA",
];

/// Check whether a line is metadata rather than a card entry
///
/// A pipe suppresses the keyword rule only: pipe-delimited card dumps like
/// `4x Deck Raider | 2{F} | 2/1 | Common` would otherwise be dropped.
pub fn is_metadata_line(line: &str) -> bool {
    if SEPARATORS.iter().any(|sep| line.contains(sep)) {
        return true;
    }

    let trimmed = line.trim();
    if trimmed.ends_with(':') {
        return true;
    }

    if is_section_header(trimmed) {
        return true;
    }

    if !line.contains('|') {
        let upper = line.to_uppercase();
        if METADATA_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
            return true;
        }
    }

    false
}

/// Check whether a metadata line opens the market section
///
/// The line's only word must be `MARKET` (any case): `MARKET:`,
/// `=== MARKET ===`, `MARKET (5):` and the export separator all qualify,
/// while a header that merely mentions the market does not.
pub fn is_market_marker(line: &str) -> bool {
    let mut words = line
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty());
    matches!(
        (words.next(), words.next()),
        (Some(word), None) if word.eq_ignore_ascii_case("MARKET")
    )
}

/// "UNITS (28)" / "SPELLS (12):": capitals and a parenthesized count, colon optional
fn is_section_header(line: &str) -> bool {
    section_header(line).is_ok()
}

fn section_header(input: &str) -> IResult<&str, &str> {
    let (rest, (label, _count, _, _, _)) = all_consuming(tuple((
        take_while1(|c: char| c.is_ascii_uppercase() || c.is_whitespace()),
        delimited(char('('), digit1, char(')')),
        multispace0,
        opt(char(':')),
        multispace0,
    )))(input)?;
    Ok((rest, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_lines() {
        assert!(is_metadata_line("=== DECK ==="));
        assert!(is_metadata_line("--------------MARKET---------------"));
        assert!(is_metadata_line("*** notes ***"));
    }

    #[test]
    fn test_trailing_colon() {
        assert!(is_metadata_line("MARKET:"));
        assert!(is_metadata_line("Early game plan:   "));
    }

    #[test]
    fn test_section_header_shape() {
        assert!(is_metadata_line("UNITS (28):"));
        assert!(is_metadata_line("ATTACKERS (12)"));
        assert!(is_section_header("A B (3) :"));
        assert!(!is_section_header("Units (28)"));
        assert!(!is_section_header("(28)"));
        assert!(!is_section_header("UNITS (x)"));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert!(is_metadata_line("Main deck"));
        assert!(is_metadata_line("How to play this list"));
        assert!(is_metadata_line("Sideboard"));
    }

    #[test]
    fn test_pipe_suppresses_keywords() {
        assert!(!is_metadata_line("4x Deck Raider | 2{F} | 2/1 | Common"));
        assert!(is_metadata_line("4x Deck Raider"));
        // separators still apply to pipe lines
        assert!(is_metadata_line("4x Torch | --- | Common"));
    }

    #[test]
    fn test_card_lines_are_not_metadata() {
        assert!(!is_metadata_line("4x Torch"));
        assert!(!is_metadata_line("Torch x4"));
        assert!(!is_metadata_line("4 Seek Power (Set1 #408)"));
        assert!(!is_metadata_line(""));
    }

    #[test]
    fn test_market_marker() {
        assert!(is_market_marker("MARKET:"));
        assert!(is_market_marker("Market"));
        assert!(is_market_marker("=== MARKET ==="));
        assert!(is_market_marker("MARKET (5):"));
        assert!(is_market_marker("--------------MARKET---------------"));
        assert!(!is_market_marker("=== DECK (75 cards, no market) ==="));
        assert!(!is_market_marker("Market strategy:"));
        assert!(!is_market_marker("MARKETS:"));
        assert!(!is_market_marker(""));
    }

    #[test]
    fn test_keyword_substring_false_positive() {
        // Known surface: card names containing a keyword read as metadata
        // unless they arrive in pipe format.
        assert!(is_metadata_line("4 Formation Breaker"));
        assert!(is_metadata_line("2 Mainspring Golem"));
    }
}
