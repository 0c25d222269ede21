//! Strongly-typed wrappers for catalog concepts
//!
//! Card names are compared case-insensitively everywhere the catalog is
//! involved, so the lookup key is kept separate from the display name.

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card name as printed on the card (e.g. "Fire Sigil")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Key used for case-insensitive catalog lookups
    pub fn lookup_key(&self) -> String {
        lookup_key(&self.0)
    }
}

/// Normalize a card name for catalog lookup
///
/// Trims, lowercases and folds accented letters to ASCII so that
/// "Étude" and "etude" resolve to the same record.
pub fn lookup_key(name: &str) -> String {
    deunicode(name.trim()).to_lowercase()
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_is_case_insensitive() {
        assert_eq!(CardName::new("Fire Sigil").lookup_key(), "fire sigil");
        assert_eq!(lookup_key("  FIRE SIGIL "), "fire sigil");
    }

    #[test]
    fn test_lookup_key_folds_accents() {
        assert_eq!(lookup_key("Étude"), lookup_key("etude"));
    }
}
