//! Batch validation of deck files
//!
//! Deck files under a directory are discovered with a parallel walk and
//! validated on the rayon pool. Each file gets its own aggregate, so results
//! don't depend on scheduling; they are returned sorted by path.

use crate::decklist::{validate_text, RuleConfig, ValidationReport};
use crate::{DeckError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// File extensions treated as deck lists
pub const DECK_EXTENSIONS: [&str; 2] = ["txt", "deck"];

/// Outcome for one deck file
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    /// `Err` only when the file couldn't be read or the rules are malformed
    pub result: Result<ValidationReport>,
}

impl BatchEntry {
    pub fn is_valid(&self) -> bool {
        matches!(&self.result, Ok(report) if report.is_valid())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Files that couldn't be read
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = BatchSummary {
            total: entries.len(),
            ..Default::default()
        };
        for entry in entries {
            match &entry.result {
                Ok(report) if report.is_valid() => summary.valid += 1,
                Ok(_) => summary.invalid += 1,
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }
}

fn is_deck_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DECK_EXTENSIONS.contains(&ext))
}

/// Find every deck file under `dir`, sorted by path
pub fn find_deck_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DeckError::InvalidArgument(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in jwalk::WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.map_err(|e| {
            DeckError::InvalidArgument(format!("Error walking {}: {e}", dir.display()))
        })?;
        if entry.file_type().is_file() && is_deck_file(&entry.path()) {
            paths.push(entry.path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Validate one deck file
pub fn validate_file(path: &Path, rules: &RuleConfig) -> Result<ValidationReport> {
    let text = std::fs::read_to_string(path)?;
    validate_text(&text, rules)
}

/// Validate every deck file under `dir` in parallel
pub fn validate_directory(dir: &Path, rules: &RuleConfig) -> Result<Vec<BatchEntry>> {
    rules.check()?;
    let paths = find_deck_files(dir)?;

    let mut entries: Vec<BatchEntry> = paths
        .into_par_iter()
        .map(|path| {
            let result = validate_file(&path, rules);
            BatchEntry { path, result }
        })
        .collect();

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// `validate_directory` off the async runtime's worker threads
pub async fn validate_directory_async(dir: PathBuf, rules: RuleConfig) -> Result<Vec<BatchEntry>> {
    tokio::task::spawn_blocking(move || validate_directory(&dir, &rules)).await?
}
