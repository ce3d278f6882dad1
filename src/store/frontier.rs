//! Frontier store: pending seed URLs
//!
//! One URL per line. A run loads the whole file as its seed snapshot and,
//! at the end, rewrites the file with processed entries excluded. Removal is
//! by exact-string match against the trimmed line; an on-disk entry whose
//! form differs from the processed string survives the prune. Unmatched
//! lines keep their original order and bytes.

use crate::store::{StoreError, StoreResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Persistent set of pending seed URLs
pub struct FrontierStore {
    path: PathBuf,
}

impl FrontierStore {
    /// Creates a store over the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads all pending seeds
    ///
    /// Blank lines are skipped and duplicate lines fold into one entry,
    /// keeping first-seen order so a sampled subset stays reproducible from
    /// the file content.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - The seed snapshot for this run
    /// * `Err(StoreError)` - The file could not be read
    pub fn load(&self) -> StoreResult<Vec<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut seen = HashSet::new();
        let mut seeds = Vec::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_string()) {
                seeds.push(trimmed.to_string());
            }
        }

        Ok(seeds)
    }

    /// Rewrites the file with processed entries excluded
    ///
    /// Processed seeds are removed whether or not their URLs archived; a seed
    /// that was picked up this run never comes back.
    ///
    /// # Arguments
    ///
    /// * `processed` - Exact seed strings to drop
    pub fn remove(&self, processed: &HashSet<String>) -> StoreResult<()> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let remaining: Vec<&str> = content
            .lines()
            .filter(|line| !processed.contains(line.trim()))
            .collect();

        let mut body = remaining.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }

        std::fs::write(&self.path, body).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}
