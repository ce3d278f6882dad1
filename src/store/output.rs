//! Output store: URLs known to need archival
//!
//! One URL per line, written sorted for deterministic diffs. The set only
//! grows; entries are never removed once recorded. A missing file reads as
//! an empty set so the first run needs no setup.

use crate::store::{StoreError, StoreResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Persistent, append-only set of URLs needing archival
pub struct OutputStore {
    path: PathBuf,
}

impl OutputStore {
    /// Creates a store over the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads the existing output set
    ///
    /// # Returns
    ///
    /// * `Ok(HashSet<String>)` - Existing entries; empty if the file does not exist
    /// * `Err(StoreError)` - The file exists but could not be read
    pub fn load(&self) -> StoreResult<HashSet<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Appends new entries, de-duplicating against the existing set
    ///
    /// The file is rewritten as the sorted union of existing and new entries.
    ///
    /// # Arguments
    ///
    /// * `candidates` - URLs to record
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - How many entries were actually new
    /// * `Err(StoreError)` - Read or write failure
    pub fn append(&self, candidates: &HashSet<String>) -> StoreResult<usize> {
        let existing = self.load()?;

        let new_count = candidates.difference(&existing).count();
        if new_count == 0 {
            return Ok(0);
        }

        let mut all: Vec<&String> = existing.union(candidates).collect();
        all.sort();

        let mut body = String::new();
        for url in all {
            body.push_str(url);
            body.push('\n');
        }

        std::fs::write(&self.path, body).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(new_count)
    }
}
