//! Persisted URL sets
//!
//! Both stores are newline-delimited URL files with whole-set-swap
//! semantics: read fully at run start, rewritten once at run end. There is
//! exactly one writer per run and no locking; running two processes against
//! the same files is undefined behavior.

mod frontier;
mod output;

pub use frontier::FrontierStore;
pub use output::OutputStore;

use thiserror::Error;

/// Store-specific errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
