//! Wayback Machine interactions
//!
//! Two operations against the public archive:
//! - [`status`]: does a URL already have a snapshot?
//! - [`submit`]: request a capture, with bounded retries and 429 backoff

mod status;
mod submit;

pub use status::{check_archived, SnapshotStatus};
pub use submit::{submit_url, SubmitOutcome, SubmitterConfig};
