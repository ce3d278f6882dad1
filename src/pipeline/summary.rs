//! End-of-run reporting

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counters accumulated over one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Seeds sampled and processed this run
    pub seeds_processed: usize,

    /// Total URLs derived from all seeds
    pub urls_discovered: usize,

    /// URLs skipped because a snapshot already exists
    pub already_archived: usize,

    /// URLs successfully submitted for capture (archive pipeline)
    pub archived: usize,

    /// URLs that exhausted their submission attempts (archive pipeline)
    pub failed: usize,

    /// New URLs appended to the output store (record pipeline)
    pub recorded: usize,

    /// Distinct status-lookup failures, kept for inspection
    pub status_errors: Vec<String>,
}

impl RunSummary {
    /// A summary for a run that had nothing to do
    pub fn empty(started_at: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
            seeds_processed: 0,
            urls_discovered: 0,
            already_archived: 0,
            archived: 0,
            failed: 0,
            recorded: 0,
            status_errors: Vec::new(),
        }
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("\n=== Run Summary ===\n");
    println!("Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Duration: {:.1}s", summary.duration.as_secs_f64());
    println!();
    println!("Seeds processed: {}", summary.seeds_processed);
    println!("URLs discovered: {}", summary.urls_discovered);
    println!("Already archived: {}", summary.already_archived);
    println!("Newly archived: {}", summary.archived);
    println!("Failed to archive: {}", summary.failed);
    println!("Recorded for later: {}", summary.recorded);

    if !summary.status_errors.is_empty() {
        println!("\nStatus-check failures ({} distinct):", summary.status_errors.len());
        for error in &summary.status_errors {
            println!("  - {}", error);
        }
    }
}
