//! Run orchestration
//!
//! A run takes a bounded random sample of the frontier, fans seed discovery
//! out across a fixed-size worker pool, merges the results once every worker
//! has finished, and then either submits the surviving URLs for capture or
//! records them in the output store. Processed seeds leave the frontier
//! unconditionally at the end of the run.

mod coordinator;
mod discovery;
mod summary;

pub use coordinator::{Coordinator, RunMode};
pub use discovery::{discover_seed, DiscoveryOutcome};
pub use summary::{print_summary, RunSummary};
