//! Configuration loading and validation
//!
//! Configuration is a TOML file parsed into [`Config`], validated before use,
//! and hashed so a run can be traced back to the exact file that produced it.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{ArchiveConfig, Config, GithubConfig, PatternRule, RunConfig, StoreConfig};
pub use validation::validate;
