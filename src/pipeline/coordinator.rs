//! Run coordinator
//!
//! Composes the stores, the discovery workers, and the archive client into
//! one run:
//! 1. Load the frontier and sample a bounded subset of seeds
//! 2. Fan discovery out across the worker pool, fan results back in
//! 3. Submit (archive pipeline) or persist (record pipeline) the survivors
//! 4. Prune processed seeds from the frontier, success or not
//!
//! Each URL's archive status is checked exactly once per run, inside the
//! discovery filter; nothing re-validates before submit or write. An output
//! entry is therefore only guaranteed unarchived as of the run that
//! discovered it.

use crate::archive::{submit_url, SubmitOutcome, SubmitterConfig};
use crate::config::Config;
use crate::fetch::build_client;
use crate::github::GithubExpander;
use crate::pipeline::discovery::{discover_seed, DiscoveryOutcome};
use crate::pipeline::summary::RunSummary;
use crate::store::{FrontierStore, OutputStore};
use crate::{KiokuError, Result};
use chrono::Utc;
use rand::seq::SliceRandom;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Which pipeline shape a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Discover, then submit each missing URL for capture
    Archive,

    /// Discover, then append missing URLs to the output store
    Record,
}

/// Owns the clients and configuration for one or more runs
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    github: Arc<GithubExpander>,
}

impl Coordinator {
    /// Creates a coordinator from a validated configuration
    ///
    /// Reads the GitHub credential from the configured environment variable;
    /// its absence is fine and only limits repository expansion.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(Duration::from_secs(config.run.fetch_timeout_secs))?;

        let token = std::env::var(&config.github.token_env)
            .ok()
            .filter(|token| !token.is_empty());
        if token.is_some() {
            tracing::info!("GitHub credential loaded from ${}", config.github.token_env);
        } else {
            tracing::info!(
                "No GitHub credential in ${}; repository expansion limited to zip guesses",
                config.github.token_env
            );
        }

        let github = Arc::new(GithubExpander::new(
            client.clone(),
            config.github.api_base.clone(),
            token,
        ));

        Ok(Self {
            config: Arc::new(config),
            client,
            github,
        })
    }

    /// Executes one run in the given mode
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - The run finished; individual URL failures are
    ///   folded into the counters
    /// * `Err(KiokuError::RateLimitExceeded)` - Sustained throttling halted
    ///   the run; the frontier has still been pruned
    /// * `Err(_)` - Setup or store failure
    pub async fn run(&self, mode: RunMode) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();

        let frontier = FrontierStore::new(&self.config.stores.frontier_path);
        let seeds = frontier.load()?;

        if seeds.is_empty() {
            tracing::info!("Frontier is empty, nothing to do");
            return Ok(RunSummary::empty(started_at, start.elapsed()));
        }

        let sample = sample_seeds(&seeds, self.config.run.max_seeds_per_run as usize);
        tracing::info!(
            "Processing {} of {} frontier seeds",
            sample.len(),
            seeds.len()
        );

        let outcomes = self.discover_all(&sample, mode).await?;

        // Fan-in: merge per-seed results only after every worker is done
        let mut need: HashSet<String> = HashSet::new();
        let mut urls_discovered = 0;
        let mut already_archived = 0;
        let mut status_errors: Vec<String> = Vec::new();

        for outcome in &outcomes {
            urls_discovered += outcome.discovered;
            already_archived += outcome.already_archived;
            need.extend(outcome.needs_archive.iter().cloned());
            status_errors.extend(outcome.status_errors.iter().cloned());
        }
        status_errors.sort();
        status_errors.dedup();

        let mut archived = 0;
        let mut failed = 0;
        let mut recorded = 0;
        let mut fatal: Option<KiokuError> = None;

        match mode {
            RunMode::Archive => {
                let submitter = SubmitterConfig::from_config(&self.config.archive);
                let delay = Duration::from_millis(self.config.run.request_delay_ms);

                let mut queue: Vec<String> = need.into_iter().collect();
                queue.sort();

                let total = queue.len();
                for (index, url) in queue.iter().enumerate() {
                    tracing::info!("Submitting URL {} of {}: {}", index + 1, total, url);

                    match submit_url(&self.client, &submitter, url).await {
                        Ok(SubmitOutcome::Archived) => archived += 1,
                        Ok(SubmitOutcome::Failed) => failed += 1,
                        Err(e) => {
                            fatal = Some(e);
                            break;
                        }
                    }

                    // Polite pause between submissions
                    tokio::time::sleep(delay).await;
                }
            }

            RunMode::Record => {
                let output = OutputStore::new(&self.config.stores.output_path);
                recorded = output.append(&need)?;
                tracing::info!("Recorded {} new URLs needing archival", recorded);
            }
        }

        // Processed seeds leave the frontier no matter how their URLs fared
        let processed: HashSet<String> = sample.iter().cloned().collect();
        frontier.remove(&processed)?;

        if let Some(e) = fatal {
            return Err(e);
        }

        Ok(RunSummary {
            started_at,
            duration: start.elapsed(),
            seeds_processed: sample.len(),
            urls_discovered,
            already_archived,
            archived,
            failed,
            recorded,
            status_errors,
        })
    }

    /// Fans seed discovery out across the worker pool
    ///
    /// Workers are independent; a panicked worker loses its seed's results
    /// but never the run. The permit is acquired before spawning so at most
    /// `worker_count` discoveries are in flight.
    async fn discover_all(&self, sample: &[String], mode: RunMode) -> Result<Vec<DiscoveryOutcome>> {
        let semaphore = Arc::new(Semaphore::new(self.config.run.worker_count as usize));
        let mut join_set = JoinSet::new();
        let check_liveness = matches!(mode, RunMode::Record);

        for seed in sample {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| KiokuError::Worker(e.to_string()))?;

            let client = self.client.clone();
            let config = Arc::clone(&self.config);
            let github = Arc::clone(&self.github);
            let seed = seed.clone();

            join_set.spawn(async move {
                let _permit = permit;
                discover_seed(&client, &config, &github, &seed, check_liveness).await
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(outcome) => {
                    tracing::debug!("Finished discovery for {}", outcome.seed);
                    outcomes.push(outcome);
                }
                Err(e) => tracing::error!("Discovery worker failed: {}", e),
            }
        }

        Ok(outcomes)
    }
}

/// Draws a bounded random sample from the seed snapshot
fn sample_seeds(seeds: &[String], max: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    seeds
        .choose_multiple(&mut rng, max.min(seeds.len()))
        .cloned()
        .collect()
}
