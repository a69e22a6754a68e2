//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with manual redirect handling
//! - HTML parsing, text and link extraction
//! - Politeness pacing between fetches
//! - Overall crawl coordination, for one seed or many

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, FetchedPage, MAX_REDIRECTS};
pub use parser::{
    discover_links, extract_title, is_page_link, parse_page, resolve_link, visible_text,
    ParsedPage,
};
pub use scheduler::Scheduler;

use crate::config::CrawlConfig;
use crate::output::CrawlReport;
use crate::ReconError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for crawling a single seed. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Resolve the seed through its redirects
/// 4. Extract findings and, when recursive, follow same-origin links
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(ReconError)` - Crawl failed
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport, ReconError> {
    let mut coordinator = Coordinator::new(config);
    coordinator.run().await
}

/// Crawls several seeds concurrently
///
/// At most `concurrency` runs are in flight at once; each run is fully
/// independent. Results come back in the order of `configs`, keyed by the
/// seed as given.
///
/// # Arguments
///
/// * `configs` - One configuration per seed
/// * `concurrency` - Maximum number of simultaneous runs (at least 1)
/// * `cancel` - Shared cancellation token for every run
pub async fn crawl_all(
    configs: Vec<CrawlConfig>,
    concurrency: usize,
    cancel: CancellationToken,
) -> Vec<(String, Result<CrawlReport, ReconError>)> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, config) in configs.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();

        tasks.spawn(async move {
            let seed = config.seed.clone();
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => {
                    let mut coordinator = Coordinator::new(config).with_cancellation(cancel);
                    coordinator.run().await
                }
                Err(_) => Err(ReconError::Cancelled),
            };
            (index, seed, result)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => tracing::error!("Crawl task failed to complete: {}", e),
        }
    }

    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, seed, result)| (seed, result))
        .collect()
}
