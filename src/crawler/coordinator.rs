//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop of a single run:
//! - Resolving the seed URL through its redirects
//! - Extracting findings from every fetched page
//! - Managing the breadth-first frontier within the seed's origin
//! - Pacing fetches and honouring cancellation
//! - Producing the final report

use crate::config::{validate, CrawlConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchedPage};
use crate::crawler::parser::{is_page_link, parse_page};
use crate::crawler::scheduler::Scheduler;
use crate::findings::ItemKind;
use crate::output::{CrawlReport, CrawlStatus};
use crate::state::{CrawlPhase, CrawlState};
use crate::url::{is_same_origin, parse_seed};
use crate::ReconError;
use chrono::Utc;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Drives one crawl run from a seed URL to a report
///
/// # Example
///
/// ```no_run
/// use reconcrawl::{Coordinator, CrawlConfig};
///
/// # async fn example() -> reconcrawl::Result<()> {
/// let config = CrawlConfig::new("https://example.com").with_recursive(true);
/// let report = Coordinator::new(config).run().await?;
/// for item in report.findings() {
///     println!("{} {}", item.kind, item.value);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Coordinator {
    config: CrawlConfig,
    cancel: CancellationToken,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    pub fn new(config: CrawlConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
            phase: CrawlPhase::Idle,
        }
    }

    /// Uses `token` to stop the run early
    ///
    /// Cancelling while the seed is being fetched makes `run` return
    /// `ReconError::Cancelled`; cancelling later returns the findings so far
    /// with `CrawlStatus::Cancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// The current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl
    ///
    /// This is the core crawling logic that:
    /// 1. Fetches the seed, following redirects to the final URL
    /// 2. Extracts findings from the seed page
    /// 3. In recursive mode, fetches same-origin links breadth-first until
    ///    the frontier is empty or `max_pages` pages have been fetched
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The run completed or was cancelled after the seed
    /// * `Err(ReconError)` - Invalid configuration, seed failure, or cancellation
    ///   before the seed resolved. A coordinator runs at most once; a second
    ///   call fails with `ReconError::InvalidTransition`.
    pub async fn run(&mut self) -> Result<CrawlReport, ReconError> {
        validate(&self.config)?;
        let seed = parse_seed(&self.config.seed)?;
        let client = build_http_client(&self.config)?;

        self.phase.transition(CrawlPhase::Resolving)?;
        let started_at = Utc::now();
        let mut state = CrawlState::new();
        let mut scheduler = Scheduler::new(self.config.delay);

        tracing::info!("Fetching {}", seed);
        scheduler.record_fetch();
        let page = match fetch_url(&client, &seed, &self.cancel).await {
            Ok(page) => page,
            Err(ReconError::Cancelled) => {
                self.phase.transition(CrawlPhase::Cancelled)?;
                return Err(ReconError::Cancelled);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch seed {}: {}", seed, e);
                self.phase.transition(CrawlPhase::Failed)?;
                return Err(e);
            }
        };

        let final_url = page.final_url.clone();
        if final_url != seed {
            tracing::info!("Redirected to {}", final_url);
        }

        state.mark_visited(&seed);
        state.mark_visited(&final_url);
        state.record_fetched();
        self.phase.transition(CrawlPhase::Crawling)?;
        self.process_page(&page, &final_url, &mut state);

        let status = if self.config.recursive {
            self.crawl_frontier(&client, &final_url, &mut state, &mut scheduler)
                .await
        } else {
            CrawlStatus::Completed
        };

        let phase = match status {
            CrawlStatus::Completed => CrawlPhase::Done,
            CrawlStatus::Cancelled => CrawlPhase::Cancelled,
        };
        self.phase.transition(phase)?;

        tracing::info!(
            "Crawl of {} {}: {} pages fetched, {} failed, {} findings",
            final_url,
            status,
            state.pages_fetched(),
            state.pages_failed(),
            state.results().len()
        );

        Ok(CrawlReport::from_state(
            seed.to_string(),
            final_url.to_string(),
            state,
            status,
            started_at,
        ))
    }

    /// Fetches frontier pages until the frontier or the page budget runs out
    ///
    /// Every attempted fetch spends budget, failed ones included, so a run
    /// never issues more than `max_pages` page requests.
    async fn crawl_frontier(
        &self,
        client: &Client,
        origin: &Url,
        state: &mut CrawlState,
        scheduler: &mut Scheduler,
    ) -> CrawlStatus {
        while state.pages_attempted() < self.config.max_pages {
            let Some(url) = state.next_url() else {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            };

            if state.is_visited(&url) {
                continue;
            }

            if scheduler.wait_turn(&self.cancel).await.is_err() {
                return CrawlStatus::Cancelled;
            }

            state.mark_visited(&url);
            tracing::info!("Searching: {}", url);
            scheduler.record_fetch();

            match fetch_url(client, &url, &self.cancel).await {
                Ok(page) => {
                    state.mark_visited(&page.final_url);
                    state.record_fetched();
                    self.process_page(&page, origin, state);
                }
                Err(ReconError::Cancelled) => return CrawlStatus::Cancelled,
                Err(e) => {
                    if self.config.verbose {
                        tracing::warn!("Skipping {}: {}", url, e);
                    } else {
                        tracing::debug!("Skipping {}: {}", url, e);
                    }
                    state.record_failed();
                }
            }
        }

        if state.pages_attempted() >= self.config.max_pages && !state.frontier_is_empty() {
            tracing::debug!(
                "Page budget of {} reached with {} URLs left in the frontier",
                self.config.max_pages,
                state.frontier_len()
            );
        }

        CrawlStatus::Completed
    }

    /// Extracts findings from a page and, in recursive mode, queues its links
    fn process_page(&self, page: &FetchedPage, origin: &Url, state: &mut CrawlState) {
        if !page.is_text() {
            tracing::debug!(
                "Not scanning {} ({})",
                page.final_url,
                page.content_type
            );
            return;
        }

        let parsed = parse_page(&page.body, &page.final_url, page.is_html());

        let emails = parsed
            .findings
            .iter()
            .filter(|item| item.kind == ItemKind::Email)
            .count();
        let phones = parsed.findings.len() - emails;
        let new = state.merge_findings(parsed.findings);
        tracing::info!(
            "Found {} emails, {} phone numbers on {} ({} new)",
            emails,
            phones,
            page.final_url,
            new
        );

        if !self.config.recursive {
            return;
        }

        let mut queued = 0;
        for link in parsed.links {
            if self.should_follow(&link, origin) && state.enqueue(link) {
                queued += 1;
            }
        }
        tracing::debug!("Queued {} new links from {}", queued, page.final_url);
    }

    /// Returns true if a discovered link belongs in the frontier
    fn should_follow(&self, link: &Url, origin: &Url) -> bool {
        if !is_same_origin(link, origin) || !is_page_link(link) {
            return false;
        }

        let lowered = link.as_str().to_ascii_lowercase();
        let excluded = self
            .config
            .exclude_patterns
            .iter()
            .any(|pattern| lowered.contains(&pattern.to_ascii_lowercase()));
        if excluded {
            tracing::trace!("Excluded by pattern: {}", link);
        }
        !excluded
    }
}
