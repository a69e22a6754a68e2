//! Immutable result of one crawl run

use crate::findings::{ItemKind, TrackingItem};
use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use std::fmt;

/// How a run that produced a report ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// Frontier exhausted, page budget reached, or non-recursive run finished
    Completed,

    /// Cancelled after the seed resolved; findings are partial
    Cancelled,
}

impl CrawlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed URL as resolved (scheme defaulted)
    seed: String,

    /// URL reached after following the seed's redirects
    final_url: String,

    /// Findings in discovery order
    findings: Vec<TrackingItem>,

    pages_fetched: u32,
    pages_failed: u32,
    status: CrawlStatus,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Creates a report from its parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seed: String,
        final_url: String,
        findings: Vec<TrackingItem>,
        pages_fetched: u32,
        pages_failed: u32,
        status: CrawlStatus,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seed,
            final_url,
            findings,
            pages_fetched,
            pages_failed,
            status,
            started_at,
            finished_at,
        }
    }

    /// Freezes the state of a run, stamping the finish time
    pub fn from_state(
        seed: String,
        final_url: String,
        state: CrawlState,
        status: CrawlStatus,
        started_at: DateTime<Utc>,
    ) -> Self {
        let pages_fetched = state.pages_fetched();
        let pages_failed = state.pages_failed();
        Self::new(
            seed,
            final_url,
            state.into_results().into_items(),
            pages_fetched,
            pages_failed,
            status,
            started_at,
            Utc::now(),
        )
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// All findings, emails and phones interleaved in discovery order
    pub fn findings(&self) -> &[TrackingItem] {
        &self.findings
    }

    /// Email findings in discovery order
    pub fn emails(&self) -> Vec<&TrackingItem> {
        self.of_kind(ItemKind::Email)
    }

    /// Phone findings in discovery order
    pub fn phones(&self) -> Vec<&TrackingItem> {
        self.of_kind(ItemKind::Phone)
    }

    fn of_kind(&self, kind: ItemKind) -> Vec<&TrackingItem> {
        self.findings.iter().filter(|item| item.kind == kind).collect()
    }

    /// Pages successfully fetched, the seed included
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Frontier pages whose fetch failed
    pub fn pages_failed(&self) -> u32 {
        self.pages_failed
    }

    pub fn status(&self) -> CrawlStatus {
        self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Returns true if the run produced no findings
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
