//! Mutable state of a single crawl run

use crate::findings::{ResultStore, TrackingItem};
use crate::url::page_key;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Visited set, breadth-first frontier, counters and findings for one run
///
/// Created fresh for every run and owned by the coordinator; nothing here
/// outlives the run.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Page keys of every URL fetched or attempted
    visited: HashSet<String>,

    /// Page keys currently waiting in the frontier
    queued: HashSet<String>,

    /// Pending URLs in discovery order
    frontier: VecDeque<Url>,

    /// Pages successfully fetched, the seed included
    pages_fetched: u32,

    /// Frontier pages whose fetch failed
    pages_failed: u32,

    /// Findings in discovery order
    results: ResultStore,
}

impl CrawlState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL's page key as visited
    ///
    /// Returns true if the key was not visited before.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(page_key(url))
    }

    /// Returns true if a URL with the same page key was visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&page_key(url))
    }

    /// Adds a URL to the back of the frontier
    ///
    /// URLs already visited or already waiting are ignored. Returns true if
    /// the URL was enqueued.
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = page_key(&url);
        if self.visited.contains(&key) || !self.queued.insert(key) {
            return false;
        }
        self.frontier.push_back(url);
        true
    }

    /// Takes the oldest URL from the frontier
    pub fn next_url(&mut self) -> Option<Url> {
        let url = self.frontier.pop_front()?;
        self.queued.remove(&page_key(&url));
        Some(url)
    }

    /// Number of URLs waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns true if there is nothing left to fetch
    pub fn frontier_is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Counts a successful fetch
    pub fn record_fetched(&mut self) {
        self.pages_fetched += 1;
    }

    /// Counts a failed fetch
    pub fn record_failed(&mut self) {
        self.pages_failed += 1;
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn pages_failed(&self) -> u32 {
        self.pages_failed
    }

    /// Fetches attempted so far, successful or not
    pub fn pages_attempted(&self) -> u32 {
        self.pages_fetched + self.pages_failed
    }

    /// Merges page findings into the run's results
    ///
    /// Returns how many of them were new to the run.
    pub fn merge_findings<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = TrackingItem>,
    {
        self.results.extend(items)
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Consumes the state, returning the findings
    pub fn into_results(self) -> ResultStore {
        self.results
    }
}
