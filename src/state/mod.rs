//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: The lifecycle of one engine run (idle, resolving the seed, crawling, terminal)
//! - `CrawlState`: The visited set, breadth-first frontier, counters and findings of one run

mod crawl_state;
mod phase;

// Re-export main types
pub use crawl_state::CrawlState;
pub use phase::CrawlPhase;
