//! Output module for crawl results
//!
//! This module handles:
//! - The immutable `CrawlReport` produced by every run
//! - The plain-text summary printed by the CLI
//! - Markdown reports written to disk

mod markdown;
mod report;
mod text;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{CrawlReport, CrawlStatus};
pub use text::{format_text_report, summary_line};

use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
