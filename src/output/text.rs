//! Plain-text summary printed by the command-line tool

use crate::findings::TrackingItem;
use crate::output::{CrawlReport, CrawlStatus};

/// Formats a report for the terminal
///
/// Each finding is listed under its kind; a `Found on:` line follows it
/// when it was first seen somewhere other than the final URL. The last line
/// is always the `<N> emails, <M> phone numbers found across <P> pages`
/// summary.
pub fn format_text_report(report: &CrawlReport) -> String {
    let mut out = String::new();
    let emails = report.emails();
    let phones = report.phones();

    out.push_str(&format!("Fetched: {}\n", report.seed()));
    out.push_str(&format!("Final URL: {}\n", report.final_url()));
    if report.status() == CrawlStatus::Cancelled {
        out.push_str("Crawl cancelled, results are partial\n");
    }

    if report.is_empty() {
        out.push_str("\nNo email or phone found.\n");
    }

    if !emails.is_empty() {
        out.push_str(&format!("\nEmails ({}):\n", emails.len()));
        push_items(&mut out, &emails, report.final_url());
    }

    if !phones.is_empty() {
        out.push_str(&format!("\nPhone numbers ({}):\n", phones.len()));
        push_items(&mut out, &phones, report.final_url());
    }

    out.push_str(&format!("\n{}\n", summary_line(report)));
    out
}

/// The one-line totals of a report
pub fn summary_line(report: &CrawlReport) -> String {
    format!(
        "{} emails, {} phone numbers found across {} pages",
        report.emails().len(),
        report.phones().len(),
        report.pages_fetched()
    )
}

fn push_items(out: &mut String, items: &[&TrackingItem], final_url: &str) {
    for item in items {
        out.push_str(&format!("  - {}\n", item.value));
        if let Some(source) = item.source_url.as_deref() {
            if source != final_url {
                out.push_str(&format!("    Found on: {}\n", source));
            }
        }
    }
}
