//! Markdown report generation
//!
//! This module generates a human-readable markdown report of one or more
//! crawl runs, including run metadata, counters, and finding tables.

use crate::findings::TrackingItem;
use crate::output::text::summary_line;
use crate::output::{CrawlReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of the given runs
///
/// # Arguments
///
/// * `reports` - The finished runs, in the order they should appear
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(reports: &[CrawlReport], output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(reports);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::debug!("Wrote markdown report to {}", output_path.display());
    Ok(())
}

/// Formats crawl runs as markdown
///
/// # Arguments
///
/// * `reports` - The finished runs
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(reports: &[CrawlReport]) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Reconcrawl Report\n\n");

    if reports.is_empty() {
        md.push_str("No runs completed.\n");
        return md;
    }

    for report in reports {
        format_run(&mut md, report);
    }

    md
}

fn format_run(md: &mut String, report: &CrawlReport) {
    md.push_str(&format!("## {}\n\n", report.final_url()));

    // Run metadata
    md.push_str(&format!("- **Seed**: {}\n", report.seed()));
    md.push_str(&format!("- **Final URL**: {}\n", report.final_url()));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at().to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at().to_rfc3339()
    ));
    let millis = report.duration().num_milliseconds();
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        millis as f64 / 1000.0
    ));
    md.push_str(&format!("- **Status**: {}\n", report.status()));
    md.push_str(&format!("- **Pages Fetched**: {}\n", report.pages_fetched()));
    md.push_str(&format!("- **Pages Failed**: {}\n\n", report.pages_failed()));

    md.push_str(&format!("{}\n\n", summary_line(report)));

    let emails = report.emails();
    if !emails.is_empty() {
        md.push_str("### Emails\n\n");
        format_table(md, &emails);
    }

    let phones = report.phones();
    if !phones.is_empty() {
        md.push_str("### Phone Numbers\n\n");
        format_table(md, &phones);
    }
}

fn format_table(md: &mut String, items: &[&TrackingItem]) {
    md.push_str("| Value | Found On |\n");
    md.push_str("|-------|----------|\n");
    for item in items {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&item.value),
            escape_cell(item.source_url.as_deref().unwrap_or("-"))
        ));
    }
    md.push('\n');
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
