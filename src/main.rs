//! reconcrawl main entry point
//!
//! This is the command-line interface for the reconcrawl contact finder.

use anyhow::Context;
use clap::Parser;
use reconcrawl::config::{
    delay_from_secs, load_config, timeout_from_secs, validate, CrawlConfig, FileConfig,
};
use reconcrawl::crawler::crawl_all;
use reconcrawl::output::{format_text_report, write_markdown_report, CrawlReport};
use reconcrawl::url::{ensure_scheme, parse_seed};
use reconcrawl::ReconError;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// reconcrawl: find contact details on a website
///
/// reconcrawl fetches each URL, follows its redirects to the final page, and
/// lists the email addresses and US phone numbers it finds. With
/// --recursive it also crawls same-site links, politely, up to a page budget.
#[derive(Parser, Debug)]
#[command(name = "reconcrawl")]
#[command(version)]
#[command(about = "Extract emails and phone numbers from websites", long_about = None)]
struct Cli {
    /// Website(s) to scan; https:// is assumed when no scheme is given
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Maximum number of pages to fetch per site [default: 50]
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Delay between requests in seconds [default: 1.0]
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Show every page as it is searched
    #[arg(short, long)]
    verbose: bool,

    /// Follow links to other pages on the same site
    #[arg(short, long)]
    recursive: bool,

    /// Path to a TOML configuration file supplying defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write a markdown report to this path
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Number of sites crawled at the same time
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,
}

/// Exit code for invalid arguments or configuration (clap uses the same)
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let file_config = match load_file_config(&cli) {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose || file_config.crawler.verbose);

    let configs = match build_configs(&cli, &file_config) {
        Ok(configs) => configs,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let results = crawl_all(configs, usize::from(cli.concurrency), cancel).await;
    let reports = print_results(results);

    let report_path = cli
        .report
        .clone()
        .or_else(|| file_config.output.report_path.as_ref().map(PathBuf::from));
    if let Some(path) = report_path {
        let written = write_markdown_report(&reports.completed, &path)
            .with_context(|| format!("failed to write report to {}", path.display()));
        match written {
            Ok(()) => println!("\nReport written to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if reports.any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Sets up the logging/tracing subscriber based on verbosity
///
/// `RUST_LOG` takes precedence. Logs go to stderr so stdout carries only
/// the results.
fn setup_logging(verbose: bool) {
    let default_filter = if verbose {
        "reconcrawl=debug"
    } else {
        "reconcrawl=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, or the built-in defaults when none is given
fn load_file_config(cli: &Cli) -> anyhow::Result<FileConfig> {
    match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(FileConfig::default()),
    }
}

/// Builds one run configuration per URL, command-line flags over file values
fn build_configs(cli: &Cli, file_config: &FileConfig) -> anyhow::Result<Vec<CrawlConfig>> {
    cli.urls
        .iter()
        .map(|url| -> anyhow::Result<CrawlConfig> {
            let seed = ensure_scheme(url);
            parse_seed(&seed).with_context(|| format!("invalid URL '{}'", url))?;

            let mut config = file_config.to_crawl_config(seed)?;
            if let Some(max_pages) = cli.max_pages {
                config.max_pages = max_pages;
            }
            if let Some(timeout) = cli.timeout {
                config.timeout = timeout_from_secs(timeout).context("invalid --timeout")?;
            }
            if let Some(delay) = cli.delay {
                config.delay = delay_from_secs(delay).context("invalid --delay")?;
            }
            config.recursive |= cli.recursive;
            config.verbose |= cli.verbose;

            validate(&config)?;
            Ok(config)
        })
        .collect()
}

/// Cancels the crawl on the first Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("\nCrawling interrupted by user, finishing up...");
                cancel.cancel();
            }
            Err(e) => tracing::warn!("Unable to listen for Ctrl-C: {}", e),
        }
    });
}

struct RunOutcome {
    completed: Vec<CrawlReport>,
    any_failed: bool,
}

/// Prints each run's summary to stdout and its failure, if any, to stderr
fn print_results(results: Vec<(String, Result<CrawlReport, ReconError>)>) -> RunOutcome {
    let mut outcome = RunOutcome {
        completed: Vec::new(),
        any_failed: false,
    };

    for (index, (seed, result)) in results.into_iter().enumerate() {
        if index > 0 {
            println!();
        }

        match result {
            Ok(report) => {
                print!("{}", format_text_report(&report));
                outcome.completed.push(report);
            }
            Err(ReconError::Cancelled) => {
                eprintln!("{}: interrupted before the page was fetched", seed);
            }
            Err(e) => {
                eprintln!("Error ({}): {}: {}", e.kind(), seed, e);
                outcome.any_failed = true;
            }
        }
    }

    outcome
}
