//! Sumi-Sitemap main entry point
//!
//! This is the command-line interface for the Sumi-Sitemap site mapper.

use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use sumi_sitemap::config::{load_config, Config};
use sumi_sitemap::crawler::{Coordinator, ProgressCallback, ROOT_PATH};
use sumi_sitemap::output::{collect_statistics, print_statistics, render_sitemap};
use sumi_sitemap::{validate_domain, ConfigError, SitemapError};
use tracing_subscriber::EnvFilter;

/// Exit code when the crawl itself fails
const EXIT_CRAWL_FAILED: u8 = 1;

/// Exit code for a bad domain argument or config file
const EXIT_USAGE: u8 = 2;

/// Exit code after Ctrl-C, following the 128 + SIGINT convention
const EXIT_CANCELLED: u8 = 130;

/// Width the progress line is padded to, so shorter paths overwrite longer ones
const PROGRESS_WIDTH: usize = 60;

/// Sumi-Sitemap: maps every page of a website
///
/// Crawls all pages reachable from the root of DOMAIN without leaving it,
/// then prints the discovered link structure as an indented sitemap.
#[derive(Parser, Debug)]
#[command(name = "sumi-sitemap")]
#[command(version)]
#[command(about = "Maps every page of a website", long_about = None)]
struct Cli {
    /// Domain to crawl, without scheme (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// TOML file tuning concurrency, timeouts and frontier order
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress and non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, domain) = match prepare(&cli) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match handle_crawl(config, &domain, cli.quiet).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(SitemapError::Cancelled) => {
            eprintln!("\ncrawl cancelled; no sitemap produced");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            eprintln!("\nerror: {}", e);
            ExitCode::from(EXIT_CRAWL_FAILED)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the progress line and the sitemap.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sitemap=warn,error"),
            1 => EnvFilter::new("sumi_sitemap=info,warn"),
            2 => EnvFilter::new("sumi_sitemap=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Validates the domain argument and loads the configuration
fn prepare(cli: &Cli) -> Result<(Config, String), ConfigError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let domain = validate_domain(&cli.domain, config.crawler.scheme)?;

    Ok((config, domain))
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, domain: &str, quiet: bool) -> Result<(), SitemapError> {
    let mut coordinator = Coordinator::from_config(&config)?;
    if !quiet {
        coordinator = coordinator.with_progress_callback(progress_line());
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let started_at = Utc::now();
    let start = Instant::now();
    let sitemap = coordinator.crawl_until(domain, ROOT_PATH, shutdown).await?;
    let stats = collect_statistics(&sitemap, started_at, start.elapsed());

    for page in sitemap.failed_pages() {
        tracing::info!(
            "{} ({}): {}",
            page.path(),
            page.state(),
            page.error().unwrap_or("no details")
        );
    }

    if !quiet {
        // Finish the progress line
        println!();
        print_statistics(&stats);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render_sitemap(&sitemap, domain).as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Overwrites a single stdout line with the page being fetched
fn progress_line() -> ProgressCallback {
    Arc::new(|path: &str| {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(
            stdout,
            "\rFetching: {:<width$}",
            path,
            width = PROGRESS_WIDTH
        );
        let _ = stdout.flush();
    })
}
