//! Hoopstat main entry point
//!
//! This is the command-line interface for the Hoopstat player catalog harvester.

use clap::{Parser, ValueEnum};
use hoopstat::config::{load_config_with_hash, Config};
use hoopstat::crawler::{run_crawl, CrawlPhases, RosterCrawler};
use hoopstat::output::print_report;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Hoopstat: a polite player catalog harvester
///
/// Hoopstat walks the alphabetic player index one letter at a time, then
/// visits every player's profile page, pacing each request and writing
/// results to JSON. Ctrl-C stops the crawl after the current page and saves
/// everything gathered so far.
#[derive(Parser, Debug)]
#[command(name = "hoopstat")]
#[command(version = "1.0.0")]
#[command(about = "A polite player catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Which phases to run
    #[arg(long, value_enum, default_value_t = PhaseArg::All)]
    phase: PhaseArg,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PhaseArg {
    /// Roster, then details
    All,
    /// Only build the roster artifact
    Roster,
    /// Only crawl profiles from an existing roster artifact
    Details,
}

impl From<PhaseArg> for CrawlPhases {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::All => CrawlPhases::All,
            PhaseArg::Roster => CrawlPhases::Roster,
            PhaseArg::Details => CrawlPhases::Details,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let phases = CrawlPhases::from(cli.phase);

    if cli.dry_run {
        handle_dry_run(&config, phases)?;
    } else {
        handle_crawl(config, phases).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hoopstat=info,warn"),
            1 => EnvFilter::new("hoopstat=debug,info"),
            2 => EnvFilter::new("hoopstat=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, phases: CrawlPhases) -> anyhow::Result<()> {
    println!("=== Hoopstat Dry Run ===\n");

    println!("Phases: {}", phases);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Request delay: {}ms", config.fetcher.request_delay_ms);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Max retries: {}", config.fetcher.max_retries);

    println!("\nOutput:");
    println!("  Roster: {}", config.output.roster_path);
    println!("  Details: {}", config.output.detail_path);
    println!("  Checkpoint every: {} record(s)", config.output.checkpoint_every);

    let crawler = RosterCrawler::new(&config.catalog)?;
    let sections = crawler.work_list();
    println!("\nIndex Sections ({}):", sections.len());
    for (letter, url) in sections {
        println!("  - {}: {}", letter, url);
    }

    println!("\n✓ Configuration is valid");
    if phases.includes_roster() {
        let secs = config.fetcher.request_delay().as_secs() * sections.len() as u64;
        println!(
            "✓ Roster phase would issue {} request(s), at least {}s of pacing",
            sections.len(),
            secs
        );
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, phases: CrawlPhases) -> anyhow::Result<()> {
    tracing::info!("Starting crawl (phases: {})", phases);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            interrupt.cancel();
        }
    });

    match run_crawl(config, phases, &cancel).await {
        Ok(summary) => {
            for report in summary.roster.iter().chain(summary.details.iter()) {
                print_report(report);
            }
            if summary.was_cancelled() {
                tracing::info!("Crawl interrupted; partial results saved");
            } else {
                tracing::info!("Crawl completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
