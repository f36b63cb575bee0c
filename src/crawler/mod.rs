//! Crawler module for catalog fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Paced HTTP fetching with optional retries
//! - Index and profile page parsing
//! - The roster and detail phases
//! - Overall phase coordination

mod coordinator;
mod detail;
mod fetcher;
mod parser;
mod roster;

pub use coordinator::{run_crawl, Coordinator, CrawlPhases, RunSummary};
pub use detail::DetailCrawler;
pub use fetcher::{
    build_http_client, fetch_url, FetchPolicy, FetchResult, Pacer, PageSource, RateLimitedFetcher,
};
pub use parser::{parse_detail_html, parse_detail_page, parse_index_html, parse_index_page};
pub use roster::{RosterCrawler, RosterOutcome};

use crate::config::Config;
use crate::HoopstatError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the paced HTTP client
/// 2. Enumerate every index section and save the roster
/// 3. Fetch every profile in the roster, checkpointing records
/// 4. Flush whatever was accumulated, even when interrupted
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `cancel` - Token that stops the crawl at the next item boundary
///
/// # Returns
///
/// * `Ok(RunSummary)` - Reports for the phases that ran
/// * `Err(HoopstatError)` - Setup or persistence failed
pub async fn crawl(
    config: Config,
    cancel: &CancellationToken,
) -> Result<RunSummary, HoopstatError> {
    run_crawl(config, CrawlPhases::All, cancel).await
}
