//! Crawler coordinator - phase sequencing
//!
//! This module runs the two crawl phases in order:
//! - Roster enumeration, persisted once as the roster artifact
//! - Detail crawling over the persisted roster, checkpointed as it goes
//!
//! It owns the fetcher, the artifact store and the handling of cancellation
//! between phases.

use crate::config::Config;
use crate::crawler::detail::DetailCrawler;
use crate::crawler::fetcher::{FetchPolicy, PageSource, RateLimitedFetcher};
use crate::crawler::roster::RosterCrawler;
use crate::output::{Checkpointer, PhaseReport};
use crate::storage::{ArtifactStore, JsonFileStore};
use crate::HoopstatError;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Which phases a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlPhases {
    /// Roster, then details
    #[default]
    All,
    /// Only enumerate the index and write the roster artifact
    Roster,
    /// Only crawl profiles listed in an existing roster artifact
    Details,
}

impl CrawlPhases {
    pub fn includes_roster(&self) -> bool {
        matches!(self, Self::All | Self::Roster)
    }

    pub fn includes_details(&self) -> bool {
        matches!(self, Self::All | Self::Details)
    }
}

impl fmt::Display for CrawlPhases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Roster => write!(f, "roster"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Reports of the phases that ran
#[derive(Debug, Default)]
pub struct RunSummary {
    pub roster: Option<PhaseReport>,
    pub details: Option<PhaseReport>,
}

impl RunSummary {
    pub fn was_cancelled(&self) -> bool {
        self.roster.as_ref().is_some_and(|r| r.cancelled)
            || self.details.as_ref().is_some_and(|r| r.cancelled)
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<S, K> {
    config: Config,
    source: S,
    store: K,
}

impl Coordinator<RateLimitedFetcher, JsonFileStore> {
    /// Builds the live fetcher and the JSON store from configuration
    pub fn from_config(config: Config) -> Result<Self, HoopstatError> {
        let source = RateLimitedFetcher::new(FetchPolicy::from_config(&config.fetcher))?;
        let store = JsonFileStore::from_config(&config.output);
        Ok(Self::new(config, source, store))
    }
}

impl<S: PageSource, K: ArtifactStore> Coordinator<S, K> {
    pub fn new(config: Config, source: S, store: K) -> Self {
        Self {
            config,
            source,
            store,
        }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the requested phases in order
    ///
    /// A cancelled roster phase writes nothing and the detail phase is not
    /// started.
    pub async fn run(
        &mut self,
        phases: CrawlPhases,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, HoopstatError> {
        let mut summary = RunSummary::default();

        if phases.includes_roster() {
            let report = self.run_roster(cancel).await?;
            let cancelled = report.cancelled;
            summary.roster = Some(report);
            if cancelled {
                return Ok(summary);
            }
        }

        if phases.includes_details() {
            summary.details = Some(self.run_details(cancel).await?);
        }

        Ok(summary)
    }

    /// Enumerates the index and persists the roster artifact
    pub async fn run_roster(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<PhaseReport, HoopstatError> {
        let crawler = RosterCrawler::new(&self.config.catalog)?;
        let outcome = crawler.run(&mut self.source, cancel).await?;

        if outcome.report.cancelled {
            tracing::warn!(
                "Roster enumeration was interrupted; roster artifact left untouched"
            );
        } else {
            self.store.write_roster(&outcome.stubs)?;
            tracing::info!(
                "Saved {} stub(s) to {}",
                outcome.stubs.len(),
                self.config.output.roster_path
            );
        }

        Ok(outcome.report)
    }

    /// Crawls every profile in the persisted roster
    ///
    /// Accumulated records are flushed on every exit path, including errors
    /// raised mid-crawl and cancellation.
    pub async fn run_details(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<PhaseReport, HoopstatError> {
        let stubs = self.store.read_roster()?;
        tracing::info!(
            "Loaded {} stub(s) from {}",
            stubs.len(),
            self.config.output.roster_path
        );

        let mut checkpointer = Checkpointer::new(&self.store, self.config.output.checkpoint_every);
        let outcome = DetailCrawler::new()
            .run(&mut self.source, &stubs, &mut checkpointer, cancel)
            .await;

        let flushed = checkpointer.finish();
        let report = outcome?;
        let records = flushed?;

        tracing::info!(
            "Saved {} record(s) to {}",
            records.len(),
            self.config.output.detail_path
        );

        Ok(report)
    }
}

/// Runs the requested phases against the live catalog
///
/// # Example
///
/// ```no_run
/// use hoopstat::config::Config;
/// use hoopstat::crawler::{run_crawl, CrawlPhases};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default(), CrawlPhases::All, &CancellationToken::new()).await?;
/// println!("cancelled: {}", summary.was_cancelled());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    phases: CrawlPhases,
    cancel: &CancellationToken,
) -> Result<RunSummary, HoopstatError> {
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run(phases, cancel).await
}
