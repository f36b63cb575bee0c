//! Index enumeration
//!
//! Walks one index page per section letter, in order, and collects the
//! stubs found on each. A section that fails to load is skipped; the rest of
//! the alphabet still runs.

use crate::config::CatalogConfig;
use crate::crawler::fetcher::{FetchResult, PageSource};
use crate::crawler::parser::parse_index_html;
use crate::model::Stub;
use crate::output::{Phase, PhaseReport};
use crate::state::ItemState;
use crate::url::{index_urls, parse_base_url};
use crate::HoopstatError;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Stubs gathered by a roster run, in section order
#[derive(Debug)]
pub struct RosterOutcome {
    pub stubs: Vec<Stub>,
    pub report: PhaseReport,
}

pub struct RosterCrawler {
    base_url: Url,
    sections: Vec<(char, Url)>,
}

impl RosterCrawler {
    pub fn new(catalog: &CatalogConfig) -> Result<Self, HoopstatError> {
        Ok(Self {
            base_url: parse_base_url(&catalog.base_url)?,
            sections: index_urls(catalog)?,
        })
    }

    /// Index pages to visit, in order
    pub fn work_list(&self) -> &[(char, Url)] {
        &self.sections
    }

    /// Fetches and parses every section until done or cancelled
    pub async fn run<S: PageSource>(
        &self,
        source: &mut S,
        cancel: &CancellationToken,
    ) -> Result<RosterOutcome, HoopstatError> {
        let mut report = PhaseReport::start(Phase::Roster, self.sections.len());
        let mut stubs = Vec::new();
        let mut state = ItemState::Pending;

        tracing::info!("Enumerating {} index section(s)", self.sections.len());

        for (letter, url) in &self.sections {
            if cancel.is_cancelled() {
                tracing::warn!("Roster enumeration cancelled before section '{}'", letter);
                report.mark_cancelled();
                break;
            }

            state = state.advance(ItemState::Fetching)?;
            tracing::info!("Fetching section '{}': {}", letter, url);

            match source.fetch(url.as_str()).await {
                FetchResult::Success { body, .. } => {
                    state = state.advance(ItemState::Parsing)?;
                    let found = parse_index_html(&body, &self.base_url);
                    tracing::info!("Section '{}': {} player(s)", letter, found.len());
                    stubs.extend(found);
                    state = state.advance(ItemState::Accumulated)?;
                }
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("Request failed for {} (status {})", url, status_code);
                    state = state.advance(ItemState::Skipped)?;
                }
                FetchResult::NetworkError { error, .. } => {
                    tracing::warn!("Request failed for {}: {}", url, error);
                    state = state.advance(ItemState::Skipped)?;
                }
            }

            report.record(state);
            state = state.advance(ItemState::Pending)?;
        }

        state.advance(ItemState::Done)?;
        report.outputs = stubs.len();
        report.finish();

        tracing::info!(
            "Roster enumeration finished: {} stub(s), {} section(s) skipped",
            stubs.len(),
            report.skipped
        );

        Ok(RosterOutcome { stubs, report })
    }
}
