//! Profile page crawling
//!
//! Visits each stub's profile page in roster order and hands the parsed
//! record to the checkpointer. The cancellation token is checked before
//! every stub, never in the middle of one.

use crate::crawler::fetcher::{FetchResult, PageSource};
use crate::crawler::parser::parse_detail_html;
use crate::model::Stub;
use crate::output::{Checkpointer, Phase, PhaseReport};
use crate::state::ItemState;
use crate::storage::ArtifactStore;
use crate::HoopstatError;
use tokio_util::sync::CancellationToken;

pub struct DetailCrawler {
    progress_every: usize,
}

impl Default for DetailCrawler {
    fn default() -> Self {
        Self { progress_every: 10 }
    }
}

impl DetailCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a progress line after this many stubs
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every.max(1);
        self
    }

    /// Visits every stub until done or cancelled
    ///
    /// Records go into `checkpointer`; the caller owns the final flush so it
    /// happens on every exit path.
    pub async fn run<S, K>(
        &self,
        source: &mut S,
        stubs: &[Stub],
        checkpointer: &mut Checkpointer<'_, K>,
        cancel: &CancellationToken,
    ) -> Result<PhaseReport, HoopstatError>
    where
        S: PageSource,
        K: ArtifactStore + ?Sized,
    {
        let mut report = PhaseReport::start(Phase::Details, stubs.len());
        let mut state = ItemState::Pending;
        let start_time = std::time::Instant::now();

        tracing::info!("Fetching {} profile page(s)", stubs.len());

        for (index, stub) in stubs.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    "Detail crawl cancelled after {} of {} profile(s)",
                    index,
                    stubs.len()
                );
                report.mark_cancelled();
                break;
            }

            state = self.visit(source, stub, checkpointer, state).await?;
            report.record(state);
            state = state.advance(ItemState::Pending)?;

            let processed = index + 1;
            if processed % self.progress_every == 0 {
                let rate = processed as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {}/{} profiles, {} record(s), {:.2} pages/sec",
                    processed,
                    stubs.len(),
                    checkpointer.len(),
                    rate
                );
            }
        }

        state.advance(ItemState::Done)?;
        report.outputs = checkpointer.len();
        report.finish();

        tracing::info!(
            "Detail crawl finished: {} record(s), {} skipped",
            report.accumulated,
            report.skipped
        );

        Ok(report)
    }

    /// Runs one stub from Pending to a terminal state
    async fn visit<S, K>(
        &self,
        source: &mut S,
        stub: &Stub,
        checkpointer: &mut Checkpointer<'_, K>,
        state: ItemState,
    ) -> Result<ItemState, HoopstatError>
    where
        S: PageSource,
        K: ArtifactStore + ?Sized,
    {
        let Some(url) = stub.profile_url.as_deref() else {
            tracing::warn!("No profile link for {}, skipping", stub.name);
            return state.advance(ItemState::Skipped);
        };

        let state = state.advance(ItemState::Fetching)?;
        tracing::debug!("Now processing: {}", url);

        match source.fetch(url).await {
            FetchResult::Success { body, .. } => {
                let state = state.advance(ItemState::Parsing)?;
                let record = parse_detail_html(&body).with_fallback_name(&stub.name);
                checkpointer.push(record)?;
                state.advance(ItemState::Accumulated)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Request failed for {} (status {})", url, status_code);
                state.advance(ItemState::Skipped)
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Request failed for {}: {}", url, error);
                state.advance(ItemState::Skipped)
            }
        }
    }
}
