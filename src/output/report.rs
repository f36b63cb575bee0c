//! Per-phase run report
//!
//! Counts what happened to each work item of a phase and prints a short
//! summary once the phase ends.

use crate::state::ItemState;
use chrono::{DateTime, Utc};
use std::fmt;

/// The two crawl phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Roster,
    Details,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster => write!(f, "roster"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Outcome counters for one phase
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: Phase,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Work items in the phase's work list
    pub planned: usize,

    /// Items that reached Accumulated
    pub accumulated: usize,

    /// Items that reached Skipped
    pub skipped: usize,

    /// Output entries produced (stubs or records)
    pub outputs: usize,

    /// Whether the phase stopped on the cancellation token
    pub cancelled: bool,
}

impl PhaseReport {
    pub fn start(phase: Phase, planned: usize) -> Self {
        Self {
            phase,
            started_at: Utc::now(),
            finished_at: None,
            planned,
            accumulated: 0,
            skipped: 0,
            outputs: 0,
            cancelled: false,
        }
    }

    /// Counts an item that reached a terminal state
    pub fn record(&mut self, state: ItemState) {
        match state {
            ItemState::Accumulated => self.accumulated += 1,
            ItemState::Skipped => self.skipped += 1,
            _ => {}
        }
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Items that were handled, one way or the other
    pub fn processed(&self) -> usize {
        self.accumulated + self.skipped
    }

    /// Items never reached because the phase was cancelled
    pub fn remaining(&self) -> usize {
        self.planned.saturating_sub(self.processed())
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints a phase report to stdout
pub fn print_report(report: &PhaseReport) {
    println!("=== Phase: {} ===", report.phase);
    println!("  Started:     {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("  Finished:    {}", finished.to_rfc3339());
    }
    if let Some(secs) = report.duration_seconds() {
        println!("  Duration:    {}s", secs);
    }
    println!("  Planned:     {}", report.planned);
    println!("  Accumulated: {}", report.accumulated);
    println!("  Skipped:     {}", report.skipped);
    println!("  Outputs:     {}", report.outputs);
    if report.cancelled {
        println!("  Cancelled with {} item(s) not processed", report.remaining());
    }
}
