//! Output module for accumulating results and reporting on a crawl
//!
//! This module handles:
//! - Buffering detail records and checkpointing them to the store
//! - Recording per-phase outcome counters and printing them

mod checkpoint;
pub mod report;

pub use checkpoint::Checkpointer;
pub use report::{print_report, Phase, PhaseReport};
