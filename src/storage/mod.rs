//! Storage module for persisting crawl artifacts
//!
//! This module handles the two durable outputs of a crawl:
//! - The roster artifact, written once after index enumeration
//! - The detail artifact, rewritten at every checkpoint
//!
//! Both are JSON arrays replaced atomically on each write.

mod json;
mod traits;

pub use json::JsonFileStore;
pub use traits::{ArtifactStore, StorageError, StorageResult};
