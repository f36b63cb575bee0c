//! Storage traits and error types
//!
//! This module defines the trait interface for artifact stores and
//! associated error types.

use crate::model::{Record, Stub};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable home of the two crawl artifacts
///
/// Every write replaces the whole artifact; a reader never observes a
/// half-written file.
pub trait ArtifactStore {
    /// Replaces the roster artifact
    fn write_roster(&self, stubs: &[Stub]) -> StorageResult<()>;

    /// Reads the roster artifact back
    fn read_roster(&self) -> StorageResult<Vec<Stub>>;

    /// Replaces the detail artifact
    fn write_records(&self, records: &[Record]) -> StorageResult<()>;

    /// Reads the detail artifact back
    fn read_records(&self) -> StorageResult<Vec<Record>>;
}
