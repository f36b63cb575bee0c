//! Buffered, checkpointed accumulation of detail records
//!
//! Records are only durable once flushed. A flush always writes the whole
//! buffer, so flushing twice is harmless and the artifact on disk is always a
//! complete prefix of the crawl.

use crate::model::Record;
use crate::storage::{ArtifactStore, StorageResult};

pub struct Checkpointer<'a, K: ArtifactStore + ?Sized> {
    store: &'a K,
    buffer: Vec<Record>,
    /// Buffer length at the last successful flush
    flushed: usize,
    /// Flush after this many unflushed records; 0 disables
    every: usize,
}

impl<'a, K: ArtifactStore + ?Sized> Checkpointer<'a, K> {
    pub fn new(store: &'a K, every: usize) -> Self {
        Self {
            store,
            buffer: Vec::new(),
            flushed: 0,
            every,
        }
    }

    /// Appends a record, flushing if the checkpoint interval is reached
    pub fn push(&mut self, record: Record) -> StorageResult<()> {
        self.buffer.push(record);

        if self.every > 0 && self.pending() >= self.every {
            self.flush()?;
        }
        Ok(())
    }

    /// Writes the whole buffer to the store
    ///
    /// Returns the number of records now durable.
    pub fn flush(&mut self) -> StorageResult<usize> {
        self.store.write_records(&self.buffer)?;
        self.flushed = self.buffer.len();
        tracing::debug!("Checkpoint: {} record(s) saved", self.flushed);
        Ok(self.flushed)
    }

    /// Final flush on every exit path; consumes the checkpointer
    pub fn finish(mut self) -> StorageResult<Vec<Record>> {
        self.flush()?;
        Ok(self.buffer)
    }

    /// Records accumulated so far
    pub fn records(&self) -> &[Record] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Records not yet written by a flush
    pub fn pending(&self) -> usize {
        self.buffer.len() - self.flushed
    }
}
