//! In-memory sink recording written documents.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{SinkError, SnapshotDocument, SnapshotSink};

/// Keeps the latest document per path and counts writes.
///
/// Can be switched into a failing mode to exercise persistence errors.
#[derive(Default)]
pub struct MemorySink {
    documents: RwLock<HashMap<PathBuf, SnapshotDocument>>,
    writes: RwLock<usize>,
    failure: RwLock<Option<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<SnapshotDocument> {
        self.documents.read().get(path).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }

    /// Fail every following write with an I/O error carrying `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.write() = None;
    }
}

#[async_trait]
impl SnapshotSink for MemorySink {
    async fn write(&self, path: &Path, document: &SnapshotDocument) -> Result<(), SinkError> {
        let failure = self.failure.read().clone();
        if let Some(message) = failure {
            return Err(SinkError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, message),
            ));
        }
        self.documents
            .write()
            .insert(path.to_path_buf(), document.clone());
        *self.writes.write() += 1;
        Ok(())
    }
}
