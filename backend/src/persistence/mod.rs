//! Snapshot persistence.
//!
//! A [`SnapshotSink`] accepts a [`SnapshotDocument`] and a target path and
//! fully replaces whatever was stored there before.

pub mod checksum;
pub mod document;
pub mod memory;
pub mod yaml;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::models::Bundesland;

pub use checksum::{calculate_checksum, snapshot_checksum};
pub use document::{
    DocumentFreeDay, DocumentHoliday, DocumentInfo, DocumentVacation, SnapshotDocument,
};
pub use memory::MemorySink;
pub use yaml::YamlFileSink;

/// Errors raised while writing a snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize snapshot document: {0}")]
    Serialization(String),
}

impl SinkError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Target of persisted snapshot documents.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Replace the document stored at `path`.
    async fn write(&self, path: &Path, document: &SnapshotDocument) -> Result<(), SinkError>;
}

/// File name of a state's snapshot document.
pub fn file_name(state: Bundesland) -> String {
    format!("{}_Ferien.yaml", state.code())
}

/// Full path of a state's snapshot document under `directory`.
pub fn snapshot_path(directory: &Path, state: Bundesland) -> PathBuf {
    directory.join(file_name(state))
}
