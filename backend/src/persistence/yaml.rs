//! YAML file sink.

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use super::{SinkError, SnapshotDocument, SnapshotSink};

/// Writes snapshot documents as YAML files.
///
/// Content goes to a sibling temp file first and is renamed over the target,
/// so readers of the file never see a half-written document.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileSink;

impl YamlFileSink {
    pub fn new() -> Self {
        Self
    }

    /// Render a document to YAML text.
    pub fn render(document: &SnapshotDocument) -> Result<String, SinkError> {
        serde_yaml::to_string(document).map_err(|e| SinkError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl SnapshotSink for YamlFileSink {
    async fn write(&self, path: &Path, document: &SnapshotDocument) -> Result<(), SinkError> {
        let content = Self::render(document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SinkError::io(parent, e))?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        tokio::fs::write(&tmp, content.as_bytes())
            .await
            .map_err(|e| SinkError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(SinkError::io(path, e));
        }

        info!(
            "Wrote {} ({} Ferien, {} Feiertage, {} freie Tage)",
            path.display(),
            document.vacations.len(),
            document.holidays.len(),
            document.alle_freien_tage.len()
        );
        Ok(())
    }
}
