//! Registry of configured states.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

use super::refresh::{ControllerDeps, RefreshController, RefreshOutcome};
use super::refresh_tracker::RefreshTracker;
use crate::clock::Clock;
use crate::config::{AppConfig, InstanceConfig};
use crate::error::{ConfigError, RefreshError};
use crate::models::Bundesland;
use crate::persistence::SnapshotSink;
use crate::sources::{SourceFactory, SourcePair};

/// One refresh controller per configured state, sharing suppliers, sink,
/// clock and run tracker.
pub struct FerienRegistry {
    controllers: BTreeMap<Bundesland, Arc<RefreshController>>,
    tracker: RefreshTracker,
}

impl FerienRegistry {
    /// Build controllers for `instances` on top of shared collaborators.
    pub fn new(instances: &[InstanceConfig], deps: ControllerDeps) -> Self {
        let controllers = instances
            .iter()
            .map(|instance| {
                (
                    instance.state,
                    Arc::new(RefreshController::new(*instance, deps.clone())),
                )
            })
            .collect();
        Self {
            controllers,
            tracker: deps.tracker,
        }
    }

    /// Build the registry described by a loaded configuration.
    pub fn from_config(
        config: &AppConfig,
        sink: Arc<dyn SnapshotSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let sources: SourcePair = SourceFactory::create(&config.sources)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let deps = ControllerDeps {
            sources,
            sink,
            clock,
            tracker: RefreshTracker::new(),
            output_dir: config.output.directory.clone(),
        };
        Ok(Self::new(&config.instances()?, deps))
    }

    pub fn get(&self, state: Bundesland) -> Option<Arc<RefreshController>> {
        self.controllers.get(&state).cloned()
    }

    /// Configured states in code order.
    pub fn states(&self) -> Vec<Bundesland> {
        self.controllers.keys().copied().collect()
    }

    pub fn controllers(&self) -> impl Iterator<Item = &Arc<RefreshController>> {
        self.controllers.values()
    }

    pub fn tracker(&self) -> &RefreshTracker {
        &self.tracker
    }

    /// Refresh every configured state in turn.
    ///
    /// A failure for one state does not stop the others.
    pub async fn refresh_all(&self) -> Vec<(Bundesland, Result<RefreshOutcome, RefreshError>)> {
        info!("Refreshing {} configured states", self.controllers.len());
        let mut results = Vec::with_capacity(self.controllers.len());
        for (state, controller) in &self.controllers {
            let result = controller.refresh().await;
            if let Err(ref e) = result {
                error!("Refresh for {} failed: {}", state, e);
            }
            results.push((*state, result));
        }
        results
    }
}
