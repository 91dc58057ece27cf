//! Application state for the HTTP server.

use std::sync::Arc;

use crate::clock::Clock;
use crate::services::{FerienRegistry, RefreshTracker};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Controllers of all configured states
    pub registry: Arc<FerienRegistry>,
    /// Source of "today" for date-less queries
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(registry: Arc<FerienRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub fn tracker(&self) -> &RefreshTracker {
        self.registry.tracker()
    }
}
