//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Configured states
        .route("/states", get(handlers::list_states))
        .route("/states/{code}/status", get(handlers::get_status))
        .route("/states/{code}/snapshot", get(handlers::get_snapshot))
        .route("/states/{code}/free-days", get(handlers::get_free_day))
        // Refresh actions
        .route("/states/{code}/refresh", post(handlers::refresh_state))
        .route("/refresh", post(handlers::refresh_all))
        // Refresh runs
        .route("/refreshes/{run_id}", get(handlers::get_run_status))
        .route("/refreshes/{run_id}/logs", get(handlers::stream_run_logs));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::clock::{Clock, SystemClock};
    use crate::config::InstanceConfig;
    use crate::models::Bundesland;
    use crate::persistence::MemorySink;
    use crate::services::{ControllerDeps, FerienRegistry, RefreshTracker};
    use crate::sources::{LocalSource, SourcePair};

    #[test]
    fn test_router_creation() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let deps = ControllerDeps {
            sources: SourcePair::new(
                Arc::new(LocalSource::vacations(Vec::new())),
                Arc::new(LocalSource::holidays(Vec::new())),
            ),
            sink: Arc::new(MemorySink::new()),
            clock: clock.clone(),
            tracker: RefreshTracker::new(),
            output_dir: PathBuf::from("data"),
        };
        let registry = FerienRegistry::new(&[InstanceConfig::new(Bundesland::BY)], deps);
        let state = AppState::new(Arc::new(registry), clock);
        let _router = create_router(state);
    }
}
