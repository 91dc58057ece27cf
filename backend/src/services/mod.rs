//! Service layer for refresh orchestration.
//!
//! This module sits between the calendar engine and the outer surfaces: it
//! owns per-state controllers, tracks refresh runs, schedules periodic
//! refreshes and derives the caller-facing status.

pub mod refresh;
pub mod refresh_tracker;
pub mod registry;
pub mod scheduler;
pub mod status;


pub use refresh::{ControllerDeps, RefreshController, RefreshOutcome, RefreshReport};
pub use refresh_tracker::{LogEntry, LogLevel, RefreshRun, RefreshTracker, RunStatus};
pub use registry::FerienRegistry;
pub use scheduler::spawn_periodic_refresh;
pub use status::StatusReport;
