//! Data Transfer Objects for the HTTP API.
//!
//! Snapshot, status and refresh types already derive `Serialize` and are
//! returned as-is; the types here cover listings, queries and envelopes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use crate::models::Snapshot;
pub use crate::services::{LogEntry, RefreshOutcome, RefreshReport, RunStatus, StatusReport};

use crate::models::Bundesland;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of configured states
    pub states: usize,
    /// Configured states with a snapshot
    pub ready: usize,
}

/// One configured state in the state listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateInfoDto {
    pub code: Bundesland,
    pub name: String,
    /// Generation time of the current snapshot
    pub last_refresh: Option<NaiveDateTime>,
    pub complete: Option<bool>,
    pub partial: Option<bool>,
    pub last_run_id: Option<String>,
    pub last_run_status: Option<RunStatus>,
}

/// State listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateListResponse {
    pub states: Vec<StateInfoDto>,
    pub total: usize,
}

/// Query parameters for the free-day endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FreeDayQuery {
    /// ISO date to check (default: today)
    #[serde(default)]
    pub date: Option<String>,
}

/// Free-day check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeDayResponse {
    pub state: Bundesland,
    pub date: NaiveDate,
    pub weekday: String,
    pub is_free: bool,
    pub reason: Option<String>,
    /// False when the date lies outside the tracked window.
    pub in_window: bool,
}

/// One state's result in a refresh-all response.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshAllEntry {
    pub state: Bundesland,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RefreshOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Refresh-all response.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshAllResponse {
    pub results: Vec<RefreshAllEntry>,
    pub failed: usize,
}

/// Refresh run status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    /// Run ID
    pub run_id: String,
    pub state: Bundesland,
    /// Run status
    pub status: RunStatus,
    /// Log entries
    pub logs: Vec<LogEntry>,
    /// Result if finished
    pub result: Option<serde_json::Value>,
}
