//! Tracking of refresh runs.
//!
//! This module provides a simple in-memory tracker that stores progress logs
//! and the final status of every refresh run, so callers can inspect a run by
//! id or stream its log.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Bundesland;

/// Runs kept in memory; the oldest finished ones are evicted beyond this.
pub const MAX_TRACKED_RUNS: usize = 256;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Refresh run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    /// Both categories fetched fresh.
    Completed,
    /// At least one category fell back to earlier data.
    Partial,
    Failed,
}

impl RunStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Run metadata and logs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshRun {
    pub run_id: String,
    pub state: Bundesland,
    pub status: RunStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Summary of the run (counts, missing years, ...)
    pub result: Option<serde_json::Value>,
}

/// In-memory refresh run tracker.
#[derive(Clone)]
pub struct RefreshTracker {
    runs: Arc<RwLock<HashMap<String, RefreshRun>>>,
}

impl RefreshTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new run for `state` and return its ID.
    pub fn create_run(&self, state: Bundesland) -> String {
        let run_id = Uuid::new_v4().to_string();
        let run = RefreshRun {
            run_id: run_id.clone(),
            state,
            status: RunStatus::Running,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };
        let mut runs = self.runs.write();
        runs.insert(run_id.clone(), run);
        evict_finished(&mut runs);
        run_id
    }

    /// Add a log entry to a run.
    pub fn log(&self, run_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Mark a run as finished successfully, fully or partially.
    pub fn complete_run(&self, run_id: &str, partial: bool, result: Option<serde_json::Value>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = if partial {
                RunStatus::Partial
            } else {
                RunStatus::Completed
            };
            run.completed_at = Some(chrono::Utc::now());
            run.result = result;
        }
    }

    /// Mark a run as failed.
    pub fn fail_run(&self, run_id: &str, error_message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = RunStatus::Failed;
            run.completed_at = Some(chrono::Utc::now());
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: error_message.into(),
            });
        }
    }

    /// Get a run by ID.
    pub fn get_run(&self, run_id: &str) -> Option<RefreshRun> {
        self.runs.read().get(run_id).cloned()
    }

    /// Get all logs for a run.
    pub fn get_logs(&self, run_id: &str) -> Vec<LogEntry> {
        self.runs
            .read()
            .get(run_id)
            .map(|run| run.logs.clone())
            .unwrap_or_default()
    }

    /// Most recent run for `state`, if any.
    pub fn latest_for(&self, state: Bundesland) -> Option<RefreshRun> {
        self.runs
            .read()
            .values()
            .filter(|run| run.state == state)
            .max_by_key(|run| run.created_at)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.runs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.read().is_empty()
    }
}

impl Default for RefreshTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn evict_finished(runs: &mut HashMap<String, RefreshRun>) {
    while runs.len() > MAX_TRACKED_RUNS {
        let oldest = runs
            .values()
            .filter(|run| run.status.is_finished())
            .min_by_key(|run| run.created_at)
            .map(|run| run.run_id.clone());
        match oldest {
            Some(run_id) => {
                runs.remove(&run_id);
            }
            None => break,
        }
    }
}
