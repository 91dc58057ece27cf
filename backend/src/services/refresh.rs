//! Per-state refresh controller.
//!
//! A controller owns one state's current snapshot and a refresh-in-flight
//! guard. A refresh fetches both categories concurrently, builds a new
//! snapshot, swaps it in atomically and then persists it.

use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::refresh_tracker::{LogLevel, RefreshTracker, RunStatus};
use super::status::StatusReport;
use crate::calendar::{HolidayFilter, SnapshotBuilder};
use crate::clock::Clock;
use crate::config::InstanceConfig;
use crate::error::RefreshError;
use crate::models::{Bundesland, Category, DataWindow, Snapshot};
use crate::persistence::{snapshot_path, SnapshotDocument, SnapshotSink};
use crate::sources::SourcePair;

/// Summary of a finished refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub run_id: String,
    pub state: Bundesland,
    pub status: RunStatus,
    pub unavailable: Vec<Category>,
    pub vacation_count: usize,
    pub holiday_count: usize,
    pub free_day_count: usize,
    pub missing_years: Vec<i32>,
    /// False when the record lists equal the previous snapshot's.
    pub changed: bool,
    pub path: PathBuf,
}

/// What a refresh request resulted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RefreshOutcome {
    Completed(RefreshReport),
    /// Another refresh was already running; nothing was started.
    Coalesced,
}

/// Shared collaborators of every controller.
#[derive(Clone)]
pub struct ControllerDeps {
    pub sources: SourcePair,
    pub sink: Arc<dyn SnapshotSink>,
    pub clock: Arc<dyn Clock>,
    pub tracker: RefreshTracker,
    pub output_dir: PathBuf,
}

/// Refresh controller for one configured state.
pub struct RefreshController {
    config: InstanceConfig,
    deps: ControllerDeps,
    path: PathBuf,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    in_flight: tokio::sync::Mutex<()>,
}

impl RefreshController {
    pub fn new(config: InstanceConfig, deps: ControllerDeps) -> Self {
        let path = snapshot_path(&deps.output_dir, config.state);
        Self {
            config,
            deps,
            path,
            snapshot: RwLock::new(None),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn state(&self) -> Bundesland {
        self.config.state
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Target path of the persisted document.
    pub fn output_path(&self) -> &Path {
        &self.path
    }

    pub fn tracker(&self) -> &RefreshTracker {
        &self.deps.tracker
    }

    /// The current snapshot, if any refresh has produced one.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().clone()
    }

    /// Status report at the clock's today, `None` before the first snapshot.
    pub fn status(&self) -> Option<StatusReport> {
        let snapshot = self.snapshot()?;
        Some(StatusReport::compute(
            &snapshot,
            self.deps.clock.today(),
            &self.path.display().to_string(),
        ))
    }

    fn builder(&self, window: DataWindow) -> SnapshotBuilder {
        SnapshotBuilder::new(self.config.state, window).with_holiday_filter(HolidayFilter {
            include_national: self.config.include_national,
            include_regional: self.config.include_regional,
        })
    }

    /// Run one refresh.
    ///
    /// Returns [`RefreshOutcome::Coalesced`] without doing anything when a
    /// refresh is already in flight. A failure never clears the current
    /// snapshot; on a persistence failure the new snapshot is kept in memory
    /// and the error is still reported.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            info!("Refresh for {} already running, request coalesced", self.state());
            return Ok(RefreshOutcome::Coalesced);
        };

        let state = self.state();
        let tracker = &self.deps.tracker;
        let run_id = tracker.create_run(state);

        let now = self.deps.clock.now();
        let today = now.date();
        let window = DataWindow::for_today(today, self.config.years_ahead)
            .unwrap_or_else(|| DataWindow::new(today, today));
        let builder = self.builder(window);

        info!(
            "Updating {} free days: {} → {}",
            state, window.from_date, window.to_date
        );
        tracker.log(
            &run_id,
            LogLevel::Info,
            format!(
                "Fetching {} and {} for {} ({} → {})",
                self.deps.sources.vacations.describe(),
                self.deps.sources.holidays.describe(),
                state,
                window.from_date,
                window.to_date
            ),
        );

        let vacation_fetch = self.deps.sources.vacations.fetch(state, &window);
        let holiday_fetch = async {
            if builder.holidays_enabled() {
                Some(self.deps.sources.holidays.fetch(state, &window).await)
            } else {
                info!("Holidays disabled for {}, skipping", state);
                None
            }
        };
        let (vacations, holidays) = tokio::join!(vacation_fetch, holiday_fetch);

        let previous = self.snapshot();
        let outcome = match builder.build(&vacations, holidays.as_ref(), previous.as_deref(), now) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Refresh for {} produced no data: {}", state, e);
                tracker.fail_run(&run_id, e.to_string());
                return Err(RefreshError::NoData {
                    state,
                    vacation_error: e.vacation_error,
                    holiday_error: e.holiday_error,
                });
            }
        };

        for category in &outcome.unavailable {
            tracker.log(
                &run_id,
                LogLevel::Warning,
                format!("{} source unavailable, keeping previous data", category.label()),
            );
        }

        let snapshot = Arc::new(outcome.snapshot);
        let changed = previous
            .as_ref()
            .map_or(true, |p| p.info.checksum != snapshot.info.checksum);
        if !changed {
            info!("Refresh for {} brought no changes", state);
        }

        let missing_years = snapshot.completeness.missing_years();
        if !snapshot.completeness.vacation_complete {
            warn!(
                "Vacation data missing for {}: years {:?} (data up to {})",
                state,
                snapshot.completeness.missing_vacation_years,
                snapshot.completeness.last_vacation_year_available
            );
        }
        if !snapshot.completeness.holiday_complete {
            warn!(
                "Holiday data missing for {}: years {:?}",
                state, snapshot.completeness.missing_holiday_years
            );
        }

        let report = RefreshReport {
            run_id: run_id.clone(),
            state,
            status: if outcome.unavailable.is_empty() {
                RunStatus::Completed
            } else {
                RunStatus::Partial
            },
            unavailable: outcome.unavailable.clone(),
            vacation_count: snapshot.vacations.len(),
            holiday_count: snapshot.holidays.len(),
            free_day_count: snapshot.free_days.len(),
            missing_years,
            changed,
            path: self.path.clone(),
        };

        // Readers switch to the new snapshot before the write is attempted.
        *self.snapshot.write() = Some(Arc::clone(&snapshot));

        let document = SnapshotDocument::from(snapshot.as_ref());
        if let Err(e) = self.deps.sink.write(&self.path, &document).await {
            error!("Failed to persist snapshot for {}: {}", state, e);
            tracker.fail_run(&run_id, format!("Persistence failed: {}", e));
            return Err(RefreshError::Persistence {
                state,
                run_id,
                source: e,
            });
        }

        info!(
            "Update complete for {}: {} Ferien (bis {}), {} Feiertage, {} freie Tage, vollständig={}",
            state,
            report.vacation_count,
            snapshot.completeness.last_vacation_year_available,
            report.holiday_count,
            report.free_day_count,
            snapshot.completeness.is_complete()
        );
        tracker.log(
            &run_id,
            LogLevel::Success,
            format!(
                "Wrote {} ({} vacations, {} holidays, {} free days)",
                self.path.display(),
                report.vacation_count,
                report.holiday_count,
                report.free_day_count
            ),
        );
        tracker.complete_run(
            &run_id,
            report.status == RunStatus::Partial,
            serde_json::to_value(&report).ok(),
        );

        Ok(RefreshOutcome::Completed(report))
    }
}
