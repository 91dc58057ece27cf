//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! registry and its refresh controllers.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    FreeDayQuery, FreeDayResponse, HealthResponse, RefreshAllEntry, RefreshAllResponse,
    RefreshOutcome, RunStatusResponse, Snapshot, StateInfoDto, StateListResponse, StatusReport,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{german_weekday, parse_iso_date, Bundesland};
use crate::services::{RefreshController, RunStatus};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn controller(state: &AppState, code: &str) -> Result<Arc<RefreshController>, AppError> {
    let bundesland: Bundesland = code.parse().map_err(AppError::BadRequest)?;
    state
        .registry
        .get(bundesland)
        .ok_or_else(|| AppError::NotFound(format!("Bundesland {} is not configured", bundesland)))
}

fn current_snapshot(controller: &RefreshController) -> Result<Arc<Snapshot>, AppError> {
    controller.snapshot().ok_or_else(|| {
        AppError::Unavailable(format!("No data for {} yet", controller.state()))
    })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let ready = state
        .registry
        .controllers()
        .filter(|c| c.snapshot().is_some())
        .count();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        states: state.registry.states().len(),
        ready,
    }))
}

// =============================================================================
// States
// =============================================================================

/// GET /v1/states
///
/// List the configured states with their last refresh.
pub async fn list_states(State(state): State<AppState>) -> HandlerResult<StateListResponse> {
    let states: Vec<StateInfoDto> = state
        .registry
        .controllers()
        .map(|controller| {
            let snapshot = controller.snapshot();
            let last_run = state.tracker().latest_for(controller.state());
            StateInfoDto {
                code: controller.state(),
                name: controller.state().name().to_string(),
                last_refresh: snapshot.as_ref().map(|s| s.info.generated_at),
                complete: snapshot.as_ref().map(|s| s.completeness.is_complete()),
                partial: snapshot.as_ref().map(|s| s.is_partial()),
                last_run_id: last_run.as_ref().map(|r| r.run_id.clone()),
                last_run_status: last_run.map(|r| r.status),
            }
        })
        .collect();
    let total = states.len();

    Ok(Json(StateListResponse { states, total }))
}

/// GET /v1/states/{code}/status
///
/// Caller-facing status fields at today's date.
pub async fn get_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<StatusReport> {
    let controller = controller(&state, &code)?;
    let snapshot = current_snapshot(&controller)?;
    Ok(Json(StatusReport::compute(
        &snapshot,
        state.clock.today(),
        &controller.output_path().display().to_string(),
    )))
}

/// GET /v1/states/{code}/snapshot
///
/// The full current snapshot.
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<Snapshot> {
    let controller = controller(&state, &code)?;
    let snapshot = current_snapshot(&controller)?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// GET /v1/states/{code}/free-days?date=YYYY-MM-DD
///
/// Whether a date is school-free; defaults to today.
pub async fn get_free_day(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<FreeDayQuery>,
) -> HandlerResult<FreeDayResponse> {
    let controller = controller(&state, &code)?;
    let date = match query.date.as_deref() {
        Some(raw) => parse_iso_date(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", raw)))?,
        None => state.clock.today(),
    };
    let snapshot = current_snapshot(&controller)?;
    let (is_free, reason) = snapshot.is_free(date);

    Ok(Json(FreeDayResponse {
        state: controller.state(),
        date,
        weekday: german_weekday(date).to_string(),
        is_free,
        reason: reason.map(str::to_string),
        in_window: snapshot.window.contains(date),
    }))
}

// =============================================================================
// Refresh
// =============================================================================

/// POST /v1/states/{code}/refresh
///
/// Run a refresh for one state and return its outcome.
pub async fn refresh_state(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<RefreshOutcome> {
    let controller = controller(&state, &code)?;
    let outcome = controller.refresh().await?;
    Ok(Json(outcome))
}

/// POST /v1/refresh
///
/// Refresh every configured state in turn.
pub async fn refresh_all(State(state): State<AppState>) -> HandlerResult<RefreshAllResponse> {
    let results: Vec<RefreshAllEntry> = state
        .registry
        .refresh_all()
        .await
        .into_iter()
        .map(|(bundesland, result)| match result {
            Ok(outcome) => RefreshAllEntry {
                state: bundesland,
                ok: true,
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => RefreshAllEntry {
                state: bundesland,
                ok: false,
                outcome: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    let failed = results.iter().filter(|r| !r.ok).count();

    Ok(Json(RefreshAllResponse { results, failed }))
}

// =============================================================================
// Refresh Runs
// =============================================================================

/// GET /v1/refreshes/{run_id}
///
/// Get the current status and logs of a refresh run.
pub async fn get_run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> HandlerResult<RunStatusResponse> {
    let run = state
        .tracker()
        .get_run(&run_id)
        .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;

    Ok(Json(RunStatusResponse {
        run_id: run.run_id,
        state: run.state,
        status: run.status,
        logs: run.logs,
        result: run.result,
    }))
}

/// GET /v1/refreshes/{run_id}/logs
///
/// Stream run logs via Server-Sent Events (SSE).
pub async fn stream_run_logs(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.tracker().get_run(&run_id).is_none() {
        return Err(AppError::NotFound(format!("Run {} not found", run_id)));
    }

    let tracker = state.tracker().clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&run_id);

            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            if let Some(run) = tracker.get_run(&run_id) {
                if run.status != RunStatus::Running {
                    let final_event = serde_json::json!({
                        "status": run.status,
                        "result": run.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
