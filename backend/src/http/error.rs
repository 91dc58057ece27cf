//! Error bodies for the calendar API.
//!
//! Every failed request answers with an [`ApiError`] JSON body. Refresh
//! failures keep their run id so the caller can look up the run's log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::RefreshError;

/// JSON body of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable code: `NOT_FOUND`, `BAD_REQUEST`, `NO_DATA`, ...
    pub code: String,
    pub message: String,
    /// Extra context such as `run_id=...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Failure of a calendar handler, mapped to a status code on response.
#[derive(Debug)]
pub enum AppError {
    /// State not configured, or unknown run id
    NotFound(String),
    /// Unparsable state code or date
    BadRequest(String),
    /// The state has no snapshot yet
    Unavailable(String),
    /// A manual refresh failed
    Refresh(RefreshError),
}

impl AppError {
    /// Status code and body this error answers with.
    fn to_parts(&self) -> (StatusCode, ApiError) {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            Self::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ApiError::new("NO_DATA", msg))
            }
            // A refresh without any data is an outage of both suppliers.
            Self::Refresh(e @ RefreshError::NoData { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("NO_DATA", e.to_string()),
            ),
            // The snapshot is already live; only the file write failed.
            Self::Refresh(e @ RefreshError::Persistence { run_id, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("PERSISTENCE_ERROR", e.to_string())
                    .with_details(format!("run_id={}", run_id)),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        (status, Json(body)).into_response()
    }
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        AppError::Refresh(err)
    }
}
