//! Crate-level error types for refresh and configuration.

use crate::models::Bundesland;
use crate::persistence::SinkError;

/// Failure of a refresh action.
///
/// A failed refresh never clears the previous snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Both categories failed and there was nothing to fall back to.
    #[error("No data available for {state}: vacations: {vacation_error}; holidays: {holiday_error}")]
    NoData {
        state: Bundesland,
        vacation_error: String,
        holiday_error: String,
    },

    /// The snapshot was built and swapped in but could not be written.
    #[error("Failed to persist snapshot for {state}: {source}")]
    Persistence {
        state: Bundesland,
        run_id: String,
        #[source]
        source: SinkError,
    },
}

impl RefreshError {
    pub fn state(&self) -> Bundesland {
        match self {
            Self::NoData { state, .. } | Self::Persistence { state, .. } => *state,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No ferien.toml found in standard locations")]
    NotFound,
}
