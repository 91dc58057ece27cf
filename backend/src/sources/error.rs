//! Error types for supplier operations.
//!
//! Any `SourceError` means the category is unavailable for this refresh; the
//! refresh falls back to previously known data for that category.

use std::fmt;

use crate::models::{Bundesland, Category};

/// Result type for supplier operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Structured context for supplier errors.
///
/// Records which category, state and year were being fetched when the call failed.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The record category being fetched
    pub category: Option<Category>,
    /// The state the fetch was scoped to
    pub state: Option<Bundesland>,
    /// The calendar year of the failed request, if per-year
    pub year: Option<i32>,
    /// Additional details (URL, fixture path, ...)
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context for a category.
    pub fn new(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: Bundesland) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(category) = self.category {
            parts.push(format!("category={}", category));
        }
        if let Some(state) = self.state {
            parts.push(format!("state={}", state));
        }
        if let Some(year) = self.year {
            parts.push(format!("year={}", year));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for supplier operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// Supplier answered with an unexpected HTTP status.
    #[error("HTTP status {status}: {message} {context}")]
    HttpStatus {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// Payload could not be decoded.
    #[error("Parse error: {message} {context}")]
    ParseError {
        message: String,
        context: ErrorContext,
    },

    /// Source is misconfigured (bad base URL, missing fixture directory, ...).
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn connection(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context,
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>, context: ErrorContext) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            context,
        }
    }

    pub fn parse(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ParseError {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. } => context,
            Self::HttpStatus { context, .. } => context,
            Self::ParseError { context, .. } => context,
            Self::ConfigurationError { context, .. } => context,
        }
    }

    /// Category the failure belongs to, if recorded.
    pub fn category(&self) -> Option<Category> {
        self.context().category
    }
}
