//! Shared HTTP plumbing for the live suppliers.

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::{ErrorContext, SourceError, SourceResult};
use super::raw::decode_entries;

/// Outcome of a per-year request.
#[derive(Debug)]
pub enum YearPayload<T> {
    /// The supplier returned data for the year.
    Data(Vec<T>),
    /// The supplier has nothing for the year yet (404).
    NotPublished,
}

/// Build the reqwest client used by all live suppliers.
pub fn build_client(timeout: Duration) -> SourceResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ferien-rust/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            SourceError::configuration(
                format!("Failed to build HTTP client: {}", e),
                ErrorContext::default(),
            )
        })
}

/// GET `url` and decode a JSON array entry by entry.
///
/// 404 maps to [`YearPayload::NotPublished`]; every other failure is an error
/// carrying `context`.
pub async fn get_json_list<T: DeserializeOwned + Default>(
    client: &reqwest::Client,
    url: &str,
    context: ErrorContext,
) -> SourceResult<YearPayload<T>> {
    debug!("GET {}", url);
    let context = context.with_details(format!("GET {}", url));

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::connection(e.to_string(), context.clone()))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(YearPayload::NotPublished);
    }
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<empty response>".to_string());
        return Err(SourceError::http_status(
            status.as_u16(),
            body.trim().chars().take(200).collect::<String>(),
            context,
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::connection(e.to_string(), context.clone()))?;

    decode_entries::<T>(&body)
        .map(YearPayload::Data)
        .map_err(|e| SourceError::parse(e.to_string(), context))
}
