//! School vacation supplier backed by ferien-api.de.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ErrorContext, SourceResult};
use super::http::{build_client, get_json_list, YearPayload};
use super::raw::{RawRecord, RawVacation};
use super::source::RecordSource;
use crate::models::{Bundesland, Category, DataWindow};

pub const FERIEN_API_BASE: &str = "https://ferien-api.de/api/v1/holidays";

/// Fetches `{base}/{BL}/{year}` for every year of the window.
pub struct FerienApiSource {
    client: reqwest::Client,
    base_url: String,
}

impl FerienApiSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, state: Bundesland, year: i32) -> String {
        format!("{}/{}/{}", self.base_url, state.code(), year)
    }
}

#[async_trait]
impl RecordSource for FerienApiSource {
    fn category(&self) -> Category {
        Category::Vacation
    }

    async fn fetch(&self, state: Bundesland, window: &DataWindow) -> SourceResult<Vec<RawRecord>> {
        let mut records = Vec::new();

        for year in window.years() {
            let context = ErrorContext::new(Category::Vacation)
                .with_state(state)
                .with_year(year);
            match get_json_list::<RawVacation>(&self.client, &self.url(state, year), context).await? {
                YearPayload::Data(entries) => {
                    debug!("ferien-api.de {}/{}: {} entries", state, year, entries.len());
                    records.extend(entries.into_iter().map(RawRecord::from));
                }
                YearPayload::NotPublished => {
                    warn!(
                        "No vacation data for {}/{} (404), ferien-api.de may not have data yet",
                        state, year
                    );
                }
            }
        }

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("ferien-api.de ({})", self.base_url)
    }
}
