//! Public holiday supplier backed by date.nager.at.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ErrorContext, SourceResult};
use super::http::{build_client, get_json_list, YearPayload};
use super::raw::{RawHoliday, RawRecord};
use super::source::RecordSource;
use crate::models::{Bundesland, Category, DataWindow};

pub const NAGER_API_BASE: &str = "https://date.nager.at/api/v3/PublicHolidays";

/// Fetches `{base}/{year}/DE` for every year of the window.
///
/// The supplier returns all German holidays; picking national and regional
/// entries for the state is left to the normalizer.
pub struct NagerDateSource {
    client: reqwest::Client,
    base_url: String,
}

impl NagerDateSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, year: i32) -> String {
        format!("{}/{}/DE", self.base_url, year)
    }
}

#[async_trait]
impl RecordSource for NagerDateSource {
    fn category(&self) -> Category {
        Category::Holiday
    }

    async fn fetch(&self, state: Bundesland, window: &DataWindow) -> SourceResult<Vec<RawRecord>> {
        let mut records = Vec::new();

        for year in window.years() {
            let context = ErrorContext::new(Category::Holiday)
                .with_state(state)
                .with_year(year);
            match get_json_list::<RawHoliday>(&self.client, &self.url(year), context).await? {
                YearPayload::Data(entries) => {
                    debug!("date.nager.at {}: {} entries", year, entries.len());
                    records.extend(entries.into_iter().map(RawRecord::from));
                }
                YearPayload::NotPublished => {
                    warn!("No holiday data for {} (404) at date.nager.at", year);
                }
            }
        }

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("date.nager.at ({})", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_layout() {
        let source = NagerDateSource::new(NAGER_API_BASE, Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.url(2027),
            "https://date.nager.at/api/v3/PublicHolidays/2027/DE"
        );
        assert_eq!(source.category(), Category::Holiday);
    }
}
