//! In-memory record source for testing, fixtures and offline operation.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::{ErrorContext, SourceError, SourceResult};
use super::raw::{decode_entries, RawHoliday, RawRecord, RawVacation};
use super::source::RecordSource;
use crate::models::{Bundesland, Category, DataWindow};

/// Record source serving a fixed list of raw records.
///
/// The list can be swapped and an outage simulated at runtime, which is what
/// tests use to exercise stale-data fallback.
pub struct LocalSource {
    category: Category,
    records: RwLock<Vec<RawRecord>>,
    failure: RwLock<Option<String>>,
    delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl LocalSource {
    /// Create a source for `category` serving `records`.
    ///
    /// Records of the other category are filtered out on fetch.
    pub fn new(category: Category, records: Vec<RawRecord>) -> Self {
        Self {
            category,
            records: RwLock::new(records),
            failure: RwLock::new(None),
            delay: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty(category: Category) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn vacations(records: Vec<RawVacation>) -> Self {
        Self::new(
            Category::Vacation,
            records.into_iter().map(RawRecord::from).collect(),
        )
    }

    pub fn holidays(records: Vec<RawHoliday>) -> Self {
        Self::new(
            Category::Holiday,
            records.into_iter().map(RawRecord::from).collect(),
        )
    }

    /// Load a JSON array in the supplier's own shape for `category`.
    pub fn from_json_file<P: AsRef<Path>>(category: Category, path: P) -> SourceResult<Self> {
        let path = path.as_ref();
        let context = ErrorContext::new(category).with_details(path.display().to_string());
        let content = fs::read_to_string(path).map_err(|e| {
            SourceError::configuration(format!("Failed to read fixture file: {}", e), context.clone())
        })?;

        let records: Vec<RawRecord> = match category {
            Category::Vacation => decode_entries::<RawVacation>(&content)
                .map(|v| v.into_iter().map(RawRecord::from).collect()),
            Category::Holiday => decode_entries::<RawHoliday>(&content)
                .map(|v| v.into_iter().map(RawRecord::from).collect()),
        }
        .map_err(|e| SourceError::parse(format!("Invalid fixture JSON: {}", e), context))?;

        Ok(Self::new(category, records))
    }

    /// Replace the served records.
    pub fn set_records(&self, records: Vec<RawRecord>) {
        *self.records.write() = records;
    }

    /// Make every following fetch fail until [`LocalSource::recover`] is called.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Delay every fetch; used to hold a refresh in flight.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write() = delay;
    }

    /// Number of fetch calls served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for LocalSource {
    fn category(&self) -> Category {
        self.category
    }

    async fn fetch(&self, state: Bundesland, _window: &DataWindow) -> SourceResult<Vec<RawRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failure.read().clone();
        if let Some(message) = failure {
            return Err(SourceError::connection(
                message,
                ErrorContext::new(self.category).with_state(state),
            ));
        }

        let category = self.category;
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.category() == category)
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("local {} source ({} records)", self.category, self.records.read().len())
    }
}
