//! Supplier trait for raw vacation and holiday records.

use async_trait::async_trait;

use super::error::SourceResult;
use super::raw::RawRecord;
use crate::models::{Bundesland, Category, DataWindow};

/// A supplier of raw records for one category.
///
/// Implementations must be idempotent and free of side effects from the
/// caller's point of view. Returning fewer records than expected (a year that
/// is not published yet) is not an error; only a failed call is.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across refresh tasks.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The category this source delivers.
    fn category(&self) -> Category;

    /// Fetch every record for `state` that may touch `window`.
    ///
    /// # Returns
    /// * `Ok(Vec<RawRecord>)` - Possibly empty list of raw records
    /// * `Err(SourceError)` - The category is unavailable for this refresh
    async fn fetch(&self, state: Bundesland, window: &DataWindow) -> SourceResult<Vec<RawRecord>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String {
        format!("{} source", self.category())
    }
}
