//! Calendar aggregation engine.
//!
//! Raw supplier records flow through [`normalize`] into typed periods and
//! holidays, [`merge`] expands them into day-resolution free days,
//! [`completeness`] reports which window years lack data, and [`builder`]
//! assembles a [`Snapshot`](crate::models::Snapshot). [`query`] answers
//! point-in-time questions over the result.

pub mod builder;
pub mod completeness;
pub mod merge;
pub mod normalize;
pub mod query;

pub use builder::{BuildOutcome, NoDataError, SnapshotBuilder};
pub use completeness::evaluate;
pub use merge::{build_free_days, REASON_SEPARATOR};
pub use normalize::{
    normalize_holidays, normalize_vacations, DropCounts, HolidayFilter, Normalized,
    DEFAULT_HOLIDAY_NAME, DEFAULT_VACATION_NAME,
};
pub use query::{active_period, days_until, is_free, next_holiday, next_period, summary, Summary};
