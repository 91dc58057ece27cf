//! The rolling data window for which records are requested and tracked.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default number of years fetched ahead of the current year.
pub const DEFAULT_YEARS_AHEAD: i32 = 3;

/// Inclusive span of calendar dates covered by one refresh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataWindow {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DataWindow {
    /// Create a window; the bounds are swapped if given in reverse order.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        if from_date > to_date {
            Self {
                from_date: to_date,
                to_date: from_date,
            }
        } else {
            Self { from_date, to_date }
        }
    }

    /// Window for a reference day: August 1 of the previous year through
    /// September 30 of `years_ahead` years ahead.
    ///
    /// The start captures the winter break of the running school year, the end
    /// the summer break of the target year. Returns `None` only for dates at
    /// the edge of chrono's representable range.
    pub fn for_today(today: NaiveDate, years_ahead: i32) -> Option<Self> {
        let from_date = NaiveDate::from_ymd_opt(today.year() - 1, 8, 1)?;
        let to_date = NaiveDate::from_ymd_opt(today.year() + years_ahead, 9, 30)?;
        Some(Self::new(from_date, to_date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }

    /// True when `[start, end]` shares at least one day with the window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.to_date && end >= self.from_date
    }

    /// Clip `[start, end]` to the window, `None` when they do not overlap.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if !self.overlaps(start, end) {
            return None;
        }
        Some((start.max(self.from_date), end.min(self.to_date)))
    }

    pub fn start_year(&self) -> i32 {
        self.from_date.year()
    }

    pub fn end_year(&self) -> i32 {
        self.to_date.year()
    }

    /// Every calendar year with at least one day inside the window, ascending.
    pub fn years(&self) -> Vec<i32> {
        (self.start_year()..=self.end_year()).collect()
    }

    /// Number of days in the window.
    pub fn len_days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }
}
