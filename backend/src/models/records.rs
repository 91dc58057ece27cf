//! Normalized record types produced from supplier data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::Bundesland;
use super::time::german_weekday;

/// Record category; each one is fetched and tracked independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vacation,
    Holiday,
}

impl Category {
    /// German label used in user-facing notes and status texts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Ferien",
            Self::Holiday => "Feiertage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacation => f.write_str("vacation"),
            Self::Holiday => f.write_str("holiday"),
        }
    }
}

/// A contiguous, named school closure (e.g. "Sommerferien"), both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VacationPeriod {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub state_code: Bundesland,
}

impl VacationPeriod {
    /// Create a period; `None` when `end_date` lies before `start_date`.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        state_code: Bundesland,
    ) -> Option<Self> {
        if end_date < start_date {
            return None;
        }
        Some(Self {
            name: name.into(),
            start_date,
            end_date,
            state_code,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Every date of the period in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }

    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Whether a holiday applies nationwide or to a single state only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    National,
    Regional,
}

impl HolidayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::Regional => "regional",
        }
    }
}

/// A single public holiday on which school is closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub name: String,
    pub date: NaiveDate,
    pub kind: HolidayKind,
    /// The state context the holiday was requested for.
    pub state_code: Bundesland,
}

impl PublicHoliday {
    pub fn weekday_name(&self) -> &'static str {
        german_weekday(self.date)
    }
}

/// One school-free calendar date with the joined names of everything causing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeDay {
    pub date: NaiveDate,
    pub weekday_name: String,
    pub reason: String,
}
