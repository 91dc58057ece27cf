//! The refresh result: one self-consistent view of a state's free days.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::records::{Category, FreeDay, PublicHoliday, VacationPeriod};
use super::state::Bundesland;
use super::window::DataWindow;

/// Default note stamped into every snapshot.
pub const GENERATED_NOTE: &str = "Automatisch generiert – nicht manuell bearbeiten";

/// Per-category data coverage over the years touched by the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub vacation_complete: bool,
    pub holiday_complete: bool,
    pub last_vacation_year_available: i32,
    pub missing_vacation_years: Vec<i32>,
    pub missing_holiday_years: Vec<i32>,
    /// Categories served from the previous snapshot because their source failed.
    #[serde(default)]
    pub stale_categories: Vec<Category>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.vacation_complete && self.holiday_complete
    }

    /// Union of both missing-year lists, ascending and without duplicates.
    pub fn missing_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .missing_vacation_years
            .iter()
            .chain(self.missing_holiday_years.iter())
            .copied()
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn is_stale(&self, category: Category) -> bool {
        self.stale_categories.contains(&category)
    }
}

/// Snapshot metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub state_code: Bundesland,
    /// Local wall-clock time of the refresh, second precision.
    pub generated_at: NaiveDateTime,
    pub note: String,
    /// SHA-256 over the vacation and holiday lists.
    pub checksum: String,
}

/// Everything known about one state after a refresh.
///
/// Built in full on each refresh and replaced as a whole; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub info: SnapshotInfo,
    pub window: DataWindow,
    pub vacations: Vec<VacationPeriod>,
    pub holidays: Vec<PublicHoliday>,
    pub free_days: Vec<FreeDay>,
    pub completeness: CompletenessReport,
}

impl Snapshot {
    pub fn state(&self) -> Bundesland {
        self.info.state_code
    }

    /// True when at least one category was carried over from an earlier snapshot.
    pub fn is_partial(&self) -> bool {
        !self.completeness.stale_categories.is_empty()
    }
}
