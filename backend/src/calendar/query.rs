//! Point-in-time queries over a free-day calendar.
//!
//! All functions are pure, compare at calendar-date granularity and answer
//! `None` when nothing qualifies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{days_between, DataWindow, FreeDay, PublicHoliday, Snapshot, VacationPeriod};

/// Counts and window bounds of a snapshot as seen from a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub reference: NaiveDate,
    pub vacation_count: usize,
    pub holiday_count: usize,
    pub window_from: NaiveDate,
    pub window_to: NaiveDate,
}

/// Whether `date` is school-free, and why.
///
/// `free_days` must be sorted by date, as produced by the merge engine.
pub fn is_free(free_days: &[FreeDay], date: NaiveDate) -> (bool, Option<&str>) {
    match free_days.binary_search_by_key(&date, |f| f.date) {
        Ok(idx) => (true, Some(free_days[idx].reason.as_str())),
        Err(_) => (false, None),
    }
}

/// The period containing `date`; the earliest start wins on overlap.
pub fn active_period(vacations: &[VacationPeriod], date: NaiveDate) -> Option<&VacationPeriod> {
    vacations
        .iter()
        .filter(|p| p.contains(date))
        .fold(None, |best: Option<&VacationPeriod>, p| match best {
            Some(b) if b.start_date <= p.start_date => Some(b),
            _ => Some(p),
        })
}

/// The period with the smallest start strictly after `date`; the first
/// listed wins on ties.
pub fn next_period(vacations: &[VacationPeriod], date: NaiveDate) -> Option<&VacationPeriod> {
    vacations
        .iter()
        .filter(|p| p.start_date > date)
        .fold(None, |best: Option<&VacationPeriod>, p| match best {
            Some(b) if b.start_date <= p.start_date => Some(b),
            _ => Some(p),
        })
}

/// The holiday with the smallest date strictly after `date`.
pub fn next_holiday(holidays: &[PublicHoliday], date: NaiveDate) -> Option<&PublicHoliday> {
    holidays
        .iter()
        .filter(|h| h.date > date)
        .fold(None, |best: Option<&PublicHoliday>, h| match best {
            Some(b) if b.date <= h.date => Some(b),
            _ => Some(h),
        })
}

/// Calendar days from `reference` to `target`, negative when in the past.
pub fn days_until(reference: NaiveDate, target: NaiveDate) -> i64 {
    days_between(reference, target)
}

/// Record counts, not free-day rows.
pub fn summary(
    vacations: &[VacationPeriod],
    holidays: &[PublicHoliday],
    window: &DataWindow,
    reference: NaiveDate,
) -> Summary {
    Summary {
        reference,
        vacation_count: vacations.len(),
        holiday_count: holidays.len(),
        window_from: window.from_date,
        window_to: window.to_date,
    }
}

impl Snapshot {
    pub fn is_free(&self, date: NaiveDate) -> (bool, Option<&str>) {
        is_free(&self.free_days, date)
    }

    pub fn active_period(&self, date: NaiveDate) -> Option<&VacationPeriod> {
        active_period(&self.vacations, date)
    }

    pub fn next_period(&self, date: NaiveDate) -> Option<&VacationPeriod> {
        next_period(&self.vacations, date)
    }

    pub fn next_holiday(&self, date: NaiveDate) -> Option<&PublicHoliday> {
        next_holiday(&self.holidays, date)
    }

    pub fn summary(&self, reference: NaiveDate) -> Summary {
        summary(&self.vacations, &self.holidays, &self.window, reference)
    }
}
