//! Snapshot assembly with stale-category fallback.

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use super::completeness::evaluate;
use super::merge::build_free_days;
use super::normalize::{normalize_holidays, normalize_vacations, DropCounts, HolidayFilter};
use crate::models::{
    Bundesland, Category, DataWindow, PublicHoliday, Snapshot, SnapshotInfo, VacationPeriod,
    GENERATED_NOTE,
};
use crate::persistence::snapshot_checksum;
use crate::sources::{RawRecord, SourceResult};

/// Both categories failed and there was no earlier snapshot to fall back on.
#[derive(Debug, thiserror::Error)]
#[error("No data: vacations: {vacation_error}; holidays: {holiday_error}")]
pub struct NoDataError {
    pub vacation_error: String,
    pub holiday_error: String,
}

/// Result of one build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub snapshot: Snapshot,
    /// Categories whose fetch failed in this build.
    pub unavailable: Vec<Category>,
    pub vacation_drops: DropCounts,
    pub holiday_drops: DropCounts,
}

/// Assembles normalizer, merge and completeness output into a [`Snapshot`].
#[derive(Debug, Clone, Copy)]
pub struct SnapshotBuilder {
    state: Bundesland,
    window: DataWindow,
    filter: HolidayFilter,
}

impl SnapshotBuilder {
    pub fn new(state: Bundesland, window: DataWindow) -> Self {
        Self {
            state,
            window,
            filter: HolidayFilter::default(),
        }
    }

    pub fn with_holiday_filter(mut self, filter: HolidayFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether holidays are requested at all.
    pub fn holidays_enabled(&self) -> bool {
        self.filter.include_national || self.filter.include_regional
    }

    pub fn window(&self) -> &DataWindow {
        &self.window
    }

    /// Build a snapshot from per-category fetch results.
    ///
    /// `holidays` is `None` when holidays are disabled for the instance. A
    /// failed category reuses `previous`'s records for it, clipped to the
    /// current window, and is listed as stale.
    pub fn build(
        &self,
        vacations: &SourceResult<Vec<RawRecord>>,
        holidays: Option<&SourceResult<Vec<RawRecord>>>,
        previous: Option<&Snapshot>,
        generated_at: NaiveDateTime,
    ) -> Result<BuildOutcome, NoDataError> {
        if let (None, Err(vacation_error)) = (previous, vacations) {
            let holiday_error = match holidays {
                None => Some("holidays disabled".to_string()),
                Some(Err(e)) => Some(e.to_string()),
                Some(Ok(_)) => None,
            };
            if let Some(holiday_error) = holiday_error {
                return Err(NoDataError {
                    vacation_error: vacation_error.to_string(),
                    holiday_error,
                });
            }
        }

        let mut unavailable = Vec::new();
        let mut notes = Vec::new();

        let (vacation_list, vacation_drops) = match vacations {
            Ok(raw) => {
                let normalized = normalize_vacations(raw, self.state, &self.window);
                (normalized.records, normalized.dropped)
            }
            Err(e) => {
                warn!("Vacation source unavailable for {}: {}", self.state, e);
                unavailable.push(Category::Vacation);
                notes.push(self.stale_note(Category::Vacation, previous));
                (self.stale_vacations(previous), DropCounts::default())
            }
        };

        let (holiday_list, holiday_drops) = match holidays {
            None => (Vec::new(), DropCounts::default()),
            Some(Ok(raw)) => {
                let normalized = normalize_holidays(raw, self.state, &self.window, self.filter);
                (normalized.records, normalized.dropped)
            }
            Some(Err(e)) => {
                warn!("Holiday source unavailable for {}: {}", self.state, e);
                unavailable.push(Category::Holiday);
                notes.push(self.stale_note(Category::Holiday, previous));
                (self.stale_holidays(previous), DropCounts::default())
            }
        };

        if vacation_drops.total() + holiday_drops.total() > 0 {
            debug!(
                "{}: dropped {} vacation and {} holiday records",
                self.state,
                vacation_drops.total(),
                holiday_drops.total()
            );
        }

        let free_days = build_free_days(&vacation_list, &holiday_list, &self.window);
        let completeness = evaluate(
            &self.window,
            &vacation_list,
            &holiday_list,
            holidays.is_some(),
            &unavailable,
        );

        let note = if notes.is_empty() {
            GENERATED_NOTE.to_string()
        } else {
            format!("{} ({})", GENERATED_NOTE, notes.join("; "))
        };

        let snapshot = Snapshot {
            info: SnapshotInfo {
                state_code: self.state,
                generated_at: generated_at.with_nanosecond(0).unwrap_or(generated_at),
                note,
                checksum: snapshot_checksum(&vacation_list, &holiday_list),
            },
            window: self.window,
            vacations: vacation_list,
            holidays: holiday_list,
            free_days,
            completeness,
        };

        Ok(BuildOutcome {
            snapshot,
            unavailable,
            vacation_drops,
            holiday_drops,
        })
    }

    fn stale_note(&self, category: Category, previous: Option<&Snapshot>) -> String {
        match previous {
            Some(prev) => format!(
                "{}: Quelle nicht erreichbar, Stand {}",
                category.label(),
                prev.info.generated_at.format("%Y-%m-%d %H:%M")
            ),
            None => format!("{}: Quelle nicht erreichbar, keine Daten", category.label()),
        }
    }

    fn stale_vacations(&self, previous: Option<&Snapshot>) -> Vec<VacationPeriod> {
        let Some(prev) = previous else {
            return Vec::new();
        };
        prev.vacations
            .iter()
            .filter_map(|p| {
                let (start, end) = self.window.clip(p.start_date, p.end_date)?;
                VacationPeriod::new(p.name.clone(), start, end, self.state)
            })
            .collect()
    }

    fn stale_holidays(&self, previous: Option<&Snapshot>) -> Vec<PublicHoliday> {
        let Some(prev) = previous else {
            return Vec::new();
        };
        prev.holidays
            .iter()
            .filter(|h| self.window.contains(h.date) && self.filter.accepts(h.kind))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HolidayKind;
    use crate::sources::{ErrorContext, RawHoliday, RawVacation, SourceError};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(6, 0, 0).unwrap()
    }

    fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new(Bundesland::BY, DataWindow::new(d(2025, 8, 1), d(2029, 9, 30)))
    }

    fn vacation(name: &str, start: &str, end: &str) -> RawRecord {
        RawVacation {
            name: Some(name.to_string()),
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
        .into()
    }

    fn holiday(name: &str, date: &str) -> RawRecord {
        RawHoliday {
            date: date.to_string(),
            local_name: Some(name.to_string()),
            ..Default::default()
        }
        .into()
    }

    fn outage(category: Category) -> SourceResult<Vec<RawRecord>> {
        Err(SourceError::connection("timeout", ErrorContext::new(category)))
    }

    #[test]
    fn test_fresh_build() {
        let vacations = Ok(vec![vacation("Osterferien", "2026-03-30", "2026-04-11")]);
        let holidays = Ok(vec![holiday("Karfreitag", "2026-04-03")]);
        let outcome = builder()
            .build(&vacations, Some(&holidays), None, at(d(2026, 2, 27)))
            .unwrap();

        let snapshot = outcome.snapshot;
        assert!(outcome.unavailable.is_empty());
        assert_eq!(snapshot.info.note, GENERATED_NOTE);
        assert_eq!(snapshot.vacations.len(), 1);
        assert_eq!(snapshot.holidays.len(), 1);
        assert_eq!(snapshot.free_days.len(), 13);
        assert!(!snapshot.is_partial());
        assert_eq!(snapshot.info.checksum.len(), 64);
    }

    #[test]
    fn test_holiday_outage_keeps_previous_holidays() {
        let first = builder()
            .build(
                &Ok(vec![vacation("Osterferien", "2026-03-30", "2026-04-11")]),
                Some(&Ok(vec![holiday("Karfreitag", "2026-04-03")])),
                None,
                at(d(2026, 2, 26)),
            )
            .unwrap()
            .snapshot;

        let second = builder()
            .build(
                &Ok(vec![
                    vacation("Osterferien", "2026-03-30", "2026-04-11"),
                    vacation("Pfingstferien", "2026-05-26", "2026-06-05"),
                ]),
                Some(&outage(Category::Holiday)),
                Some(&first),
                at(d(2026, 2, 27)),
            )
            .unwrap();

        let snapshot = second.snapshot;
        assert_eq!(second.unavailable, vec![Category::Holiday]);
        assert_eq!(snapshot.vacations.len(), 2);
        assert_eq!(snapshot.holidays, first.holidays);
        assert!(snapshot.completeness.is_stale(Category::Holiday));
        assert!(snapshot.info.note.contains("Feiertage: Quelle nicht erreichbar"));
        assert!(snapshot.is_partial());
    }

    #[test]
    fn test_both_fail_without_previous() {
        let result = builder().build(
            &outage(Category::Vacation),
            Some(&outage(Category::Holiday)),
            None,
            at(d(2026, 2, 27)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_one_fails_without_previous() {
        let outcome = builder()
            .build(
                &outage(Category::Vacation),
                Some(&Ok(vec![holiday("Karfreitag", "2026-04-03")])),
                None,
                at(d(2026, 2, 27)),
            )
            .unwrap();
        assert!(outcome.snapshot.vacations.is_empty());
        assert_eq!(outcome.snapshot.holidays.len(), 1);
        assert!(outcome.snapshot.info.note.contains("keine Daten"));
    }

    #[test]
    fn test_holidays_disabled() {
        let outcome = builder()
            .with_holiday_filter(HolidayFilter {
                include_national: false,
                include_regional: false,
            })
            .build(
                &Ok(vec![vacation("Osterferien", "2026-03-30", "2026-04-11")]),
                None,
                None,
                at(d(2026, 2, 27)),
            )
            .unwrap();
        assert!(outcome.snapshot.holidays.is_empty());
        assert!(outcome.snapshot.completeness.holiday_complete);
    }

    #[test]
    fn test_stale_records_clipped_to_new_window() {
        let previous = builder()
            .build(
                &Ok(vec![vacation("Sommerferien", "2025-08-04", "2025-09-15")]),
                Some(&Ok(vec![holiday("Tag der Deutschen Einheit", "2025-10-03")])),
                None,
                at(d(2026, 2, 27)),
            )
            .unwrap()
            .snapshot;
        assert_eq!(previous.holidays[0].kind, HolidayKind::National);

        let next_year = SnapshotBuilder::new(
            Bundesland::BY,
            DataWindow::new(d(2025, 9, 1), d(2030, 9, 30)),
        );
        let outcome = next_year
            .build(
                &outage(Category::Vacation),
                Some(&outage(Category::Holiday)),
                Some(&previous),
                at(d(2027, 1, 2)),
            )
            .unwrap();
        assert_eq!(outcome.snapshot.vacations[0].start_date, d(2025, 9, 1));
        assert_eq!(outcome.snapshot.holidays.len(), 1);
        assert_eq!(outcome.unavailable, vec![Category::Vacation, Category::Holiday]);
    }
}
