//! Caller-facing status of a state, derived from its snapshot.
//!
//! Each field backs one home-automation sensor and keeps
//! its German display values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::days_until;
use crate::models::{Bundesland, Category, Snapshot};

pub const YES: &str = "Ja";
pub const NO: &str = "Nein";
pub const NONE: &str = "Keine";
pub const UNKNOWN: &str = "Unbekannt";
pub const COMPLETE: &str = "Vollständig";
pub const HINT_COMPLETE: &str = "Alle angefragten Jahre haben Daten";
pub const HINT_INCOMPLETE: &str = "Einige Jahre sind bei den APIs noch nicht verfügbar. \
Die Daten werden automatisch nachgeladen sobald verfügbar.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeToday {
    pub value: String,
    pub is_free: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextVacation {
    pub value: String,
    pub start: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextHoliday {
    pub value: String,
    pub date: Option<NaiveDate>,
    pub days_until: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub value: String,
    pub vacation_count: usize,
    pub holiday_count: usize,
    pub output_path: String,
    pub window_from: NaiveDate,
    pub window_to: NaiveDate,
    pub complete: bool,
    pub missing_years: Vec<i32>,
    /// `"name: von – bis"` per vacation period.
    pub vacation_list: Vec<String>,
    /// `"name: datum (Wochentag)"` per holiday.
    pub holiday_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    pub value: String,
    pub complete: bool,
    pub missing_years: Vec<i32>,
    pub last_vacation_year_available: i32,
    pub stale_categories: Vec<Category>,
    pub window_from: NaiveDate,
    pub window_to: NaiveDate,
    pub hint: String,
}

/// Every caller-facing field of one state at a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub state: Bundesland,
    pub state_name: String,
    pub reference: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub free_today: FreeToday,
    pub current_vacation: String,
    pub next_vacation: NextVacation,
    pub days_until_vacation: Option<i64>,
    pub next_holiday: NextHoliday,
    pub overview: Overview,
    pub data_status: DataStatus,
}

impl StatusReport {
    /// Compute the report for `snapshot` as seen on `today`.
    pub fn compute(snapshot: &Snapshot, today: NaiveDate, output_path: &str) -> Self {
        let (is_free, reason) = snapshot.is_free(today);
        let next_period = snapshot.next_period(today);
        let next_holiday = snapshot.next_holiday(today);
        let summary = snapshot.summary(today);
        let completeness = &snapshot.completeness;
        let missing_years = completeness.missing_years();
        let complete = completeness.is_complete();
        let missing_text = join_years(&missing_years);

        let overview_value = if complete {
            format!(
                "{} Ferien, {} Feiertage ✅",
                summary.vacation_count, summary.holiday_count
            )
        } else {
            format!(
                "{} Ferien, {} Feiertage (⚠️ Daten fehlen für: {})",
                summary.vacation_count, summary.holiday_count, missing_text
            )
        };

        Self {
            state: snapshot.state(),
            state_name: snapshot.state().name().to_string(),
            reference: today,
            generated_at: snapshot.info.generated_at,
            free_today: FreeToday {
                value: if is_free { YES } else { NO }.to_string(),
                is_free,
                reason: reason.map(str::to_string),
            },
            current_vacation: snapshot
                .active_period(today)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| NONE.to_string()),
            next_vacation: NextVacation {
                value: next_period
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                start: next_period.map(|p| p.start_date),
            },
            days_until_vacation: next_period.map(|p| days_until(today, p.start_date)),
            next_holiday: NextHoliday {
                value: next_holiday
                    .map(|h| h.name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                date: next_holiday.map(|h| h.date),
                days_until: next_holiday.map(|h| days_until(today, h.date)),
            },
            overview: Overview {
                value: overview_value,
                vacation_count: summary.vacation_count,
                holiday_count: summary.holiday_count,
                output_path: output_path.to_string(),
                window_from: summary.window_from,
                window_to: summary.window_to,
                complete,
                missing_years: missing_years.clone(),
                vacation_list: snapshot
                    .vacations
                    .iter()
                    .map(|p| format!("{}: {} – {}", p.name, p.start_date, p.end_date))
                    .collect(),
                holiday_list: snapshot
                    .holidays
                    .iter()
                    .map(|h| format!("{}: {} ({})", h.name, h.date, h.weekday_name()))
                    .collect(),
            },
            data_status: DataStatus {
                value: if complete {
                    COMPLETE.to_string()
                } else {
                    format!("Unvollständig ({})", missing_text)
                },
                complete,
                missing_years,
                last_vacation_year_available: completeness.last_vacation_year_available,
                stale_categories: completeness.stale_categories.clone(),
                window_from: summary.window_from,
                window_to: summary.window_to,
                hint: if complete { HINT_COMPLETE } else { HINT_INCOMPLETE }.to_string(),
            },
        }
    }
}

fn join_years(years: &[i32]) -> String {
    years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SnapshotBuilder;
    use crate::models::DataWindow;
    use crate::sources::{RawHoliday, RawRecord, RawVacation};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snapshot(years: std::ops::RangeInclusive<i32>) -> Snapshot {
        let mut vacations: Vec<RawRecord> = Vec::new();
        for year in years {
            vacations.push(
                RawVacation {
                    name: Some("Osterferien".to_string()),
                    start: format!("{}-03-30", year),
                    end: format!("{}-04-10", year),
                    ..Default::default()
                }
                .into(),
            );
        }
        let mut holidays: Vec<RawRecord> = Vec::new();
        for year in 2025..=2029 {
            holidays.push(
                RawHoliday {
                    date: format!("{}-10-03", year),
                    local_name: Some("Tag der Deutschen Einheit".to_string()),
                    ..Default::default()
                }
                .into(),
            );
        }
        SnapshotBuilder::new(Bundesland::BY, DataWindow::new(d(2025, 8, 1), d(2029, 9, 30)))
            .build(
                &Ok(vacations),
                Some(&Ok(holidays)),
                None,
                d(2026, 2, 27).and_hms_opt(6, 0, 0).unwrap(),
            )
            .unwrap()
            .snapshot
    }

    #[test]
    fn test_incomplete_overview() {
        let report = StatusReport::compute(&snapshot(2026..=2028), d(2026, 2, 27), "/config/BY_Ferien.yaml");

        assert_eq!(report.free_today.value, NO);
        assert_eq!(report.current_vacation, NONE);
        assert_eq!(report.next_vacation.value, "Osterferien");
        assert_eq!(report.days_until_vacation, Some(31));
        assert_eq!(report.next_holiday.value, "Tag der Deutschen Einheit");
        assert_eq!(report.next_holiday.date, Some(d(2026, 10, 3)));
        assert_eq!(
            report.overview.value,
            "3 Ferien, 4 Feiertage (⚠️ Daten fehlen für: 2025, 2029)"
        );
        assert_eq!(report.data_status.value, "Unvollständig (2025, 2029)");
        assert_eq!(report.data_status.hint, HINT_INCOMPLETE);
        assert_eq!(report.overview.vacation_list[0], "Osterferien: 2026-03-30 – 2026-04-10");
        assert_eq!(
            report.overview.holiday_list[0],
            "Tag der Deutschen Einheit: 2025-10-03 (Freitag)"
        );
    }

    #[test]
    fn test_during_vacation() {
        let mut snap = snapshot(2026..=2028);
        snap.completeness.missing_vacation_years.clear();
        snap.completeness.vacation_complete = true;
        snap.completeness.missing_holiday_years.clear();
        snap.completeness.holiday_complete = true;

        let report = StatusReport::compute(&snap, d(2026, 4, 1), "");
        assert_eq!(report.free_today.value, YES);
        assert_eq!(report.free_today.reason.as_deref(), Some("Osterferien"));
        assert_eq!(report.current_vacation, "Osterferien");
        assert_eq!(report.next_vacation.start, Some(d(2027, 3, 30)));
        assert_eq!(report.overview.value, "3 Ferien, 4 Feiertage ✅");
        assert_eq!(report.data_status.value, COMPLETE);
    }

    #[test]
    fn test_nothing_ahead() {
        let report = StatusReport::compute(&snapshot(2026..=2026), d(2029, 9, 30), "");
        assert_eq!(report.next_vacation.value, UNKNOWN);
        assert_eq!(report.next_holiday.value, UNKNOWN);
        assert!(report.days_until_vacation.is_none());
    }
}
