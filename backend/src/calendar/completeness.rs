//! Per-category year coverage over the data window.

use chrono::Datelike;
use std::collections::BTreeSet;

use crate::models::{Category, CompletenessReport, DataWindow, PublicHoliday, VacationPeriod};

/// Evaluate coverage of the merged record sets.
///
/// A year is missing for a category when the window touches it and no record
/// of that category falls into it. When `holidays_expected` is false the
/// holiday category is not tracked and always counts as complete.
pub fn evaluate(
    window: &DataWindow,
    vacations: &[VacationPeriod],
    holidays: &[PublicHoliday],
    holidays_expected: bool,
    stale: &[Category],
) -> CompletenessReport {
    let vacation_years: BTreeSet<i32> = vacations
        .iter()
        .filter_map(|p| window.clip(p.start_date, p.end_date))
        .flat_map(|(start, end)| start.year()..=end.year())
        .collect();

    let holiday_years: BTreeSet<i32> = holidays
        .iter()
        .filter(|h| window.contains(h.date))
        .map(|h| h.date.year())
        .collect();

    let missing_vacation_years = missing(window, &vacation_years);
    let missing_holiday_years = if holidays_expected {
        missing(window, &holiday_years)
    } else {
        Vec::new()
    };

    let mut stale_categories = stale.to_vec();
    stale_categories.sort();
    stale_categories.dedup();

    CompletenessReport {
        vacation_complete: missing_vacation_years.is_empty(),
        holiday_complete: missing_holiday_years.is_empty(),
        last_vacation_year_available: vacation_years
            .last()
            .copied()
            .unwrap_or_else(|| window.start_year()),
        missing_vacation_years,
        missing_holiday_years,
        stale_categories,
    }
}

fn missing(window: &DataWindow, present: &BTreeSet<i32>) -> Vec<i32> {
    window
        .years()
        .into_iter()
        .filter(|year| !present.contains(year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bundesland, HolidayKind};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window() -> DataWindow {
        DataWindow::new(d(2025, 8, 1), d(2029, 9, 30))
    }

    fn period(start: NaiveDate, end: NaiveDate) -> VacationPeriod {
        VacationPeriod::new("Ferien", start, end, Bundesland::BY).unwrap()
    }

    fn holiday(date: NaiveDate) -> PublicHoliday {
        PublicHoliday {
            name: "Neujahr".to_string(),
            date,
            kind: HolidayKind::National,
            state_code: Bundesland::BY,
        }
    }

    #[test]
    fn test_missing_last_vacation_year() {
        let vacations: Vec<_> = (2025..=2028)
            .map(|y| period(d(y, 10, 27), d(y, 10, 31)))
            .collect();
        let holidays: Vec<_> = (2026..=2029).map(|y| holiday(d(y, 1, 1))).collect();

        let report = evaluate(&window(), &vacations, &holidays, true, &[]);
        assert_eq!(report.missing_vacation_years, vec![2029]);
        assert!(!report.vacation_complete);
        assert_eq!(report.last_vacation_year_available, 2028);
        // 2025 has no holiday inside the window (Aug–Dec).
        assert_eq!(report.missing_holiday_years, vec![2025]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_period_spanning_new_year_covers_both() {
        let vacations = vec![
            period(d(2025, 12, 22), d(2026, 1, 5)),
            period(d(2027, 12, 23), d(2028, 1, 7)),
            period(d(2029, 2, 12), d(2029, 2, 16)),
        ];
        let report = evaluate(&window(), &vacations, &[], false, &[]);
        assert!(report.vacation_complete);
        assert!(report.missing_vacation_years.is_empty());
        assert!(report.holiday_complete);
        assert_eq!(report.last_vacation_year_available, 2029);
    }

    #[test]
    fn test_no_data() {
        let report = evaluate(&window(), &[], &[], true, &[Category::Holiday, Category::Holiday]);
        assert_eq!(report.missing_vacation_years, vec![2025, 2026, 2027, 2028, 2029]);
        assert_eq!(report.missing_holiday_years, report.missing_vacation_years);
        assert_eq!(report.last_vacation_year_available, 2025);
        assert_eq!(report.stale_categories, vec![Category::Holiday]);
    }
}
