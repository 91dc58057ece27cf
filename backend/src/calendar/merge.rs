//! Day-resolution merge of vacation periods and holidays.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{german_weekday, DataWindow, FreeDay, PublicHoliday, VacationPeriod};

/// Separator between reason names on a shared day.
pub const REASON_SEPARATOR: &str = " / ";

/// Build the free-day calendar.
///
/// Every date of every vacation period and every holiday date inside `window`
/// yields exactly one [`FreeDay`]. Reasons list vacation names first, then
/// holiday names, each exact name at most once. Output is ascending by date.
pub fn build_free_days(
    vacations: &[VacationPeriod],
    holidays: &[PublicHoliday],
    window: &DataWindow,
) -> Vec<FreeDay> {
    let mut days: BTreeMap<NaiveDate, Vec<&str>> = BTreeMap::new();

    for period in vacations {
        for date in period.days().filter(|d| window.contains(*d)) {
            push_reason(days.entry(date).or_default(), &period.name);
        }
    }

    for holiday in holidays.iter().filter(|h| window.contains(h.date)) {
        push_reason(days.entry(holiday.date).or_default(), &holiday.name);
    }

    days.into_iter()
        .map(|(date, reasons)| FreeDay {
            date,
            weekday_name: german_weekday(date).to_string(),
            reason: reasons.join(REASON_SEPARATOR),
        })
        .collect()
}

fn push_reason<'a>(reasons: &mut Vec<&'a str>, name: &'a str) {
    if !reasons.contains(&name) {
        reasons.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bundesland, HolidayKind};
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window() -> DataWindow {
        DataWindow::new(d(2025, 8, 1), d(2029, 9, 30))
    }

    fn period(name: &str, start: NaiveDate, end: NaiveDate) -> VacationPeriod {
        VacationPeriod::new(name, start, end, Bundesland::BY).unwrap()
    }

    fn holiday(name: &str, date: NaiveDate) -> PublicHoliday {
        PublicHoliday {
            name: name.to_string(),
            date,
            kind: HolidayKind::National,
            state_code: Bundesland::BY,
        }
    }

    #[test]
    fn test_vacation_and_holiday_reason() {
        let vacations = vec![period("Osterferien", d(2026, 3, 30), d(2026, 4, 11))];
        let holidays = vec![holiday("Karfreitag", d(2026, 4, 3))];
        let days = build_free_days(&vacations, &holidays, &window());

        assert_eq!(days.len(), 13);
        let good_friday = days.iter().find(|f| f.date == d(2026, 4, 3)).unwrap();
        assert_eq!(good_friday.reason, "Osterferien / Karfreitag");
        assert_eq!(good_friday.weekday_name, "Freitag");
        assert_eq!(days[0].reason, "Osterferien");
        assert_eq!(days[0].weekday_name, "Montag");
    }

    #[test]
    fn test_same_name_rendered_once() {
        let vacations = vec![period("Buß- und Bettag", d(2026, 11, 18), d(2026, 11, 18))];
        let holidays = vec![holiday("Buß- und Bettag", d(2026, 11, 18))];
        let days = build_free_days(&vacations, &holidays, &window());
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].reason, "Buß- und Bettag");
    }

    #[test]
    fn test_overlapping_periods_keep_first_name_first() {
        let vacations = vec![
            period("Pfingstferien", d(2026, 5, 26), d(2026, 6, 5)),
            period("Brückentag", d(2026, 6, 5), d(2026, 6, 5)),
        ];
        let days = build_free_days(&vacations, &[], &window());
        assert_eq!(days.len(), 11);
        assert_eq!(days.last().unwrap().reason, "Pfingstferien / Brückentag");
    }

    #[test]
    fn test_days_outside_window_dropped() {
        let vacations = vec![period("Sommerferien", d(2029, 9, 20), d(2029, 10, 5))];
        let holidays = vec![holiday("Neujahr", d(2030, 1, 1))];
        let days = build_free_days(&vacations, &holidays, &window());
        assert_eq!(days.len(), 11);
        assert!(days.iter().all(|f| window().contains(f.date)));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_free_days(&[], &[], &window()).is_empty());
    }

    fn arb_period() -> impl Strategy<Value = VacationPeriod> {
        (0i64..1400, 0i64..30, prop::sample::select(vec!["Osterferien", "Sommerferien", "Herbstferien"]))
            .prop_map(|(offset, len, name)| {
                let start = d(2025, 8, 1) + chrono::Duration::days(offset);
                period(name, start, start + chrono::Duration::days(len))
            })
    }

    fn arb_holiday() -> impl Strategy<Value = PublicHoliday> {
        (0i64..1500, prop::sample::select(vec!["Neujahr", "Karfreitag", "Osterferien"]))
            .prop_map(|(offset, name)| holiday(name, d(2025, 8, 1) + chrono::Duration::days(offset)))
    }

    proptest! {
        #[test]
        fn prop_every_period_day_present(
            vacations in prop::collection::vec(arb_period(), 0..8),
            holidays in prop::collection::vec(arb_holiday(), 0..8),
        ) {
            let w = window();
            let days = build_free_days(&vacations, &holidays, &w);

            for p in &vacations {
                for date in p.days().filter(|x| w.contains(*x)) {
                    let day = days.iter().find(|f| f.date == date);
                    prop_assert!(day.is_some());
                    let reason = &day.unwrap().reason;
                    prop_assert!(reason.split(REASON_SEPARATOR).any(|r| r == p.name));
                }
            }
            for h in holidays.iter().filter(|h| w.contains(h.date)) {
                prop_assert!(days.iter().any(|f| f.date == h.date));
            }
        }

        #[test]
        fn prop_unique_sorted_and_inside_window(
            vacations in prop::collection::vec(arb_period(), 0..8),
            holidays in prop::collection::vec(arb_holiday(), 0..8),
        ) {
            let w = window();
            let days = build_free_days(&vacations, &holidays, &w);
            prop_assert!(days.windows(2).all(|pair| pair[0].date < pair[1].date));
            prop_assert!(days.iter().all(|f| w.contains(f.date)));

            let expected: std::collections::BTreeSet<NaiveDate> = vacations
                .iter()
                .flat_map(|p| p.days().collect::<Vec<_>>())
                .chain(holidays.iter().map(|h| h.date))
                .filter(|x| w.contains(*x))
                .collect();
            prop_assert_eq!(days.len(), expected.len());
        }

        #[test]
        fn prop_merge_is_deterministic(
            vacations in prop::collection::vec(arb_period(), 0..8),
            holidays in prop::collection::vec(arb_holiday(), 0..8),
        ) {
            let w = window();
            prop_assert_eq!(
                build_free_days(&vacations, &holidays, &w),
                build_free_days(&vacations, &holidays, &w)
            );
        }
    }
}
