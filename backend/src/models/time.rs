use chrono::{Datelike, NaiveDate, Weekday};

/// German long-form weekday names, Monday first.
pub const WOCHENTAGE: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// German weekday name for a chrono weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WOCHENTAGE[weekday.num_days_from_monday() as usize]
}

/// German weekday name of a calendar date.
pub fn german_weekday(date: NaiveDate) -> &'static str {
    weekday_name(date.weekday())
}

/// Parse the calendar-date part of an ISO 8601 string.
///
/// Suppliers send plain dates (`2026-04-03`) as well as timestamps with or
/// without seconds and zone (`2026-03-30T00:00Z`). Only the date is kept.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Calendar-day difference `target - reference`.
pub fn days_between(reference: NaiveDate, target: NaiveDate) -> i64 {
    (target - reference).num_days()
}
