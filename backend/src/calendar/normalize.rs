//! Supplier records to normalized vacation periods and public holidays.
//!
//! Pure transformations: nothing here does I/O. Malformed records are logged
//! and dropped; a bad record never fails the batch.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::models::{
    parse_iso_date, Bundesland, DataWindow, HolidayKind, PublicHoliday, VacationPeriod,
};
use crate::sources::{RawHoliday, RawRecord, RawVacation};

pub const DEFAULT_VACATION_NAME: &str = "Ferien";
pub const DEFAULT_HOLIDAY_NAME: &str = "Feiertag";

/// Which holiday kinds to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayFilter {
    pub include_national: bool,
    pub include_regional: bool,
}

impl Default for HolidayFilter {
    fn default() -> Self {
        Self {
            include_national: true,
            include_regional: true,
        }
    }
}

impl HolidayFilter {
    pub fn accepts(&self, kind: HolidayKind) -> bool {
        match kind {
            HolidayKind::National => self.include_national,
            HolidayKind::Regional => self.include_regional,
        }
    }
}

/// Counts of records left out of a normalized batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    /// Tagged for another state.
    pub state_mismatch: usize,
    /// Unparsable dates or end before start.
    pub malformed: usize,
    /// No overlap with the window.
    pub out_of_window: usize,
    /// Repeated across per-year payloads.
    pub duplicate: usize,
    /// Holiday kind switched off for the instance.
    pub excluded_kind: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.state_mismatch + self.malformed + self.out_of_window + self.duplicate + self.excluded_kind
    }
}

/// Normalized records of one category plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub dropped: DropCounts,
}

impl<T> Normalized<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            dropped: DropCounts::default(),
        }
    }
}

/// Normalize raw vacation records for `state` within `window`.
///
/// Output periods are clipped to the window, unique by (name, start, end) and
/// sorted by start date; ties keep supplier order.
pub fn normalize_vacations(
    raw: &[RawRecord],
    state: Bundesland,
    window: &DataWindow,
) -> Normalized<VacationPeriod> {
    let mut out = Normalized::new();
    let mut seen = HashSet::new();

    for entry in raw.iter().filter_map(|r| match r {
        RawRecord::Vacation(v) => Some(v),
        RawRecord::Holiday(_) => None,
    }) {
        if !vacation_matches_state(entry, state) {
            debug!("Dropping vacation {:?} tagged for another state", entry.name);
            out.dropped.state_mismatch += 1;
            continue;
        }

        let (start, end) = match (parse_iso_date(&entry.start), parse_iso_date(&entry.end)) {
            (Some(start), Some(end)) if start <= end => (start, end),
            _ => {
                warn!(
                    "Dropping malformed vacation record {:?} ({} – {})",
                    entry.name, entry.start, entry.end
                );
                out.dropped.malformed += 1;
                continue;
            }
        };

        let name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_VACATION_NAME)
            .to_string();

        if !seen.insert((name.clone(), start, end)) {
            out.dropped.duplicate += 1;
            continue;
        }

        let Some((from, to)) = window.clip(start, end) else {
            out.dropped.out_of_window += 1;
            continue;
        };

        if let Some(period) = VacationPeriod::new(name, from, to, state) {
            out.records.push(period);
        }
    }

    out.records.sort_by_key(|p| p.start_date);
    out
}

/// Normalize raw holiday records for `state` within `window`.
///
/// A holiday with no counties is national; one listing the state's county
/// code is regional. Others belong to different states and are dropped.
pub fn normalize_holidays(
    raw: &[RawRecord],
    state: Bundesland,
    window: &DataWindow,
    filter: HolidayFilter,
) -> Normalized<PublicHoliday> {
    let mut out = Normalized::new();
    let mut seen = HashSet::new();

    for entry in raw.iter().filter_map(|r| match r {
        RawRecord::Holiday(h) => Some(h),
        RawRecord::Vacation(_) => None,
    }) {
        let Some(date) = parse_iso_date(&entry.date) else {
            warn!("Dropping holiday record with unparsable date {:?}", entry.date);
            out.dropped.malformed += 1;
            continue;
        };

        let Some(kind) = holiday_kind(entry, state) else {
            out.dropped.state_mismatch += 1;
            continue;
        };

        if !window.contains(date) {
            out.dropped.out_of_window += 1;
            continue;
        }

        if !filter.accepts(kind) {
            out.dropped.excluded_kind += 1;
            continue;
        }

        let name = holiday_name(entry);
        if !seen.insert((name.clone(), date)) {
            out.dropped.duplicate += 1;
            continue;
        }

        out.records.push(PublicHoliday {
            name,
            date,
            kind,
            state_code: state,
        });
    }

    out.records.sort_by_key(|h| h.date);
    out
}

/// A missing or blank state tag resolves to the requested state.
fn vacation_matches_state(entry: &RawVacation, state: Bundesland) -> bool {
    match entry.state_code.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(code) => code.parse::<Bundesland>().map_or(false, |s| s == state),
    }
}

/// `None` when the holiday belongs to other states only.
fn holiday_kind(entry: &RawHoliday, state: Bundesland) -> Option<HolidayKind> {
    let counties = entry.counties.as_deref().unwrap_or_default();
    if counties.is_empty() || entry.global == Some(true) {
        return Some(HolidayKind::National);
    }
    let county = state.county_code();
    counties
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case(&county))
        .then_some(HolidayKind::Regional)
}

fn holiday_name(entry: &RawHoliday) -> String {
    [entry.local_name.as_deref(), entry.name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|n| !n.is_empty())
        .unwrap_or(DEFAULT_HOLIDAY_NAME)
        .to_string()
}
