#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use ferien_rust::clock::FixedClock;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Reference date used across the integration tests.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 27).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::at_date(reference_date())
}

/// ferien-api.de shaped vacations: two for Bavaria, one for NRW.
pub const VACATIONS_JSON: &str = r#"[
  {"name":"osterferien","start":"2026-03-30T00:00Z","end":"2026-04-11T00:00Z","year":2026,"stateCode":"BY","slug":"osterferien-2026-BY"},
  {"name":"pfingstferien","start":"2026-05-26T00:00Z","end":"2026-06-05T00:00Z","year":2026,"stateCode":"BY","slug":"pfingstferien-2026-BY"},
  {"name":"sommerferien","start":"2026-07-09T00:00Z","end":"2026-08-21T00:00Z","year":2026,"stateCode":"NW","slug":"sommerferien-2026-NW"}
]"#;

/// date.nager.at shaped holidays: one national, one Bavarian, one Brandenburg-only.
pub const HOLIDAYS_JSON: &str = r#"[
  {"date":"2026-01-06","localName":"Heilige Drei Könige","name":"Epiphany","global":false,"counties":["DE-BW","DE-BY","DE-ST"]},
  {"date":"2026-04-03","localName":"Karfreitag","name":"Good Friday","global":true,"counties":null},
  {"date":"2026-10-31","localName":"Reformationstag","name":"Reformation Day","global":false,"counties":["DE-BB"]}
]"#;

/// Free days for Bavaria from the fixtures: 13 Easter days (Karfreitag
/// inside), 11 Whitsun days and Epiphany.
pub const EXPECTED_FREE_DAYS: usize = 25;

/// Write both fixture files into `dir`.
pub fn write_fixtures(dir: &Path) {
    fs::write(dir.join("ferien.json"), VACATIONS_JSON).unwrap();
    fs::write(dir.join("feiertage.json"), HOLIDAYS_JSON).unwrap();
}

/// A local-source configuration serving fixtures from `fixtures` and writing to `output`.
pub fn local_config(fixtures: &Path, output: &Path) -> String {
    format!(
        r#"
[output]
directory = "{}"

[sources]
kind = "local"
fixtures_dir = "{}"

[[instances]]
bundesland = "BY"
"#,
        output.display(),
        fixtures.display()
    )
}
