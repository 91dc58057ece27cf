//! End-to-end refresh through the registry with fixture sources and the YAML sink.

mod support;

use std::fs;
use std::sync::Arc;

use ferien_rust::config::{AppConfig, CONFIG_ENV_VAR};
use ferien_rust::models::{Bundesland, Category, HolidayKind};
use ferien_rust::persistence::{snapshot_path, SnapshotDocument, YamlFileSink};
use ferien_rust::services::{FerienRegistry, RefreshOutcome, RunStatus};

use support::{fixed_clock, local_config, reference_date, write_fixtures, EXPECTED_FREE_DAYS};

fn registry_in(dir: &std::path::Path) -> (FerienRegistry, std::path::PathBuf) {
    let fixtures = dir.join("fixtures");
    let output = dir.join("out");
    fs::create_dir_all(&fixtures).unwrap();
    write_fixtures(&fixtures);

    let config = AppConfig::from_toml_str(&local_config(&fixtures, &output)).unwrap();
    let registry = FerienRegistry::from_config(
        &config,
        Arc::new(YamlFileSink::new()),
        Arc::new(fixed_clock()),
    )
    .unwrap();
    (registry, output)
}

#[tokio::test]
async fn test_refresh_writes_yaml_document() {
    let dir = tempfile::tempdir().unwrap();
    let (registry, output) = registry_in(dir.path());

    let results = registry.refresh_all().await;
    assert_eq!(results.len(), 1);
    let (state, result) = &results[0];
    assert_eq!(*state, Bundesland::BY);
    let report = match result {
        Ok(RefreshOutcome::Completed(report)) => report.clone(),
        other => panic!("unexpected refresh result: {:?}", other),
    };
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.vacation_count, 2);
    assert_eq!(report.holiday_count, 2);
    assert_eq!(report.free_day_count, EXPECTED_FREE_DAYS);

    let path = snapshot_path(&output, Bundesland::BY);
    assert_eq!(report.path, path);
    assert!(path.ends_with("BY_Ferien.yaml"));

    let content = fs::read_to_string(&path).unwrap();
    let document: SnapshotDocument = serde_yaml::from_str(&content).unwrap();
    assert_eq!(document.info.bundesland, "BY");
    assert_eq!(document.info.erstellt, "2026-02-27T06:00:00");
    assert_eq!(document.vacations.len(), 2);
    assert_eq!(document.holidays.len(), 2);
    assert_eq!(document.alle_freien_tage.len(), EXPECTED_FREE_DAYS);

    let good_friday = document
        .alle_freien_tage
        .iter()
        .find(|d| d.datum.to_string() == "2026-04-03")
        .unwrap();
    assert_eq!(good_friday.wochentag, "Freitag");
    assert!(good_friday.grund.contains("osterferien"));
    assert!(good_friday.grund.contains("Karfreitag"));

    // No temp file is left next to the document.
    let leftovers: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_snapshot_answers_point_in_time_questions() {
    let dir = tempfile::tempdir().unwrap();
    let (registry, _) = registry_in(dir.path());
    registry.refresh_all().await;

    let controller = registry.get(Bundesland::BY).unwrap();
    let snapshot = controller.snapshot().unwrap();

    assert_eq!(snapshot.holidays[0].kind, HolidayKind::Regional);
    assert_eq!(snapshot.holidays[1].kind, HolidayKind::National);
    assert!(!snapshot.completeness.is_complete());
    assert!(snapshot.completeness.stale_categories.is_empty());

    let today = reference_date();
    assert_eq!(snapshot.is_free(today), (false, None));
    assert!(snapshot.active_period(today).is_none());
    assert_eq!(snapshot.next_period(today).unwrap().name, "osterferien");
    assert_eq!(snapshot.next_holiday(today).unwrap().name, "Karfreitag");

    let status = controller.status().unwrap();
    assert_eq!(status.days_until_vacation, Some(31));
    assert_eq!(status.next_holiday.days_until, Some(35));
    assert_eq!(status.overview.vacation_count, 2);
}

#[tokio::test]
async fn test_second_refresh_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (registry, _) = registry_in(dir.path());
    let controller = registry.get(Bundesland::BY).unwrap();

    let first = controller.refresh().await.unwrap();
    let second = controller.refresh().await.unwrap();
    match (first, second) {
        (RefreshOutcome::Completed(a), RefreshOutcome::Completed(b)) => {
            assert!(a.changed);
            assert!(!b.changed);
            assert!(b.unavailable.is_empty());
        }
        other => panic!("unexpected outcomes: {:?}", other),
    }

    let runs = registry.tracker().len();
    assert_eq!(runs, 2);
    assert!(!controller
        .snapshot()
        .unwrap()
        .completeness
        .is_stale(Category::Vacation));
}

#[test]
fn test_config_from_env_location() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures");
    fs::create_dir_all(&fixtures).unwrap();
    let config_path = dir.path().join("ferien.toml");
    fs::write(&config_path, local_config(&fixtures, &dir.path().join("out"))).unwrap();

    let path = config_path.to_string_lossy().to_string();
    let config = support::with_scoped_env(&[(CONFIG_ENV_VAR, Some(path.as_str()))], || {
        AppConfig::from_default_location()
    })
    .unwrap();

    let instances = config.instances().unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].state, Bundesland::BY);
    assert!(instances[0].wants_holidays());
}
