//! Source factory for dependency injection.
//!
//! Builds the vacation and holiday suppliers from configuration.

use std::path::Path;
use std::sync::Arc;
#[cfg(feature = "http-sources")]
use std::time::Duration;

use super::error::{ErrorContext, SourceError, SourceResult};
use super::local::LocalSource;
use super::source::RecordSource;
use crate::config::{SourceKind, SourceSettings};
use crate::models::Category;

#[cfg(feature = "http-sources")]
use super::{FerienApiSource, NagerDateSource};

/// Fixture file names read by the local source kind.
pub const VACATION_FIXTURE: &str = "ferien.json";
pub const HOLIDAY_FIXTURE: &str = "feiertage.json";

/// The supplier pair used by every refresh controller.
#[derive(Clone)]
pub struct SourcePair {
    pub vacations: Arc<dyn RecordSource>,
    pub holidays: Arc<dyn RecordSource>,
}

impl SourcePair {
    pub fn new(vacations: Arc<dyn RecordSource>, holidays: Arc<dyn RecordSource>) -> Self {
        Self {
            vacations,
            holidays,
        }
    }
}

/// Source factory for creating supplier instances.
pub struct SourceFactory;

impl SourceFactory {
    /// Create the supplier pair described by `settings`.
    pub fn create(settings: &SourceSettings) -> SourceResult<SourcePair> {
        match settings.kind {
            SourceKind::Http => {
                #[cfg(feature = "http-sources")]
                {
                    Self::create_http(settings)
                }
                #[cfg(not(feature = "http-sources"))]
                {
                    Err(SourceError::configuration(
                        "HTTP sources feature not enabled",
                        ErrorContext::default(),
                    ))
                }
            }
            SourceKind::Local => {
                let dir = settings.fixtures_dir.as_deref().ok_or_else(|| {
                    SourceError::configuration(
                        "Local sources require sources.fixtures_dir",
                        ErrorContext::default(),
                    )
                })?;
                Self::create_local(dir)
            }
        }
    }

    /// Create the live ferien-api.de / date.nager.at pair.
    #[cfg(feature = "http-sources")]
    pub fn create_http(settings: &SourceSettings) -> SourceResult<SourcePair> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let vacations = FerienApiSource::new(settings.ferien_api_base.clone(), timeout)?;
        let holidays = NagerDateSource::new(settings.nager_api_base.clone(), timeout)?;
        Ok(SourcePair::new(Arc::new(vacations), Arc::new(holidays)))
    }

    /// Create a pair serving fixture files from `dir`.
    ///
    /// A missing fixture file yields an empty source for that category.
    pub fn create_local(dir: &Path) -> SourceResult<SourcePair> {
        if !dir.is_dir() {
            return Err(SourceError::configuration(
                format!("Fixture directory does not exist: {}", dir.display()),
                ErrorContext::default(),
            ));
        }
        let vacations = Self::load_fixture(Category::Vacation, &dir.join(VACATION_FIXTURE))?;
        let holidays = Self::load_fixture(Category::Holiday, &dir.join(HOLIDAY_FIXTURE))?;
        Ok(SourcePair::new(Arc::new(vacations), Arc::new(holidays)))
    }

    fn load_fixture(category: Category, path: &Path) -> SourceResult<LocalSource> {
        if path.exists() {
            LocalSource::from_json_file(category, path)
        } else {
            tracing::warn!("Fixture {} not found, serving no {} records", path.display(), category);
            Ok(LocalSource::empty(category))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_local_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(VACATION_FIXTURE),
            r#"[{"name":"Osterferien","start":"2026-03-30","end":"2026-04-11","stateCode":"BY"}]"#,
        )
        .unwrap();

        let pair = SourceFactory::create_local(dir.path()).unwrap();
        assert_eq!(pair.vacations.category(), Category::Vacation);
        assert_eq!(pair.holidays.category(), Category::Holiday);
        assert!(pair.vacations.describe().contains("1 records"));
        assert!(pair.holidays.describe().contains("0 records"));
    }

    #[test]
    fn test_create_local_missing_dir() {
        let result = SourceFactory::create_local(Path::new("/nonexistent/fixtures"));
        assert!(matches!(result, Err(SourceError::ConfigurationError { .. })));
    }

    #[test]
    fn test_create_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SourceSettings {
            kind: SourceKind::Local,
            fixtures_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(SourceFactory::create(&settings).is_ok());
    }
}
