//! Service configuration file support.
//!
//! Reads `ferien.toml`: output directory, supplier settings, refresh schedule
//! and the list of configured states.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{Bundesland, DEFAULT_YEARS_AHEAD};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "FERIEN_CONFIG";

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub instances: Vec<InstanceSettings>,
}

/// Where snapshot files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Which suppliers to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// ferien-api.de and date.nager.at
    #[default]
    Http,
    /// JSON fixture files from `fixtures_dir`
    Local,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "live" => Ok(Self::Http),
            "local" | "fixtures" => Ok(Self::Local),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}

/// Supplier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_ferien_api_base")]
    pub ferien_api_base: String,
    #[serde(default = "default_nager_api_base")]
    pub nager_api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            ferien_api_base: default_ferien_api_base(),
            nager_api_base: default_nager_api_base(),
            timeout_secs: default_timeout_secs(),
            fixtures_dir: None,
        }
    }
}

/// Refresh schedule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    #[serde(default = "default_years_ahead")]
    pub years_ahead: i32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            years_ahead: default_years_ahead(),
        }
    }
}

/// One configured state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSettings {
    pub bundesland: String,
    #[serde(default = "default_true")]
    pub feiertage_national: bool,
    #[serde(default = "default_true")]
    pub feiertage_regional: bool,
}

/// Validated per-state settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceConfig {
    pub state: Bundesland,
    pub include_national: bool,
    pub include_regional: bool,
    pub years_ahead: i32,
}

impl InstanceConfig {
    pub fn new(state: Bundesland) -> Self {
        Self {
            state,
            include_national: true,
            include_regional: true,
            years_ahead: DEFAULT_YEARS_AHEAD,
        }
    }

    /// Whether any holiday kind is requested at all.
    pub fn wants_holidays(&self) -> bool {
        self.include_national || self.include_regional
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("data")
}

fn default_ferien_api_base() -> String {
    "https://ferien-api.de/api/v1/holidays".to_string()
}

fn default_nager_api_base() -> String {
    "https://date.nager.at/api/v3/PublicHolidays".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_scan_interval_secs() -> u64 {
    86_400
}

fn default_years_ahead() -> i32 {
    DEFAULT_YEARS_AHEAD
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `$FERIEN_CONFIG` or the default location.
    ///
    /// Searches for `ferien.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }

        let search_paths = [
            PathBuf::from("ferien.toml"),
            PathBuf::from("backend/ferien.toml"),
            PathBuf::from("../ferien.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Check instance codes, duplicates and schedule bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instances.is_empty() {
            return Err(ConfigError::Invalid(
                "At least one [[instances]] entry is required".to_string(),
            ));
        }
        if self.schedule.years_ahead < 1 {
            return Err(ConfigError::Invalid(
                "schedule.years_ahead must be at least 1".to_string(),
            ));
        }
        if self.schedule.scan_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "schedule.scan_interval_secs must be positive".to_string(),
            ));
        }
        if self.sources.kind == SourceKind::Local && self.sources.fixtures_dir.is_none() {
            return Err(ConfigError::Invalid(
                "sources.kind = \"local\" requires sources.fixtures_dir".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for instance in &self.instances {
            let state = Bundesland::from_str(&instance.bundesland).map_err(ConfigError::Invalid)?;
            if !seen.insert(state) {
                return Err(ConfigError::Invalid(format!(
                    "Bundesland {} is configured more than once",
                    state
                )));
            }
        }
        Ok(())
    }

    /// Validated per-state settings, in file order.
    pub fn instances(&self) -> Result<Vec<InstanceConfig>, ConfigError> {
        self.instances
            .iter()
            .map(|instance| {
                let state =
                    Bundesland::from_str(&instance.bundesland).map_err(ConfigError::Invalid)?;
                Ok(InstanceConfig {
                    state,
                    include_national: instance.feiertage_national,
                    include_regional: instance.feiertage_regional,
                    years_ahead: self.schedule.years_ahead,
                })
            })
            .collect()
    }
}
