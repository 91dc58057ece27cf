//! Persisted snapshot document layout.
//!
//! Field order here is the section and key order in the written file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CompletenessReport, Snapshot};

/// Timestamp format of `info.erstellt`.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub info: DocumentInfo,
    pub vacations: Vec<DocumentVacation>,
    pub holidays: Vec<DocumentHoliday>,
    pub alle_freien_tage: Vec<DocumentFreeDay>,
    pub vollstaendigkeit: CompletenessReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub bundesland: String,
    pub erstellt: String,
    pub hinweis: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVacation {
    pub name: String,
    pub von: NaiveDate,
    pub bis: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHoliday {
    pub name: String,
    pub datum: NaiveDate,
    pub wochentag: String,
    pub typ: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFreeDay {
    pub datum: NaiveDate,
    pub wochentag: String,
    pub grund: String,
}

impl From<&Snapshot> for SnapshotDocument {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            info: DocumentInfo {
                bundesland: snapshot.state().code().to_string(),
                erstellt: snapshot.info.generated_at.format(CREATED_FORMAT).to_string(),
                hinweis: snapshot.info.note.clone(),
            },
            vacations: snapshot
                .vacations
                .iter()
                .map(|p| DocumentVacation {
                    name: p.name.clone(),
                    von: p.start_date,
                    bis: p.end_date,
                })
                .collect(),
            holidays: snapshot
                .holidays
                .iter()
                .map(|h| DocumentHoliday {
                    name: h.name.clone(),
                    datum: h.date,
                    wochentag: h.weekday_name().to_string(),
                    typ: h.kind.as_str().to_string(),
                })
                .collect(),
            alle_freien_tage: snapshot
                .free_days
                .iter()
                .map(|f| DocumentFreeDay {
                    datum: f.date,
                    wochentag: f.weekday_name.clone(),
                    grund: f.reason.clone(),
                })
                .collect(),
            vollstaendigkeit: snapshot.completeness.clone(),
        }
    }
}
