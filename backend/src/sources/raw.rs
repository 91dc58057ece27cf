//! Raw supplier record shapes.
//!
//! Field names follow the supplier payloads (ferien-api.de, date.nager.at).
//! Payloads are decoded entry by entry with [`decode_entries`]: an entry that
//! does not fit its shape becomes a blank record, which the normalizer drops
//! and counts as malformed. Only a body that is not a JSON array fails.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Category;

/// One vacation entry as delivered by ferien-api.de.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVacation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// One public holiday entry as delivered by date.nager.at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHoliday {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub global: Option<bool>,
    /// Subdivision codes (`DE-BY`, ...); absent or empty for nationwide holidays.
    #[serde(default)]
    pub counties: Option<Vec<String>>,
}

/// A supplier record of either category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum RawRecord {
    Vacation(RawVacation),
    Holiday(RawHoliday),
}

impl RawRecord {
    pub fn category(&self) -> Category {
        match self {
            Self::Vacation(_) => Category::Vacation,
            Self::Holiday(_) => Category::Holiday,
        }
    }
}

impl From<RawVacation> for RawRecord {
    fn from(raw: RawVacation) -> Self {
        Self::Vacation(raw)
    }
}

impl From<RawHoliday> for RawRecord {
    fn from(raw: RawHoliday) -> Self {
        Self::Holiday(raw)
    }
}

/// Decode a JSON array one entry at a time.
///
/// Entries that fail to decode (a `null` date, a number where text belongs,
/// a bare string instead of an object) are replaced by `T::default()`.
pub fn decode_entries<T>(body: &str) -> serde_json::Result<Vec<T>>
where
    T: DeserializeOwned + Default,
{
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).unwrap_or_else(|e| {
                warn!("Undecodable supplier entry #{}: {}", index, e);
                T::default()
            })
        })
        .collect())
}
