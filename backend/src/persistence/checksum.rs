//! Checksum calculation for snapshot change detection.

use sha2::{Digest, Sha256};

use crate::models::{PublicHoliday, VacationPeriod};

/// Calculate SHA-256 checksum of text content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Checksum over the record lists of a snapshot.
///
/// Free days are derived from these lists, and generation time is left out,
/// so two refreshes over unchanged supplier data hash identically.
pub fn snapshot_checksum(vacations: &[VacationPeriod], holidays: &[PublicHoliday]) -> String {
    let mut content = String::new();
    for p in vacations {
        content.push_str(&format!("V|{}|{}|{}\n", p.name, p.start_date, p.end_date));
    }
    for h in holidays {
        content.push_str(&format!("H|{}|{}|{}\n", h.name, h.date, h.kind.as_str()));
    }
    calculate_checksum(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bundesland, HolidayKind};
    use chrono::NaiveDate;

    #[test]
    fn test_checksum_consistency() {
        let content = "V|Osterferien|2026-03-30|2026-04-11\n";
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
        assert_eq!(calculate_checksum(content).len(), 64);
    }

    #[test]
    fn test_snapshot_checksum_tracks_records() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 3).unwrap();
        let holiday = PublicHoliday {
            name: "Karfreitag".to_string(),
            date,
            kind: HolidayKind::National,
            state_code: Bundesland::BY,
        };
        let empty = snapshot_checksum(&[], &[]);
        let one = snapshot_checksum(&[], &[holiday.clone()]);
        assert_ne!(empty, one);
        assert_eq!(one, snapshot_checksum(&[], &[holiday]));
    }
}
