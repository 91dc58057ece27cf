//! German federal states (Bundesländer).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the 16 German federal states, the partition key for vacation and
/// regional holiday data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bundesland {
    BW,
    BY,
    BE,
    BB,
    HB,
    HH,
    HE,
    MV,
    NI,
    NW,
    RP,
    SL,
    SN,
    ST,
    SH,
    TH,
}

impl Bundesland {
    /// All states in catalogue order.
    pub const ALL: [Bundesland; 16] = [
        Self::BW,
        Self::BY,
        Self::BE,
        Self::BB,
        Self::HB,
        Self::HH,
        Self::HE,
        Self::MV,
        Self::NI,
        Self::NW,
        Self::RP,
        Self::SL,
        Self::SN,
        Self::ST,
        Self::SH,
        Self::TH,
    ];

    /// Two-letter state code, e.g. `"BY"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BW => "BW",
            Self::BY => "BY",
            Self::BE => "BE",
            Self::BB => "BB",
            Self::HB => "HB",
            Self::HH => "HH",
            Self::HE => "HE",
            Self::MV => "MV",
            Self::NI => "NI",
            Self::NW => "NW",
            Self::RP => "RP",
            Self::SL => "SL",
            Self::SN => "SN",
            Self::ST => "ST",
            Self::SH => "SH",
            Self::TH => "TH",
        }
    }

    /// German display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BW => "Baden-Württemberg",
            Self::BY => "Bayern",
            Self::BE => "Berlin",
            Self::BB => "Brandenburg",
            Self::HB => "Bremen",
            Self::HH => "Hamburg",
            Self::HE => "Hessen",
            Self::MV => "Mecklenburg-Vorpommern",
            Self::NI => "Niedersachsen",
            Self::NW => "Nordrhein-Westfalen",
            Self::RP => "Rheinland-Pfalz",
            Self::SL => "Saarland",
            Self::SN => "Sachsen",
            Self::ST => "Sachsen-Anhalt",
            Self::SH => "Schleswig-Holstein",
            Self::TH => "Thüringen",
        }
    }

    /// ISO 3166-2 subdivision code as used by date.nager.at (`"DE-BY"`).
    pub fn county_code(&self) -> String {
        format!("DE-{}", self.code())
    }
}

impl FromStr for Bundesland {
    type Err = String;

    /// Parse a state code, case-insensitive. Accepts the `DE-` prefixed form too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();
        let code = upper.strip_prefix("DE-").unwrap_or(&upper);
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.code() == code)
            .ok_or_else(|| format!("Unknown Bundesland: {}", trimmed))
    }
}

impl fmt::Display for Bundesland {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Bundesland {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Bundesland {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
