//! Raw GTFS rows and stop identifiers.

use serde::Deserialize;
use std::fmt;

/// A row of `stops.txt`. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRow {
    pub stop_id: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub stop_lat: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub stop_lon: Option<f64>,
}

/// A row of `stop_times.txt`. Times are kept verbatim until normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRow {
    pub stop_id: String,
    pub arrival_time: String,
    pub departure_time: String,
}

/// How stop identifiers compare for a given feed.
///
/// A feed whose `stop_times.txt` ids are all integers is keyed numerically,
/// so `"9"` sorts before `"10"` and `"007"` matches `"7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Numeric,
    Text,
}

impl KeyMode {
    pub fn detect<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        if ids.into_iter().all(|id| id.parse::<i64>().is_ok()) {
            KeyMode::Numeric
        } else {
            KeyMode::Text
        }
    }

    /// Builds the key for `raw`, or `None` if it cannot be represented in this mode.
    pub fn key(self, raw: &str) -> Option<StopKey> {
        match self {
            KeyMode::Numeric => raw.parse().ok().map(StopKey::Numeric),
            KeyMode::Text => Some(StopKey::Text(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StopKey {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopKey::Numeric(n) => write!(f, "{n}"),
            StopKey::Text(s) => f.write_str(s),
        }
    }
}
