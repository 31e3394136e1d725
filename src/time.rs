//! GTFS time strings.
//!
//! GTFS lets hours run past 23 for trips that continue after midnight on the
//! same service day. These helpers fold such hours back into a 00-23 clock
//! and parse the result leniently.

use chrono::{NaiveTime, Timelike};

/// Rewrites an overflowing hour (`24` and up) into the 00-23 range.
///
/// `"24:05:00"` becomes `"00:05:00"` and `"25:30:00"` becomes `"01:30:00"`.
/// Minutes and seconds are untouched, and anything whose hour is not an
/// integer is returned unchanged. The day offset is lost: `24:00:00` and
/// `00:00:00` become the same value.
pub fn normalize_time(time: &str) -> String {
    let mut parts: Vec<String> = time.split(':').map(str::to_string).collect();

    if parts[0] == "24" {
        parts[0] = "00".to_string();
    } else if let Ok(hour) = parts[0].parse::<u32>() {
        if hour > 24 {
            parts[0] = format!("{:02}", hour - 24);
        }
    }

    parts.join(":")
}

/// Parses a normalized `HH:MM:SS` string, returning `None` on any failure.
///
/// Seconds must be below 60; chrono's leap second is not a valid GTFS time.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .ok()
        .filter(|t| t.nanosecond() < 1_000_000_000)
}

/// Normalizes then parses a raw GTFS time.
pub fn to_clock_time(raw: &str) -> Option<NaiveTime> {
    parse_time(&normalize_time(raw))
}
