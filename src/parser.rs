//! CSV decoding for `stops.txt` and `stop_times.txt`.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;

use crate::gtfs::{StopRow, StopTimeRow};

pub const STOP_COLUMNS: &[&str] = &["stop_id", "stop_lat", "stop_lon"];
pub const STOP_TIME_COLUMNS: &[&str] = &["stop_id", "arrival_time", "departure_time"];

/// Decodes `stops.txt` content.
///
/// # Errors
///
/// Fails if a required column is missing or a row is not valid CSV.
/// Unparseable coordinates become `None` rather than failing.
pub fn parse_stops(bytes: &[u8], name: &str) -> Result<Vec<StopRow>> {
    parse_table(bytes, name, STOP_COLUMNS)
}

/// Decodes `stop_times.txt` content. Time strings are not validated here.
pub fn parse_stop_times(bytes: &[u8], name: &str) -> Result<Vec<StopTimeRow>> {
    parse_table(bytes, name, STOP_TIME_COLUMNS)
}

fn parse_table<T: DeserializeOwned>(bytes: &[u8], name: &str, required: &[&str]) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header of {name}"))?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            bail!("{name} is missing required column `{column}`");
        }
    }

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("{name}: bad record {}", line + 1))?;
        rows.push(row);
    }

    Ok(rows)
}
