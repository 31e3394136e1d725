//! Output formatting and persistence for per-stop wait times.
//!
//! Supports the result CSV, a console preview, and JSON summaries.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use tracing::{debug, info};

use crate::analyzers::types::WaitTimeResult;

pub const RESULT_COLUMNS: [&str; 4] = ["stop_id", "stop_lat", "stop_lon", "wait_time"];

/// Writes the result table to `path`, replacing any existing file.
///
/// The header row is written even when there are no rows.
pub fn write_results(path: &str, results: &[WaitTimeResult]) -> Result<()> {
    debug!(path, rows = results.len(), "Writing results CSV");
    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
    write_results_to(file, results)?;
    info!(path, rows = results.len(), "Results written");
    Ok(())
}

/// Writes the result table as CSV to any writer.
pub fn write_results_to<W: Write>(writer: W, results: &[WaitTimeResult]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(RESULT_COLUMNS)?;
    for row in results {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads a previously written result table.
pub fn read_results(bytes: &[u8]) -> Result<Vec<WaitTimeResult>> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: WaitTimeResult = result?;
        rows.push(record);
    }

    Ok(rows)
}

/// Renders the first `n` rows as an aligned text table.
pub fn render_head(results: &[WaitTimeResult], n: usize) -> String {
    let cells: Vec<[String; 4]> = results
        .iter()
        .take(n)
        .map(|r| {
            [
                r.stop_id.clone(),
                fmt_coordinate(r.stop_lat),
                fmt_coordinate(r.stop_lon),
                format!("{:.6}", r.wait_time),
            ]
        })
        .collect();

    let mut widths = RESULT_COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = RESULT_COLUMNS.map(str::to_string);
    for row in std::iter::once(&header).chain(cells.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn fmt_coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

/// Prints the first `n` rows to standard output.
pub fn print_head(results: &[WaitTimeResult], n: usize) {
    print!("{}", render_head(results, n));
}

/// Prints a value as pretty JSON to standard output.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty JSON to `path`.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let mut body = serde_json::to_vec_pretty(value)?;
    body.push(b'\n');
    std::fs::write(path, body).with_context(|| format!("failed to write {path}"))?;
    info!(path, "Summary written");
    Ok(())
}
