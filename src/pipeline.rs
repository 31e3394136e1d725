//! The end-to-end wait time computation.

use anyhow::Result;
use tracing::{info, warn};

use crate::analyzers::aggregate::{StopTable, aggregate_waits};
use crate::analyzers::types::WaitTimeResult;
use crate::fetch::load_source;
use crate::gtfs::{KeyMode, StopRow, StopTimeRow};
use crate::output::write_results;
use crate::parser::{parse_stop_times, parse_stops};
use crate::schedule::{StopTimeRecord, TransformReport, compute_gaps};

/// Where to read the two input tables and where to write the result.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub stops: String,
    pub stop_times: String,
    pub output: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stops: "stops.txt".to_string(),
            stop_times: "stop_times.txt".to_string(),
            output: "wait_time_per_stop.csv".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub results: Vec<WaitTimeResult>,
    pub report: TransformReport,
}

/// Loads both tables, computes mean waits per stop and writes the result CSV.
///
/// Nothing is written unless every input loads and parses.
#[tracing::instrument(skip(config), fields(stops = %config.stops, stop_times = %config.stop_times, output = %config.output))]
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let stops = parse_stops(&load_source(&config.stops)?, &config.stops)?;
    info!(rows = stops.len(), "Stops loaded");

    let stop_times = parse_stop_times(&load_source(&config.stop_times)?, &config.stop_times)?;
    info!(rows = stop_times.len(), "Stop times loaded");

    let output = compute(&stops, &stop_times);
    write_results(&config.output, &output.results)?;

    Ok(output)
}

/// The in-memory part of [`run`]: gaps, join and per-stop mean.
///
/// Stop times without a `stop_id` belong to no stop and are left out before
/// the id mode is chosen.
pub fn compute(stops: &[StopRow], stop_times: &[StopTimeRow]) -> PipelineOutput {
    let identified: Vec<&StopTimeRow> = stop_times
        .iter()
        .filter(|row| !row.stop_id.is_empty())
        .collect();
    let missing_stop_ids = stop_times.len() - identified.len();
    if missing_stop_ids > 0 {
        warn!(missing_stop_ids, "Stop times without a stop id skipped");
    }

    let mode = KeyMode::detect(identified.iter().map(|r| r.stop_id.as_str()));
    info!(?mode, "Stop id mode detected");

    let records: Vec<StopTimeRecord> = identified
        .iter()
        .filter_map(|row| StopTimeRecord::from_row(row, mode))
        .collect();

    let (gaps, mut report) = compute_gaps(&records);
    report.missing_stop_ids = missing_stop_ids;
    let table = StopTable::new(stops, mode);
    let results = aggregate_waits(&gaps, &table);
    info!(stops = results.len(), "Wait times aggregated");

    PipelineOutput { results, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, lat: f64, lon: f64) -> StopRow {
        StopRow {
            stop_id: id.to_string(),
            stop_lat: Some(lat),
            stop_lon: Some(lon),
        }
    }

    fn stop_time(id: &str, arrival: &str) -> StopTimeRow {
        StopTimeRow {
            stop_id: id.to_string(),
            arrival_time: arrival.to_string(),
            departure_time: arrival.to_string(),
        }
    }

    #[test]
    fn test_compute_orders_numeric_ids_by_value() {
        let stop_times = vec![
            stop_time("10", "08:00:00"),
            stop_time("10", "08:20:00"),
            stop_time("9", "08:00:00"),
            stop_time("9", "08:05:00"),
        ];
        let output = compute(&[stop("9", 1.0, 2.0), stop("10", 3.0, 4.0)], &stop_times);

        let ids: Vec<_> = output.results.iter().map(|r| r.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10"]);
        assert_eq!(output.results[0].wait_time, 5.0);
        assert_eq!(output.results[1].wait_time, 20.0);
    }

    #[test]
    fn test_compute_text_ids() {
        let stop_times = vec![
            stop_time("north", "07:00:00"),
            stop_time("north", "07:30:00"),
            stop_time("10", "07:00:00"),
            stop_time("10", "07:01:00"),
        ];
        let output = compute(&[stop("north", 1.0, 2.0)], &stop_times);

        let ids: Vec<_> = output.results.iter().map(|r| r.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "north"]);
        assert_eq!(output.results[0].stop_lat, None);
        assert_eq!(output.results[1].stop_lat, Some(1.0));
    }

    #[test]
    fn test_compute_overflow_collapses_onto_morning() {
        // 24:10 folds to 00:10 and becomes the first arrival of the day
        let stop_times = vec![
            stop_time("1", "23:50:00"),
            stop_time("1", "24:10:00"),
            stop_time("1", "00:40:00"),
        ];
        let output = compute(&[stop("1", 1.0, 2.0)], &stop_times);

        assert_eq!(output.report.gap_records, 2);
        assert_eq!(output.results[0].wait_time, (30.0 + 1390.0) / 2.0);
    }

    #[test]
    fn test_compute_skips_blank_stop_ids() {
        let stop_times = vec![
            stop_time("10", "08:00:00"),
            stop_time("10", "08:05:00"),
            stop_time("9", "08:00:00"),
            stop_time("9", "08:01:00"),
            stop_time("", "08:00:00"),
            stop_time("", "08:30:00"),
        ];
        let output = compute(&[stop("007", 1.0, 2.0)], &stop_times);

        let rows: Vec<_> = output
            .results
            .iter()
            .map(|r| (r.stop_id.as_str(), r.wait_time))
            .collect();
        assert_eq!(rows, vec![("9", 1.0), ("10", 5.0)]);
        assert_eq!(output.report.missing_stop_ids, 2);
        assert_eq!(output.report.records, 4);
    }

    #[test]
    fn test_compute_blank_ids_keep_numeric_matching() {
        let stop_times = vec![
            stop_time("7", "08:00:00"),
            stop_time("7", "08:10:00"),
            stop_time("", "08:00:00"),
        ];
        let output = compute(&[stop("007", 1.0, 2.0)], &stop_times);

        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].stop_lat, Some(1.0));
    }

    #[test]
    fn test_compute_empty_input() {
        let output = compute(&[], &[]);
        assert!(output.results.is_empty());
        assert_eq!(output.report.records, 0);
    }
}
