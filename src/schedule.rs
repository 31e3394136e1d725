//! Per-stop arrival gaps.
//!
//! Records are grouped by stop, ordered by arrival, and each arrival is paired
//! with the next one at the same stop. The last arrival at a stop has no
//! successor and produces no gap.

use chrono::NaiveTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::gtfs::{KeyMode, StopKey, StopTimeRow};
use crate::time::to_clock_time;

/// A stop time with its arrival and departure folded onto a 24 hour clock.
///
/// A time that failed to parse is `None`; any gap that would involve it is
/// undefined and the record is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTimeRecord {
    pub stop: StopKey,
    pub arrival: Option<NaiveTime>,
    pub departure: Option<NaiveTime>,
}

impl StopTimeRecord {
    /// Returns `None` when the row's stop id cannot be keyed in `mode`.
    pub fn from_row(row: &StopTimeRow, mode: KeyMode) -> Option<Self> {
        Some(Self {
            stop: mode.key(&row.stop_id)?,
            arrival: to_clock_time(&row.arrival_time),
            departure: to_clock_time(&row.departure_time),
        })
    }
}

/// One arrival and the next arrival at the same stop.
#[derive(Debug, Clone, PartialEq)]
pub struct GapRecord {
    pub stop: StopKey,
    pub arrival: NaiveTime,
    pub next_arrival: NaiveTime,
    pub wait_minutes: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub records: usize,
    pub missing_stop_ids: usize,
    pub invalid_arrivals: usize,
    pub invalid_departures: usize,
    pub stops_seen: usize,
    pub gap_records: usize,
    pub dropped_last_arrivals: usize,
}

/// Minutes from `from` to `to`, fractional when seconds differ.
pub fn minutes_between(from: NaiveTime, to: NaiveTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Builds gap records for every stop, ordered by stop then arrival.
///
/// Sorting is stable, so arrivals sharing a timestamp keep input order.
pub fn compute_gaps(records: &[StopTimeRecord]) -> (Vec<GapRecord>, TransformReport) {
    let mut report = TransformReport {
        records: records.len(),
        ..Default::default()
    };

    let mut timed: Vec<(&StopKey, NaiveTime)> = Vec::with_capacity(records.len());
    for record in records {
        if record.departure.is_none() {
            report.invalid_departures += 1;
        }
        match record.arrival {
            Some(arrival) => timed.push((&record.stop, arrival)),
            None => report.invalid_arrivals += 1,
        }
    }

    timed.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(&b.1)));

    let mut gaps = Vec::with_capacity(timed.len());
    for group in timed.chunk_by(|a, b| a.0 == b.0) {
        report.stops_seen += 1;
        report.dropped_last_arrivals += 1;

        for pair in group.windows(2) {
            let (stop, arrival) = pair[0];
            let next_arrival = pair[1].1;
            gaps.push(GapRecord {
                stop: stop.clone(),
                arrival,
                next_arrival,
                wait_minutes: minutes_between(arrival, next_arrival),
            });
        }
        debug!(stop = %group[0].0, arrivals = group.len(), "Stop gaps computed");
    }
    report.gap_records = gaps.len();

    info!(
        records = report.records,
        invalid_arrivals = report.invalid_arrivals,
        invalid_departures = report.invalid_departures,
        stops = report.stops_seen,
        gaps = report.gap_records,
        "Schedule transformed"
    );

    (gaps, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, s)
    }

    fn record(stop: i64, arrival: Option<NaiveTime>) -> StopTimeRecord {
        StopTimeRecord {
            stop: StopKey::Numeric(stop),
            arrival,
            departure: arrival,
        }
    }

    #[test]
    fn test_three_arrivals_give_two_gaps() {
        let records = vec![
            record(1, t(8, 25, 0)),
            record(1, t(8, 0, 0)),
            record(1, t(8, 10, 0)),
        ];
        let (gaps, report) = compute_gaps(&records);

        let waits: Vec<f64> = gaps.iter().map(|g| g.wait_minutes).collect();
        assert_eq!(waits, vec![10.0, 15.0]);
        assert_eq!(gaps[1].next_arrival, t(8, 25, 0).unwrap());
        assert_eq!(report.gap_records, 2);
        assert_eq!(report.dropped_last_arrivals, 1);
    }

    #[test]
    fn test_single_arrival_gives_no_gap() {
        let (gaps, report) = compute_gaps(&[record(4, t(9, 0, 0))]);
        assert!(gaps.is_empty());
        assert_eq!(report.stops_seen, 1);
    }

    #[test]
    fn test_groups_do_not_cross_stops() {
        let records = vec![
            record(2, t(8, 0, 0)),
            record(1, t(8, 5, 0)),
            record(2, t(8, 30, 0)),
            record(1, t(8, 6, 0)),
        ];
        let (gaps, _) = compute_gaps(&records);

        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].stop, StopKey::Numeric(1));
        assert_eq!(gaps[0].wait_minutes, 1.0);
        assert_eq!(gaps[1].stop, StopKey::Numeric(2));
        assert_eq!(gaps[1].wait_minutes, 30.0);
    }

    #[test]
    fn test_invalid_arrivals_are_skipped() {
        let records = vec![
            record(1, t(8, 0, 0)),
            record(1, None),
            record(1, t(8, 20, 0)),
        ];
        let (gaps, report) = compute_gaps(&records);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].wait_minutes, 20.0);
        assert_eq!(report.invalid_arrivals, 1);
    }

    #[test]
    fn test_fractional_minutes() {
        let (gaps, _) = compute_gaps(&[record(1, t(8, 0, 0)), record(1, t(8, 1, 30))]);
        assert_eq!(gaps[0].wait_minutes, 1.5);
    }

    #[test]
    fn test_equal_arrivals_give_zero_wait() {
        let (gaps, _) = compute_gaps(&[record(1, t(8, 0, 0)), record(1, t(8, 0, 0))]);
        assert_eq!(gaps[0].wait_minutes, 0.0);
    }

    #[test]
    fn test_from_row_folds_overflow_and_tolerates_garbage() {
        let row = StopTimeRow {
            stop_id: "12".to_string(),
            arrival_time: "25:30:00".to_string(),
            departure_time: "later".to_string(),
        };
        let record = StopTimeRecord::from_row(&row, KeyMode::Numeric).unwrap();

        assert_eq!(record.stop, StopKey::Numeric(12));
        assert_eq!(record.arrival, t(1, 30, 0));
        assert_eq!(record.departure, None);
    }
}
