use std::collections::HashMap;

use tracing::{debug, warn};

use crate::analyzers::types::WaitTimeResult;
use crate::analyzers::utility::mean;
use crate::gtfs::{KeyMode, StopKey, StopRow};
use crate::schedule::GapRecord;

/// Coordinates of every `stops.txt` row, keyed like the stop times.
///
/// Duplicate ids keep all their rows in file order.
pub struct StopTable {
    rows: HashMap<StopKey, Vec<(Option<f64>, Option<f64>)>>,
}

impl StopTable {
    pub fn new(stops: &[StopRow], mode: KeyMode) -> Self {
        let mut rows: HashMap<StopKey, Vec<_>> = HashMap::new();

        for stop in stops {
            let Some(key) = mode.key(&stop.stop_id) else {
                debug!(stop_id = %stop.stop_id, "Stop id cannot match stop times, ignored");
                continue;
            };
            let entry = rows.entry(key).or_default();
            if !entry.is_empty() {
                warn!(stop_id = %stop.stop_id, "Duplicate stop id in stops table");
            }
            entry.push((stop.stop_lat, stop.stop_lon));
        }

        Self { rows }
    }

    /// Latitude and longitude for `key`, each the first present value among
    /// the matching rows. Both are `None` for an unknown stop.
    pub fn coordinates(&self, key: &StopKey) -> (Option<f64>, Option<f64>) {
        match self.rows.get(key) {
            Some(rows) => (
                first_present(rows.iter().map(|r| r.0)),
                first_present(rows.iter().map(|r| r.1)),
            ),
            None => (None, None),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reducer for per-stop coordinates: the first non-null value wins.
pub fn first_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().next()
}

/// Joins gaps with stop coordinates and averages the wait per stop.
///
/// `gaps` must be grouped by stop, as [`compute_gaps`](crate::schedule::compute_gaps)
/// returns them; rows come out in the same stop order. Stops missing from
/// `stops` are kept with empty coordinates.
pub fn aggregate_waits(gaps: &[GapRecord], stops: &StopTable) -> Vec<WaitTimeResult> {
    let mut results = Vec::new();
    let mut unmatched = 0usize;

    for group in gaps.chunk_by(|a, b| a.stop == b.stop) {
        let stop = &group[0].stop;
        let waits: Vec<f64> = group.iter().map(|g| g.wait_minutes).collect();
        let (stop_lat, stop_lon) = stops.coordinates(stop);

        if stop_lat.is_none() && stop_lon.is_none() {
            unmatched += 1;
        }

        results.push(WaitTimeResult {
            stop_id: stop.to_string(),
            stop_lat,
            stop_lon,
            wait_time: mean(&waits),
        });
    }

    if unmatched > 0 {
        warn!(unmatched, "Stops without coordinates");
    }

    results
}
