//! Data types produced by the aggregation step.

use serde::{Deserialize, Serialize};

/// Mean wait at a single stop, one row of `wait_time_per_stop.csv`.
///
/// Coordinates are `None` when the stop is missing from `stops.txt`; they are
/// written as empty CSV fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitTimeResult {
    pub stop_id: String,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub wait_time: f64,
}

impl WaitTimeResult {
    /// True when the row can be placed on a map.
    pub fn is_mapped(&self) -> bool {
        matches!((self.stop_lat, self.stop_lon), (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite())
            && self.wait_time.is_finite()
    }
}

/// Network-wide distribution of per-stop mean waits.
///
/// Statistics cover mapped stops only and are `None` when there are none.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub stop_count: usize,
    pub mapped_stop_count: usize,
    pub min_wait: Option<f64>,
    pub max_wait: Option<f64>,
    pub mean_wait: Option<f64>,
    pub median_wait: Option<f64>,
    pub q1_wait: Option<f64>,
    pub q3_wait: Option<f64>,
    pub stddev_wait: Option<f64>,
}

/// A stop's standing among all mapped stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopRank {
    pub stop_id: String,
    pub wait_time: f64,
    pub rank: usize,
    pub percentile: f64,
}
