use crate::analyzers::types::{NetworkSummary, StopRank, WaitTimeResult};
use crate::analyzers::utility::{mean, percentile_rank, quantile, stddev};

/// Summarizes the spread of mean waits across mapped stops.
pub fn summarize(results: &[WaitTimeResult]) -> NetworkSummary {
    let waits = mapped_waits(results);

    let mut summary = NetworkSummary {
        stop_count: results.len(),
        mapped_stop_count: waits.len(),
        ..Default::default()
    };
    if waits.is_empty() {
        return summary;
    }

    let avg = mean(&waits);
    summary.min_wait = waits.first().copied();
    summary.max_wait = waits.last().copied();
    summary.mean_wait = Some(avg);
    summary.median_wait = quantile(&waits, 0.5);
    summary.q1_wait = quantile(&waits, 0.25);
    summary.q3_wait = quantile(&waits, 0.75);
    summary.stddev_wait = Some(stddev(&waits, avg));
    summary
}

/// The `n` mapped stops with the longest waits, worst first.
///
/// Rank 1 is the longest wait in the network; `percentile` is the share of
/// mapped stops with a shorter wait.
pub fn longest_waits(results: &[WaitTimeResult], n: usize) -> Vec<StopRank> {
    let waits = mapped_waits(results);

    let mut mapped: Vec<&WaitTimeResult> = results.iter().filter(|r| r.is_mapped()).collect();
    mapped.sort_by(|a, b| b.wait_time.total_cmp(&a.wait_time));

    mapped
        .into_iter()
        .take(n)
        .map(|r| {
            let longer = waits.len() - waits.partition_point(|w| *w <= r.wait_time);
            StopRank {
                stop_id: r.stop_id.clone(),
                wait_time: r.wait_time,
                rank: longer + 1,
                percentile: percentile_rank(&waits, r.wait_time),
            }
        })
        .collect()
}

fn mapped_waits(results: &[WaitTimeResult]) -> Vec<f64> {
    let mut waits: Vec<f64> = results
        .iter()
        .filter(|r| r.is_mapped())
        .map(|r| r.wait_time)
        .collect();
    waits.sort_by(f64::total_cmp);
    waits
}
