/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Linear-interpolated quantile of ascending `sorted` values, `p` in 0.0–1.0.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 || p <= 0.0 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let lower = sorted[lo];
    let upper = sorted[lo + 1];
    Some(lower + (upper - lower) * (h - lo as f64))
}

/// Index of the first element of `sorted` not less than `value`.
pub fn bisect_left(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|v| *v < value)
}

/// Position of `value` within `sorted` as a 0–100 percentage.
pub fn percentile_rank(sorted: &[f64], value: f64) -> f64 {
    if sorted.len() <= 1 {
        return 0.0;
    }
    100.0 * bisect_left(sorted, value) as f64 / (sorted.len() - 1) as f64
}
