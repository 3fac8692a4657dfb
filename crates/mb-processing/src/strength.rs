//! Channel strength statistics
//!
//! A channel's strength is the mean of its largest readings within one
//! recording window.

/// Number of peak readings averaged into a channel strength
pub const TOP_READINGS: usize = 3;

/// Mean of the three largest readings.
///
/// Returns 0.0 for an empty slice. Fewer than three readings are all averaged.
pub fn top_three_average(readings: &[f64]) -> f64 {
    top_n_average(readings, TOP_READINGS)
}

/// Mean of the `n` largest readings, or of all readings when fewer than `n`.
///
/// Returns 0.0 when `readings` is empty or `n` is zero. Ordering uses
/// [`f64::total_cmp`], so NaN values sort deterministically (a positive NaN
/// ranks above infinity and ends up in the mean).
pub fn top_n_average(readings: &[f64], n: usize) -> f64 {
    let count = n.min(readings.len());
    if count == 0 {
        return 0.0;
    }

    let mut sorted = readings.to_vec();
    sorted.sort_unstable_by(|a, b| b.total_cmp(a));

    let sum: f64 = sorted[..count].iter().sum();
    sum / count as f64
}
