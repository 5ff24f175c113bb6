//! statistical_tests::sens_slope — Theil–Sen robust slope estimator.
//!
//! Purpose
//! -------
//! Estimate the magnitude of a monotonic trend as the median of all pairwise
//! slopes. Used alongside the Mann-Kendall test, which decides significance
//! and direction while Sen's slope supplies the rate of change.
//!
//! Key behaviors
//! -------------
//! - [`sens_slope`] assumes unit spacing: the slope for pair (i, j) is
//!   (x_j − x_i) / (j − i).
//! - [`sens_slope_with_times`] uses real timestamps: the slope for pair
//!   (i, j) is (x_j − x_i) / (t_j − t_i); pairs sharing a timestamp carry no
//!   slope information and are skipped.
//! - An even number of pairwise slopes yields the mean of the two middle
//!   values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite and validated by the callers in
//!   [`mann_kendall`](crate::statistical_tests::mann_kendall).
//! - Both routines are O(n²) in time and memory; typical compliance series
//!   hold tens to a few thousand observations.
//!
//! Conventions
//! -----------
//! - Time-aware slopes are expressed per unit of the supplied timestamps
//!   (per second or per day); callers convert to per-year for reporting.

use crate::statistical_tests::errors::{TrendError, TrendResult};

/// Sen's slope for a unit-spaced series (per index step).
///
/// Returns `0.0` for fewer than two observations.
pub fn sens_slope(values: &[f64]) -> f64 {
    let n = values.len();
    let mut slopes = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            slopes.push((values[j] - values[i]) / (j - i) as f64);
        }
    }
    median_in_place(&mut slopes).unwrap_or(0.0)
}

/// Sen's slope against real timestamps (per timestamp unit).
///
/// Parameters
/// ----------
/// - `times`: `&[f64]`
///   Finite timestamps, same length as `values`. Order does not matter.
/// - `values`: `&[f64]`
///   Finite observations.
///
/// Returns
/// -------
/// `TrendResult<f64>`
///   Median of (x_j − x_i) / (t_j − t_i) over all pairs with t_j ≠ t_i.
///
/// Errors
/// ------
/// - `TrendError::LengthMismatch` when the slices differ in length.
/// - `TrendError::NoDistinctTimestamps` when no pair has distinct
///   timestamps (including n < 2).
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::statistical_tests::sens_slope::sens_slope_with_times;
/// let times = [0.0, 2.0, 4.0, 6.0];
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(sens_slope_with_times(&times, &values).unwrap(), 0.5);
/// ```
pub fn sens_slope_with_times(times: &[f64], values: &[f64]) -> TrendResult<f64> {
    if times.len() != values.len() {
        return Err(TrendError::LengthMismatch { times: times.len(), values: values.len() });
    }

    let n = values.len();
    let mut slopes = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let dt = times[j] - times[i];
            if dt != 0.0 {
                slopes.push((values[j] - values[i]) / dt);
            }
        }
    }
    median_in_place(&mut slopes).ok_or(TrendError::NoDistinctTimestamps)
}

/// Median of a buffer (sorted in place); `None` when empty.
fn median_in_place(buf: &mut [f64]) -> Option<f64> {
    if buf.is_empty() {
        return None;
    }
    buf.sort_unstable_by(f64::total_cmp);
    let mid = buf.len() / 2;
    if buf.len() % 2 == 0 { Some(0.5 * (buf[mid - 1] + buf[mid])) } else { Some(buf[mid]) }
}
