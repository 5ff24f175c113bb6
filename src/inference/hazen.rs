//! inference::hazen — percentile ↔ value mapping under Hazen positions.
//!
//! Purpose
//! -------
//! Convert between ranks (cumulative probabilities) and measurement values
//! for an empirical sample, including extrapolation beyond the observed
//! extremes. Percentile point estimates, tolerance limits and the observed
//! rank of a regulatory limit all go through this mapping.
//!
//! Key behaviors
//! -------------
//! - Hazen plotting positions: the i-th order statistic (1-based) of n has
//!   rank (i − 0.5)/n.
//! - [`HazenRanks::rank_to_value`] interpolates linearly in *probit* space
//!   (standard-normal quantiles of the ranks) and extrapolates linearly in
//!   probit space past either extreme, using the two outermost points of the
//!   relevant tail.
//! - [`HazenRanks::value_to_rank`] interpolates linearly in *rank* space;
//!   values below the minimum map to 0.0 and above the maximum to 1.0.
//! - [`PhysicalBounds`] optionally clamps values to a physically meaningful
//!   range and reports which side was applied.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples are finite and non-empty; construction validates both.
//! - Ranks passed to `rank_to_value` are clamped to [1e−9, 1 − 1e−9] so the
//!   probit transform stays finite.
//! - `rank_to_value` is non-decreasing in the rank.
//! - Tied values resolve to the right-most tied rank in `value_to_rank`.
//!
//! Conventions
//! -----------
//! - The two directions intentionally use different interpolation spaces,
//!   so a round trip is exact at sample points and approximate between them.
//!
//! Testing notes
//! -------------
//! - Unit tests check round trips at sample points, bracketing between
//!   points, tail extrapolation against hand-computed values, monotonicity,
//!   tie handling, the single-point case and physical clamping.

use crate::inference::errors::{InferenceError, InferenceResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// Lower/upper clamp applied to ranks before the probit transform.
pub const RANK_EPSILON: f64 = 1e-9;

/// HazenRanks — sorted sample with precomputed Hazen ranks and probits.
///
/// Fields
/// ------
/// - `sorted`: `Vec<f64>`
///   Sample sorted ascending.
/// - `ranks`: `Vec<f64>`
///   Hazen ranks (i + 0.5)/n for 0-based i.
/// - `probits`: `Vec<f64>`
///   Standard-normal quantiles of `ranks` (strictly increasing).
///
/// Performance
/// -----------
/// - Construction sorts once (O(n log n)); each lookup is a binary search.
#[derive(Debug, Clone)]
pub struct HazenRanks {
    sorted: Vec<f64>,
    ranks: Vec<f64>,
    probits: Vec<f64>,
    normal: Normal,
}

impl HazenRanks {
    /// Build the mapping for a sample.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::EmptyData` for an empty sample.
    /// - `InferenceError::NonFiniteData { index, value }` for NaN/±∞.
    pub fn new(data: &[f64]) -> InferenceResult<Self> {
        if data.is_empty() {
            return Err(InferenceError::EmptyData);
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InferenceError::NonFiniteData { index, value });
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| InferenceError::Distribution(e.to_string()))?;
        let mut sorted = data.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let ranks: Vec<f64> = (0..sorted.len()).map(|i| (i as f64 + 0.5) / n).collect();
        let probits = ranks.iter().map(|&p| normal.inverse_cdf(p)).collect();

        Ok(HazenRanks { sorted, ranks, probits, normal })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Sample value at a given rank, with probit-space tail extrapolation.
    ///
    /// Parameters
    /// ----------
    /// - `rank`: `f64`
    ///   Cumulative probability; clamped to [1e−9, 1 − 1e−9].
    ///
    /// Returns
    /// -------
    /// `InferenceResult<f64>`
    ///   - the single sample value when n = 1,
    ///   - linear interpolation in probit space between the bracketing
    ///     order statistics when the rank lies within the Hazen ranks,
    ///   - linear extrapolation in probit space through the two outermost
    ///     order statistics otherwise.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::InvalidProportion` when `rank` is NaN.
    pub fn rank_to_value(&self, rank: f64) -> InferenceResult<f64> {
        if rank.is_nan() {
            return Err(InferenceError::InvalidProportion { value: rank });
        }
        let n = self.sorted.len();
        if n < 2 {
            return Ok(self.sorted[0]);
        }

        let z = self.normal.inverse_cdf(rank.clamp(RANK_EPSILON, 1.0 - RANK_EPSILON));
        let (s, zs) = (&self.sorted, &self.probits);

        if z > zs[n - 1] {
            let slope = (s[n - 1] - s[n - 2]) / (zs[n - 1] - zs[n - 2]);
            return Ok(s[n - 1] + slope * (z - zs[n - 1]));
        }
        if z < zs[0] {
            let slope = (s[1] - s[0]) / (zs[1] - zs[0]);
            return Ok(s[0] + slope * (z - zs[0]));
        }

        let j = zs.partition_point(|&zi| zi <= z) - 1;
        if j >= n - 1 {
            return Ok(s[n - 1]);
        }
        let w = (z - zs[j]) / (zs[j + 1] - zs[j]);
        Ok(s[j] + w * (s[j + 1] - s[j]))
    }

    /// Rank of a value by linear interpolation in rank space.
    ///
    /// Returns
    /// -------
    /// `InferenceResult<f64>`
    ///   0.0 below the minimum, 1.0 above the maximum, otherwise the
    ///   interpolated Hazen rank (right-most rank among ties).
    ///
    /// Errors
    /// ------
    /// - `InferenceError::NonFiniteData` when `value` is NaN.
    pub fn value_to_rank(&self, value: f64) -> InferenceResult<f64> {
        if value.is_nan() {
            return Err(InferenceError::NonFiniteData { index: 0, value });
        }
        let n = self.sorted.len();
        let (s, r) = (&self.sorted, &self.ranks);

        if value < s[0] {
            return Ok(0.0);
        }
        if value > s[n - 1] {
            return Ok(1.0);
        }

        let upper = s.partition_point(|&x| x <= value);
        if upper >= n {
            return Ok(r[n - 1]);
        }
        let j = upper - 1;
        let w = (value - s[j]) / (s[j + 1] - s[j]);
        Ok(r[j] + w * (r[j + 1] - r[j]))
    }
}

/// Sample value at a rank; see [`HazenRanks::rank_to_value`].
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::inference::rank_to_value;
/// let data = [3.0, 1.0, 2.0, 4.0];
/// // Hazen rank of the 2nd order statistic is 0.375.
/// assert!((rank_to_value(&data, 0.375).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn rank_to_value(data: &[f64], rank: f64) -> InferenceResult<f64> {
    HazenRanks::new(data)?.rank_to_value(rank)
}

/// Rank of a value; see [`HazenRanks::value_to_rank`].
pub fn value_to_rank(data: &[f64], value: f64) -> InferenceResult<f64> {
    HazenRanks::new(data)?.value_to_rank(value)
}

/// Side of a physical bound that clamped a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalBound {
    Minimum,
    Maximum,
}

/// A value after physical clamping, with the bound that applied (if any).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedValue {
    pub value: f64,
    pub bound: Option<PhysicalBound>,
}

/// Optional physically meaningful range for reported values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PhysicalBounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        PhysicalBounds { min, max }
    }

    /// Clamp `value` into the configured range.
    pub fn apply(&self, value: f64) -> BoundedValue {
        match (self.min, self.max) {
            (Some(lo), _) if value < lo => {
                BoundedValue { value: lo, bound: Some(PhysicalBound::Minimum) }
            }
            (_, Some(hi)) if value > hi => {
                BoundedValue { value: hi, bound: Some(PhysicalBound::Maximum) }
            }
            _ => BoundedValue { value, bound: None },
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// [`rank_to_value`] followed by physical clamping.
pub fn rank_to_value_bounded(
    data: &[f64], rank: f64, bounds: &PhysicalBounds,
) -> InferenceResult<BoundedValue> {
    Ok(bounds.apply(rank_to_value(data, rank)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round trips at sample points and bracketing between them.
    // - Probit-space tail extrapolation on both sides.
    // - Monotonicity, tie handling, single-point samples.
    // - Physical clamping.
    // -------------------------------------------------------------------------

    fn probit(p: f64) -> f64 {
        Normal::new(0.0, 1.0).unwrap().inverse_cdf(p)
    }

    #[test]
    // Purpose
    // -------
    // Verify value → rank → value is exact at every sample point.
    //
    // Given
    // -----
    // - data = [5, 1, 9, 3, 7] (distinct, unsorted).
    //
    // Expect
    // ------
    // - rank_to_value(value_to_rank(x)) = x for each x.
    // - value_to_rank of the sorted i-th point equals (i + 0.5)/5.
    fn hazen_round_trip_is_exact_at_sample_points() {
        // Arrange
        let data = [5.0, 1.0, 9.0, 3.0, 7.0];
        let hz = HazenRanks::new(&data).unwrap();

        for (i, &x) in [1.0, 3.0, 5.0, 7.0, 9.0].iter().enumerate() {
            // Act
            let r = hz.value_to_rank(x).unwrap();
            let back = hz.rank_to_value(r).unwrap();

            // Assert
            assert_relative_eq!(r, (i as f64 + 0.5) / 5.0, epsilon = 1e-12);
            assert_relative_eq!(back, x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a round trip between sample points stays inside the
    // bracketing interval.
    //
    // Given
    // -----
    // - data = [1, 3, 5, 7, 9]; v = 4.0.
    //
    // Expect
    // ------
    // - 3 < rank_to_value(value_to_rank(4)) < 5.
    fn hazen_round_trip_between_points_stays_bracketed() {
        let hz = HazenRanks::new(&[1.0, 3.0, 5.0, 7.0, 9.0]).unwrap();

        let back = hz.rank_to_value(hz.value_to_rank(4.0).unwrap()).unwrap();

        assert!(back > 3.0 && back < 5.0, "got {back}");
    }

    #[test]
    // Purpose
    // -------
    // Check upper and lower tail extrapolation against the closed form.
    //
    // Given
    // -----
    // - data = [1, 2, 3, 4]; ranks 0.99 and 0.01.
    //
    // Expect
    // ------
    // - Upper: 4 + (4 − 3)/(z(0.875) − z(0.625)) · (z(0.99) − z(0.875)).
    // - Lower: 1 + (2 − 1)/(z(0.375) − z(0.125)) · (z(0.01) − z(0.125)).
    fn hazen_rank_to_value_extrapolates_in_probit_space() {
        // Arrange
        let hz = HazenRanks::new(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let up = 4.0 + (probit(0.99) - probit(0.875)) / (probit(0.875) - probit(0.625));
        let lo = 1.0 + (probit(0.01) - probit(0.125)) / (probit(0.375) - probit(0.125));

        // Act / Assert
        assert_relative_eq!(hz.rank_to_value(0.99).unwrap(), up, epsilon = 1e-9);
        assert_relative_eq!(hz.rank_to_value(0.01).unwrap(), lo, epsilon = 1e-9);
        assert!(hz.rank_to_value(0.99).unwrap() > 4.0);
        assert!(hz.rank_to_value(0.01).unwrap() < 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify `rank_to_value` is non-decreasing across the full rank range,
    // including the clamped extremes.
    //
    // Given
    // -----
    // - data with ties: [2, 2, 5, 8, 8, 8, 13]; ranks from 0 to 1 in steps
    //   of 0.001.
    //
    // Expect
    // ------
    // - Each value ≥ the previous one; rank 0 and 1 give finite values.
    fn hazen_rank_to_value_is_monotone() {
        let hz = HazenRanks::new(&[2.0, 2.0, 5.0, 8.0, 8.0, 8.0, 13.0]).unwrap();

        let mut prev = f64::NEG_INFINITY;
        for i in 0..=1000 {
            let v = hz.rank_to_value(i as f64 / 1000.0).unwrap();
            assert!(v.is_finite());
            assert!(v >= prev - 1e-12, "non-monotone at rank {}: {v} < {prev}", i as f64 / 1000.0);
            prev = v;
        }
    }

    #[test]
    // Purpose
    // -------
    // Check `value_to_rank` outside the range and on ties.
    //
    // Given
    // -----
    // - data = [1, 2, 2, 2, 3] (n = 5).
    //
    // Expect
    // ------
    // - 0.5 → 0.0, 3.5 → 1.0, 2.0 → rank of the right-most tie (3.5/5),
    //   3.0 → 4.5/5, 1.0 → 0.5/5.
    fn hazen_value_to_rank_handles_range_and_ties() {
        let hz = HazenRanks::new(&[1.0, 2.0, 2.0, 2.0, 3.0]).unwrap();

        assert_eq!(hz.value_to_rank(0.5).unwrap(), 0.0);
        assert_eq!(hz.value_to_rank(3.5).unwrap(), 1.0);
        assert_relative_eq!(hz.value_to_rank(2.0).unwrap(), 0.7, epsilon = 1e-12);
        assert_relative_eq!(hz.value_to_rank(3.0).unwrap(), 0.9, epsilon = 1e-12);
        assert_relative_eq!(hz.value_to_rank(1.0).unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify single-point and empty samples.
    //
    // Given
    // -----
    // - data = [4.2]; an empty slice.
    //
    // Expect
    // ------
    // - Any rank maps to 4.2; empty input is `InferenceError::EmptyData`.
    fn hazen_single_point_and_empty_samples() {
        assert_eq!(rank_to_value(&[4.2], 0.99).unwrap(), 4.2);
        assert_eq!(rank_to_value(&[4.2], 0.01).unwrap(), 4.2);
        assert_eq!(rank_to_value(&[], 0.5), Err(InferenceError::EmptyData));
    }

    #[test]
    // Purpose
    // -------
    // Check physical clamping reports the applied bound.
    //
    // Given
    // -----
    // - bounds [0, 10]; values −1, 5, 12; unbounded config.
    //
    // Expect
    // ------
    // - (0, Minimum), (5, None), (10, Maximum); unbounded leaves −1 alone.
    fn physical_bounds_clamp_and_report() {
        let b = PhysicalBounds::new(Some(0.0), Some(10.0));

        assert_eq!(b.apply(-1.0), BoundedValue { value: 0.0, bound: Some(PhysicalBound::Minimum) });
        assert_eq!(b.apply(5.0), BoundedValue { value: 5.0, bound: None });
        assert_eq!(b.apply(12.0), BoundedValue { value: 10.0, bound: Some(PhysicalBound::Maximum) });
        assert_eq!(PhysicalBounds::default().apply(-1.0).value, -1.0);
        assert!(PhysicalBounds::default().is_unbounded());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the bounded variant clamps extrapolated tails.
    //
    // Given
    // -----
    // - data = [0.1, 0.2, 5.0]; rank 1e−6 (extrapolates below 0);
    //   bound min = 0.
    //
    // Expect
    // ------
    // - Unbounded value < 0; bounded value 0 with `Minimum`.
    fn rank_to_value_bounded_clamps_extrapolated_tail() {
        let data = [0.1, 0.2, 5.0];
        let unbounded = rank_to_value(&data, 1e-6).unwrap();

        let bounded =
            rank_to_value_bounded(&data, 1e-6, &PhysicalBounds::new(Some(0.0), None)).unwrap();

        assert!(unbounded < 0.0, "got {unbounded}");
        assert_eq!(bounded, BoundedValue { value: 0.0, bound: Some(PhysicalBound::Minimum) });
    }
}
