//! statistical_tests::mann_kendall — nonparametric monotonic trend test.
//!
//! Purpose
//! -------
//! Implement the Mann-Kendall test for a monotonic trend in a time-ordered
//! series, with the tie-corrected variance of the S statistic and a normal
//! approximation for the two-sided p-value. The robust magnitude of the
//! trend is supplied by Sen's slope.
//!
//! Key behaviors
//! -------------
//! - S = Σ_{i<j} sign(x_j − x_i) over time order.
//! - Var(S) = [n(n−1)(2n+5) − Σ_p t_p(t_p−1)(2t_p+5)] / 18, where t_p are
//!   the sizes of groups of exactly equal values.
//! - Continuity-corrected z: (S − 1)/√Var for S > 0, (S + 1)/√Var for S < 0
//!   and 0 for S = 0.
//! - p = 2·(1 − Φ(|z|)); the trend is significant iff |z| > Φ⁻¹(1 − α/2).
//! - [`TrendOutcome`] bundles the decision, p-value, Kendall's τ and Sen's
//!   slope.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are passed in time order; the time-aware entry point uses the
//!   timestamps only for the slope.
//! - Input validation is delegated to
//!   [`validation`](crate::statistical_tests::validation) and failures are
//!   reported as [`TrendError`](crate::statistical_tests::TrendError).
//! - A degenerate variance (all values tied) yields z = 0 and p = 1.
//!
//! Conventions
//! -----------
//! - α is the two-sided significance level; the compliance pipeline
//!   uses 0.05 unless told otherwise.
//! - Kendall's τ is reported as τ_a = S / (n(n−1)/2) and is advisory.
//!
//! Testing notes
//! -------------
//! - Unit tests check S and Var(S) on small hand-computed series, the tie
//!   correction, the z continuity correction, significance on strong trends
//!   and non-significance on alternating noise.

use crate::statistical_tests::{
    errors::{TrendError, TrendResult},
    sens_slope::{sens_slope, sens_slope_with_times},
    validation::{validate_time_aware_input, validate_trend_input},
};
use statrs::distribution::{ContinuousCDF, Normal};

/// Direction of a detected trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    NoTrend,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::NoTrend => "no trend",
        })
    }
}

/// TrendOutcome — result of a Mann-Kendall test with Sen's slope.
///
/// Fields
/// ------
/// - `direction`: [`TrendDirection`]
///   `Increasing`/`Decreasing` when significant, otherwise `NoTrend`.
/// - `significant`: `bool`
///   Whether |z| exceeds the two-sided critical value.
/// - `p_value`: `f64`
///   Two-sided normal-approximation p-value in [0, 1].
/// - `z`: `f64`
///   Continuity-corrected standardized statistic.
/// - `tau`: `f64`
///   Kendall's τ_a.
/// - `s`: `i64`
///   Mann-Kendall S statistic.
/// - `var_s`: `f64`
///   Tie-corrected variance of S.
/// - `slope`: `f64`
///   Sen's slope, per index step or per timestamp unit depending on the
///   entry point. Reported regardless of significance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendOutcome {
    pub direction: TrendDirection,
    pub significant: bool,
    pub p_value: f64,
    pub z: f64,
    pub tau: f64,
    pub s: i64,
    pub var_s: f64,
    pub slope: f64,
}

impl TrendOutcome {
    /// Run the Mann-Kendall test on a unit-spaced series.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `&[f64]`
    ///   Time-ordered observations, length ≥ 3, all finite.
    /// - `alpha`: `f64`
    ///   Two-sided significance level in (0, 1), typically 0.05.
    ///
    /// Returns
    /// -------
    /// `TrendResult<TrendOutcome>`
    ///   Decision, statistics and Sen's slope per index step.
    ///
    /// Errors
    /// ------
    /// - Any [`TrendError`](crate::statistical_tests::TrendError) raised by
    ///   [`validate_trend_input`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_compliance::statistical_tests::{TrendDirection, TrendOutcome};
    ///
    /// let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
    /// let outcome = TrendOutcome::mann_kendall(&values, 0.05).unwrap();
    /// assert_eq!(outcome.direction, TrendDirection::Increasing);
    /// assert!((outcome.slope - 1.0).abs() < 1e-12);
    /// ```
    pub fn mann_kendall(values: &[f64], alpha: f64) -> TrendResult<Self> {
        validate_trend_input(values, alpha)?;
        Ok(Self::from_statistic(values, alpha, sens_slope(values)))
    }

    /// Run the Mann-Kendall test with a time-aware Sen's slope.
    ///
    /// Parameters
    /// ----------
    /// - `times`: `&[f64]`
    ///   Non-decreasing, finite timestamps.
    /// - `values`: `&[f64]`
    ///   Observations paired with `times`.
    /// - `alpha`: `f64`
    ///   Two-sided significance level in (0, 1).
    ///
    /// Returns
    /// -------
    /// `TrendResult<TrendOutcome>`
    ///   Decision and statistics; `slope` is per timestamp unit, and 0 when
    ///   no two timestamps differ and the trend is not significant.
    ///
    /// Errors
    /// ------
    /// - Any error from [`validate_time_aware_input`].
    /// - `TrendError::NoDistinctTimestamps` when all timestamps coincide
    ///   and the trend is significant.
    pub fn mann_kendall_with_times(times: &[f64], values: &[f64], alpha: f64) -> TrendResult<Self> {
        validate_time_aware_input(times, values, alpha)?;
        let mut outcome = Self::from_statistic(values, alpha, 0.0);
        outcome.slope = match sens_slope_with_times(times, values) {
            Ok(slope) => slope,
            Err(TrendError::NoDistinctTimestamps) if !outcome.significant => 0.0,
            Err(err) => return Err(err),
        };
        Ok(outcome)
    }

    fn from_statistic(values: &[f64], alpha: f64, slope: f64) -> Self {
        let n = values.len();
        let s = calc_s(values);
        let var_s = calc_var_s(values);
        let z = calc_z(s, var_s);

        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let p_value = (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0);
        let z_crit = normal.inverse_cdf(1.0 - alpha / 2.0);
        let significant = z.abs() > z_crit;

        let direction = match (significant, s.signum()) {
            (true, 1) => TrendDirection::Increasing,
            (true, -1) => TrendDirection::Decreasing,
            _ => TrendDirection::NoTrend,
        };

        let n_pairs = (n * (n - 1)) as f64 / 2.0;

        TrendOutcome { direction, significant, p_value, z, tau: s as f64 / n_pairs, s, var_s, slope }
    }
}

//
// ---------- Private helpers ----------
//

/// S = Σ_{i<j} sign(x_j − x_i).
fn calc_s(values: &[f64]) -> i64 {
    let n = values.len();
    let mut s: i64 = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let diff = values[j] - values[i];
            if diff > 0.0 {
                s += 1;
            } else if diff < 0.0 {
                s -= 1;
            }
        }
    }
    s
}

/// Tie-corrected Var(S).
///
/// Tie groups are runs of exactly equal values in a sorted copy.
fn calc_var_s(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mut tie_term = 0.0;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        let t = (end - start) as f64;
        if t > 1.0 {
            tie_term += t * (t - 1.0) * (2.0 * t + 5.0);
        }
        start = end;
    }

    (n * (n - 1.0) * (2.0 * n + 5.0) - tie_term) / 18.0
}

/// Continuity-corrected z statistic; 0 when S = 0 or Var(S) ≤ 0.
fn calc_z(s: i64, var_s: f64) -> f64 {
    if var_s <= 0.0 {
        return 0.0;
    }
    let sd = var_s.sqrt();
    match s.signum() {
        1 => (s - 1) as f64 / sd,
        -1 => (s + 1) as f64 / sd,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - S, Var(S) (with and without ties) and the z continuity correction.
    // - End-to-end decisions on monotone, alternating and constant series.
    // - Time-aware slope units and the 100-point doubling scenario.
    //
    // They intentionally DO NOT cover:
    // - Exact agreement with third-party implementations beyond the
    //   closed-form quantities checked here.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify S and Var(S) on a small series without ties.
    //
    // Given
    // -----
    // - values = [1, 3, 2, 4].
    //   Pairs: (1,3)+ (1,2)+ (1,4)+ (3,2)− (3,4)+ (2,4)+ → S = 4.
    //
    // Expect
    // ------
    // - S = 4, Var(S) = 4·3·13/18 = 26/3.
    fn calc_s_and_var_s_match_hand_computation() {
        // Arrange
        let values = [1.0, 3.0, 2.0, 4.0];

        // Act
        let s = calc_s(&values);
        let var_s = calc_var_s(&values);

        // Assert
        assert_eq!(s, 4);
        assert_relative_eq!(var_s, 26.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the tie correction removes each tie group's contribution.
    //
    // Given
    // -----
    // - values = [1, 1, 2, 2, 2] with groups of sizes 2 and 3.
    //
    // Expect
    // ------
    // - Var(S) = [5·4·15 − (2·1·9 + 3·2·11)] / 18 = (300 − 84) / 18 = 12.
    fn calc_var_s_applies_tie_correction() {
        let var_s = calc_var_s(&[1.0, 1.0, 2.0, 2.0, 2.0]);

        assert_relative_eq!(var_s, 12.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the continuity correction moves S one step towards zero.
    //
    // Given
    // -----
    // - (S, Var) ∈ {(5, 4), (−5, 4), (0, 4), (3, 0)}.
    //
    // Expect
    // ------
    // - z = 2, −2, 0, 0.
    fn calc_z_applies_continuity_correction() {
        assert_relative_eq!(calc_z(5, 4.0), 2.0);
        assert_relative_eq!(calc_z(-5, 4.0), -2.0);
        assert_relative_eq!(calc_z(0, 4.0), 0.0);
        assert_relative_eq!(calc_z(3, 0.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a strictly decreasing series is flagged as a significant
    // decreasing trend with τ = −1.
    //
    // Given
    // -----
    // - values = 50 − i for i = 0..29, α = 0.05.
    //
    // Expect
    // ------
    // - `Decreasing`, significant, p < 1e-6, τ = −1, slope = −1.
    fn mann_kendall_detects_decreasing_trend() {
        // Arrange
        let values: Vec<f64> = (0..30).map(|i| 50.0 - i as f64).collect();

        // Act
        let outcome = TrendOutcome::mann_kendall(&values, 0.05).unwrap();

        // Assert
        assert_eq!(outcome.direction, TrendDirection::Decreasing);
        assert!(outcome.significant);
        assert!(outcome.p_value < 1e-6, "p = {}", outcome.p_value);
        assert_relative_eq!(outcome.tau, -1.0, epsilon = 1e-12);
        assert_relative_eq!(outcome.slope, -1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an alternating series with no drift is not significant.
    //
    // Given
    // -----
    // - values = [0, 1, 0, 1, ...] of length 20.
    //
    // Expect
    // ------
    // - `NoTrend`, not significant, p > 0.05.
    fn mann_kendall_alternating_series_has_no_trend() {
        let values: Vec<f64> = (0..20).map(|i| (i % 2) as f64).collect();

        let outcome = TrendOutcome::mann_kendall(&values, 0.05).unwrap();

        assert_eq!(outcome.direction, TrendDirection::NoTrend);
        assert!(!outcome.significant);
        assert!(outcome.p_value > 0.05, "p = {}", outcome.p_value);
    }

    #[test]
    // Purpose
    // -------
    // Verify a constant series degrades gracefully.
    //
    // Given
    // -----
    // - values = [3, 3, 3, 3, 3].
    //
    // Expect
    // ------
    // - S = 0, Var(S) = 0, z = 0, p = 1, not significant, slope 0.
    fn mann_kendall_constant_series_is_not_significant() {
        let outcome = TrendOutcome::mann_kendall(&[3.0; 5], 0.05).unwrap();

        assert_eq!(outcome.s, 0);
        assert_relative_eq!(outcome.var_s, 0.0);
        assert_relative_eq!(outcome.p_value, 1.0);
        assert!(!outcome.significant);
        assert_relative_eq!(outcome.slope, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the doubling scenario: 100 daily points with value 2·t.
    //
    // Given
    // -----
    // - times = 0..99 (days), values = 2·t, α = 0.05.
    //
    // Expect
    // ------
    // - Significant increasing trend, p ≈ 0, slope ≈ 2 per day.
    fn mann_kendall_with_times_recovers_daily_slope() {
        // Arrange
        let times: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| 2.0 * t).collect();

        // Act
        let outcome = TrendOutcome::mann_kendall_with_times(&times, &values, 0.05).unwrap();

        // Assert
        assert_eq!(outcome.direction, TrendDirection::Increasing);
        assert!(outcome.p_value < 1e-10, "p = {}", outcome.p_value);
        assert_relative_eq!(outcome.slope, 2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check coincident timestamps only matter when a slope is needed.
    //
    // Given
    // -----
    // - Ten observations sharing one timestamp: a scrambled, trend-free
    //   sequence and a strictly increasing one.
    //
    // Expect
    // ------
    // - Trend-free: not significant, slope 0.
    // - Increasing: `Err(TrendError::NoDistinctTimestamps)`.
    fn mann_kendall_with_times_handles_coincident_timestamps() {
        // Arrange
        let times = [5.0; 10];
        let flat: Vec<f64> = (0..10).map(|i| ((i * 7) % 11) as f64).collect();
        let rising: Vec<f64> = (0..10).map(|i| i as f64).collect();

        // Act
        let outcome = TrendOutcome::mann_kendall_with_times(&times, &flat, 0.05).unwrap();
        let err = TrendOutcome::mann_kendall_with_times(&times, &rising, 0.05);

        // Assert
        assert!(!outcome.significant);
        assert_eq!(outcome.slope, 0.0);
        assert_eq!(err, Err(TrendError::NoDistinctTimestamps));
    }

    #[test]
    // Purpose
    // -------
    // Ensure too-short input is rejected rather than producing a statistic.
    //
    // Given
    // -----
    // - Two observations.
    //
    // Expect
    // ------
    // - `Err(TrendError::InsufficientData { n: 2 })`.
    fn mann_kendall_rejects_short_series() {
        assert_eq!(
            TrendOutcome::mann_kendall(&[1.0, 2.0], 0.05),
            Err(TrendError::InsufficientData { n: 2 })
        );
    }
}
