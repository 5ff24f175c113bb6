//! statistical_tests::validation — shared input guards for trend tests.
//!
//! Purpose
//! -------
//! Centralize basic input validation for trend routines. This avoids
//! duplicating checks on series length, finiteness and the significance
//! level across the Mann-Kendall test, Sen's slope and the projector.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions before the O(n²) pairwise passes run.
//! - Map invalid inputs into structured [`TrendError`] values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series must have length at least 3.
//! - All values (and timestamps, for time-aware routines) must be finite.
//! - The significance level α must lie in the open interval (0, 1).
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch of [`validate_trend_input`] and
//!   [`validate_time_aware_input`] and a success path for each.

use crate::statistical_tests::errors::{TrendError, TrendResult};

/// Minimum number of observations for a trend test.
pub const MIN_TREND_OBSERVATIONS: usize = 3;

/// Validate a unit-spaced series and significance level.
///
/// Parameters
/// ----------
/// - `values`: `&[f64]`
///   Observations in time order. Length ≥ 3, all finite.
/// - `alpha`: `f64`
///   Two-sided significance level, `0 < alpha < 1`.
///
/// Returns
/// -------
/// `TrendResult<()>`
///   `Ok(())` when all constraints hold.
///
/// Errors
/// ------
/// - `TrendError::InsufficientData { n }` when `values.len() < 3`.
/// - `TrendError::InvalidData { index, value }` for the first non-finite
///   value.
/// - `TrendError::InvalidAlpha(alpha)` when α ∉ (0, 1).
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::statistical_tests::validation::validate_trend_input;
/// # use rust_compliance::statistical_tests::errors::TrendError;
/// assert!(validate_trend_input(&[1.0, 2.0, 3.0], 0.05).is_ok());
/// assert_eq!(
///     validate_trend_input(&[1.0, 2.0], 0.05),
///     Err(TrendError::InsufficientData { n: 2 })
/// );
/// ```
pub fn validate_trend_input(values: &[f64], alpha: f64) -> TrendResult<()> {
    if values.len() < MIN_TREND_OBSERVATIONS {
        return Err(TrendError::InsufficientData { n: values.len() });
    }

    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(TrendError::InvalidData { index, value });
        }
    }

    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(TrendError::InvalidAlpha(alpha));
    }

    Ok(())
}

/// Validate a time-stamped series and significance level.
///
/// Applies [`validate_trend_input`] to `values` and additionally requires
/// equal lengths and finite timestamps.
///
/// Errors
/// ------
/// - `TrendError::LengthMismatch { times, values }` when lengths differ.
/// - `TrendError::InvalidTimestamp { index, value }` for the first
///   non-finite timestamp.
/// - Any error from [`validate_trend_input`].
pub fn validate_time_aware_input(times: &[f64], values: &[f64], alpha: f64) -> TrendResult<()> {
    if times.len() != values.len() {
        return Err(TrendError::LengthMismatch { times: times.len(), values: values.len() });
    }

    validate_trend_input(values, alpha)?;

    for (index, &value) in times.iter().enumerate() {
        if !value.is_finite() {
            return Err(TrendError::InvalidTimestamp { index, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of well-formed inputs.
    // - Each error branch in `validate_trend_input` and
    //   `validate_time_aware_input`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify both validators succeed on a finite series with valid α.
    //
    // Given
    // -----
    // - values = [0.1, −0.2, 0.3], times = [0, 1, 2], α = 0.05.
    //
    // Expect
    // ------
    // - Both return `Ok(())`.
    fn validators_accept_valid_arguments() {
        // Arrange
        let values = [0.1_f64, -0.2, 0.3];
        let times = [0.0, 1.0, 2.0];

        // Act
        let unit = validate_trend_input(&values, 0.05);
        let timed = validate_time_aware_input(&times, &values, 0.05);

        // Assert
        assert!(unit.is_ok(), "Expected Ok(()) for valid inputs, got {unit:?}");
        assert!(timed.is_ok(), "Expected Ok(()) for valid inputs, got {timed:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite value is reported with its index.
    //
    // Given
    // -----
    // - values = [0.1, NaN, 0.3].
    //
    // Expect
    // ------
    // - `Err(TrendError::InvalidData { index: 1, .. })`.
    fn validate_trend_input_non_finite_value_returns_invalid_data() {
        // Arrange
        let values = [0.1_f64, f64::NAN, 0.3];

        // Act
        let result = validate_trend_input(&values, 0.05);

        // Assert
        match result {
            Err(TrendError::InvalidData { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("expected InvalidData error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure α at or beyond the interval ends is rejected.
    //
    // Given
    // -----
    // - α ∈ {0.0, 1.0, NaN}.
    //
    // Expect
    // ------
    // - Each returns `Err(TrendError::InvalidAlpha(_))`.
    fn validate_trend_input_rejects_alpha_outside_open_unit_interval() {
        let values = [1.0, 2.0, 3.0];

        for alpha in [0.0, 1.0, f64::NAN] {
            assert!(
                matches!(validate_trend_input(&values, alpha), Err(TrendError::InvalidAlpha(_))),
                "alpha = {alpha} should be rejected"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the time-aware guards on lengths and timestamps.
    //
    // Given
    // -----
    // - Two timestamps for three values; a +∞ timestamp at index 2.
    //
    // Expect
    // ------
    // - `LengthMismatch { times: 2, values: 3 }` and
    //   `InvalidTimestamp { index: 2, .. }`.
    fn validate_time_aware_input_checks_lengths_and_timestamps() {
        let values = [1.0, 2.0, 3.0];

        assert_eq!(
            validate_time_aware_input(&[0.0, 1.0], &values, 0.05),
            Err(TrendError::LengthMismatch { times: 2, values: 3 })
        );
        assert!(matches!(
            validate_time_aware_input(&[0.0, 1.0, f64::INFINITY], &values, 0.05),
            Err(TrendError::InvalidTimestamp { index: 2, .. })
        ));
    }
}
