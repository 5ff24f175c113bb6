//! statistical_tests::errors — error types for trend tests.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the Mann-Kendall trend test,
//! Sen's slope estimator and their input validation, together with a
//! conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`TrendResult`] and [`TrendError`] as the canonical result and
//!   error types, with human-readable `Display` messages.
//! - Implement `From<TrendError> for PyErr` to surface failures as
//!   `ValueError` on the Python side.
//!
//! Invariants & assumptions
//! ------------------------
//! - Trend routines validate their inputs (length, finiteness, α range) and
//!   return [`TrendResult<T>`] instead of panicking.
//! - `TrendError` values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.
//!   "α must lie in (0, 1)", "need at least 3 observations").
//!
//! Testing notes
//! -------------
//! - Unit tests verify that payload-carrying variants embed their payload in
//!   the `Display` message.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type TrendResult<T> = Result<T, TrendError>;

/// TrendError — error conditions for trend detection.
///
/// Variants
/// --------
/// - `InsufficientData { n }`
///   Fewer than 3 observations; S and Var(S) are not meaningful.
/// - `InvalidData { index, value }`
///   A value is NaN or ±∞.
/// - `InvalidTimestamp { index, value }`
///   A timestamp is NaN or ±∞.
/// - `LengthMismatch { times, values }`
///   Time-aware routines received slices of different lengths.
/// - `InvalidAlpha(alpha)`
///   Significance level outside the open interval (0, 1).
/// - `NoDistinctTimestamps`
///   Every pair of observations shares a timestamp, so no time-aware slope
///   can be formed.
/// - `Series(msg)`
///   Reference-time resolution failed while projecting.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    InsufficientData { n: usize },
    InvalidData { index: usize, value: f64 },
    InvalidTimestamp { index: usize, value: f64 },
    LengthMismatch { times: usize, values: usize },
    InvalidAlpha(f64),
    NoDistinctTimestamps,
    Series(String),
}

impl std::error::Error for TrendError {}

impl std::fmt::Display for TrendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendError::InsufficientData { n } => {
                write!(f, "Trend test needs at least 3 observations, got {n}.")
            }
            TrendError::InvalidData { index, value } => {
                write!(f, "Invalid data value at index {index}: {value}. Must be a finite number.")
            }
            TrendError::InvalidTimestamp { index, value } => {
                write!(f, "Invalid timestamp at index {index}: {value}. Must be a finite number.")
            }
            TrendError::LengthMismatch { times, values } => write!(
                f,
                "Timestamps and values must have equal length (got {times} and {values})."
            ),
            TrendError::InvalidAlpha(alpha) => {
                write!(f, "Invalid significance level α = {alpha}. Must lie in (0, 1).")
            }
            TrendError::NoDistinctTimestamps => {
                write!(f, "Cannot estimate a slope: all observations share one timestamp.")
            }
            TrendError::Series(msg) => write!(f, "Trend projection failed: {msg}"),
        }
    }
}

impl From<crate::series::SeriesError> for TrendError {
    fn from(err: crate::series::SeriesError) -> Self {
        TrendError::Series(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl From<TrendError> for PyErr {
    fn from(err: TrendError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting and payload embedding for `TrendError`.
    //
    // They intentionally DO NOT cover:
    // - The `From<TrendError> for PyErr` conversion, which needs the Python
    //   C API and belongs to Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify `InsufficientData` reports the observed sample size.
    //
    // Given
    // -----
    // - `TrendError::InsufficientData { n: 2 }`.
    //
    // Expect
    // ------
    // - The message contains "2" and mentions the minimum of 3.
    fn trend_error_insufficient_data_includes_sample_size() {
        // Arrange
        let err = TrendError::InsufficientData { n: 2 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('2') && msg.contains('3'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify `InvalidAlpha` embeds the offending significance level.
    //
    // Given
    // -----
    // - `TrendError::InvalidAlpha(1.5)`.
    //
    // Expect
    // ------
    // - The message contains "1.5".
    fn trend_error_invalid_alpha_includes_payload() {
        let msg = TrendError::InvalidAlpha(1.5).to_string();

        assert!(msg.contains("1.5"), "Got: {msg}");
    }
}
