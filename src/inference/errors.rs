//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the central error type used by the
//! effective-sample-size estimator, the Hazen rank interpolator, the
//! tolerance-bound calculator and the compliance score test. An alias
//! `InferenceResult<T>` standardizes the return type across inference code.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Unified error type for inference routines.
///
/// Covers invalid probabilities and sample sizes, empty inputs and failures
/// to construct reference distributions, with readable diagnostics through
/// `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Input validation ----
    /// No observations were supplied.
    EmptyData,

    /// An observation is NaN or ±∞.
    NonFiniteData {
        index: usize,
        value: f64,
    },

    /// Confidence level outside (0, 1).
    InvalidConfidence {
        confidence: f64,
    },

    /// Proportion or rank outside [0, 1] (or NaN).
    InvalidProportion {
        value: f64,
    },

    /// Effective sample size not strictly positive and finite.
    InvalidEffectiveSize {
        n_eff: f64,
    },

    /// Number of tails other than 1 or 2.
    InvalidSides {
        sides: usize,
    },

    /// Boundary-correction thresholds are inconsistent.
    InvalidThresholds {
        small_n: f64,
        medium_n: f64,
        distance: f64,
    },

    // ---- Distribution construction ----
    Distribution(String),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            InferenceError::EmptyData => write!(f, "Inference Error: No observations supplied"),
            InferenceError::NonFiniteData { index, value } => {
                write!(f, "Inference Error: Non-finite value {} at index {}", value, index)
            }
            InferenceError::InvalidConfidence { confidence } => write!(
                f,
                "Inference Error: Confidence level {} must lie in (0, 1)",
                confidence
            ),
            InferenceError::InvalidProportion { value } => {
                write!(f, "Inference Error: Proportion {} must lie in [0, 1]", value)
            }
            InferenceError::InvalidEffectiveSize { n_eff } => write!(
                f,
                "Inference Error: Effective sample size {} must be positive and finite",
                n_eff
            ),
            InferenceError::InvalidSides { sides } => {
                write!(f, "Inference Error: Sides must be 1 or 2, got {}", sides)
            }
            InferenceError::InvalidThresholds { small_n, medium_n, distance } => write!(
                f,
                "Inference Error: Invalid correction thresholds (small_n = {}, medium_n = {}, distance = {}); need 0 < small_n ≤ medium_n and distance ≥ 0",
                small_n, medium_n, distance
            ),

            // ---- Distribution construction ----
            InferenceError::Distribution(msg) => {
                write!(f, "Inference Error: Distribution construction failed: {}", msg)
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for PyErr {
    fn from(err: InferenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify payload values appear in `Display` messages.
    //
    // Given
    // -----
    // - `InvalidConfidence { confidence: 1.25 }` and `InvalidSides { sides: 3 }`.
    //
    // Expect
    // ------
    // - Messages contain "1.25" and "3".
    fn inference_error_display_includes_payloads() {
        let m1 = InferenceError::InvalidConfidence { confidence: 1.25 }.to_string();
        let m2 = InferenceError::InvalidSides { sides: 3 }.to_string();

        assert!(m1.contains("1.25"), "Got: {m1}");
        assert!(m2.contains('3'), "Got: {m2}");
    }
}
