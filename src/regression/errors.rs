//! regression::errors — failures of quantile regression and bootstrap.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the linear quantile fit, the
//! block bootstrap sampler and the bootstrap estimator built on them.
//!
//! Key behaviors
//! -------------
//! - Distinguish per-fit failures (singular weighted design, iteration
//!   limit, non-finite coefficients), which the bootstrap loop absorbs,
//!   from the aggregate [`RegressionError::ConvergenceFailure`], which is
//!   fatal for the caller.
//!
//! Conventions
//! -----------
//! - Per-fit variants are small and `Clone` so they can be collected as
//!   `Vec<RegressionResult<f64>>` during the bootstrap and counted later.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type RegressionResult<T> = Result<T, RegressionError>;

/// RegressionError — quantile regression and bootstrap failures.
///
/// Variants
/// --------
/// - `InsufficientData { n, required }`: too few observations to fit.
/// - `LengthMismatch { x, y }`: regressor and response lengths differ.
/// - `NonFiniteInput { index, value }`: NaN/±∞ in regressor or response.
/// - `InvalidQuantile(q)`: quantile outside (0, 1).
/// - `InvalidConfidence(c)`: confidence outside (0, 1).
/// - `InvalidBootstrapCount(n_boot)`: zero bootstrap iterations requested.
/// - `InvalidBlockLength { block_length, n }`: block length 0 or above n.
/// - `SingularDesign { iteration }`: weighted normal equations singular.
/// - `NonFiniteFit { iteration }`: coefficients became NaN/±∞.
/// - `NonConvergence { iterations, diff }`: iteration limit reached with
///   the last coefficient change still above tolerance.
/// - `ConvergenceFailure { successes, required, attempted }`: too few
///   bootstrap resamples produced a fit.
/// - `Series(msg)`: reference-time resolution failed.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    InsufficientData { n: usize, required: usize },
    LengthMismatch { x: usize, y: usize },
    NonFiniteInput { index: usize, value: f64 },
    InvalidQuantile(f64),
    InvalidConfidence(f64),
    InvalidBootstrapCount(usize),
    InvalidBlockLength { block_length: usize, n: usize },
    SingularDesign { iteration: usize },
    NonFiniteFit { iteration: usize },
    NonConvergence { iterations: usize, diff: f64 },
    ConvergenceFailure { successes: usize, required: usize, attempted: usize },
    Series(String),
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::InsufficientData { n, required } => {
                write!(f, "Quantile regression needs at least {required} observations, got {n}.")
            }
            RegressionError::LengthMismatch { x, y } => {
                write!(f, "Regressor and response lengths differ ({x} vs {y}).")
            }
            RegressionError::NonFiniteInput { index, value } => {
                write!(f, "Non-finite input {value} at index {index}.")
            }
            RegressionError::InvalidQuantile(q) => {
                write!(f, "Invalid quantile {q}. Must lie in (0, 1).")
            }
            RegressionError::InvalidConfidence(c) => {
                write!(f, "Invalid confidence level {c}. Must lie in (0, 1).")
            }
            RegressionError::InvalidBootstrapCount(n_boot) => {
                write!(f, "Invalid bootstrap count {n_boot}. Must be at least 1.")
            }
            RegressionError::InvalidBlockLength { block_length, n } => {
                write!(f, "Invalid block length {block_length} for {n} observations. Must satisfy 1 ≤ block ≤ n.")
            }
            RegressionError::SingularDesign { iteration } => {
                write!(f, "Weighted design matrix is singular at iteration {iteration}.")
            }
            RegressionError::NonFiniteFit { iteration } => {
                write!(f, "Non-finite coefficients at iteration {iteration}.")
            }
            RegressionError::NonConvergence { iterations, diff } => write!(
                f,
                "Quantile regression did not converge after {iterations} iterations (last change {diff:e})."
            ),
            RegressionError::ConvergenceFailure { successes, required, attempted } => write!(
                f,
                "Only {successes} of {attempted} bootstrap fits converged; at least {required} required."
            ),
            RegressionError::Series(msg) => write!(f, "Quantile regression input error: {msg}"),
        }
    }
}

impl From<crate::series::SeriesError> for RegressionError {
    fn from(err: crate::series::SeriesError) -> Self {
        RegressionError::Series(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl From<RegressionError> for PyErr {
    fn from(err: RegressionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
