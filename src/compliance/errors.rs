//! compliance::errors — fatal failures of the compliance pipeline.
//!
//! Purpose
//! -------
//! Collect every error the orchestrator can surface into one enum, wrapping
//! the subtree errors so that `?` works across layers.
//!
//! Conventions
//! -----------
//! - Option and sample-size problems have their own variants.
//! - Lower-level errors are wrapped unchanged (`Series`, `Trend`,
//!   `Inference`, `Regression`) so callers can still match on them.
//! - Advisory conditions are *not* errors; see
//!   [`crate::compliance::Diagnostic`].

use crate::inference::InferenceError;
use crate::regression::RegressionError;
use crate::series::SeriesError;
use crate::statistical_tests::TrendError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// ComplianceError — errors returned by the compliance entry points.
///
/// Variants
/// --------
/// - `InsufficientData { n, required }`: fewer usable observations than
///   required after missing values are dropped.
/// - `InvalidPercentile(p)`, `InvalidConfidence(c)`, `InvalidTrendAlpha(a)`:
///   probability options outside (0, 1).
/// - `InvalidBootstrapCount(n)`: zero bootstrap resamples.
/// - `InvalidLimit(x)`: non-finite regulatory limit.
/// - `InvalidPhysicalBounds { min, max }`: non-finite or inverted bounds.
/// - `UnknownMethod(s)`: unrecognized method selector.
/// - `Series`, `Trend`, `Inference`, `Regression`: wrapped subtree errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceError {
    InsufficientData { n: usize, required: usize },
    InvalidPercentile(f64),
    InvalidConfidence(f64),
    InvalidTrendAlpha(f64),
    InvalidBootstrapCount(usize),
    InvalidLimit(f64),
    InvalidPhysicalBounds { min: f64, max: f64 },
    UnknownMethod(String),
    Series(SeriesError),
    Trend(TrendError),
    Inference(InferenceError),
    Regression(RegressionError),
}

impl std::error::Error for ComplianceError {}

impl std::fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceError::InsufficientData { n, required } => write!(
                f,
                "Sample size too small: {n} usable observations, at least {required} required."
            ),
            ComplianceError::InvalidPercentile(p) => {
                write!(f, "Invalid target percentile {p}. Must lie in (0, 1).")
            }
            ComplianceError::InvalidConfidence(c) => {
                write!(f, "Invalid confidence level {c}. Must lie in (0, 1).")
            }
            ComplianceError::InvalidTrendAlpha(a) => {
                write!(f, "Invalid trend significance level {a}. Must lie in (0, 1).")
            }
            ComplianceError::InvalidBootstrapCount(n) => {
                write!(f, "Invalid bootstrap count {n}. Must be at least 1.")
            }
            ComplianceError::InvalidLimit(x) => {
                write!(f, "Invalid regulatory limit {x}. Must be finite.")
            }
            ComplianceError::InvalidPhysicalBounds { min, max } => {
                write!(f, "Invalid physical bounds [{min}, {max}]. Must be finite with min ≤ max.")
            }
            ComplianceError::UnknownMethod(s) => write!(
                f,
                "Unknown method '{s}'. Expected 'projection' or 'quantile_regression'."
            ),
            ComplianceError::Series(e) => write!(f, "{e}"),
            ComplianceError::Trend(e) => write!(f, "{e}"),
            ComplianceError::Inference(e) => write!(f, "{e}"),
            ComplianceError::Regression(e) => write!(f, "{e}"),
        }
    }
}

impl From<SeriesError> for ComplianceError {
    fn from(err: SeriesError) -> Self {
        ComplianceError::Series(err)
    }
}

impl From<TrendError> for ComplianceError {
    fn from(err: TrendError) -> Self {
        ComplianceError::Trend(err)
    }
}

impl From<InferenceError> for ComplianceError {
    fn from(err: InferenceError) -> Self {
        ComplianceError::Inference(err)
    }
}

impl From<RegressionError> for ComplianceError {
    fn from(err: RegressionError) -> Self {
        ComplianceError::Regression(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ComplianceError> for PyErr {
    fn from(err: ComplianceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
