//! series::errors — validation failures for observation series.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when raw timestamp/value
//! pairs are turned into an [`ObservationSeries`](crate::series::ObservationSeries)
//! and when time-related selectors (units, reference times) are parsed or
//! resolved.
//!
//! Conventions
//! -----------
//! - Index payloads refer to positions in the caller's *original* input
//!   slices, before missing values are dropped or rows are sorted.
//! - Messages are phrased in terms of the violated constraint.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — invalid observation series or time selectors.
///
/// Variants
/// --------
/// - `LengthMismatch { times, values }`
///   Timestamp and value inputs have different lengths.
/// - `NonFiniteTimestamp { index, value }`
///   A timestamp is NaN or ±∞.
/// - `InfiniteValue { index, value }`
///   A measurement is ±∞. (NaN marks a missing value and is dropped.)
/// - `EmptySeries`
///   An operation needing at least one observation received none.
/// - `UnknownTimeUnit(name)` / `UnknownReferenceTime(name)`
///   A string selector did not match any known alias.
/// - `NonFiniteReferenceTime(value)`
///   An explicit reference timestamp is NaN or ±∞.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    LengthMismatch { times: usize, values: usize },
    NonFiniteTimestamp { index: usize, value: f64 },
    InfiniteValue { index: usize, value: f64 },
    EmptySeries,
    UnknownTimeUnit(String),
    UnknownReferenceTime(String),
    NonFiniteReferenceTime(f64),
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::LengthMismatch { times, values } => write!(
                f,
                "Timestamps and values must have equal length (got {times} timestamps and {values} values)."
            ),
            SeriesError::NonFiniteTimestamp { index, value } => {
                write!(f, "Timestamp at index {index} is not finite: {value}.")
            }
            SeriesError::InfiniteValue { index, value } => {
                write!(f, "Value at index {index} is infinite: {value}. Use NaN for missing values.")
            }
            SeriesError::EmptySeries => write!(f, "Series contains no observations."),
            SeriesError::UnknownTimeUnit(name) => {
                write!(f, "Unknown time unit {name:?} (expected 'seconds' or 'days').")
            }
            SeriesError::UnknownReferenceTime(name) => write!(
                f,
                "Unknown reference time {name:?} (expected 'start', 'middle', 'end' or a timestamp)."
            ),
            SeriesError::NonFiniteReferenceTime(value) => {
                write!(f, "Reference timestamp must be finite, got {value}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SeriesError> for PyErr {
    fn from(err: SeriesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
