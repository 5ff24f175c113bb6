//! statistical_tests — monotonic trend detection for measurement series.
//!
//! Purpose
//! -------
//! Collect the trend-testing routines used before compliance statistics are
//! computed: the Mann-Kendall test for the presence and direction of a
//! monotonic trend and Sen's slope for its magnitude, together with shared
//! input validation and error handling.
//!
//! Key behaviors
//! -------------
//! - Expose [`TrendOutcome`] and its constructors
//!   [`TrendOutcome::mann_kendall`] (unit spacing) and
//!   [`TrendOutcome::mann_kendall_with_times`] (slope per timestamp unit).
//! - Centralize input guards in [`validate_trend_input`] and
//!   [`validate_time_aware_input`].
//! - Provide a dedicated error type [`TrendError`] and result alias
//!   [`TrendResult`], plus a conversion layer to Python exceptions when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series passed to the tests are in time order and finite; at least 3
//!   observations are required.
//! - Tests report failures via [`TrendResult`] and never panic on
//!   user-facing invalid inputs.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_compliance::statistical_tests::{TrendOutcome, TrendResult};
//!
//! fn detect(times: &[f64], values: &[f64]) -> TrendResult<bool> {
//!     Ok(TrendOutcome::mann_kendall_with_times(times, values, 0.05)?.significant)
//! }
//! ```
//!
//! - The trend projector in [`crate::trend`] calls the time-aware entry
//!   point and applies the slope only when the trend is significant.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`mann_kendall`] check S, Var(S), the continuity
//!   correction and end-to-end decisions; [`sens_slope`] covers the median
//!   slope variants; [`validation`] covers every guard branch.

pub mod errors;
pub mod mann_kendall;
pub mod sens_slope;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{TrendError, TrendResult};
pub use self::mann_kendall::{TrendDirection, TrendOutcome};
pub use self::sens_slope::{sens_slope, sens_slope_with_times};
pub use self::validation::{validate_time_aware_input, validate_trend_input};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{TrendError, TrendResult};
    pub use super::mann_kendall::{TrendDirection, TrendOutcome};
}
