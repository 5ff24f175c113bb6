//! compliance — tolerance limits and compliance probability for a series.
//!
//! Purpose
//! -------
//! Public entry point of the crate. Validates options, cleans the input,
//! dispatches to the projection or quantile-regression estimator and
//! returns a tagged [`ComplianceOutcome`] with advisory [`Diagnostic`]s.
//!
//! Key behaviors
//! -------------
//! - [`calculate_tolerance_limit`] / [`calculate_for_series`] run the full
//!   pipeline configured by [`ComplianceOptions`] and [`Method`].
//! - [`compare_compliance_methods`] contrasts naive, detrended-only and
//!   fully corrected projection results.
//! - Fatal problems are [`ComplianceError`]s; everything else is a
//!   diagnostic, also logged at `warn`.

pub mod comparison;
pub mod diagnostics;
pub mod errors;
pub mod options;
pub mod pipeline;
pub mod result;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::comparison::{MethodComparison, compare_compliance_methods};
pub use self::diagnostics::{BoundTarget, Diagnostic};
pub use self::errors::{ComplianceError, ComplianceResult};
pub use self::options::{ComplianceOptions, DEFAULT_TREND_ALPHA, Method};
pub use self::pipeline::{MIN_OBSERVATIONS, calculate_for_series, calculate_tolerance_limit};
pub use self::result::{
    ComplianceOutcome, ProjectionOutcome, QuantileRegressionOutcome, percentile_label,
};

pub mod prelude {
    pub use super::comparison::compare_compliance_methods;
    pub use super::diagnostics::Diagnostic;
    pub use super::errors::{ComplianceError, ComplianceResult};
    pub use super::options::{ComplianceOptions, Method};
    pub use super::pipeline::{calculate_for_series, calculate_tolerance_limit};
    pub use super::result::ComplianceOutcome;
}
