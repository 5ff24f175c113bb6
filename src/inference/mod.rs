//! inference — effective sample size, percentile ranks and tolerance bounds.
//!
//! Purpose
//! -------
//! Provide the inferential building blocks of the compliance statistics:
//! how many independent observations an autocorrelated series is worth,
//! how percentiles map to values (and back), how wide the confidence bounds
//! on a percentile are, and how likely a series is to meet a limit.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for inference-specific failures.
//! - Estimate the effective sample size with [`effective_sample_size`]
//!   (sum of correlations truncated at the first negative lag).
//! - Map ranks ↔ values under Hazen plotting positions with
//!   [`HazenRanks`], [`rank_to_value`] and [`value_to_rank`], including
//!   probit-space tail extrapolation and optional [`PhysicalBounds`].
//! - Compute Wilson-score tolerance ranks with the chi-square finite-sample
//!   correction via [`tolerance_ranks`], configured by [`Sides`] and
//!   [`ToleranceThresholds`].
//! - Score-test compliance probability via [`compliance_probability`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; NaN handling (missing values) happens upstream in
//!   [`crate::series`].
//! - All bounds use the effective sample size, never the raw count.
//! - Routines with user-facing failure modes return [`InferenceError`]
//!   rather than panicking.
//!
//! Downstream usage
//! ----------------
//! - The compliance pipeline calls these in order: n_eff → point estimate
//!   → tolerance ranks → limit values → compliance probability.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its closed-form behavior and edge
//!   cases; coverage properties of the full pipeline are exercised by the
//!   integration tests.

pub mod compliance;
pub mod effective_size;
pub mod errors;
pub mod hazen;
pub mod tolerance;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::compliance::compliance_probability;
pub use self::effective_size::effective_sample_size;
pub use self::errors::{InferenceError, InferenceResult};
pub use self::hazen::{
    BoundedValue, HazenRanks, PhysicalBound, PhysicalBounds, rank_to_value, rank_to_value_bounded,
    value_to_rank,
};
pub use self::tolerance::{
    Sides, ToleranceMethod, ToleranceRanks, ToleranceThresholds, tolerance_ranks, wilson_interval,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_compliance::inference::prelude::*;
//
// to import the main inference surface in a single line.

pub mod prelude {
    pub use super::compliance::compliance_probability;
    pub use super::effective_size::effective_sample_size;
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hazen::{HazenRanks, PhysicalBounds};
    pub use super::tolerance::{Sides, ToleranceMethod, ToleranceThresholds, tolerance_ranks};
}
