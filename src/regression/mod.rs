//! regression — linear quantile regression with block-bootstrap bounds.
//!
//! Purpose
//! -------
//! Estimate a percentile that drifts over time by fitting a straight line
//! at that quantile, then quantify its uncertainty at a reference time with
//! a moving-block bootstrap that respects autocorrelation.
//!
//! Key behaviors
//! -------------
//! - [`fit_quantile_line`]: IRLS quantile fit of `y` on `x`, configured by
//!   [`IrlsOptions`].
//! - [`BlockBootstrap`]: lazy, counter-seeded iterator of paired resamples,
//!   with [`default_block_length`] and [`resample_indices`] as building
//!   blocks.
//! - [`QuantileRegressionEstimate::fit`]: full-series point estimate plus
//!   empirical bootstrap bounds, optionally parallel (`parallel` feature).
//! - Errors are reported through [`RegressionError`] / [`RegressionResult`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the orchestrated quantile
//!   regression path is exercised by the integration tests.

pub mod bootstrap;
pub mod errors;
pub mod estimator;
pub mod quantile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bootstrap::{
    BlockBootstrap, BootstrapSample, counter_rng_seed, default_block_length, resample_indices,
    resample_indices_into,
};
pub use self::errors::{RegressionError, RegressionResult};
pub use self::estimator::{
    MIN_QR_OBSERVATIONS, QuantileRegressionEstimate, QuantileRegressionOptions,
    empirical_percentile,
};
pub use self::quantile::{IrlsOptions, QuantileLine, fit_quantile_line};

pub mod prelude {
    pub use super::bootstrap::{BlockBootstrap, default_block_length};
    pub use super::errors::{RegressionError, RegressionResult};
    pub use super::estimator::{QuantileRegressionEstimate, QuantileRegressionOptions};
    pub use super::quantile::{IrlsOptions, fit_quantile_line};
}
