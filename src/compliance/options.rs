//! compliance::options — configuration of the compliance pipeline.
//!
//! Purpose
//! -------
//! Hold every user-facing knob of [`calculate_tolerance_limit`] in one
//! defaulted struct, plus the method selector that chooses between the
//! projection and quantile-regression estimators.
//!
//! Key behaviors
//! -------------
//! - [`ComplianceOptions::default`] matches the documented defaults
//!   (95th percentile, 95% confidence, two-sided, projection with n_eff,
//!   reference at the end of the record, 1000 bootstrap resamples).
//! - [`ComplianceOptions::validate`] checks ranges once at the entry point;
//!   downstream components assume validated options.
//! - [`Method`] parses from `"projection"` / `"quantile_regression"`
//!   (case-insensitive).
//!
//! [`calculate_tolerance_limit`]: crate::compliance::calculate_tolerance_limit

use crate::compliance::errors::{ComplianceError, ComplianceResult};
use crate::inference::{PhysicalBounds, Sides, ToleranceThresholds};
use crate::regression::{IrlsOptions, QuantileRegressionOptions};
use crate::series::ReferenceTime;
use std::str::FromStr;

/// Trend-test significance used when `trend_alpha` is not set.
pub const DEFAULT_TREND_ALPHA: f64 = 0.05;

/// Estimator family used by the pipeline.
///
/// Variants
/// --------
/// - `Projection`: trend projection, n_eff, Hazen percentile and Wilson
///   tolerance bounds.
/// - `QuantileRegression`: linear quantile regression with block-bootstrap
///   bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Projection,
    QuantileRegression,
}

impl Method {
    /// Selector string accepted by `FromStr`.
    pub fn label(self) -> &'static str {
        match self {
            Method::Projection => "projection",
            Method::QuantileRegression => "quantile_regression",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = ComplianceError;

    /// Parse a method selector (case-insensitive, surrounding whitespace
    /// ignored). Anything other than `"projection"` or
    /// `"quantile_regression"` returns `ComplianceError::UnknownMethod`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projection" => Ok(Method::Projection),
            "quantile_regression" => Ok(Method::QuantileRegression),
            _ => Err(ComplianceError::UnknownMethod(s.to_string())),
        }
    }
}

/// ComplianceOptions — user-facing configuration of the pipeline.
///
/// Fields
/// ------
/// - `target_percentile`: percentile to estimate and bound, in (0, 1).
/// - `confidence`: confidence level of the bounds, in (0, 1).
/// - `sides`: one-sided upper bound or two-sided interval.
/// - `regulatory_limit`: when set, a compliance probability is reported.
/// - `use_projection`: detect and project trends (projection method only).
/// - `use_neff`: correct for autocorrelation; `false` uses the raw count.
/// - `reference_time`: where the series is projected or the fit evaluated.
/// - `method`: estimator family.
/// - `seasonal_period`: lower bound on the bootstrap block length.
/// - `n_boot`: bootstrap resamples (quantile regression only).
/// - `seed`: bootstrap base seed; `None` draws one at random.
/// - `thresholds`: finite-sample correction regimes.
/// - `trend_alpha`: trend-test significance; `None` uses
///   [`DEFAULT_TREND_ALPHA`] whatever the confidence level.
/// - `physical_bounds`: optional clamp for reported values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceOptions {
    pub target_percentile: f64,
    pub confidence: f64,
    pub sides: Sides,
    pub regulatory_limit: Option<f64>,
    pub use_projection: bool,
    pub use_neff: bool,
    pub reference_time: ReferenceTime,
    pub method: Method,
    pub seasonal_period: Option<usize>,
    pub n_boot: usize,
    pub seed: Option<u64>,
    pub thresholds: ToleranceThresholds,
    pub trend_alpha: Option<f64>,
    pub physical_bounds: PhysicalBounds,
}

impl Default for ComplianceOptions {
    fn default() -> Self {
        ComplianceOptions {
            target_percentile: 0.95,
            confidence: 0.95,
            sides: Sides::Two,
            regulatory_limit: None,
            use_projection: true,
            use_neff: true,
            reference_time: ReferenceTime::End,
            method: Method::Projection,
            seasonal_period: None,
            n_boot: 1000,
            seed: None,
            thresholds: ToleranceThresholds::default(),
            trend_alpha: None,
            physical_bounds: PhysicalBounds::default(),
        }
    }
}

impl ComplianceOptions {
    /// Check option ranges.
    ///
    /// Errors
    /// ------
    /// - `InvalidPercentile`, `InvalidConfidence`, `InvalidTrendAlpha` for
    ///   probabilities outside (0, 1).
    /// - `InvalidBootstrapCount` when `n_boot == 0`.
    /// - `InvalidLimit` for a non-finite regulatory limit.
    /// - `InvalidPhysicalBounds` for non-finite or inverted bounds.
    /// - `Inference(InvalidThresholds)` for inconsistent thresholds.
    pub fn validate(&self) -> ComplianceResult<()> {
        let in_unit = |x: f64| x > 0.0 && x < 1.0;
        if !in_unit(self.target_percentile) {
            return Err(ComplianceError::InvalidPercentile(self.target_percentile));
        }
        if !in_unit(self.confidence) {
            return Err(ComplianceError::InvalidConfidence(self.confidence));
        }
        if let Some(alpha) = self.trend_alpha.filter(|&a| !in_unit(a)) {
            return Err(ComplianceError::InvalidTrendAlpha(alpha));
        }
        if self.n_boot == 0 {
            return Err(ComplianceError::InvalidBootstrapCount(self.n_boot));
        }
        if let Some(limit) = self.regulatory_limit.filter(|l| !l.is_finite()) {
            return Err(ComplianceError::InvalidLimit(limit));
        }
        let min = self.physical_bounds.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.physical_bounds.max.unwrap_or(f64::INFINITY);
        let finite = self.physical_bounds.min.map_or(true, f64::is_finite)
            && self.physical_bounds.max.map_or(true, f64::is_finite);
        if !finite || min > max {
            return Err(ComplianceError::InvalidPhysicalBounds { min, max });
        }
        self.thresholds.validate()?;
        Ok(())
    }

    /// Significance level of the trend test.
    pub fn trend_alpha(&self) -> f64 {
        self.trend_alpha.unwrap_or(DEFAULT_TREND_ALPHA)
    }

    /// Estimator options for the quantile-regression method.
    pub fn quantile_regression_options(&self) -> QuantileRegressionOptions {
        QuantileRegressionOptions {
            quantile: self.target_percentile,
            confidence: self.confidence,
            sides: self.sides,
            reference: self.reference_time,
            n_boot: self.n_boot,
            seasonal_period: self.seasonal_period,
            seed: self.seed,
            irls: IrlsOptions::default(),
        }
    }
}
