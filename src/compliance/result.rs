//! compliance::result — tagged result of the compliance pipeline.
//!
//! Purpose
//! -------
//! Represent the two estimator families' outputs as distinct variants of
//! [`ComplianceOutcome`], so that fields only one method produces (n_eff
//! and the trend test for projection; the bootstrap distribution for
//! quantile regression) are present exactly where they are meaningful.
//!
//! Key behaviors
//! -------------
//! - Shared accessors (`point_estimate`, `upper_tolerance_limit`, ...)
//!   work across both variants.
//! - Method-specific quantities are `Option`s at the accessor level:
//!   `n_eff`, `p_value` and `trend_detected` are `None` for quantile
//!   regression.
//!
//! Conventions
//! -----------
//! - `trend_slope` is in series units per timestamp unit for projection and
//!   per day for quantile regression; `trend_slope_per_year` is comparable
//!   across both.

use crate::compliance::diagnostics::Diagnostic;
use crate::compliance::options::Method;
use crate::inference::{Sides, ToleranceMethod};
use crate::regression::QuantileRegressionEstimate;
use crate::statistical_tests::TrendOutcome;

/// ProjectionOutcome — result of the trend-projection estimator.
///
/// Fields
/// ------
/// - `statistic`: label such as `"95th Percentile"`.
/// - `target_percentile`, `confidence_level`, `sides`: echo of the request.
/// - `point_estimate`: Hazen percentile of the projected data.
/// - `upper_tolerance_limit` / `lower_tolerance_limit`: values at the
///   tolerance ranks (lower only for two-sided requests).
/// - `upper_rank` / `lower_rank`: the tolerance ranks themselves.
/// - `tolerance_method`: whether the finite-sample correction applied.
/// - `n_raw`: usable observations after dropping missing values.
/// - `n_eff`: effective sample size (equals `n_raw` when disabled).
/// - `trend`: Mann-Kendall/Sen result, `None` when projection is disabled.
/// - `trend_slope` / `trend_slope_per_year`: slope applied in projection
///   (0 when no significant trend).
/// - `reference_time`: resolved reference timestamp.
/// - `projected`: data the percentile was computed from.
/// - `observed_rank`: Hazen rank of the regulatory limit, if one was given.
/// - `compliance_probability`: score-test probability, if a limit was given.
/// - `diagnostics`: advisory annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionOutcome {
    pub statistic: String,
    pub target_percentile: f64,
    pub point_estimate: f64,
    pub upper_tolerance_limit: f64,
    pub lower_tolerance_limit: Option<f64>,
    pub upper_rank: f64,
    pub lower_rank: Option<f64>,
    pub tolerance_method: ToleranceMethod,
    pub confidence_level: f64,
    pub sides: Sides,
    pub n_raw: usize,
    pub n_eff: f64,
    pub trend: Option<TrendOutcome>,
    pub trend_slope: f64,
    pub trend_slope_per_year: f64,
    pub reference_time: f64,
    pub projected: Vec<f64>,
    pub observed_rank: Option<f64>,
    pub compliance_probability: Option<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

/// QuantileRegressionOutcome — result of the quantile-regression estimator.
///
/// Fields
/// ------
/// - `statistic`: label such as `"95th Percentile (QR modeled)"`.
/// - `target_percentile`, `confidence_level`, `sides`: echo of the request.
/// - `point_estimate`: full-series fit at the reference time.
/// - `upper_tolerance_limit` / `lower_tolerance_limit`: bootstrap
///   percentiles (lower only for two-sided requests).
/// - `n_raw`: usable observations.
/// - `estimate`: fitted line, bootstrap distribution and bookkeeping.
/// - `compliance_probability`: share of bootstrap predictions at or below
///   the limit, if one was given.
/// - `diagnostics`: advisory annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileRegressionOutcome {
    pub statistic: String,
    pub target_percentile: f64,
    pub point_estimate: f64,
    pub upper_tolerance_limit: f64,
    pub lower_tolerance_limit: Option<f64>,
    pub confidence_level: f64,
    pub sides: Sides,
    pub n_raw: usize,
    pub estimate: QuantileRegressionEstimate,
    pub compliance_probability: Option<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

/// ComplianceOutcome — result of [`crate::compliance::calculate_tolerance_limit`].
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceOutcome {
    Projection(ProjectionOutcome),
    QuantileRegression(QuantileRegressionOutcome),
}

impl ComplianceOutcome {
    pub fn method(&self) -> Method {
        match self {
            ComplianceOutcome::Projection(_) => Method::Projection,
            ComplianceOutcome::QuantileRegression(_) => Method::QuantileRegression,
        }
    }

    pub fn method_label(&self) -> &'static str {
        self.method().label()
    }

    pub fn statistic_label(&self) -> &str {
        match self {
            ComplianceOutcome::Projection(o) => &o.statistic,
            ComplianceOutcome::QuantileRegression(o) => &o.statistic,
        }
    }

    pub fn point_estimate(&self) -> f64 {
        match self {
            ComplianceOutcome::Projection(o) => o.point_estimate,
            ComplianceOutcome::QuantileRegression(o) => o.point_estimate,
        }
    }

    pub fn upper_tolerance_limit(&self) -> f64 {
        match self {
            ComplianceOutcome::Projection(o) => o.upper_tolerance_limit,
            ComplianceOutcome::QuantileRegression(o) => o.upper_tolerance_limit,
        }
    }

    pub fn lower_tolerance_limit(&self) -> Option<f64> {
        match self {
            ComplianceOutcome::Projection(o) => o.lower_tolerance_limit,
            ComplianceOutcome::QuantileRegression(o) => o.lower_tolerance_limit,
        }
    }

    pub fn confidence_level(&self) -> f64 {
        match self {
            ComplianceOutcome::Projection(o) => o.confidence_level,
            ComplianceOutcome::QuantileRegression(o) => o.confidence_level,
        }
    }

    pub fn n_raw(&self) -> usize {
        match self {
            ComplianceOutcome::Projection(o) => o.n_raw,
            ComplianceOutcome::QuantileRegression(o) => o.n_raw,
        }
    }

    /// Effective sample size; `None` for quantile regression.
    pub fn n_eff(&self) -> Option<f64> {
        match self {
            ComplianceOutcome::Projection(o) => Some(o.n_eff),
            ComplianceOutcome::QuantileRegression(_) => None,
        }
    }

    /// Whether a significant trend was detected and projected out.
    ///
    /// `Some(false)` when projection was disabled; `None` for quantile
    /// regression, which models the trend without a significance test.
    pub fn trend_detected(&self) -> Option<bool> {
        match self {
            ComplianceOutcome::Projection(o) => {
                Some(o.trend.as_ref().is_some_and(|t| t.significant))
            }
            ComplianceOutcome::QuantileRegression(_) => None,
        }
    }

    pub fn trend_slope(&self) -> f64 {
        match self {
            ComplianceOutcome::Projection(o) => o.trend_slope,
            ComplianceOutcome::QuantileRegression(o) => o.estimate.line.slope,
        }
    }

    pub fn trend_slope_per_year(&self) -> f64 {
        match self {
            ComplianceOutcome::Projection(o) => o.trend_slope_per_year,
            ComplianceOutcome::QuantileRegression(o) => o.estimate.slope_per_year,
        }
    }

    /// Mann-Kendall p-value; `None` when no trend test ran.
    pub fn p_value(&self) -> Option<f64> {
        match self {
            ComplianceOutcome::Projection(o) => o.trend.as_ref().map(|t| t.p_value),
            ComplianceOutcome::QuantileRegression(_) => None,
        }
    }

    pub fn compliance_probability(&self) -> Option<f64> {
        match self {
            ComplianceOutcome::Projection(o) => o.compliance_probability,
            ComplianceOutcome::QuantileRegression(o) => o.compliance_probability,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ComplianceOutcome::Projection(o) => &o.diagnostics,
            ComplianceOutcome::QuantileRegression(o) => &o.diagnostics,
        }
    }
}

/// Human-readable percentile label, e.g. `0.95 → "95th Percentile"`.
///
/// Whole percents use an ordinal suffix; fractional percents keep one
/// decimal (`0.975 → "97.5th Percentile"`).
pub fn percentile_label(p: f64) -> String {
    let pct = p * 100.0;
    let whole = pct.round();
    if (pct - whole).abs() > 1e-9 {
        return format!("{pct:.1}th Percentile");
    }
    let k = whole as i64;
    let suffix = match (k % 10, k % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{k}{suffix} Percentile")
}
