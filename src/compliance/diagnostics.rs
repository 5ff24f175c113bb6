//! compliance::diagnostics — advisory annotations attached to results.
//!
//! Conditions that weaken a result without invalidating it are returned as
//! [`Diagnostic`] values on the result instead of being raised. The pipeline
//! also mirrors each one through `log::warn!`. Diagnostics never change the
//! numbers they annotate.

use crate::inference::PhysicalBound;

/// Reported quantity that a physical bound clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundTarget {
    PointEstimate,
    UpperLimit,
    LowerLimit,
}

impl BoundTarget {
    pub fn label(self) -> &'static str {
        match self {
            BoundTarget::PointEstimate => "point estimate",
            BoundTarget::UpperLimit => "upper tolerance limit",
            BoundTarget::LowerLimit => "lower tolerance limit",
        }
    }
}

/// Diagnostic — a reliability annotation on a compliance result.
///
/// Variants
/// --------
/// - `MissingValuesDropped { dropped, total }`: more than 30% of rows had
///   missing values.
/// - `ZeroVariance`: all usable values are identical; the percentile is a
///   constant.
/// - `SmallSample { n }`: fewer than 10 usable observations.
/// - `LowEffectiveSampleSize { n_eff }`: autocorrelation left fewer than
///   10 effective observations.
/// - `PhysicalBoundApplied { target, bound, raw }`: a reported value was
///   clamped from `raw`.
/// - `BootstrapFailures { failed, attempted }`: some bootstrap fits were
///   skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    MissingValuesDropped { dropped: usize, total: usize },
    ZeroVariance,
    SmallSample { n: usize },
    LowEffectiveSampleSize { n_eff: f64 },
    PhysicalBoundApplied { target: BoundTarget, bound: PhysicalBound, raw: f64 },
    BootstrapFailures { failed: usize, attempted: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingValuesDropped { dropped, total } => write!(
                f,
                "{dropped} of {total} rows ({:.1}%) had missing values and were dropped.",
                100.0 * *dropped as f64 / *total as f64
            ),
            Diagnostic::ZeroVariance => f.write_str(
                "All values are identical; the percentile estimate is a constant.",
            ),
            Diagnostic::SmallSample { n } => {
                write!(f, "Small sample size (n = {n}); results may be unreliable.")
            }
            Diagnostic::LowEffectiveSampleSize { n_eff } => write!(
                f,
                "Low effective sample size (n_eff = {n_eff:.2}) due to autocorrelation; bounds are wide."
            ),
            Diagnostic::PhysicalBoundApplied { target, bound, raw } => {
                let side = match bound {
                    PhysicalBound::Minimum => "minimum",
                    PhysicalBound::Maximum => "maximum",
                };
                write!(f, "The {} ({raw}) was clamped to the physical {side}.", target.label())
            }
            Diagnostic::BootstrapFailures { failed, attempted } => write!(
                f,
                "{failed} of {attempted} bootstrap fits failed to converge and were skipped."
            ),
        }
    }
}

/// Threshold above which the share of dropped rows is reported.
pub const MISSING_FRACTION_WARNING: f64 = 0.30;

/// Sample sizes below this are reported as small.
pub const SMALL_SAMPLE_WARNING: usize = 10;

/// Effective sample sizes below this are reported as low.
pub const LOW_NEFF_WARNING: f64 = 10.0;
