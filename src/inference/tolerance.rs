//! inference::tolerance — confidence bounds on a percentile's rank.
//!
//! Purpose
//! -------
//! Compute the probability ranks bounding a target percentile at a stated
//! confidence, using the Wilson score interval in the *effective* sample
//! size and a chi-square finite-sample correction near the boundaries.
//! The ranks are turned into concentration limits by the Hazen
//! interpolator.
//!
//! Key behaviors
//! -------------
//! - α = 1 − confidence, α_tail = α / sides, z = Φ⁻¹(1 − α_tail).
//! - Wilson score interval in n_eff:
//!
//!   ```text
//!   center = p̂ + z²/(2·n_eff),  denom = 1 + z²/n_eff,
//!   margin = √max(0, p̂(1−p̂)/n_eff + z²/(4·n_eff²)),
//!   bounds = (center ∓ z·margin) / denom.
//!   ```
//!
//! - Boundary correction per tail: with `dist_top = n_eff·(1−p̂)` and
//!   `dist_bottom = n_eff·p̂`, a tail is corrected when its distance is at
//!   most `distance` and n_eff falls in the small or medium regime. The
//!   corrected bounds are
//!
//!   ```text
//!   upper = 1 − ½·χ²⁻¹(α_tail; 2·dist_top) / n_eff,
//!   lower =     ½·χ²⁻¹(α_tail; 2·dist_bottom) / n_eff,
//!   ```
//!
//!   and a distance ≤ 0 sets the bound to 1.0 / 0.0 directly.
//! - The lower tail is only corrected for two-sided intervals.
//! - p̂ ≥ 1 forces the upper bound to 1.0; both bounds end in [0, 1].
//!
//! Invariants & assumptions
//! ------------------------
//! - When the upper correction triggers, the corrected bound is at least the
//!   uncorrected Wilson bound and at least p̂.
//! - The raw sample size `n` is accepted for reporting symmetry but does not
//!   enter the computation; n_eff drives everything.
//!
//! Conventions
//! -----------
//! - [`ToleranceThresholds`] defaults (60 / 120 / 5) are calibration
//!   constants of the method and are exposed as configuration.
//!
//! Testing notes
//! -------------
//! - Unit tests check the closed-form Wilson interval, the χ²(2) closed form
//!   of both corrections, perfect compliance, sides handling and input
//!   validation.

use crate::inference::errors::{InferenceError, InferenceResult};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

/// Number of tails of the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sides {
    /// One-sided upper bound.
    One,
    /// Two-sided interval.
    #[default]
    Two,
}

impl Sides {
    pub fn count(self) -> usize {
        match self {
            Sides::One => 1,
            Sides::Two => 2,
        }
    }

    pub fn is_two_sided(self) -> bool {
        self == Sides::Two
    }
}

impl TryFrom<usize> for Sides {
    type Error = InferenceError;

    fn try_from(sides: usize) -> Result<Self, Self::Error> {
        match sides {
            1 => Ok(Sides::One),
            2 => Ok(Sides::Two),
            other => Err(InferenceError::InvalidSides { sides: other }),
        }
    }
}

/// Which formula produced the reported bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceMethod {
    /// Plain Wilson score interval.
    Standard,
    /// At least one tail used the chi-square boundary correction.
    FiniteSampleCorrected,
}

impl ToleranceMethod {
    pub fn label(self) -> &'static str {
        match self {
            ToleranceMethod::Standard => "standard",
            ToleranceMethod::FiniteSampleCorrected => "finite-sample-corrected",
        }
    }
}

impl std::fmt::Display for ToleranceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Regime thresholds for the chi-square boundary correction.
///
/// Fields
/// ------
/// - `small_n`: upper n_eff of the small-sample regime (default 60).
/// - `medium_n`: upper n_eff of the medium-sample regime (default 120).
/// - `distance`: maximum expected count beyond the percentile that
///   triggers the correction (default 5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceThresholds {
    pub small_n: f64,
    pub medium_n: f64,
    pub distance: f64,
}

impl ToleranceThresholds {
    /// Construct validated thresholds.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::InvalidThresholds` unless
    ///   `0 < small_n ≤ medium_n` and `distance ≥ 0` (all finite).
    pub fn new(small_n: f64, medium_n: f64, distance: f64) -> InferenceResult<Self> {
        let t = ToleranceThresholds { small_n, medium_n, distance };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> InferenceResult<()> {
        let ok = self.small_n.is_finite()
            && self.medium_n.is_finite()
            && self.distance.is_finite()
            && self.small_n > 0.0
            && self.small_n <= self.medium_n
            && self.distance >= 0.0;
        if ok {
            Ok(())
        } else {
            Err(InferenceError::InvalidThresholds {
                small_n: self.small_n,
                medium_n: self.medium_n,
                distance: self.distance,
            })
        }
    }

    /// Whether a tail at expected distance `dist` is corrected for `n_eff`.
    pub fn applies(&self, n_eff: f64, dist: f64) -> bool {
        let small = n_eff <= self.small_n && dist <= self.distance;
        let medium = self.small_n < n_eff && n_eff <= self.medium_n && dist <= self.distance;
        small || medium
    }
}

impl Default for ToleranceThresholds {
    fn default() -> Self {
        ToleranceThresholds { small_n: 60.0, medium_n: 120.0, distance: 5.0 }
    }
}

/// Probability ranks bounding the target percentile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceRanks {
    pub lower: f64,
    pub upper: f64,
    pub method: ToleranceMethod,
}

/// Uncorrected Wilson score interval `(lower, upper)` in `n_eff`.
pub fn wilson_interval(p_hat: f64, n_eff: f64, z: f64) -> (f64, f64) {
    let z2 = z * z;
    let denom = 1.0 + z2 / n_eff;
    let center = p_hat + z2 / (2.0 * n_eff);
    let margin = (p_hat * (1.0 - p_hat) / n_eff + z2 / (4.0 * n_eff * n_eff)).max(0.0).sqrt();
    ((center - z * margin) / denom, (center + z * margin) / denom)
}

/// Tolerance ranks for a percentile with the finite-sample correction.
///
/// Parameters
/// ----------
/// - `p_hat`: `f64`
///   Target percentile in [0, 1].
/// - `_n`: `usize`
///   Raw sample size; accepted for call-site symmetry and not used.
/// - `n_eff`: `f64`
///   Effective sample size, > 0.
/// - `confidence`: `f64`
///   Confidence level in (0, 1).
/// - `sides`: [`Sides`]
///   One-sided upper bound or two-sided interval.
/// - `thresholds`: [`ToleranceThresholds`]
///   Correction regime thresholds.
///
/// Returns
/// -------
/// `InferenceResult<ToleranceRanks>`
///   Lower/upper ranks in [0, 1] and the method label.
///
/// Errors
/// ------
/// - `InferenceError::InvalidProportion` when p̂ ∉ [0, 1].
/// - `InferenceError::InvalidEffectiveSize` when n_eff ≤ 0 or non-finite.
/// - `InferenceError::InvalidConfidence` when confidence ∉ (0, 1).
/// - `InferenceError::InvalidThresholds` for inconsistent thresholds.
///
/// Examples
/// --------
/// ```rust
/// use rust_compliance::inference::{tolerance_ranks, Sides, ToleranceMethod, ToleranceThresholds};
///
/// // Perfect compliance at n = n_eff = 20.
/// let r = tolerance_ranks(1.0, 20, 20.0, 0.95, Sides::Two, &ToleranceThresholds::default())
///     .unwrap();
/// assert_eq!(r.upper, 1.0);
/// assert_eq!(r.method, ToleranceMethod::FiniteSampleCorrected);
/// ```
pub fn tolerance_ranks(
    p_hat: f64, _n: usize, n_eff: f64, confidence: f64, sides: Sides,
    thresholds: &ToleranceThresholds,
) -> InferenceResult<ToleranceRanks> {
    if !(0.0..=1.0).contains(&p_hat) {
        return Err(InferenceError::InvalidProportion { value: p_hat });
    }
    if !(n_eff.is_finite() && n_eff > 0.0) {
        return Err(InferenceError::InvalidEffectiveSize { n_eff });
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(InferenceError::InvalidConfidence { confidence });
    }
    thresholds.validate()?;

    let alpha_tail = (1.0 - confidence) / sides.count() as f64;
    let normal = Normal::new(0.0, 1.0).map_err(|e| InferenceError::Distribution(e.to_string()))?;
    let z = normal.inverse_cdf(1.0 - alpha_tail);

    let (mut lower, mut upper) = wilson_interval(p_hat, n_eff, z);
    let mut method = ToleranceMethod::Standard;

    let dist_top = n_eff * (1.0 - p_hat);
    if thresholds.applies(n_eff, dist_top) {
        method = ToleranceMethod::FiniteSampleCorrected;
        upper = if dist_top <= 0.0 {
            1.0
        } else {
            1.0 - 0.5 * chi_square_quantile(alpha_tail, 2.0 * dist_top)? / n_eff
        };
    }

    let dist_bottom = n_eff * p_hat;
    if sides.is_two_sided() && thresholds.applies(n_eff, dist_bottom) {
        method = ToleranceMethod::FiniteSampleCorrected;
        lower = if dist_bottom <= 0.0 {
            0.0
        } else {
            0.5 * chi_square_quantile(alpha_tail, 2.0 * dist_bottom)? / n_eff
        };
    }

    if p_hat >= 1.0 {
        upper = 1.0;
    }

    Ok(ToleranceRanks { lower: lower.clamp(0.0, 1.0), upper: upper.clamp(0.0, 1.0), method })
}

/// Lower-tail quantile of χ²(df) by bisection on the CDF.
///
/// The bracket is halved until it stops shrinking in floating point; small
/// degrees of freedom put the quantile many orders of magnitude below one.
fn chi_square_quantile(p: f64, df: f64) -> InferenceResult<f64> {
    let dist = ChiSquared::new(df).map_err(|e| InferenceError::Distribution(e.to_string()))?;

    let mut hi = df.max(1.0);
    while dist.cdf(hi) < p && hi < f64::MAX / 4.0 {
        hi *= 2.0;
    }
    let mut lo = 0.0_f64;
    for _ in 0..1100 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if dist.cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}
