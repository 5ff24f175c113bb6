//! compliance::pipeline — end-to-end tolerance limit for a monitored series.
//!
//! Purpose
//! -------
//! Turn raw `(time, value)` pairs into a percentile estimate, its tolerance
//! bounds and, when a regulatory limit is given, a probability of
//! compliance. Shared preprocessing and validation live here; the numeric
//! work is delegated to the `trend`, `inference` and `regression` modules.
//!
//! Key behaviors
//! -------------
//! - Options are validated first; missing values are dropped when the
//!   series is built.
//! - Fewer than five usable observations is fatal. Small samples, heavy
//!   missingness, constant data, low n_eff, clamped values and skipped
//!   bootstrap fits become [`Diagnostic`]s on the result.
//! - Projection method: project to the reference time → n_eff → Hazen point
//!   estimate → Wilson tolerance ranks → values → optional physical bounds
//!   → optional score-test compliance probability.
//! - Quantile-regression method: bootstrap estimator; the compliance
//!   probability is the share of bootstrap predictions at or below the
//!   limit.
//! - Every diagnostic is mirrored through `log::warn!`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Diagnostics never alter numeric results.
//! - The reference time is resolved once per call.

use crate::compliance::{
    diagnostics::{
        BoundTarget, Diagnostic, LOW_NEFF_WARNING, MISSING_FRACTION_WARNING, SMALL_SAMPLE_WARNING,
    },
    errors::{ComplianceError, ComplianceResult},
    options::{ComplianceOptions, Method},
    result::{ComplianceOutcome, ProjectionOutcome, QuantileRegressionOutcome, percentile_label},
};
use crate::inference::{
    HazenRanks, PhysicalBounds, compliance_probability, effective_sample_size, tolerance_ranks,
};
use crate::regression::QuantileRegressionEstimate;
use crate::series::{ObservationSeries, TimeUnit};
use crate::trend::project_to_time;

/// Fewest usable observations the pipeline accepts.
pub const MIN_OBSERVATIONS: usize = 5;

/// Compute the tolerance limit of a raw series.
///
/// Parameters
/// ----------
/// - `times`: `&[f64]`
///   Timestamps in `unit`; need not be sorted or evenly spaced.
/// - `values`: `&[f64]`
///   Measurements; `NaN` marks a missing value and is dropped.
/// - `unit`: [`TimeUnit`]
///   Unit of `times`, used for per-year slopes and the regression axis.
/// - `opts`: [`ComplianceOptions`]
///   Pipeline configuration.
///
/// Returns
/// -------
/// `ComplianceResult<ComplianceOutcome>`
///
/// Errors
/// ------
/// - Option validation errors (see [`ComplianceOptions::validate`]).
/// - `ComplianceError::Series` for malformed input (length mismatch,
///   non-finite timestamps, infinite values).
/// - `ComplianceError::InsufficientData` with fewer than five usable
///   observations.
/// - Wrapped trend, inference or regression errors, including
///   `RegressionError::ConvergenceFailure` when too few bootstrap fits
///   succeed.
///
/// Examples
/// --------
/// ```rust
/// use rust_compliance::compliance::{calculate_tolerance_limit, ComplianceOptions};
/// use rust_compliance::series::TimeUnit;
///
/// let times: Vec<f64> = (0..40).map(|i| i as f64).collect();
/// let values: Vec<f64> = (0..40).map(|i| 10.0 + ((i * 7) % 11) as f64).collect();
///
/// let out = calculate_tolerance_limit(&times, &values, TimeUnit::Days, &ComplianceOptions::default())
///     .unwrap();
/// assert!(out.upper_tolerance_limit() >= out.point_estimate());
/// assert_eq!(out.statistic_label(), "95th Percentile");
/// ```
pub fn calculate_tolerance_limit(
    times: &[f64], values: &[f64], unit: TimeUnit, opts: &ComplianceOptions,
) -> ComplianceResult<ComplianceOutcome> {
    opts.validate()?;
    let series = ObservationSeries::new(times, values, unit)?;
    run(&series, opts)
}

/// Compute the tolerance limit of an already-built series.
///
/// Errors
/// ------
/// - As [`calculate_tolerance_limit`], minus input-construction errors.
pub fn calculate_for_series(
    series: &ObservationSeries, opts: &ComplianceOptions,
) -> ComplianceResult<ComplianceOutcome> {
    opts.validate()?;
    run(series, opts)
}

fn run(series: &ObservationSeries, opts: &ComplianceOptions) -> ComplianceResult<ComplianceOutcome> {
    let mut diagnostics = Vec::new();

    if series.dropped_fraction() > MISSING_FRACTION_WARNING {
        diagnostics.push(Diagnostic::MissingValuesDropped {
            dropped: series.n_dropped(),
            total: series.n_input(),
        });
    }

    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(ComplianceError::InsufficientData { n, required: MIN_OBSERVATIONS });
    }
    if n < SMALL_SAMPLE_WARNING {
        diagnostics.push(Diagnostic::SmallSample { n });
    }
    if series.is_constant() {
        diagnostics.push(Diagnostic::ZeroVariance);
    }

    let outcome = match opts.method {
        Method::Projection => projection_outcome(series, opts, diagnostics)?,
        Method::QuantileRegression => quantile_regression_outcome(series, opts, diagnostics)?,
    };

    for diagnostic in outcome.diagnostics() {
        log::warn!("{diagnostic}");
    }
    Ok(outcome)
}

fn projection_outcome(
    series: &ObservationSeries, opts: &ComplianceOptions, mut diagnostics: Vec<Diagnostic>,
) -> ComplianceResult<ComplianceOutcome> {
    let n = series.len();
    let p = opts.target_percentile;
    let reference_time = opts.reference_time.resolve(series.times_slice())?;

    let (projected, trend, trend_slope, trend_slope_per_year) = if opts.use_projection {
        let projection = project_to_time(series, opts.trend_alpha(), reference_time)?;
        log::debug!(
            "trend test: p = {:.4}, significant = {}, applied slope = {}",
            projection.trend.p_value,
            projection.trend.significant,
            projection.applied_slope
        );
        (
            projection.projected,
            Some(projection.trend),
            projection.applied_slope,
            projection.slope_per_year,
        )
    } else {
        (series.values_slice().to_vec(), None, 0.0, 0.0)
    };

    let n_eff = if opts.use_neff { effective_sample_size(&projected) } else { n as f64 };
    if opts.use_neff && n_eff < LOW_NEFF_WARNING {
        diagnostics.push(Diagnostic::LowEffectiveSampleSize { n_eff });
    }

    let ranks = HazenRanks::new(&projected)?;
    let tolerance = tolerance_ranks(p, n, n_eff, opts.confidence, opts.sides, &opts.thresholds)?;
    log::debug!(
        "n = {n}, n_eff = {n_eff:.3}, tolerance ranks = [{:.5}, {:.5}] ({})",
        tolerance.lower,
        tolerance.upper,
        tolerance.method
    );

    let bounds = &opts.physical_bounds;
    let point_estimate =
        clamp(bounds, ranks.rank_to_value(p)?, BoundTarget::PointEstimate, &mut diagnostics);
    let upper_tolerance_limit =
        clamp(bounds, ranks.rank_to_value(tolerance.upper)?, BoundTarget::UpperLimit, &mut diagnostics);
    let (lower_tolerance_limit, lower_rank) = if opts.sides.is_two_sided() {
        let raw = ranks.rank_to_value(tolerance.lower)?;
        (Some(clamp(bounds, raw, BoundTarget::LowerLimit, &mut diagnostics)), Some(tolerance.lower))
    } else {
        (None, None)
    };

    let observed_rank = opts.regulatory_limit.map(|limit| ranks.value_to_rank(limit)).transpose()?;
    let compliance = observed_rank.map(|rank| compliance_probability(rank, p, n_eff));

    Ok(ComplianceOutcome::Projection(ProjectionOutcome {
        statistic: percentile_label(p),
        target_percentile: p,
        point_estimate,
        upper_tolerance_limit,
        lower_tolerance_limit,
        upper_rank: tolerance.upper,
        lower_rank,
        tolerance_method: tolerance.method,
        confidence_level: opts.confidence,
        sides: opts.sides,
        n_raw: n,
        n_eff,
        trend,
        trend_slope,
        trend_slope_per_year,
        reference_time,
        projected,
        observed_rank,
        compliance_probability: compliance,
        diagnostics,
    }))
}

fn quantile_regression_outcome(
    series: &ObservationSeries, opts: &ComplianceOptions, mut diagnostics: Vec<Diagnostic>,
) -> ComplianceResult<ComplianceOutcome> {
    let estimate = QuantileRegressionEstimate::fit(series, &opts.quantile_regression_options())?;
    if estimate.n_failed > 0 {
        diagnostics.push(Diagnostic::BootstrapFailures {
            failed: estimate.n_failed,
            attempted: estimate.n_boot,
        });
    }
    log::debug!(
        "quantile regression: block length {}, seed {}, {} of {} fits kept",
        estimate.block_length,
        estimate.seed,
        estimate.n_successful(),
        estimate.n_boot
    );

    let bounds = &opts.physical_bounds;
    let point_estimate =
        clamp(bounds, estimate.point_estimate, BoundTarget::PointEstimate, &mut diagnostics);
    let upper_tolerance_limit =
        clamp(bounds, estimate.upper, BoundTarget::UpperLimit, &mut diagnostics);
    let lower_tolerance_limit =
        estimate.lower.map(|raw| clamp(bounds, raw, BoundTarget::LowerLimit, &mut diagnostics));
    let compliance = opts.regulatory_limit.map(|limit| estimate.fraction_at_or_below(limit));

    Ok(ComplianceOutcome::QuantileRegression(QuantileRegressionOutcome {
        statistic: format!("{} (QR modeled)", percentile_label(opts.target_percentile)),
        target_percentile: opts.target_percentile,
        point_estimate,
        upper_tolerance_limit,
        lower_tolerance_limit,
        confidence_level: opts.confidence,
        sides: opts.sides,
        n_raw: series.len(),
        estimate,
        compliance_probability: compliance,
        diagnostics,
    }))
}

/// Apply physical bounds, recording a diagnostic when a value is clamped.
fn clamp(
    bounds: &PhysicalBounds, raw: f64, target: BoundTarget, diagnostics: &mut Vec<Diagnostic>,
) -> f64 {
    let bounded = bounds.apply(raw);
    if let Some(bound) = bounded.bound {
        diagnostics.push(Diagnostic::PhysicalBoundApplied { target, bound, raw });
    }
    bounded.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{PhysicalBound, Sides, ToleranceMethod};
    use crate::statistical_tests::TrendError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Projection path: trend removal, bound ordering, sides handling.
    // - Option switches (use_projection, use_neff) and physical bounds.
    // - Diagnostics and fatal sample-size errors.
    // -------------------------------------------------------------------------

    fn days(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    /// Trend-free values cycling through 0..10 with stride 7 mod 11.
    fn scrambled(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 + ((i * 7) % 11) as f64).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify a perfectly linear series is projected to a constant at the
    // reference time.
    //
    // Given
    // -----
    // - value = 5 + 2·t for 30 daily points, reference at the end.
    //
    // Expect
    // ------
    // - Trend detected with slope 2/day and 730.5/year.
    // - Projected data all equal 63, so the point estimate is 63 and the
    //   zero-variance diagnostic is absent (the raw data vary).
    fn projection_removes_linear_trend() {
        // Arrange
        let t = days(30);
        let v: Vec<f64> = t.iter().map(|x| 5.0 + 2.0 * x).collect();

        // Act
        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();

        // Assert
        assert_eq!(out.trend_detected(), Some(true));
        assert_relative_eq!(out.trend_slope(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.trend_slope_per_year(), 730.5, epsilon = 1e-9);
        assert!(out.p_value().unwrap() < 1e-6);
        assert_relative_eq!(out.point_estimate(), 63.0, epsilon = 1e-9);
        assert!(!out.diagnostics().contains(&Diagnostic::ZeroVariance));
    }

    #[test]
    // Purpose
    // -------
    // Check bound ordering and the two-sided/one-sided difference.
    //
    // Given
    // -----
    // - 60 trend-free scrambled values; two-sided and one-sided requests.
    //
    // Expect
    // ------
    // - lower ≤ point ≤ upper two-sided; one-sided has no lower bound and a
    //   smaller upper limit (higher α per tail).
    fn projection_bounds_are_ordered() {
        let t = days(60);
        let v = scrambled(60);
        let two = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();
        let one_opts = ComplianceOptions { sides: Sides::One, ..Default::default() };
        let one = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &one_opts).unwrap();

        let lower = two.lower_tolerance_limit().unwrap();
        assert!(lower <= two.point_estimate());
        assert!(two.point_estimate() <= two.upper_tolerance_limit());
        assert!(one.lower_tolerance_limit().is_none());
        assert!(one.upper_tolerance_limit() <= two.upper_tolerance_limit());
        assert_eq!(two.method_label(), "projection");
    }

    #[test]
    // Purpose
    // -------
    // Ensure disabling projection and n_eff falls back to raw data and
    // raw n.
    //
    // Given
    // -----
    // - The linear series with `use_projection = false`, `use_neff = false`.
    //
    // Expect
    // ------
    // - No trend detected, slope 0, p-value `None`, n_eff = n = 30.
    fn projection_switches_fall_back_to_raw_data() {
        let t = days(30);
        let v: Vec<f64> = t.iter().map(|x| 5.0 + 2.0 * x).collect();
        let opts = ComplianceOptions { use_projection: false, use_neff: false, ..Default::default() };

        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &opts).unwrap();

        assert_eq!(out.trend_detected(), Some(false));
        assert_eq!(out.trend_slope(), 0.0);
        assert_eq!(out.p_value(), None);
        assert_eq!(out.n_eff(), Some(30.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify constant data are flagged and handled without error.
    //
    // Given
    // -----
    // - Eight copies of 3.0.
    //
    // Expect
    // ------
    // - Point estimate and limits equal 3; n_eff = 1; diagnostics include
    //   zero variance, small sample and low n_eff.
    fn projection_constant_data_is_flagged() {
        let t = days(8);
        let v = vec![3.0; 8];

        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();

        assert_eq!(out.point_estimate(), 3.0);
        assert_eq!(out.upper_tolerance_limit(), 3.0);
        assert_eq!(out.n_eff(), Some(1.0));
        let d = out.diagnostics();
        assert!(d.contains(&Diagnostic::ZeroVariance));
        assert!(d.contains(&Diagnostic::SmallSample { n: 8 }));
        assert!(d.contains(&Diagnostic::LowEffectiveSampleSize { n_eff: 1.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Check that physical bounds clamp reported values and are recorded.
    //
    // Given
    // -----
    // - Scrambled data in [10, 20] with a physical maximum of 19.
    //
    // Expect
    // ------
    // - Upper limit equals 19 and a `PhysicalBoundApplied` diagnostic for
    //   the upper limit with bound `Maximum`.
    fn projection_applies_physical_bounds() {
        let t = days(40);
        let v = scrambled(40);
        let opts = ComplianceOptions {
            physical_bounds: PhysicalBounds::new(None, Some(19.0)),
            ..Default::default()
        };

        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &opts).unwrap();

        assert_eq!(out.upper_tolerance_limit(), 19.0);
        assert!(out.diagnostics().iter().any(|d| matches!(
            d,
            Diagnostic::PhysicalBoundApplied {
                target: BoundTarget::UpperLimit,
                bound: PhysicalBound::Maximum,
                ..
            }
        )));
    }

    #[test]
    // Purpose
    // -------
    // Verify sample-size rules after dropping missing values.
    //
    // Given
    // -----
    // - 7 rows of which 3 are NaN (4 usable); 14 rows with 5 NaN.
    //
    // Expect
    // ------
    // - `InsufficientData { n: 4, required: 5 }` for the first.
    // - The second succeeds with a missing-values diagnostic (5/14 > 30%).
    fn pipeline_checks_usable_sample_size() {
        let t = days(7);
        let mut v = scrambled(7);
        v[1] = f64::NAN;
        v[3] = f64::NAN;
        v[5] = f64::NAN;
        let err = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap_err();
        assert_eq!(err, ComplianceError::InsufficientData { n: 4, required: 5 });

        let t = days(14);
        let mut v = scrambled(14);
        for i in [0, 2, 4, 6, 8] {
            v[i] = f64::NAN;
        }
        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();
        assert_eq!(out.n_raw(), 9);
        assert!(out.diagnostics().contains(&Diagnostic::MissingValuesDropped { dropped: 5, total: 14 }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure errors from lower layers surface wrapped.
    //
    // Given
    // -----
    // - All timestamps identical with projection enabled, for a rising and
    //   a trend-free series; mismatched input lengths.
    //
    // Expect
    // ------
    // - Rising: `ComplianceError::Trend(NoDistinctTimestamps)`, since the
    //   significant trend has no slope.
    // - Trend-free: passes through unprojected.
    // - Mismatched lengths: a `ComplianceError::Series` error.
    fn pipeline_wraps_lower_level_errors() {
        let v = scrambled(6);
        let rising = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let err =
            calculate_tolerance_limit(&[1.0; 6], &rising, TimeUnit::Days, &ComplianceOptions::default())
                .unwrap_err();
        assert_eq!(err, ComplianceError::Trend(TrendError::NoDistinctTimestamps));

        let flat = calculate_tolerance_limit(&[1.0; 6], &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();
        assert_eq!(flat.trend_detected(), Some(false));
        assert_eq!(flat.trend_slope(), 0.0);

        let err = calculate_tolerance_limit(&days(5), &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Series(_)));
    }

    #[test]
    // Purpose
    // -------
    // Verify the finite-sample correction is reported for small n_eff.
    //
    // Given
    // -----
    // - 20 scrambled values, `use_neff = false` so n_eff = 20 ≤ 60 and the
    //   distance 20·0.05 = 1 ≤ 5.
    //
    // Expect
    // ------
    // - Tolerance method `FiniteSampleCorrected`; upper rank ≥ 0.95.
    fn projection_reports_tolerance_method() {
        let t = days(20);
        let v = scrambled(20);
        let opts = ComplianceOptions { use_neff: false, ..Default::default() };

        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &opts).unwrap();

        match out {
            ComplianceOutcome::Projection(o) => {
                assert_eq!(o.tolerance_method, ToleranceMethod::FiniteSampleCorrected);
                assert!(o.upper_rank >= 0.95);
            }
            other => panic!("expected projection outcome, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the trend decision does not depend on the confidence level.
    //
    // Given
    // -----
    // - 30 daily values 10 + (7i mod 11) + 0.16·i, Mann-Kendall p ≈ 0.046.
    // - Confidence 0.95 and 0.99 with `trend_alpha` unset.
    //
    // Expect
    // ------
    // - Both runs test at α = 0.05, detect the trend and share the same
    //   slope and point estimate.
    fn trend_decision_uses_fixed_alpha() {
        // Arrange
        let t = days(30);
        let v: Vec<f64> = (0..30).map(|i| 10.0 + ((i * 7) % 11) as f64 + 0.16 * i as f64).collect();
        let strict = ComplianceOptions { confidence: 0.99, ..Default::default() };

        // Act
        let at_95 = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &ComplianceOptions::default())
            .unwrap();
        let at_99 = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &strict).unwrap();

        // Assert
        let p = at_95.p_value().unwrap();
        assert!(p > 0.01 && p < 0.05, "p = {p}");
        assert_eq!(at_95.trend_detected(), Some(true));
        assert_eq!(at_99.trend_detected(), Some(true));
        assert_eq!(at_95.trend_slope(), at_99.trend_slope());
        assert_eq!(at_95.point_estimate(), at_99.point_estimate());
    }

    #[test]
    // Purpose
    // -------
    // Verify skipped bootstrap fits surface as a diagnostic.
    //
    // Given
    // -----
    // - Eight values on two timestamps (four each), quantile regression with
    //   200 resamples and seed 11. Block length 2 lets some resamples draw
    //   from one timestamp only, which makes their fit singular.
    //
    // Expect
    // ------
    // - A `BootstrapFailures` diagnostic with `attempted = 200` whose failure
    //   count matches the estimate and leaves at least 100 fits.
    fn quantile_regression_reports_skipped_bootstrap_fits() {
        // Arrange
        let t = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let v = [1.0, 3.0, 2.0, 4.0, 6.0, 5.0, 8.0, 7.0];
        let opts = ComplianceOptions {
            method: Method::QuantileRegression,
            n_boot: 200,
            seed: Some(11),
            ..Default::default()
        };

        // Act
        let out = calculate_tolerance_limit(&t, &v, TimeUnit::Days, &opts).unwrap();

        // Assert
        let ComplianceOutcome::QuantileRegression(qr) = &out else {
            panic!("expected quantile-regression outcome, got {out:?}");
        };
        assert!(qr.estimate.n_failed > 0);
        assert!(qr.estimate.n_successful() >= 100);
        assert!(out.diagnostics().contains(&Diagnostic::BootstrapFailures {
            failed: qr.estimate.n_failed,
            attempted: 200,
        }));
    }
}
