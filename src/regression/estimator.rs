//! regression::estimator — quantile-regression percentile with bootstrap bounds.
//!
//! Purpose
//! -------
//! Model the target percentile of a trending series as a linear function of
//! time, evaluate it at a reference time, and bound that prediction with a
//! moving-block bootstrap. This is the alternative to trend projection when
//! the percentile itself (rather than the whole distribution) drifts.
//!
//! Key behaviors
//! -------------
//! - Time axis is days since the first observation:
//!   `x = (t − t_min) · unit.to_days()`. The reference time is resolved once
//!   on the native axis and mapped the same way.
//! - The point estimate is the full-series fit evaluated at the reference.
//! - Every bootstrap resample is refit and evaluated at the *original*
//!   reference. Failed fits are kept as `Err` values, counted and skipped.
//! - At least 100 successful fits are required when `n_boot ≥ 100`, at
//!   least one otherwise; fewer is [`RegressionError::ConvergenceFailure`].
//! - Bounds are empirical percentiles (linear interpolation between order
//!   statistics) at `1 − α/sides` and, for two-sided intervals, `α/sides`.
//! - With the `parallel` feature the bootstrap loop runs on rayon. Each
//!   resample owns a counter-seeded RNG and results are collected in index
//!   order, so output is identical to the sequential path.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input series is sorted and free of missing values
//!   (see [`ObservationSeries`]).
//! - `bootstrap` holds only successful predictions, sorted ascending.

use crate::inference::Sides;
use crate::regression::{
    bootstrap::{BlockBootstrap, default_block_length},
    errors::{RegressionError, RegressionResult},
    quantile::{IrlsOptions, QuantileLine, fit_quantile_line},
};
use crate::series::{DAYS_PER_YEAR, ObservationSeries, ReferenceTime};

/// Minimum number of observations for a quantile-regression estimate.
pub const MIN_QR_OBSERVATIONS: usize = 3;

/// QuantileRegressionOptions — configuration of the bootstrap estimator.
///
/// Fields
/// ------
/// - `quantile`: modeled percentile in (0, 1) (default 0.95).
/// - `confidence`: bound confidence in (0, 1) (default 0.95).
/// - `sides`: one- or two-sided bounds (default two-sided).
/// - `reference`: where to evaluate the fit (default end of record).
/// - `n_boot`: bootstrap resamples (default 1000).
/// - `seasonal_period`: optional lower bound on the block length.
/// - `seed`: base seed; `None` draws one at random.
/// - `irls`: stopping rule of each fit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileRegressionOptions {
    pub quantile: f64,
    pub confidence: f64,
    pub sides: Sides,
    pub reference: ReferenceTime,
    pub n_boot: usize,
    pub seasonal_period: Option<usize>,
    pub seed: Option<u64>,
    pub irls: IrlsOptions,
}

impl Default for QuantileRegressionOptions {
    fn default() -> Self {
        QuantileRegressionOptions {
            quantile: 0.95,
            confidence: 0.95,
            sides: Sides::Two,
            reference: ReferenceTime::End,
            n_boot: 1000,
            seasonal_period: None,
            seed: None,
            irls: IrlsOptions::default(),
        }
    }
}

impl QuantileRegressionOptions {
    /// Check ranges of the numeric fields.
    ///
    /// Errors
    /// ------
    /// - `InvalidQuantile`, `InvalidConfidence` outside (0, 1).
    /// - `InvalidBootstrapCount` when `n_boot == 0`.
    pub fn validate(&self) -> RegressionResult<()> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(RegressionError::InvalidQuantile(self.quantile));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(RegressionError::InvalidConfidence(self.confidence));
        }
        if self.n_boot == 0 {
            return Err(RegressionError::InvalidBootstrapCount(self.n_boot));
        }
        Ok(())
    }
}

/// QuantileRegressionEstimate — fitted percentile and its bootstrap bounds.
///
/// Fields
/// ------
/// - `point_estimate`: full-series fit at the reference time.
/// - `upper`: bootstrap percentile at `1 − α/sides`.
/// - `lower`: bootstrap percentile at `α/sides` (two-sided only).
/// - `line`: full-series fit on the days-since-start axis.
/// - `slope_per_year`: `line.slope × 365.25`.
/// - `reference_time`: resolved reference on the native time axis.
/// - `reference_day`: the same reference in days since the first sample.
/// - `block_length`: bootstrap block length used.
/// - `seed`: base seed actually used (drawn when none was configured).
/// - `n_boot`: resamples attempted.
/// - `n_failed`: resamples whose fit failed and were skipped.
/// - `bootstrap`: successful predictions, sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileRegressionEstimate {
    pub point_estimate: f64,
    pub upper: f64,
    pub lower: Option<f64>,
    pub line: QuantileLine,
    pub slope_per_year: f64,
    pub reference_time: f64,
    pub reference_day: f64,
    pub block_length: usize,
    pub seed: u64,
    pub n_boot: usize,
    pub n_failed: usize,
    pub bootstrap: Vec<f64>,
}

impl QuantileRegressionEstimate {
    /// Fit the percentile line and bootstrap its prediction.
    ///
    /// Parameters
    /// ----------
    /// - `series`: `&ObservationSeries`
    ///   Cleaned, time-sorted observations.
    /// - `opts`: `&QuantileRegressionOptions`
    ///   Estimator configuration.
    ///
    /// Returns
    /// -------
    /// `RegressionResult<QuantileRegressionEstimate>`
    ///
    /// Errors
    /// ------
    /// - Option validation errors (see [`QuantileRegressionOptions::validate`]).
    /// - `InsufficientData` for fewer than three observations.
    /// - `Series` when the reference time cannot be resolved.
    /// - Any fit error of the full-series regression.
    /// - `ConvergenceFailure` when too few resamples produce a fit.
    pub fn fit(
        series: &ObservationSeries, opts: &QuantileRegressionOptions,
    ) -> RegressionResult<Self> {
        opts.validate()?;
        let n = series.len();
        if n < MIN_QR_OBSERVATIONS {
            return Err(RegressionError::InsufficientData { n, required: MIN_QR_OBSERVATIONS });
        }

        let times = series.times_slice();
        let values = series.values_slice();
        let reference_time = opts.reference.resolve(times)?;

        let to_days = series.unit().to_days();
        let t_min = times[0];
        let days: Vec<f64> = times.iter().map(|&t| (t - t_min) * to_days).collect();
        let reference_day = (reference_time - t_min) * to_days;

        let line = fit_quantile_line(&days, values, opts.quantile, &opts.irls)?;
        let point_estimate = line.predict(reference_day);

        let block_length = default_block_length(n, opts.seasonal_period);
        let seed = opts.seed.unwrap_or_else(rand::random);
        let sampler = BlockBootstrap::new(values, &days, block_length, opts.n_boot, seed)?;
        let outcomes = run_bootstrap(&sampler, opts.quantile, &opts.irls, reference_day);

        let (bootstrap, n_failed) = collect_predictions(outcomes, opts.n_boot)?;

        let alpha_tail = (1.0 - opts.confidence) / opts.sides.count() as f64;
        let upper = empirical_percentile(&bootstrap, 1.0 - alpha_tail);
        let lower = opts.sides.is_two_sided().then(|| empirical_percentile(&bootstrap, alpha_tail));

        Ok(QuantileRegressionEstimate {
            point_estimate,
            upper,
            lower,
            line,
            slope_per_year: line.slope * DAYS_PER_YEAR,
            reference_time,
            reference_day,
            block_length,
            seed,
            n_boot: opts.n_boot,
            n_failed,
            bootstrap,
        })
    }

    /// Share of bootstrap predictions at or below `limit`.
    pub fn fraction_at_or_below(&self, limit: f64) -> f64 {
        if self.bootstrap.is_empty() {
            return 0.0;
        }
        let below = self.bootstrap.partition_point(|&v| v <= limit);
        below as f64 / self.bootstrap.len() as f64
    }

    pub fn n_successful(&self) -> usize {
        self.bootstrap.len()
    }
}

/// Split bootstrap outcomes into sorted predictions and a failure count.
///
/// Errors
/// ------
/// - `ConvergenceFailure` when fewer than 100 fits succeed out of
///   `n_boot ≥ 100`, or none succeed out of a smaller `n_boot`.
fn collect_predictions(
    outcomes: Vec<RegressionResult<f64>>, n_boot: usize,
) -> RegressionResult<(Vec<f64>, usize)> {
    let mut bootstrap = Vec::with_capacity(outcomes.len());
    let mut n_failed = 0;
    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(pred) => bootstrap.push(pred),
            Err(err) => {
                n_failed += 1;
                log::debug!("bootstrap resample {i} skipped: {err}");
            }
        }
    }

    let required = if n_boot >= 100 { 100 } else { 1 };
    if bootstrap.len() < required {
        return Err(RegressionError::ConvergenceFailure {
            successes: bootstrap.len(),
            required,
            attempted: n_boot,
        });
    }
    bootstrap.sort_by(f64::total_cmp);
    Ok((bootstrap, n_failed))
}

/// Refit every resample and predict at `reference_day`, keeping failures.
#[cfg(not(feature = "parallel"))]
fn run_bootstrap(
    sampler: &BlockBootstrap<'_>, q: f64, irls: &IrlsOptions, reference_day: f64,
) -> Vec<RegressionResult<f64>> {
    sampler
        .clone()
        .map(|s| fit_quantile_line(&s.times, &s.values, q, irls).map(|l| l.predict(reference_day)))
        .collect()
}

/// Refit every resample and predict at `reference_day`, keeping failures.
#[cfg(feature = "parallel")]
fn run_bootstrap(
    sampler: &BlockBootstrap<'_>, q: f64, irls: &IrlsOptions, reference_day: f64,
) -> Vec<RegressionResult<f64>> {
    use rayon::prelude::*;

    (0..sampler.n_boot())
        .into_par_iter()
        .map(|i| {
            let s = sampler.sample(i);
            fit_quantile_line(&s.times, &s.values, q, irls).map(|l| l.predict(reference_day))
        })
        .collect()
}

/// Linear-interpolated percentile of ascending `sorted` at probability `p`.
pub fn empirical_percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        m => {
            let pos = p.clamp(0.0, 1.0) * (m - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(m - 1);
            let frac = pos - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
    }
}
