//! trend::projection — remove a significant trend by projecting to one time.
//!
//! Purpose
//! -------
//! Make a trending series quasi-stationary by moving every observation along
//! the robust trend line to a single reference time. The projected values
//! represent "what each sample would have measured at the reference time"
//! and feed the percentile and tolerance calculations.
//!
//! Key behaviors
//! -------------
//! - Run the time-aware Mann-Kendall test at significance α.
//! - Not significant: values are returned unchanged and the applied slope is
//!   0, even though Sen's slope is still reported in the trend outcome.
//! - Significant: `projected_i = v_i + slope·(t_ref − t_i)`, then clamped at
//!   zero since concentrations cannot be negative.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is cleaned and time-ordered ([`ObservationSeries`]).
//! - The reference time is resolved once by the caller (or by
//!   [`project_to_reference`]) and used verbatim.
//! - `slope_per_year` is presentational only and never feeds back into the
//!   projection.
//!
//! Testing notes
//! -------------
//! - Unit tests project a linear ramp to start, middle, end and an earlier
//!   custom time, check clamping at zero and verify trend-free data passes
//!   through untouched.

use crate::{
    series::{ObservationSeries, ReferenceTime},
    statistical_tests::{TrendOutcome, TrendResult},
};

/// Projection — values moved to the reference time plus trend metadata.
///
/// Fields
/// ------
/// - `projected`: `Vec<f64>`
///   One value per observation, non-negative when a trend was applied.
/// - `trend`: [`TrendOutcome`]
///   Full Mann-Kendall/Sen result for reporting.
/// - `applied_slope`: `f64`
///   Slope used for projection per timestamp unit; 0 when not significant.
/// - `slope_per_year`: `f64`
///   `applied_slope` expressed per year.
/// - `reference_time`: `f64`
///   Resolved reference timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub projected: Vec<f64>,
    pub trend: TrendOutcome,
    pub applied_slope: f64,
    pub slope_per_year: f64,
    pub reference_time: f64,
}

/// Resolve `reference` against the series and project to it.
///
/// Errors
/// ------
/// - `TrendError::Series` when the reference cannot be resolved.
/// - Any error from [`project_to_time`].
pub fn project_to_reference(
    series: &ObservationSeries, alpha: f64, reference: ReferenceTime,
) -> TrendResult<Projection> {
    let t_ref = reference.resolve(series.times_slice())?;
    project_to_time(series, alpha, t_ref)
}

/// Project a series to an already-resolved reference timestamp.
///
/// Parameters
/// ----------
/// - `series`: [`ObservationSeries`]
///   Cleaned, time-ordered series with at least 3 observations.
/// - `alpha`: `f64`
///   Two-sided significance level of the trend test.
/// - `t_ref`: `f64`
///   Reference timestamp in the series' unit.
///
/// Returns
/// -------
/// `TrendResult<Projection>`
///
/// Errors
/// ------
/// - Any [`TrendError`](crate::statistical_tests::TrendError) from the
///   Mann-Kendall test (too few observations, invalid α, all timestamps
///   equal).
///
/// Examples
/// --------
/// ```rust
/// use rust_compliance::series::{ObservationSeries, TimeUnit};
/// use rust_compliance::trend::project_to_time;
///
/// let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let values: Vec<f64> = times.iter().map(|t| 10.0 + 2.0 * t).collect();
/// let s = ObservationSeries::new(&times, &values, TimeUnit::Days).unwrap();
///
/// let p = project_to_time(&s, 0.05, 9.0).unwrap();
/// assert!(p.projected.iter().all(|v| (v - 28.0).abs() < 1e-9));
/// ```
pub fn project_to_time(series: &ObservationSeries, alpha: f64, t_ref: f64) -> TrendResult<Projection> {
    let times = series.times_slice();
    let values = series.values_slice();
    let trend = TrendOutcome::mann_kendall_with_times(times, values, alpha)?;

    if !trend.significant {
        return Ok(Projection {
            projected: values.to_vec(),
            trend,
            applied_slope: 0.0,
            slope_per_year: 0.0,
            reference_time: t_ref,
        });
    }

    let slope = trend.slope;
    let projected = times
        .iter()
        .zip(values)
        .map(|(&t, &v)| (v + slope * (t_ref - t)).max(0.0))
        .collect();

    Ok(Projection {
        projected,
        trend,
        applied_slope: slope,
        slope_per_year: slope * series.unit().per_year(),
        reference_time: t_ref,
    })
}
