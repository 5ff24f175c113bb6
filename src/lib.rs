//! rust_compliance — percentile compliance statistics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the compliance pipeline to Python via the `_rust_compliance`
//! extension module. The crate answers one question for a monitored
//! water-quality (or similar) series: what is the target percentile at the
//! reference time, how confidently is it bounded, and how likely is the
//! series to meet a regulatory limit.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules as the public crate surface:
//!   - [`series`]: cleaned observation container, time units, reference
//!     times.
//!   - [`statistical_tests`]: Mann-Kendall trend test and Sen's slope.
//!   - [`trend`]: projection of a series to a reference time.
//!   - [`inference`]: effective sample size, Hazen percentiles, Wilson
//!     tolerance ranks, compliance score test.
//!   - [`regression`]: IRLS quantile regression with block bootstrap.
//!   - [`compliance`]: the orchestrating pipeline and its result types.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the binding layer only
//!   converts arguments, forwards calls and maps errors to `ValueError`.
//! - Timestamps cross the boundary as plain numbers in the declared unit;
//!   date parsing is the caller's job.
//!
//! Conventions
//! -----------
//! - Python classes live under `_rust_compliance.<submodule>` and are
//!   registered in `sys.modules` as `rust_compliance.<submodule>`.
//! - Errors propagate as the subtree error enums internally and become
//!   `PyErr` at the boundary through their `From` impls.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration tests in `tests/`.

pub mod compliance;
pub mod inference;
pub mod regression;
pub mod series;
pub mod statistical_tests;
pub mod trend;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    compliance::{ComplianceOutcome, calculate_tolerance_limit},
    series::ObservationSeries,
    statistical_tests::TrendOutcome,
    utils::{build_compliance_options, extract_f64_vec, extract_time_unit},
};

/// ToleranceLimit — Python-facing wrapper for the compliance pipeline.
///
/// Purpose
/// -------
/// Run [`calculate_tolerance_limit`] from Python and expose the resulting
/// [`ComplianceOutcome`] through read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `ToleranceLimit(times, values, ...)`:
/// - `times`, `values`: array-likes of equal length; `NaN` values are
///   treated as missing.
/// - `unit`: `"days"` (default) or `"seconds"`.
/// - Remaining keywords mirror [`compliance::ComplianceOptions`];
///   `reference_time` accepts an alias string or a numeric timestamp,
///   `sides` is 1 or 2, thresholds are passed individually and
///   `min_value` / `max_value` set the physical bounds.
///
/// Notes
/// -----
/// - Properties specific to one method (`n_eff`, `p_value`,
///   `trend_detected`, `projected_data`, `bootstrap_distribution`) return
///   `None` when the other method was used.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_compliance.compliance")]
pub struct ToleranceLimit {
    inner: ComplianceOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ToleranceLimit {
    #[new]
    #[pyo3(
        signature = (
            times,
            values,
            unit = None,
            target_percentile = 0.95,
            confidence = 0.95,
            sides = 2,
            regulatory_limit = None,
            use_projection = true,
            use_neff = true,
            reference_time = None,
            method = "projection",
            seasonal_period = None,
            n_boot = 1000,
            seed = None,
            small_n_threshold = 60.0,
            medium_n_threshold = 120.0,
            distance_threshold = 5.0,
            trend_alpha = None,
            min_value = None,
            max_value = None,
        ),
        text_signature = "(times, values, /, unit='days', target_percentile=0.95, confidence=0.95, \
                          sides=2, regulatory_limit=None, use_projection=True, use_neff=True, \
                          reference_time='end', method='projection', seasonal_period=None, \
                          n_boot=1000, seed=None, small_n_threshold=60, medium_n_threshold=120, \
                          distance_threshold=5, trend_alpha=None, min_value=None, max_value=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, times: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>,
        unit: Option<&str>, target_percentile: f64, confidence: f64, sides: usize,
        regulatory_limit: Option<f64>, use_projection: bool, use_neff: bool,
        reference_time: Option<&Bound<'py, PyAny>>, method: &str, seasonal_period: Option<usize>,
        n_boot: usize, seed: Option<u64>, small_n_threshold: f64, medium_n_threshold: f64,
        distance_threshold: f64, trend_alpha: Option<f64>, min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> PyResult<ToleranceLimit> {
        let times = extract_f64_vec(py, times, "times")?;
        let values = extract_f64_vec(py, values, "values")?;
        let unit = extract_time_unit(unit)?;
        let opts = build_compliance_options(
            target_percentile,
            confidence,
            sides,
            regulatory_limit,
            use_projection,
            use_neff,
            reference_time,
            method,
            seasonal_period,
            n_boot,
            seed,
            small_n_threshold,
            medium_n_threshold,
            distance_threshold,
            trend_alpha,
            min_value,
            max_value,
        )?;

        let inner = py.allow_threads(|| calculate_tolerance_limit(&times, &values, unit, &opts))?;
        Ok(ToleranceLimit { inner })
    }

    #[getter]
    pub fn statistic(&self) -> String {
        self.inner.statistic_label().to_string()
    }

    #[getter]
    pub fn method(&self) -> &'static str {
        self.inner.method_label()
    }

    #[getter]
    pub fn point_estimate(&self) -> f64 {
        self.inner.point_estimate()
    }

    #[getter]
    pub fn upper_tolerance_limit(&self) -> f64 {
        self.inner.upper_tolerance_limit()
    }

    #[getter]
    pub fn lower_tolerance_limit(&self) -> Option<f64> {
        self.inner.lower_tolerance_limit()
    }

    #[getter]
    pub fn confidence_level(&self) -> f64 {
        self.inner.confidence_level()
    }

    #[getter]
    pub fn n_raw(&self) -> usize {
        self.inner.n_raw()
    }

    #[getter]
    pub fn n_eff(&self) -> Option<f64> {
        self.inner.n_eff()
    }

    #[getter]
    pub fn trend_detected(&self) -> Option<bool> {
        self.inner.trend_detected()
    }

    #[getter]
    pub fn trend_slope(&self) -> f64 {
        self.inner.trend_slope()
    }

    #[getter]
    pub fn trend_slope_per_year(&self) -> f64 {
        self.inner.trend_slope_per_year()
    }

    #[getter]
    pub fn p_value(&self) -> Option<f64> {
        self.inner.p_value()
    }

    #[getter]
    pub fn probability_of_compliance(&self) -> Option<f64> {
        self.inner.compliance_probability()
    }

    /// Diagnostic messages, in the order they were raised.
    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.diagnostics().iter().map(ToString::to_string).collect()
    }

    #[getter]
    pub fn projected_data(&self) -> Option<Vec<f64>> {
        match &self.inner {
            ComplianceOutcome::Projection(o) => Some(o.projected.clone()),
            ComplianceOutcome::QuantileRegression(_) => None,
        }
    }

    #[getter]
    pub fn bootstrap_distribution(&self) -> Option<Vec<f64>> {
        match &self.inner {
            ComplianceOutcome::Projection(_) => None,
            ComplianceOutcome::QuantileRegression(o) => Some(o.estimate.bootstrap.clone()),
        }
    }
}

/// MannKendall — Python-facing wrapper for the Mann-Kendall trend test.
///
/// Constructed via `MannKendall(values, /, times=None, alpha=0.05)`. With
/// `times` the Sen slope is time-aware (per timestamp unit); without, it is
/// per index step.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_compliance.statistical_tests")]
pub struct MannKendall {
    inner: TrendOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MannKendall {
    #[new]
    #[pyo3(
        text_signature = "(values, /, times=None, alpha=0.05)",
        signature = (values, times = None, alpha = 0.05)
    )]
    pub fn new<'py>(
        py: Python<'py>, values: &Bound<'py, PyAny>, times: Option<&Bound<'py, PyAny>>,
        alpha: f64,
    ) -> PyResult<MannKendall> {
        let values = extract_f64_vec(py, values, "values")?;
        let inner = match times {
            Some(t) => {
                let times = extract_f64_vec(py, t, "times")?;
                TrendOutcome::mann_kendall_with_times(&times, &values, alpha)?
            }
            None => TrendOutcome::mann_kendall(&values, alpha)?,
        };
        Ok(MannKendall { inner })
    }

    #[getter]
    pub fn trend(&self) -> String {
        self.inner.direction.to_string()
    }

    #[getter]
    pub fn significant(&self) -> bool {
        self.inner.significant
    }

    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value
    }

    #[getter]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    #[getter]
    pub fn tau(&self) -> f64 {
        self.inner.tau
    }

    #[getter]
    pub fn s(&self) -> i64 {
        self.inner.s
    }

    #[getter]
    pub fn var_s(&self) -> f64 {
        self.inner.var_s
    }

    #[getter]
    pub fn slope(&self) -> f64 {
        self.inner.slope
    }
}

/// Compare naive, detrended-only and fully corrected projection results.
///
/// Returns a list of `(label, point_estimate, upper_tolerance_limit, n_eff,
/// trend_detected)` tuples.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (times, values, unit = None, target_percentile = 0.95, confidence = 0.95),
    text_signature = "(times, values, /, unit='days', target_percentile=0.95, confidence=0.95)"
)]
pub fn compare_compliance_methods<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>, unit: Option<&str>,
    target_percentile: f64, confidence: f64,
) -> PyResult<Vec<(String, f64, f64, f64, bool)>> {
    let times = extract_f64_vec(py, times, "times")?;
    let values = extract_f64_vec(py, values, "values")?;
    let series = ObservationSeries::new(&times, &values, extract_time_unit(unit)?)?;
    let opts = compliance::ComplianceOptions { target_percentile, confidence, ..Default::default() };

    let rows = compliance::compare_compliance_methods(&series, &opts)?;
    Ok(rows
        .into_iter()
        .map(|r| {
            (r.label.to_string(), r.point_estimate, r.upper_tolerance_limit, r.n_eff, r.trend_detected)
        })
        .collect())
}

/// _rust_compliance — PyO3 module initializer for the Python extension.
///
/// Creates the `compliance` and `statistical_tests` submodules, attaches them
/// to the parent module and registers them in `sys.modules` so dotted
/// imports work.
///
/// Errors
/// ------
/// - `PyErr` if creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_compliance<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let compliance_mod = PyModule::new(_py, "compliance")?;
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    compliance_module(_py, m, &compliance_mod)?;
    statistical_tests_module(_py, m, &statistical_tests_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_compliance.compliance", compliance_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_compliance.statistical_tests", statistical_tests_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn compliance_module<'py>(
    _py: Python, rust_compliance: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ToleranceLimit>()?;
    m.add_function(wrap_pyfunction!(compare_compliance_methods, m)?)?;
    rust_compliance.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests_module<'py>(
    _py: Python, rust_compliance: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<MannKendall>()?;
    rust_compliance.add_submodule(m)?;
    Ok(())
}
