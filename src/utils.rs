//! utils — conversion helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python arguments into the crate's option types.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    compliance::{ComplianceOptions, Method},
    inference::{PhysicalBounds, Sides, ToleranceThresholds},
    series::{ReferenceTime, TimeUnit},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Accept a 1-D numpy array, a pandas Series or any float sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy an array-like argument into an owned vector.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Parse the time unit; defaults to days.
#[cfg(feature = "python-bindings")]
pub fn extract_time_unit(unit: Option<&str>) -> PyResult<TimeUnit> {
    Ok(unit.map(str::parse::<TimeUnit>).transpose()?.unwrap_or(TimeUnit::Days))
}

/// Parse a reference time given as an alias string or a numeric timestamp.
#[cfg(feature = "python-bindings")]
pub fn extract_reference_time(reference: Option<&Bound<'_, PyAny>>) -> PyResult<ReferenceTime> {
    let Some(obj) = reference else {
        return Ok(ReferenceTime::End);
    };
    if let Ok(alias) = obj.extract::<String>() {
        return Ok(alias.parse::<ReferenceTime>()?);
    }
    let t: f64 = obj.extract().map_err(|_| {
        PyValueError::new_err(
            "reference_time must be 'start', 'middle', 'end' (or an alias) or a numeric timestamp",
        )
    })?;
    Ok(ReferenceTime::At(t))
}

/// Build and validate pipeline options from keyword arguments.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_compliance_options(
    target_percentile: f64, confidence: f64, sides: usize, regulatory_limit: Option<f64>,
    use_projection: bool, use_neff: bool, reference_time: Option<&Bound<'_, PyAny>>,
    method: &str, seasonal_period: Option<usize>, n_boot: usize, seed: Option<u64>,
    small_n_threshold: f64, medium_n_threshold: f64, distance_threshold: f64,
    trend_alpha: Option<f64>, min_value: Option<f64>, max_value: Option<f64>,
) -> PyResult<ComplianceOptions> {
    let sides = Sides::try_from(sides)?;
    let method: Method = method.parse()?;
    let thresholds =
        ToleranceThresholds::new(small_n_threshold, medium_n_threshold, distance_threshold)?;

    let opts = ComplianceOptions {
        target_percentile,
        confidence,
        sides,
        regulatory_limit,
        use_projection,
        use_neff,
        reference_time: extract_reference_time(reference_time)?,
        method,
        seasonal_period,
        n_boot,
        seed,
        thresholds,
        trend_alpha,
        physical_bounds: PhysicalBounds::new(min_value, max_value),
    };
    opts.validate()?;
    Ok(opts)
}
