//! Observation series container for compliance statistics.
//!
//! Purpose
//! -------
//! Provide a small, validated container for a time-ordered series of
//! environmental measurements. This module centralizes the cleaning steps
//! every estimator relies on: missing-value removal, timestamp validation
//! and ordering by time.
//!
//! Key behaviors
//! -------------
//! - [`ObservationSeries::new`] copies caller data, drops rows whose value is
//!   NaN (missing), rejects non-finite timestamps and infinite values, and
//!   stable-sorts the remaining pairs ascending by timestamp.
//! - The number of input rows and dropped rows is recorded so callers can
//!   report data-quality diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction, `times` and `values` have equal length, every entry
//!   is finite, and `times` is non-decreasing.
//! - Timestamps need not be evenly spaced and may contain duplicates; ties
//!   keep their original relative order.
//! - The caller's slices are never mutated.
//!
//! Conventions
//! -----------
//! - Timestamps are plain `f64` in the unit described by [`TimeUnit`]
//!   (epoch seconds or day counts).
//! - A series may be empty after cleaning; minimum-size policies belong to
//!   the estimators and the orchestrator, not to this container.
//!
//! Testing notes
//! -------------
//! - Unit tests cover missing-value removal, sorting with paired values,
//!   length mismatch, non-finite timestamps and infinite values.
use crate::series::{
    errors::{SeriesError, SeriesResult},
    units::TimeUnit,
};
use ndarray::ArrayView1;

/// `ObservationSeries` — cleaned, time-ordered measurement series.
///
/// Fields
/// ------
/// - `times`: finite, non-decreasing timestamps.
/// - `values`: finite measurements paired index-wise with `times`.
/// - `unit`: [`TimeUnit`] of the timestamp axis.
/// - `n_input`: number of rows supplied before cleaning.
///
/// All fields are private; [`ObservationSeries::new`] is the only way to
/// build one, so the ordering and pairing invariants always hold.
///
/// Performance
/// -----------
/// - Construction is O(n log n) because of the sort; afterwards the type is
///   a plain container.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    times: Vec<f64>,
    values: Vec<f64>,
    unit: TimeUnit,
    n_input: usize,
}

impl ObservationSeries {
    /// Build a cleaned series from raw timestamp/value slices.
    ///
    /// Parameters
    /// ----------
    /// - `times`: `&[f64]`
    ///   Observation timestamps. Must be finite.
    /// - `values`: `&[f64]`
    ///   Measurements. NaN marks a missing value and drops the row.
    /// - `unit`: [`TimeUnit`]
    ///   Unit of `times`.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<ObservationSeries>`
    ///   The cleaned and sorted series.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::LengthMismatch` when the slices differ in length.
    /// - `SeriesError::NonFiniteTimestamp { index, value }` for the first
    ///   NaN/±∞ timestamp.
    /// - `SeriesError::InfiniteValue { index, value }` for the first ±∞
    ///   measurement.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_compliance::series::{ObservationSeries, TimeUnit};
    /// let s = ObservationSeries::new(&[3.0, 1.0, 2.0], &[30.0, f64::NAN, 20.0], TimeUnit::Days)
    ///     .unwrap();
    /// assert_eq!(s.times_slice(), &[2.0, 3.0]);
    /// assert_eq!(s.values_slice(), &[20.0, 30.0]);
    /// assert_eq!(s.n_dropped(), 1);
    /// ```
    pub fn new(times: &[f64], values: &[f64], unit: TimeUnit) -> SeriesResult<Self> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch { times: times.len(), values: values.len() });
        }

        let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(times.len());
        for (index, (&t, &v)) in times.iter().zip(values.iter()).enumerate() {
            if !t.is_finite() {
                return Err(SeriesError::NonFiniteTimestamp { index, value: t });
            }
            if v.is_nan() {
                continue;
            }
            if v.is_infinite() {
                return Err(SeriesError::InfiniteValue { index, value: v });
            }
            pairs.push((t, v));
        }

        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (t_sorted, v_sorted): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Ok(ObservationSeries { times: t_sorted, values: v_sorted, unit, n_input: times.len() })
    }

    /// Number of retained observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of rows supplied before cleaning.
    pub fn n_input(&self) -> usize {
        self.n_input
    }

    /// Number of rows dropped because the value was missing.
    pub fn n_dropped(&self) -> usize {
        self.n_input - self.len()
    }

    /// Share of input rows dropped, in `[0, 1]` (0 for empty input).
    pub fn dropped_fraction(&self) -> f64 {
        if self.n_input == 0 { 0.0 } else { self.n_dropped() as f64 / self.n_input as f64 }
    }

    /// Unit of the timestamp axis.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Retained timestamps as an array view.
    pub fn times(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.times.as_slice())
    }

    /// Retained values as an array view.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.values.as_slice())
    }

    /// Retained timestamps as a contiguous slice.
    pub fn times_slice(&self) -> &[f64] {
        &self.times
    }

    /// Retained values as a contiguous slice.
    pub fn values_slice(&self) -> &[f64] {
        &self.values
    }

    /// True when every retained value is identical (including length 1).
    pub fn is_constant(&self) -> bool {
        match self.values.first() {
            Some(&first) => self.values.iter().all(|&v| v == first),
            None => false,
        }
    }
}
