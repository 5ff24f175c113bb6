//! series::reference — the time point estimates are projected to.
//!
//! Purpose
//! -------
//! Represent the reference time for trend projection and quantile-regression
//! prediction as a closed set of variants, and resolve it against a series
//! exactly once per computation.
//!
//! Key behaviors
//! -------------
//! - [`ReferenceTime::Start`], [`ReferenceTime::Middle`] and
//!   [`ReferenceTime::End`] resolve to the minimum timestamp, the midpoint
//!   of the observed range and the maximum timestamp respectively.
//! - [`ReferenceTime::At`] carries an explicit timestamp in the series' own
//!   unit; it may lie outside the observed range.
//! - `FromStr` accepts the aliases `start`, `middle`/`center`,
//!   `end`/`max`/`current` (case-insensitive) and plain numeric strings.
//!
//! Conventions
//! -----------
//! - The resolved value is a plain `f64` in the same unit as the series
//!   timestamps. Downstream modules receive that number, never the alias.

use std::str::FromStr;

use crate::series::errors::{SeriesError, SeriesResult};

/// Reference time selector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReferenceTime {
    /// Earliest observed timestamp.
    Start,
    /// Midpoint between the earliest and latest timestamps.
    Middle,
    /// Latest observed timestamp.
    #[default]
    End,
    /// Explicit timestamp in the series' time unit.
    At(f64),
}

impl ReferenceTime {
    /// Resolve the selector against a set of timestamps.
    ///
    /// Parameters
    /// ----------
    /// - `times`: `&[f64]`
    ///   Finite timestamps in any order.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<f64>`
    ///   The concrete reference timestamp.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::EmptySeries` when `times` is empty and the selector
    ///   depends on the data.
    /// - `SeriesError::NonFiniteReferenceTime` when `At(t)` carries a
    ///   non-finite `t`.
    pub fn resolve(&self, times: &[f64]) -> SeriesResult<f64> {
        if let ReferenceTime::At(t) = *self {
            return if t.is_finite() { Ok(t) } else { Err(SeriesError::NonFiniteReferenceTime(t)) };
        }

        if times.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        let (min, max) = times
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)));

        Ok(match self {
            ReferenceTime::Start => min,
            ReferenceTime::Middle => min + (max - min) / 2.0,
            _ => max,
        })
    }
}

impl FromStr for ReferenceTime {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "start" | "min" => Ok(ReferenceTime::Start),
            "middle" | "center" | "centre" => Ok(ReferenceTime::Middle),
            "end" | "max" | "current" => Ok(ReferenceTime::End),
            other => match other.parse::<f64>() {
                Ok(t) if t.is_finite() => Ok(ReferenceTime::At(t)),
                _ => Err(SeriesError::UnknownReferenceTime(s.to_string())),
            },
        }
    }
}
