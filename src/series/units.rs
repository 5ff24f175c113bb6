//! Time units for observation timestamps.
//!
//! - [`TimeUnit`] declares the granularity of the timestamp axis
//!   (seconds or days) and the conversion factors derived from it.
//!
//! Notes
//! -----
//! - `TimeUnit` is metadata only; it does not rescale stored timestamps.
//! - A year is taken as 365.25 days throughout the crate.

use std::str::FromStr;

use crate::series::errors::SeriesError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one (Julian) year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Units of measurement for observation timestamps.
///
/// This sets the scale used to report slopes per year and to express the
/// quantile-regression time axis in days. It does **not** rescale values
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    /// Seconds (e.g. Unix epoch timestamps).
    #[default]
    Seconds,
    /// Days (e.g. day offsets or fractional day counts).
    Days,
}

impl TimeUnit {
    /// Number of timestamp units in one year.
    pub fn per_year(self) -> f64 {
        match self {
            TimeUnit::Seconds => SECONDS_PER_DAY * DAYS_PER_YEAR,
            TimeUnit::Days => DAYS_PER_YEAR,
        }
    }

    /// Multiplier converting one timestamp unit into days.
    pub fn to_days(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0 / SECONDS_PER_DAY,
            TimeUnit::Days => 1.0,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "second" | "s" => Ok(TimeUnit::Seconds),
            "days" | "day" | "d" => Ok(TimeUnit::Days),
            other => Err(SeriesError::UnknownTimeUnit(other.to_string())),
        }
    }
}
