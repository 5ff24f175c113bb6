//! series — validated measurement series and time-axis metadata.
//!
//! Purpose
//! -------
//! Hold the data model shared by every estimator in the crate: the cleaned
//! [`ObservationSeries`], the [`TimeUnit`] of its timestamps and the
//! [`ReferenceTime`] selector used for projection and prediction.
//!
//! Key behaviors
//! -------------
//! - Missing values are dropped and rows sorted by time once, at
//!   construction, so downstream modules can assume clean ordered input.
//! - Reference-time aliases are resolved to a concrete timestamp by
//!   [`ReferenceTime::resolve`] and never re-interpreted afterwards.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_compliance::series::{ObservationSeries, ReferenceTime, TimeUnit};
//!
//! let s = ObservationSeries::new(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], TimeUnit::Days)?;
//! let t_ref = ReferenceTime::End.resolve(s.times_slice())?;
//! assert_eq!(t_ref, 2.0);
//! # Ok::<(), rust_compliance::series::SeriesError>(())
//! ```

pub mod data;
pub mod errors;
pub mod reference;
pub mod units;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::ObservationSeries;
pub use self::errors::{SeriesError, SeriesResult};
pub use self::reference::ReferenceTime;
pub use self::units::{DAYS_PER_YEAR, SECONDS_PER_DAY, TimeUnit};

pub mod prelude {
    pub use super::data::ObservationSeries;
    pub use super::errors::{SeriesError, SeriesResult};
    pub use super::reference::ReferenceTime;
    pub use super::units::TimeUnit;
}
