//! trend — projection of trending series to a reference time.
//!
//! Re-exports [`Projection`], [`project_to_reference`] and
//! [`project_to_time`]. Errors are the trend-test errors from
//! [`crate::statistical_tests`].

pub mod projection;

pub use self::projection::{Projection, project_to_reference, project_to_time};
