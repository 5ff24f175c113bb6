//! regression::bootstrap — moving-block bootstrap for paired series.
//!
//! Purpose
//! -------
//! Generate resamples of a (value, time) series that preserve short-range
//! autocorrelation by drawing contiguous blocks instead of single points.
//! Used to build the sampling distribution of a quantile-regression
//! prediction.
//!
//! Key behaviors
//! -------------
//! - Default block length `max(2, round(n^(1/3)))`, raised to a seasonal
//!   period hint when one is given, and never above n.
//! - Each resample draws block starts uniformly from `[0, n − block]`,
//!   concatenates blocks until at least n indices are collected and
//!   truncates to exactly n. Values and times are gathered with the same
//!   indices so pairs stay together.
//! - [`BlockBootstrap`] is a lazy, finite iterator. Resample `i` is drawn
//!   from its own `Xoshiro256PlusPlus` seeded by
//!   [`counter_rng_seed`]`(seed, i)`, so any resample can be regenerated in
//!   isolation and results do not depend on iteration order or threading.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ block_length ≤ n` and `n ≥ 1` for every sampler.
//! - A fixed seed reproduces the exact sequence of resamples.

use crate::regression::errors::{RegressionError, RegressionResult};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Block length for a series of `n` observations.
///
/// `max(2, round(n^(1/3)))`, then `max(·, seasonal_period)`, capped at `n`
/// (and at least 1 for non-empty input).
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::regression::default_block_length;
/// assert_eq!(default_block_length(100, None), 5);
/// assert_eq!(default_block_length(100, Some(12)), 12);
/// assert_eq!(default_block_length(8, None), 2);
/// ```
pub fn default_block_length(n: usize, seasonal_period: Option<usize>) -> usize {
    let base = ((n as f64).cbrt().round() as usize).max(2);
    let with_season = seasonal_period.map_or(base, |s| base.max(s));
    with_season.min(n).max(1)
}

/// Derive a well-mixed per-iteration seed from a base seed and a counter.
///
/// SplitMix64 finalizer over `seed + (counter + 1)·φ`, where φ is the
/// 64-bit golden-ratio increment.
#[inline]
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed.wrapping_add(counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fill `out` with `n` block-bootstrap indices.
pub fn resample_indices_into<R: Rng + ?Sized>(
    n: usize, block_length: usize, rng: &mut R, out: &mut Vec<usize>,
) {
    out.clear();
    if n == 0 || block_length == 0 {
        return;
    }
    let block_length = block_length.min(n);
    let max_start = n - block_length;
    while out.len() < n {
        let start = rng.gen_range(0..=max_start);
        out.extend(start..start + block_length);
    }
    out.truncate(n);
}

/// Block-bootstrap indices for a series of length `n`.
pub fn resample_indices<R: Rng + ?Sized>(n: usize, block_length: usize, rng: &mut R) -> Vec<usize> {
    let mut out = Vec::with_capacity(n + block_length);
    resample_indices_into(n, block_length, rng, &mut out);
    out
}

/// One resampled series with values and times kept paired.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapSample {
    pub values: Vec<f64>,
    pub times: Vec<f64>,
}

/// BlockBootstrap — lazy sequence of paired block-bootstrap resamples.
///
/// Fields
/// ------
/// - `values`, `times`: borrowed original series (equal length).
/// - `block_length`: contiguous block size.
/// - `n_boot`: number of resamples the iterator yields.
/// - `seed`: base seed for the counter-based per-iteration RNG.
///
/// Performance
/// -----------
/// - Each resample allocates two vectors of length n; nothing is
///   precomputed, so memory stays O(n) regardless of `n_boot`.
#[derive(Debug, Clone)]
pub struct BlockBootstrap<'a> {
    values: &'a [f64],
    times: &'a [f64],
    block_length: usize,
    n_boot: usize,
    seed: u64,
    next: usize,
}

impl<'a> BlockBootstrap<'a> {
    /// Construct a sampler over a paired series.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::LengthMismatch` when slices differ in length.
    /// - `RegressionError::InsufficientData` for an empty series.
    /// - `RegressionError::InvalidBlockLength` unless `1 ≤ block ≤ n`.
    pub fn new(
        values: &'a [f64], times: &'a [f64], block_length: usize, n_boot: usize, seed: u64,
    ) -> RegressionResult<Self> {
        if values.len() != times.len() {
            return Err(RegressionError::LengthMismatch { x: times.len(), y: values.len() });
        }
        let n = values.len();
        if n == 0 {
            return Err(RegressionError::InsufficientData { n, required: 1 });
        }
        if block_length == 0 || block_length > n {
            return Err(RegressionError::InvalidBlockLength { block_length, n });
        }
        Ok(BlockBootstrap { values, times, block_length, n_boot, seed, next: 0 })
    }

    pub fn block_length(&self) -> usize {
        self.block_length
    }

    pub fn n_boot(&self) -> usize {
        self.n_boot
    }

    /// Regenerate resample `i` independently of iteration state.
    pub fn sample(&self, i: usize) -> BootstrapSample {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(self.seed, i as u64));
        let idx = resample_indices(self.values.len(), self.block_length, &mut rng);
        BootstrapSample {
            values: idx.iter().map(|&k| self.values[k]).collect(),
            times: idx.iter().map(|&k| self.times[k]).collect(),
        }
    }
}

impl Iterator for BlockBootstrap<'_> {
    type Item = BootstrapSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.n_boot {
            return None;
        }
        let sample = self.sample(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_boot - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BlockBootstrap<'_> {}
