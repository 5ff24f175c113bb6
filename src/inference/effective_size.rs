//! inference::effective_size — autocorrelation-adjusted sample size.
//!
//! Purpose
//! -------
//! Estimate the number of effectively independent observations in a
//! positively autocorrelated series, so that confidence bounds computed
//! downstream are not overconfident.
//!
//! Key behaviors
//! -------------
//! - Bayley–Hammersley style estimator
//!
//!   ```text
//!   n_eff = n / (1 + 2 · Σ_k ρ_k · (1 − k/n)),
//!   ρ_k   = Σ_t y_t · y_{t+k} / (n · var),   y = x − x̄,   var = Σ y² / n,
//!   ```
//!
//!   summed over k = 1, …, ⌊n/2⌋ and truncated at the first negative ρ_k
//!   (that lag is not included).
//! - Result clamped to [2, n].
//! - Degenerate inputs: n < 3 returns n; exactly constant data returns 1.0.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input values are finite; the orchestrator guarantees this through
//!   [`ObservationSeries`](crate::series::ObservationSeries).
//! - Negative autocorrelation never inflates n_eff above n.
//!
//! Conventions
//! -----------
//! - The first-negative-lag truncation is part of the estimator's
//!   definition and must not be replaced by a significance-based cutoff;
//!   downstream tolerance bounds are calibrated against it.

/// Effective sample size of a series.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Finite observations in time order (typically projected values).
///
/// Returns
/// -------
/// `f64`
///   - `n` when `n < 3`,
///   - `1.0` when every value is identical,
///   - otherwise the truncated-sum estimate clamped to `[2, n]`.
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::inference::effective_sample_size;
/// assert_eq!(effective_sample_size(&[4.0; 12]), 1.0);
///
/// // Alternating data has ρ₁ < 0, so the sum is empty and n_eff = n.
/// let alternating: Vec<f64> = (0..30).map(|i| (i % 2) as f64).collect();
/// assert_eq!(effective_sample_size(&alternating), 30.0);
/// ```
pub fn effective_sample_size(data: &[f64]) -> f64 {
    let n = data.len();
    let nf = n as f64;
    if n < 3 {
        return nf;
    }
    if data.iter().all(|&x| x == data[0]) {
        return 1.0;
    }

    let mean = data.iter().sum::<f64>() / nf;
    let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();
    let var = centered.iter().map(|y| y * y).sum::<f64>() / nf;
    if var == 0.0 {
        return 1.0;
    }

    let mut weighted_sum = 0.0;
    for k in 1..=(n / 2) {
        let rho_k = autocorrelation(&centered, k, var);
        if rho_k < 0.0 {
            break;
        }
        weighted_sum += rho_k * (1.0 - k as f64 / nf);
    }

    (nf / (1.0 + 2.0 * weighted_sum)).clamp(2.0, nf)
}

/// Lag-`k` autocorrelation of centered data with population variance `var`.
#[inline]
fn autocorrelation(centered: &[f64], k: usize, var: f64) -> f64 {
    let n = centered.len();
    centered[k..].iter().zip(centered).map(|(a, b)| a * b).sum::<f64>() / (n as f64 * var)
}
