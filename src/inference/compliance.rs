//! inference::compliance — score-test probability of compliance.
//!
//! Given the observed rank of a regulatory limit within the (projected)
//! sample and the regulatory target percentile, estimate the probability
//! that the true proportion of values at or below the limit is at least
//! the target. This is the score-test counterpart of the Wilson interval:
//!
//! ```text
//! var = p_null · (1 − p_null) / n_eff,
//! z   = (p_obs − p_null) / √var,
//! P   = Φ(z).
//! ```

use statrs::distribution::{ContinuousCDF, Normal};

/// Probability of compliance from the score test.
///
/// Parameters
/// ----------
/// - `p_obs`: `f64`
///   Observed rank of the limit (0 below all data, 1 above all data).
/// - `p_null`: `f64`
///   Regulatory target percentile.
/// - `n_eff`: `f64`
///   Effective sample size.
///
/// Returns
/// -------
/// `f64` in [0, 1]
///   - `0.0` when `n_eff ≤ 0` (or NaN),
///   - `1.0`/`0.0` when the null variance is zero (`p_null` at 0 or 1),
///     according to whether `p_obs ≥ p_null`,
///   - otherwise Φ(z).
///
/// Examples
/// --------
/// ```rust
/// # use rust_compliance::inference::compliance_probability;
/// assert_eq!(compliance_probability(0.95, 0.95, 40.0), 0.5);
/// assert!(compliance_probability(1.0, 0.95, 100.0) > 0.99);
/// assert_eq!(compliance_probability(0.99, 0.95, 0.0), 0.0);
/// ```
pub fn compliance_probability(p_obs: f64, p_null: f64, n_eff: f64) -> f64 {
    if !(n_eff > 0.0) {
        return 0.0;
    }

    let variance = p_null * (1.0 - p_null) / n_eff;
    if !(variance > 0.0) {
        return if p_obs >= p_null { 1.0 } else { 0.0 };
    }

    let z = (p_obs - p_null) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    normal.cdf(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Verify the score-test value against a hand computation.
    //
    // Given
    // -----
    // - p_obs = 0.98, p_null = 0.95, n_eff = 50.
    //   var = 0.95·0.05/50 = 0.00095, z = 0.03/0.0308221 ≈ 0.97333.
    //
    // Expect
    // ------
    // - Φ(0.97333) ≈ 0.83481.
    fn compliance_probability_matches_hand_computation() {
        let p = compliance_probability(0.98, 0.95, 50.0);

        assert_relative_eq!(p, 0.83481, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Check the extreme observed ranks and degenerate guards.
    //
    // Given
    // -----
    // - p_obs ∈ {0, 1} with p_null = 0.95, n_eff = 60; n_eff = −1;
    //   p_null = 1.
    //
    // Expect
    // ------
    // - p_obs = 1 → > 0.9; p_obs = 0 → < 0.01; n_eff ≤ 0 → 0;
    //   p_null = 1 → step at p_obs = 1.
    fn compliance_probability_extremes_and_guards() {
        assert!(compliance_probability(1.0, 0.95, 60.0) > 0.9);
        assert!(compliance_probability(0.0, 0.95, 60.0) < 0.01);
        assert_eq!(compliance_probability(0.99, 0.95, -1.0), 0.0);
        assert_eq!(compliance_probability(1.0, 1.0, 10.0), 1.0);
        assert_eq!(compliance_probability(0.99, 1.0, 10.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the probability increases with the observed rank.
    //
    // Given
    // -----
    // - p_obs from 0.80 to 1.00 in steps of 0.01, p_null = 0.9,
    //   n_eff = 30.
    //
    // Expect
    // ------
    // - Strictly increasing probabilities.
    fn compliance_probability_is_increasing_in_observed_rank() {
        let probs: Vec<f64> =
            (80..=100).map(|k| compliance_probability(k as f64 / 100.0, 0.9, 30.0)).collect();

        assert!(probs.windows(2).all(|w| w[1] > w[0]));
    }
}
