//! regression::quantile — linear quantile regression by IRLS.
//!
//! Purpose
//! -------
//! Fit `y ≈ intercept + slope · x` at quantile `q` by minimizing the
//! check loss `Σ ρ_q(y_i − intercept − slope·x_i)`, where
//! `ρ_q(r) = q·r` for `r ≥ 0` and `(q − 1)·r` otherwise.
//!
//! Key behaviors
//! -------------
//! - Iteratively reweighted least squares: start from unit weights (OLS),
//!   then weight each observation by `1 / |scaled residual|`, where the
//!   residual is scaled by `(1 − q)` above the line and `q` below it.
//!   Residuals smaller than `residual_floor` in magnitude are floored to
//!   keep weights finite.
//! - Each step solves the 2×2 weighted normal equations with a symmetric
//!   eigendecomposition (`nalgebra::Matrix2`). Near-zero relative
//!   eigenvalues signal a singular design, e.g. when all `x` coincide.
//! - Iteration stops once the largest coefficient change is at most
//!   `p_tol`; reaching `max_iter` first is a [`RegressionError::NonConvergence`].
//! - The regressor is centered internally for conditioning; the returned
//!   intercept refers to the caller's `x` origin.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` and `y` have equal length ≥ 2 and contain only finite values.
//! - `q ∈ (0, 1)`.

use crate::regression::errors::{RegressionError, RegressionResult};
use nalgebra::{Matrix2, Vector2};

/// Relative eigenvalue cutoff below which the weighted design is singular.
const EIGEN_REL_EPS: f64 = 1e-12;

/// IrlsOptions — stopping rule and residual floor for the IRLS fit.
///
/// Fields
/// ------
/// - `max_iter`: iteration cap (default 1000).
/// - `p_tol`: tolerance on the max absolute coefficient change (default 1e-6).
/// - `residual_floor`: minimum residual magnitude used in weights
///   (default 1e-6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrlsOptions {
    pub max_iter: usize,
    pub p_tol: f64,
    pub residual_floor: f64,
}

impl Default for IrlsOptions {
    fn default() -> Self {
        IrlsOptions { max_iter: 1000, p_tol: 1e-6, residual_floor: 1e-6 }
    }
}

/// QuantileLine — fitted quantile regression line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileLine {
    pub intercept: f64,
    pub slope: f64,
    pub iterations: usize,
}

impl QuantileLine {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a linear quantile regression of `y` on `x`.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   Regressor (for compliance work, days since the first sample).
/// - `y`: `&[f64]`
///   Response, same length as `x`.
/// - `q`: `f64`
///   Target quantile in (0, 1).
/// - `opts`: `&IrlsOptions`
///   Stopping rule and residual floor.
///
/// Returns
/// -------
/// `RegressionResult<QuantileLine>`
///
/// Errors
/// ------
/// - `RegressionError::InvalidQuantile` unless `0 < q < 1`.
/// - `RegressionError::LengthMismatch`, `InsufficientData` (n < 2),
///   `NonFiniteInput` for malformed input.
/// - `RegressionError::SingularDesign` when the weighted normal equations
///   lose rank.
/// - `RegressionError::NonFiniteFit` if coefficients become non-finite.
/// - `RegressionError::NonConvergence` when `max_iter` is reached.
pub fn fit_quantile_line(
    x: &[f64], y: &[f64], q: f64, opts: &IrlsOptions,
) -> RegressionResult<QuantileLine> {
    if !(q > 0.0 && q < 1.0) {
        return Err(RegressionError::InvalidQuantile(q));
    }
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch { x: x.len(), y: y.len() });
    }
    let n = x.len();
    if n < 2 {
        return Err(RegressionError::InsufficientData { n, required: 2 });
    }
    if let Some((index, &value)) =
        x.iter().chain(y.iter()).enumerate().find(|(_, v)| !v.is_finite())
    {
        return Err(RegressionError::NonFiniteInput { index: index % n, value });
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let xc: Vec<f64> = x.iter().map(|&xi| xi - x_mean).collect();

    let mut weights = vec![1.0_f64; n];
    let mut beta = Vector2::new(1.0, 1.0);
    let mut diff = 10.0_f64;
    let mut iteration = 0;

    while iteration < opts.max_iter && diff > opts.p_tol {
        iteration += 1;
        let beta_prev = beta;
        beta = solve_weighted(&xc, y, &weights, iteration)?;

        for i in 0..n {
            let mut r = y[i] - beta[0] - beta[1] * xc[i];
            if r.abs() < opts.residual_floor {
                r = if r < 0.0 { -opts.residual_floor } else { opts.residual_floor };
            }
            let scaled = if r < 0.0 { q * r } else { (1.0 - q) * r };
            weights[i] = 1.0 / scaled.abs();
        }
        diff = (beta - beta_prev).amax();
    }

    if diff > opts.p_tol {
        return Err(RegressionError::NonConvergence { iterations: iteration, diff });
    }

    Ok(QuantileLine { intercept: beta[0] - beta[1] * x_mean, slope: beta[1], iterations: iteration })
}

/// Solve `(Xᵀ W X) β = Xᵀ W y` for a design with columns `[1, x]`.
fn solve_weighted(
    x: &[f64], y: &[f64], w: &[f64], iteration: usize,
) -> RegressionResult<Vector2<f64>> {
    let (mut s0, mut s1, mut s2, mut r0, mut r1) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for ((&xi, &yi), &wi) in x.iter().zip(y).zip(w) {
        s0 += wi;
        s1 += wi * xi;
        s2 += wi * xi * xi;
        r0 += wi * yi;
        r1 += wi * xi * yi;
    }
    let xtwx = Matrix2::new(s0, s1, s1, s2);
    let xtwy = Vector2::new(r0, r1);
    if !xtwx.iter().chain(xtwy.iter()).all(|v| v.is_finite()) {
        return Err(RegressionError::NonFiniteFit { iteration });
    }

    let eigen = xtwx.symmetric_eigen();
    let lambda_max = eigen.eigenvalues.amax();
    if !(lambda_max > 0.0) || eigen.eigenvalues.min() <= EIGEN_REL_EPS * lambda_max {
        return Err(RegressionError::SingularDesign { iteration });
    }

    let q = eigen.eigenvectors;
    let projected = q.transpose() * xtwy;
    let scaled = Vector2::new(projected[0] / eigen.eigenvalues[0], projected[1] / eigen.eigenvalues[1]);
    let beta = q * scaled;
    if !beta.iter().all(|v| v.is_finite()) {
        return Err(RegressionError::NonFiniteFit { iteration });
    }
    Ok(beta)
}
