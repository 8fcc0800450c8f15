//! conditional::covariance — covariance of log spectral accelerations.
//!
//! Purpose
//! -------
//! Assemble the covariance matrix `Σ = D · R · D` over a period grid from
//! per-period logarithmic standard deviations (`D = diag(σ)`) and a
//! correlation service (`R[i, j] = ρ(T_i, T_j)`).
//!
//! Key behaviors
//! -------------
//! - Query the service once per period, stacking the returned rows into `R`.
//! - Reject correlation rows that are the wrong length, non-finite, outside
//!   `[-1, 1]`, lack a unit diagonal, or are not symmetric, all up to
//!   [`CORREL_TOL`].
//! - Symmetrize `R` and pin its diagonal to exactly 1 after validation, so
//!   `Σ` is exactly symmetric with `Σ[i, i] = σ_i²`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `periods` and `stds` have equal length; the caller has validated both
//!   (see `conditional::validation`).
//! - The period order of the result follows `periods` exactly; no sorting
//!   is performed here.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the diagonal/symmetry guarantees, the `D · R · D`
//!   scaling, and each rejection branch using ad-hoc services.
use ndarray::{Array1, Array2};

use crate::{
    conditional::{
        errors::{CSError, CSResult},
        tolerances::CORREL_TOL,
    },
    correlation::PeriodCorrelation,
};

/// build_correlation — validated correlation matrix over a period grid.
///
/// Parameters
/// ----------
/// - `periods`: `&[f64]`
///   Period grid in the order the matrix should be laid out.
/// - `correlation`: `&C`
///   Correlation service queried once per entry of `periods`.
///
/// Returns
/// -------
/// `CSResult<Array2<f64>>`
///   Symmetric `n×n` matrix with a unit diagonal.
///
/// Errors
/// ------
/// - `CSError::LengthMismatch` when a returned row is not `n` long.
/// - `CSError::NonFiniteCorrelation` for NaN/±∞ coefficients.
/// - `CSError::InvalidCorrelation` for coefficients outside `[-1, 1]`, a
///   non-unit diagonal, or an asymmetric pair.
pub fn build_correlation<C: PeriodCorrelation + ?Sized>(
    periods: &[f64], correlation: &C,
) -> CSResult<Array2<f64>> {
    let n = periods.len();
    let mut mat_correl = Array2::<f64>::zeros((n, n));
    for (row, &period_ref) in periods.iter().enumerate() {
        let coeffs = correlation.correl(periods, period_ref);
        if coeffs.len() != n {
            return Err(CSError::LengthMismatch {
                name: "correlation row",
                expected: n,
                actual: coeffs.len(),
            });
        }
        for (col, &value) in coeffs.iter().enumerate() {
            if !value.is_finite() {
                return Err(CSError::NonFiniteCorrelation { row, col, value });
            }
            if value.abs() > 1.0 + CORREL_TOL {
                return Err(CSError::InvalidCorrelation {
                    row,
                    col,
                    value,
                    reason: "coefficients must lie in [-1, 1]",
                });
            }
        }
        mat_correl.row_mut(row).assign(&coeffs);
    }

    for i in 0..n {
        let diag = mat_correl[[i, i]];
        if (diag - 1.0).abs() > CORREL_TOL {
            return Err(CSError::InvalidCorrelation {
                row: i,
                col: i,
                value: diag,
                reason: "diagonal coefficients must equal 1",
            });
        }
        mat_correl[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let (upper, lower) = (mat_correl[[i, j]], mat_correl[[j, i]]);
            if (upper - lower).abs() > CORREL_TOL {
                return Err(CSError::InvalidCorrelation {
                    row: i,
                    col: j,
                    value: upper,
                    reason: "correlation must be symmetric",
                });
            }
            let avg = 0.5 * (upper + lower);
            mat_correl[[i, j]] = avg;
            mat_correl[[j, i]] = avg;
        }
    }
    Ok(mat_correl)
}

/// build_covariance — covariance matrix `D · R · D` over a period grid.
///
/// Parameters
/// ----------
/// - `periods`: `&[f64]`
///   Period grid (typically the grouped grid: conditioning periods first).
/// - `stds`: `&Array1<f64>`
///   Logarithmic standard deviations aligned with `periods`.
/// - `correlation`: `&C`
///   Correlation service.
///
/// Returns
/// -------
/// `CSResult<Array2<f64>>`
///   Symmetric `n×n` covariance with `Σ[i, i] = stds[i]²`.
///
/// Errors
/// ------
/// - `CSError::LengthMismatch` when `stds.len() != periods.len()`.
/// - Any error from [`build_correlation`].
///
/// Notes
/// -----
/// - `D · R · D` is formed element-wise as `σ_i ρ_ij σ_j`, which is the same
///   product without materializing the diagonal matrix.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_gmm::conditional::covariance::build_covariance;
/// # use rust_gmm::correlation::BakerJayaram2008;
/// let periods = [0.2, 1.0];
/// let stds = array![0.6, 0.7];
/// let cov = build_covariance(&periods, &stds, &BakerJayaram2008).unwrap();
/// assert!((cov[[0, 0]] - 0.36).abs() < 1e-12);
/// assert_eq!(cov[[0, 1]], cov[[1, 0]]);
/// ```
pub fn build_covariance<C: PeriodCorrelation + ?Sized>(
    periods: &[f64], stds: &Array1<f64>, correlation: &C,
) -> CSResult<Array2<f64>> {
    if stds.len() != periods.len() {
        return Err(CSError::LengthMismatch {
            name: "stds",
            expected: periods.len(),
            actual: stds.len(),
        });
    }
    let mat_correl = build_correlation(periods, correlation)?;
    let mut mat_covar = mat_correl;
    for ((i, j), value) in mat_covar.indexed_iter_mut() {
        *value *= stds[i] * stds[j];
    }
    Ok(mat_covar)
}
