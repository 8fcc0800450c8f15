//! conditional::linalg — eigen-based solves against the conditioning block.
//!
//! Purpose
//! -------
//! Apply the inverse of the (symmetric, positive definite) covariance block
//! of the conditioning periods to one or more right-hand sides. The inverse
//! is never formed explicitly: the block is decomposed as `C = Q Λ Qᵀ` with
//! `nalgebra`'s symmetric eigensolver, and `C⁻¹ B = Q Λ⁻¹ Qᵀ B`.
//!
//! Key behaviors
//! -------------
//! - Copy `ndarray` matrices into `nalgebra::DMatrix` ([`fill_dmatrix`]).
//! - Reject blocks whose eigenvalues fall at or below
//!   `EIGEN_EPS · λ_max` (singular or ill-conditioned, e.g. duplicated
//!   periods, or a zero standard deviation at a conditioning period).
//!
//! Invariants & assumptions
//! ------------------------
//! - The block is square and symmetric; symmetry is guaranteed by the
//!   covariance builder, and this module does not re-symmetrize.
//! - Right-hand sides have as many rows as the block.
//!
//! Testing notes
//! -------------
//! - Unit tests compare against analytic inverses of small matrices and
//!   check the singular-block rejection.
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

use crate::conditional::{
    errors::{CSError, CSResult},
    tolerances::EIGEN_EPS,
};

/// SymmetricSolver — eigendecomposition of a symmetric positive definite block.
///
/// Fields
/// ------
/// - `q`: eigenvectors as columns.
/// - `inv_eigenvalues`: reciprocals of the (validated) eigenvalues.
#[derive(Debug, Clone)]
pub struct SymmetricSolver {
    q: DMatrix<f64>,
    inv_eigenvalues: Vec<f64>,
}

impl SymmetricSolver {
    /// Decompose `block`, rejecting it when it is not safely invertible.
    ///
    /// Errors
    /// ------
    /// - `CSError::SingularConditioningBlock` when the smallest eigenvalue is
    ///   not above `EIGEN_EPS · λ_max`, when `λ_max <= 0`, or when the
    ///   decomposition produced non-finite eigenvalues.
    pub fn new(block: ArrayView2<'_, f64>) -> CSResult<Self> {
        let mut block_nalg = DMatrix::<f64>::zeros(block.nrows(), block.ncols());
        fill_dmatrix(block, &mut block_nalg);
        let eigen_decomp = block_nalg.symmetric_eigen();
        let eigenvals = eigen_decomp.eigenvalues;

        let min_eigen = eigenvals.iter().copied().fold(f64::INFINITY, f64::min);
        let max_eigen = eigenvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min_eigen.is_finite() || !max_eigen.is_finite() || max_eigen <= 0.0 {
            return Err(CSError::SingularConditioningBlock { min_eigen, max_eigen });
        }
        if min_eigen <= EIGEN_EPS * max_eigen {
            return Err(CSError::SingularConditioningBlock { min_eigen, max_eigen });
        }

        Ok(SymmetricSolver {
            q: eigen_decomp.eigenvectors,
            inv_eigenvalues: eigenvals.iter().map(|lambda| 1.0 / lambda).collect(),
        })
    }

    /// Compute `C⁻¹ · rhs`.
    ///
    /// Panics
    /// ------
    /// - If `rhs.nrows()` differs from the block dimension; the solver only
    ///   calls this with conformable partitions.
    pub fn solve(&self, rhs: ArrayView2<'_, f64>) -> Array2<f64> {
        let n = self.inv_eigenvalues.len();
        let mut rhs_nalg = DMatrix::<f64>::zeros(rhs.nrows(), rhs.ncols());
        fill_dmatrix(rhs, &mut rhs_nalg);

        // Qᵀ B, scaled row-wise by Λ⁻¹, then mapped back by Q.
        let mut projected = self.q.transpose() * rhs_nalg;
        for k in 0..n {
            let scale = self.inv_eigenvalues[k];
            projected.row_mut(k).iter_mut().for_each(|v| *v *= scale);
        }
        let solved = &self.q * projected;

        Array2::from_shape_fn((solved.nrows(), solved.ncols()), |(i, j)| solved[(i, j)])
    }
}

/// fill_dmatrix — copy an `ndarray` view into a preallocated `DMatrix`.
///
/// The copy proceeds column by column, matching `DMatrix`'s column-major
/// storage. Shapes must agree; a mismatch is a programming error and panics
/// through out-of-bounds indexing.
fn fill_dmatrix(src: ArrayView2<'_, f64>, dst: &mut DMatrix<f64>) {
    for j in 0..src.ncols() {
        for i in 0..src.nrows() {
            dst[(i, j)] = src[[i, j]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact copying by `fill_dmatrix`.
    // - `SymmetricSolver::solve` against an analytic 2×2 inverse.
    // - Rejection of singular blocks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `fill_dmatrix` copies a non-square view without change.
    //
    // Given
    // -----
    // - A 2×3 array with distinct entries.
    //
    // Expect
    // ------
    // - Identical entries in the `DMatrix`.
    fn fill_dmatrix_copies_every_entry() {
        // Arrange
        let src = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let mut dst = DMatrix::<f64>::zeros(2, 3);

        // Act
        fill_dmatrix(src.view(), &mut dst);

        // Assert
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(dst[(i, j)], src[[i, j]]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check `C⁻¹ B` against the analytic inverse of a 2×2 SPD matrix.
    //
    // Given
    // -----
    // - C = [[4, 1], [1, 3]], so C⁻¹ = [[3, -1], [-1, 4]] / 11.
    // - B = I₂.
    //
    // Expect
    // ------
    // - `solve(B)` equals C⁻¹ to 1e-12.
    fn solve_matches_analytic_inverse() {
        // Arrange
        let block = array![[4.0, 1.0], [1.0, 3.0]];
        let identity = array![[1.0, 0.0], [0.0, 1.0]];
        let expected = array![[3.0, -1.0], [-1.0, 4.0]] / 11.0;

        // Act
        let solver = SymmetricSolver::new(block.view()).unwrap();
        let inv = solver.solve(identity.view());

        // Assert
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!(inv[[i, j]], expected[[i, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a rank-deficient block is rejected.
    //
    // Given
    // -----
    // - C = [[1, 1], [1, 1]] (two perfectly correlated, equal-variance
    //   periods).
    //
    // Expect
    // ------
    // - `CSError::SingularConditioningBlock`.
    fn new_rejects_singular_block() {
        // Arrange
        let block = array![[1.0, 1.0], [1.0, 1.0]];

        // Act
        let result = SymmetricSolver::new(block.view());

        // Assert
        assert!(matches!(result, Err(CSError::SingularConditioningBlock { .. })));
    }
}
