//! Numerical tolerances shared by the conditional spectrum routines.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: relative eigenvalue floor for the conditioning block.
//! - [`CORREL_TOL`]: slack allowed on correlation diagonals, bounds, and
//!   symmetry before a service is rejected.
//! - [`SCHUR_TOL`]: relative slack below zero tolerated on conditional
//!   variances before they are treated as a numerical failure.

/// Relative eigenvalue floor for inverting the conditioning block.
///
/// The block is rejected when `λ_min <= EIGEN_EPS · λ_max`, i.e. when its
/// condition number exceeds `1 / EIGEN_EPS`.
pub const EIGEN_EPS: f64 = 1e-12;

/// Absolute tolerance on correlation coefficients.
///
/// Diagonal entries must satisfy `|ρ_ii − 1| <= CORREL_TOL`, off-diagonal
/// entries `|ρ_ij| <= 1 + CORREL_TOL` and `|ρ_ij − ρ_ji| <= CORREL_TOL`.
pub const CORREL_TOL: f64 = 1e-8;

/// Relative tolerance on negative Schur-complement diagonals.
///
/// A conditional variance `v < 0` with `|v| <= SCHUR_TOL · C22[i, i]` is
/// rounding and is clamped to zero.
pub const SCHUR_TOL: f64 = 1e-8;
