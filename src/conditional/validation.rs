//! conditional::validation — shared input guards for spectrum computations.
//!
//! Purpose
//! -------
//! Centralize the checks applied before any covariance is built: period
//! grids, aligned mean/standard-deviation vectors, and conditioning masks.
//! Both the vector and the scalar conditional spectrum, and the
//! [`Spectrum`](crate::spectrum::Spectrum) constructor, go through these
//! guards so error semantics stay consistent.
//!
//! Invariants & assumptions
//! ------------------------
//! - Periods are finite, strictly positive, and strictly increasing.
//! - Means are finite; standard deviations are finite and `>= 0`.
//! - A conditioning mask used by the vector solver has at least one
//!   conditioning and at least one free period.
//!
//! Conventions
//! -----------
//! - Guards return on the first violation, reporting the 0-based index of
//!   the offending entry.
//! - Ordering is checked after positivity so that a NaN period is reported
//!   as `NonPositivePeriod` rather than as an ordering violation.
use crate::conditional::{
    conditioning::Conditioning,
    errors::{CSError, CSResult},
};

/// Validate a period grid: non-empty, finite, `> 0`, strictly increasing.
///
/// Errors
/// ------
/// - `CSError::EmptyPeriods` for an empty slice.
/// - `CSError::NonPositivePeriod` for a NaN/±∞ or non-positive entry.
/// - `CSError::Ordering` when `periods[i] >= periods[i + 1]`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_gmm::conditional::validation::validate_periods;
/// # use rust_gmm::conditional::errors::CSError;
/// assert!(validate_periods(&[0.1, 0.2, 1.0]).is_ok());
/// match validate_periods(&[0.5, 0.2, 1.0]) {
///     Err(CSError::Ordering { index: 0, .. }) => (),
///     other => panic!("expected Ordering error, got {other:?}"),
/// }
/// ```
pub fn validate_periods(periods: &[f64]) -> CSResult<()> {
    if periods.is_empty() {
        return Err(CSError::EmptyPeriods);
    }
    for (index, &value) in periods.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(CSError::NonPositivePeriod { index, value });
        }
    }
    for (index, pair) in periods.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(CSError::Ordering { index, prev: pair[0], next: pair[1] });
        }
    }
    Ok(())
}

/// Validate mean and standard-deviation vectors aligned to `n` periods.
///
/// Errors
/// ------
/// - `CSError::LengthMismatch` naming `ln_psas` or `ln_stds`.
/// - `CSError::NonFiniteValue` for a NaN/±∞ entry.
/// - `CSError::NegativeStd` for a standard deviation below zero.
pub fn validate_moments(n: usize, ln_psas: &[f64], ln_stds: &[f64]) -> CSResult<()> {
    if ln_psas.len() != n {
        return Err(CSError::LengthMismatch { name: "ln_psas", expected: n, actual: ln_psas.len() });
    }
    if ln_stds.len() != n {
        return Err(CSError::LengthMismatch { name: "ln_stds", expected: n, actual: ln_stds.len() });
    }
    for (index, &value) in ln_psas.iter().enumerate() {
        if !value.is_finite() {
            return Err(CSError::NonFiniteValue { name: "ln_psas", index, value });
        }
    }
    for (index, &value) in ln_stds.iter().enumerate() {
        if !value.is_finite() {
            return Err(CSError::NonFiniteValue { name: "ln_stds", index, value });
        }
        if value < 0.0 {
            return Err(CSError::NegativeStd { index, value });
        }
    }
    Ok(())
}

/// Validate a conditioning set against `n` periods.
///
/// Errors
/// ------
/// - `CSError::LengthMismatch` naming `mask`.
/// - `CSError::NoConditioningPeriods` when the mask is all `false`.
/// - `CSError::NoFreePeriods` when the mask is all `true`.
pub fn validate_conditioning(n: usize, conditioning: &Conditioning) -> CSResult<()> {
    if conditioning.len() != n {
        return Err(CSError::LengthMismatch {
            name: "mask",
            expected: n,
            actual: conditioning.len(),
        });
    }
    if conditioning.n_conditioning() == 0 {
        return Err(CSError::NoConditioningPeriods);
    }
    if conditioning.n_free() == 0 {
        return Err(CSError::NoFreePeriods);
    }
    Ok(())
}
