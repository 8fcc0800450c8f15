//! conditional::conditioning — explicit mask and targets for conditioning.
//!
//! A [`Conditioning`] pairs a boolean mask (`true` = conditioning period with
//! an observed target) with a target vector of the same length. Targets at
//! free periods are carried but never read, so they may hold any value
//! (including NaN).
use ndarray::Array1;

use crate::conditional::errors::{CSError, CSResult};

/// Conditioning — which periods are observed, and at what level.
///
/// Fields
/// ------
/// - `mask`: `Vec<bool>`
///   `mask[i] == true` marks period `i` as a conditioning period.
/// - `targets`: `Array1<f64>`
///   Natural-log spectral acceleration targets; only read where `mask[i]`.
///
/// Invariants
/// ----------
/// - `mask.len() == targets.len()`.
/// - Targets are finite at every conditioning index.
///
/// Notes
/// -----
/// - Whether the mask leaves at least one conditioning and one free period
///   is checked by the solver, not here, so a `Conditioning` can be reused
///   against different spectra.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditioning {
    mask: Vec<bool>,
    targets: Array1<f64>,
}

impl Conditioning {
    /// Build a conditioning set from a mask and a parallel target vector.
    ///
    /// Errors
    /// ------
    /// - `CSError::LengthMismatch` if `targets.len() != mask.len()`.
    /// - `CSError::NonFiniteTarget` if a masked target is NaN/±∞.
    pub fn new(mask: Vec<bool>, targets: Array1<f64>) -> CSResult<Self> {
        if targets.len() != mask.len() {
            return Err(CSError::LengthMismatch {
                name: "targets",
                expected: mask.len(),
                actual: targets.len(),
            });
        }
        for (index, (&is_cond, &value)) in mask.iter().zip(targets.iter()).enumerate() {
            if is_cond && !value.is_finite() {
                return Err(CSError::NonFiniteTarget { index, value });
            }
        }
        Ok(Conditioning { mask, targets })
    }

    /// Build a conditioning set from optional targets; `Some` marks a
    /// conditioning period.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_gmm::conditional::Conditioning;
    /// let cond = Conditioning::from_targets(&[None, Some(-1.5), None]).unwrap();
    /// assert_eq!(cond.mask(), &[false, true, false]);
    /// assert_eq!(cond.n_conditioning(), 1);
    /// ```
    pub fn from_targets(targets: &[Option<f64>]) -> CSResult<Self> {
        let mask: Vec<bool> = targets.iter().map(Option::is_some).collect();
        let values: Array1<f64> = targets.iter().map(|t| t.unwrap_or(f64::NAN)).collect();
        Conditioning::new(mask, values)
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Number of conditioning periods.
    pub fn n_conditioning(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Number of free (predicted) periods.
    pub fn n_free(&self) -> usize {
        self.mask.len() - self.n_conditioning()
    }
}
