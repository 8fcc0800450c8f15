//! conditional::solver — conditional mean spectrum vector (CMSV).
//!
//! Purpose
//! -------
//! Condition a lognormal response spectrum on target spectral accelerations
//! at several periods simultaneously (Kishida, 2017), generalizing the
//! single-period conditional mean spectrum of Baker (2011).
//!
//! Key behaviors
//! -------------
//! - Regroup the grid as [conditioning | free], build the covariance
//!   `Σ = D · R · D` over it, and partition
//!
//!   ```text
//!   Σ = | C11  C12 |   C11: conditioning × conditioning
//!       | C21  C22 |   C22: free × free,  C21 = C12ᵀ
//!   ```
//!
//! - Apply the multivariate Gaussian conditioning identity, inverting the
//!   block of the *known* (conditioning) periods:
//!
//!   ```text
//!   μ_free|cond = μ_free + C21 · C11⁻¹ · (target − μ_cond)
//!   Σ_free|cond = C22 − C21 · C11⁻¹ · C12
//!   ```
//!
//! - Report the targets (with zero standard deviation) at conditioning
//!   periods and the conditional moments elsewhere, in the caller's period
//!   order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input periods are strictly increasing; restoration relies on it.
//! - At every conditioning index the output mean is the target, bit for
//!   bit, and the output standard deviation is exactly `0.0`.
//! - Conditional standard deviations never exceed their unconditioned
//!   counterparts (up to rounding), since the Schur complement subtracts a
//!   positive semi-definite term.
//!
//! Conventions
//! -----------
//! - The inverse of `C11` is applied through a symmetric eigendecomposition
//!   (see `conditional::linalg`), never formed explicitly.
//! - Negative Schur diagonals within `SCHUR_TOL · C22[i, i]` are rounding
//!   and are clamped to zero with a `tracing` warning.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the five-period reference scenario, exact
//!   reproduction of targets, variance reduction, bivariate closed forms,
//!   idempotence, permutation equivariance, and every error path.
use ndarray::{Array1, Axis, s};
use tracing::{debug, warn};

use crate::{
    conditional::{
        conditioning::Conditioning,
        covariance::build_covariance,
        errors::{CSError, CSResult},
        linalg::SymmetricSolver,
        reconcile::{argsort_periods, gather, group_indices, restore},
        tolerances::SCHUR_TOL,
        validation::{validate_conditioning, validate_moments, validate_periods},
    },
    correlation::PeriodCorrelation,
    spectrum::Spectrum,
};

/// CondSpectrum — conditional spectrum aligned to the input periods.
///
/// Fields
/// ------
/// - `spectrum`: [`Spectrum`]
///   Conditional `ln_mean` (`ln_psas_cmsv`) and `ln_std` (`ln_stds_cmsv`)
///   over the caller's period grid, in the caller's order.
/// - `mask`: `Vec<bool>`
///   The conditioning mask that produced it.
///
/// Invariants
/// ----------
/// - Where `mask[i]`, `ln_psas()[i]` equals the target and `ln_stds()[i]`
///   is `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondSpectrum {
    spectrum: Spectrum,
    mask: Vec<bool>,
}

impl CondSpectrum {
    pub(crate) fn new(spectrum: Spectrum, mask: Vec<bool>) -> Self {
        CondSpectrum { spectrum, mask }
    }

    pub fn periods(&self) -> &Array1<f64> {
        self.spectrum.periods()
    }

    /// Conditional natural-log spectral accelerations.
    pub fn ln_psas(&self) -> &Array1<f64> {
        self.spectrum.ln_mean()
    }

    /// Conditional logarithmic standard deviations.
    pub fn ln_stds(&self) -> &Array1<f64> {
        self.spectrum.ln_std()
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// The conditional spectrum as a plain [`Spectrum`].
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Fractile of the conditional distribution; see [`Spectrum::fractile`].
    pub fn fractile(&self, prob: f64) -> CSResult<Array1<f64>> {
        self.spectrum.fractile(prob)
    }

    /// Split into `(ln_psas_cmsv, ln_stds_cmsv)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        let (_, ln_psas, ln_stds) = self.spectrum.into_parts();
        (ln_psas, ln_stds)
    }
}

/// calc_cond_mean_spectrum_vector — condition a spectrum on several periods.
///
/// Parameters
/// ----------
/// - `periods`: `&[f64]`
///   Strictly increasing, positive spectral periods (s).
/// - `ln_psas`: `&[f64]`
///   Unconditioned natural-log spectral accelerations, same length.
/// - `ln_stds`: `&[f64]`
///   Unconditioned logarithmic standard deviations (`>= 0`), same length.
/// - `conditioning`: `&Conditioning`
///   Mask (`true` = conditioning) and targets, same length. At least one
///   period must be conditioning and at least one free.
/// - `correlation`: `&C`
///   Inter-period correlation service.
///
/// Returns
/// -------
/// `CSResult<CondSpectrum>`
///   Conditional means and standard deviations in the order of `periods`.
///
/// Errors
/// ------
/// - `CSError::Ordering` when `periods` is not strictly increasing.
/// - `CSError::NoConditioningPeriods` / `CSError::NoFreePeriods` for a
///   degenerate mask.
/// - `CSError::SingularConditioningBlock` when `C11` cannot be inverted
///   (e.g. a zero standard deviation at a conditioning period).
/// - `CSError::NegativeConditionalVariance` / `CSError::NonFiniteResult`
///   when the conditional moments break down numerically.
/// - Input errors from validation and correlation errors from the
///   covariance builder.
///
/// Panics
/// ------
/// - Never panics on user input; all failures are reported as `CSError`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_gmm::conditional::{Conditioning, calc_cond_mean_spectrum_vector};
/// # use rust_gmm::correlation::BakerJayaram2008;
/// let periods = [0.1, 0.2, 0.5, 1.0, 2.0];
/// let ln_psas = [-1.0, -1.2, -1.8, -2.3, -3.0];
/// let ln_stds = [0.6, 0.6, 0.65, 0.7, 0.75];
/// let cond = Conditioning::from_targets(&[None, None, Some(-1.5), None, None]).unwrap();
///
/// let cs = calc_cond_mean_spectrum_vector(&periods, &ln_psas, &ln_stds, &cond, &BakerJayaram2008)
///     .unwrap();
/// assert_eq!(cs.ln_psas()[2], -1.5);
/// assert_eq!(cs.ln_stds()[2], 0.0);
/// assert!(cs.ln_stds()[0] < 0.6);
/// ```
pub fn calc_cond_mean_spectrum_vector<C: PeriodCorrelation + ?Sized>(
    periods: &[f64], ln_psas: &[f64], ln_stds: &[f64], conditioning: &Conditioning,
    correlation: &C,
) -> CSResult<CondSpectrum> {
    validate_periods(periods)?;
    let n_periods = periods.len();
    validate_moments(n_periods, ln_psas, ln_stds)?;
    validate_conditioning(n_periods, conditioning)?;

    let n = conditioning.n_conditioning();
    debug!(n_periods, n_conditioning = n, "conditioning spectrum on period vector");

    // Group the periods: conditioning first, then free.
    let grouped = group_indices(conditioning.mask());
    let periods_grouped: Vec<f64> = grouped.iter().map(|&i| periods[i]).collect();
    let ln_psas_grouped = gather(ln_psas, &grouped);
    let ln_stds_grouped = gather(ln_stds, &grouped);
    let targets: Array1<f64> = grouped[..n].iter().map(|&i| conditioning.targets()[i]).collect();

    let mat_covar = build_covariance(&periods_grouped, &ln_stds_grouped, correlation)?;
    let c11 = mat_covar.slice(s![..n, ..n]);
    let c12 = mat_covar.slice(s![..n, n..]);
    let c21 = mat_covar.slice(s![n.., ..n]);
    let c22 = mat_covar.slice(s![n.., n..]);

    let c11_solver = SymmetricSolver::new(c11)?;

    // Conditional mean of the free periods.
    let resids = (&targets - &ln_psas_grouped.slice(s![..n])).insert_axis(Axis(1));
    let weights = c11_solver.solve(resids.view());
    let shift = c21.dot(&weights);
    let ln_psas_free = &ln_psas_grouped.slice(s![n..]) + &shift.column(0);

    // Conditional variance of the free periods (Schur complement diagonal).
    let c11_inv_c12 = c11_solver.solve(c12);
    let schur = &c22 - &c21.dot(&c11_inv_c12);
    let mut ln_stds_free = Array1::<f64>::zeros(n_periods - n);
    for (k, std) in ln_stds_free.iter_mut().enumerate() {
        let var = schur[[k, k]];
        let index = grouped[n + k];
        if var < 0.0 {
            if -var > SCHUR_TOL * c22[[k, k]] {
                return Err(CSError::NegativeConditionalVariance { index, value: var });
            }
            warn!(index, var, "clamping negative conditional variance to zero");
        }
        *std = var.max(0.0).sqrt();
    }

    let ln_psas_cmsv_grouped: Array1<f64> =
        targets.iter().chain(ln_psas_free.iter()).copied().collect();
    let ln_stds_cmsv_grouped: Array1<f64> =
        std::iter::repeat_n(0.0, n).chain(ln_stds_free.iter().copied()).collect();
    for (k, (mean, std)) in
        ln_psas_cmsv_grouped.iter().zip(ln_stds_cmsv_grouped.iter()).enumerate()
    {
        if !mean.is_finite() || !std.is_finite() {
            return Err(CSError::NonFiniteResult { index: grouped[k] });
        }
    }

    // Sort back to the original period order.
    let order = argsort_periods(&periods_grouped);
    let ln_psas_cmsv = restore(&ln_psas_cmsv_grouped, &order);
    let ln_stds_cmsv = restore(&ln_stds_cmsv_grouped, &order);

    let spectrum =
        Spectrum::from_parts_unchecked(Array1::from(periods.to_vec()), ln_psas_cmsv, ln_stds_cmsv);
    Ok(CondSpectrum::new(spectrum, conditioning.mask().to_vec()))
}
