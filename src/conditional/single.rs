//! conditional::single — conditional mean spectrum at a single period.
//!
//! Purpose
//! -------
//! Provide the classical conditional mean spectrum (Baker, 2011): condition
//! a lognormal response spectrum on a target spectral acceleration at one
//! period `T*`, which need not lie on the spectrum's grid.
//!
//! Key behaviors
//! -------------
//! - Interpolate `μ(T*)` and `σ(T*)` linearly in `ln(T)` and form the
//!   epsilon `ε = (ln_psa_cond − μ(T*)) / σ(T*)`.
//! - Shift every period by `ρ(T_i, T*) · σ_i · ε` and shrink its standard
//!   deviation to `σ_i · sqrt(1 − ρ²)`.
//! - When `T*` is a grid period, report the target with zero standard
//!   deviation there, matching [`calc_cond_mean_spectrum_vector`] with a
//!   single conditioning period.
//!
//! Invariants & assumptions
//! ------------------------
//! - `T*` lies within `[periods[0], periods[last]]`; no extrapolation.
//! - `1 − ρ²` is clamped at zero so rounding in `|ρ| ≈ 1` cannot produce a
//!   NaN standard deviation.
//!
//! [`calc_cond_mean_spectrum_vector`]: crate::conditional::calc_cond_mean_spectrum_vector
use ndarray::Array1;
use tracing::debug;

use crate::{
    conditional::{
        errors::{CSError, CSResult},
        solver::CondSpectrum,
        tolerances::CORREL_TOL,
        validation::{validate_moments, validate_periods},
    },
    correlation::PeriodCorrelation,
    spectrum::{Spectrum, interp_log_period},
};

/// calc_cond_mean_spectrum — condition a spectrum on one period.
///
/// Parameters
/// ----------
/// - `periods`: `&[f64]`
///   Strictly increasing, positive spectral periods (s).
/// - `ln_psas`: `&[f64]`
///   Unconditioned natural-log spectral accelerations.
/// - `ln_stds`: `&[f64]`
///   Unconditioned logarithmic standard deviations (`>= 0`).
/// - `period_cond`: `f64`
///   Conditioning period `T*` within the grid.
/// - `ln_psa_cond`: `f64`
///   Target natural-log spectral acceleration at `T*`.
/// - `correlation`: `&C`
///   Inter-period correlation service, queried once with `T*` as reference.
///
/// Returns
/// -------
/// `CSResult<CondSpectrum>`
///   Conditional moments over `periods`. The mask is `true` only at a grid
///   period equal to `T*` (all `false` when `T*` falls between nodes).
///
/// Errors
/// ------
/// - Validation errors for the grid and moments.
/// - `CSError::PeriodOutOfRange` when `T*` is outside the grid or NaN.
/// - `CSError::NonFiniteValue` when `ln_psa_cond` is non-finite.
/// - `CSError::SingularConditioningBlock` when `σ(T*) == 0`.
/// - `CSError::LengthMismatch`, `CSError::NonFiniteCorrelation`, or
///   `CSError::InvalidCorrelation` for a malformed correlation row (reported
///   as row 0, the conditioning period).
///
/// Examples
/// --------
/// ```rust
/// # use rust_gmm::conditional::calc_cond_mean_spectrum;
/// # use rust_gmm::correlation::BakerJayaram2008;
/// let periods = [0.1, 0.2, 0.5, 1.0, 2.0];
/// let ln_psas = [-1.0, -1.2, -1.8, -2.3, -3.0];
/// let ln_stds = [0.6, 0.6, 0.65, 0.7, 0.75];
///
/// let cs = calc_cond_mean_spectrum(&periods, &ln_psas, &ln_stds, 0.7, -1.5, &BakerJayaram2008)
///     .unwrap();
/// assert!(cs.mask().iter().all(|&m| !m));
/// assert!(cs.ln_psas()[2] > -1.8);
/// ```
pub fn calc_cond_mean_spectrum<C: PeriodCorrelation + ?Sized>(
    periods: &[f64], ln_psas: &[f64], ln_stds: &[f64], period_cond: f64, ln_psa_cond: f64,
    correlation: &C,
) -> CSResult<CondSpectrum> {
    validate_periods(periods)?;
    let n = periods.len();
    validate_moments(n, ln_psas, ln_stds)?;

    let (min, max) = (periods[0], periods[n - 1]);
    if !(period_cond >= min && period_cond <= max) {
        return Err(CSError::PeriodOutOfRange { period: period_cond, min, max });
    }
    if !ln_psa_cond.is_finite() {
        return Err(CSError::NonFiniteValue { name: "ln_psa_cond", index: 0, value: ln_psa_cond });
    }

    let ln_psa_star = interp_log_period(periods, ln_psas, period_cond);
    let ln_std_star = interp_log_period(periods, ln_stds, period_cond);
    if ln_std_star <= 0.0 {
        let var = ln_std_star * ln_std_star;
        return Err(CSError::SingularConditioningBlock { min_eigen: var, max_eigen: var });
    }
    let epsilon = (ln_psa_cond - ln_psa_star) / ln_std_star;
    debug!(period_cond, epsilon, "conditioning spectrum on single period");

    let rhos = correlation.correl(periods, period_cond);
    if rhos.len() != n {
        return Err(CSError::LengthMismatch {
            name: "correlation row",
            expected: n,
            actual: rhos.len(),
        });
    }
    for (col, &value) in rhos.iter().enumerate() {
        if !value.is_finite() {
            return Err(CSError::NonFiniteCorrelation { row: 0, col, value });
        }
        if value.abs() > 1.0 + CORREL_TOL {
            return Err(CSError::InvalidCorrelation {
                row: 0,
                col,
                value,
                reason: "coefficients must lie in [-1, 1]",
            });
        }
    }

    let mut mask = vec![false; n];
    let mut ln_psas_cms = Array1::<f64>::zeros(n);
    let mut ln_stds_cms = Array1::<f64>::zeros(n);
    for i in 0..n {
        if periods[i] == period_cond {
            mask[i] = true;
            ln_psas_cms[i] = ln_psa_cond;
            continue;
        }
        let rho = rhos[i].clamp(-1.0, 1.0);
        ln_psas_cms[i] = ln_psas[i] + rho * ln_stds[i] * epsilon;
        ln_stds_cms[i] = ln_stds[i] * (1.0 - rho * rho).max(0.0).sqrt();
    }

    let spectrum =
        Spectrum::from_parts_unchecked(Array1::from(periods.to_vec()), ln_psas_cms, ln_stds_cms);
    Ok(CondSpectrum::new(spectrum, mask))
}
