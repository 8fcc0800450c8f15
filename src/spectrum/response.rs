//! spectrum::response — lognormal response spectra on a period grid.
//!
//! Purpose
//! -------
//! Represent the predicted distribution of 5%-damped spectral acceleration
//! over a period grid as natural-log means and logarithmic standard
//! deviations, and provide the operations callers routinely need on top of
//! it: fractiles, interpolation onto another grid, and conditioning.
//!
//! Key behaviors
//! -------------
//! - Validate the grid and moments once at construction ([`Spectrum::new`]).
//! - Evaluate fractile spectra `exp(μ + z_p σ)` with `z_p` the standard
//!   normal quantile.
//! - Interpolate in log-period onto a sub-grid ([`Spectrum::interp`]).
//! - Condition on targets at one or several periods
//!   ([`Spectrum::condition`], [`Spectrum::condition_at`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `periods` is strictly increasing and positive; `ln_mean` and `ln_std`
//!   have the same length, are finite, and `ln_std >= 0`.
//! - Spectra are immutable values; every operation returns a new value.
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    conditional::{
        conditioning::Conditioning,
        errors::{CSError, CSResult},
        single::calc_cond_mean_spectrum,
        solver::{CondSpectrum, calc_cond_mean_spectrum_vector},
        validation::{validate_moments, validate_periods},
    },
    correlation::PeriodCorrelation,
    spectrum::interp::interp_log_period,
};

/// Spectrum — natural-log mean and logarithmic standard deviation per period.
///
/// Fields
/// ------
/// - `periods`: `Array1<f64>` — strictly increasing spectral periods (s).
/// - `ln_mean`: `Array1<f64>` — ln of the median spectral acceleration (g).
/// - `ln_std`: `Array1<f64>` — logarithmic standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    periods: Array1<f64>,
    ln_mean: Array1<f64>,
    ln_std: Array1<f64>,
}

impl Spectrum {
    /// Build a validated spectrum.
    ///
    /// Errors
    /// ------
    /// - Any error from `validate_periods` (empty, non-positive, or
    ///   non-increasing periods) or `validate_moments` (length mismatch,
    ///   non-finite values, negative standard deviations).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_gmm::spectrum::Spectrum;
    /// let spec = Spectrum::new(array![0.1, 1.0], array![-1.0, -2.0], array![0.6, 0.7]).unwrap();
    /// assert_eq!(spec.len(), 2);
    /// assert!(Spectrum::new(array![1.0, 0.1], array![-1.0, -2.0], array![0.6, 0.7]).is_err());
    /// ```
    pub fn new(periods: Array1<f64>, ln_mean: Array1<f64>, ln_std: Array1<f64>) -> CSResult<Self> {
        validate_periods(&periods.to_vec())?;
        validate_moments(periods.len(), &ln_mean.to_vec(), &ln_std.to_vec())?;
        Ok(Spectrum { periods, ln_mean, ln_std })
    }

    /// Assemble a spectrum whose invariants the caller already guarantees.
    pub(crate) fn from_parts_unchecked(
        periods: Array1<f64>, ln_mean: Array1<f64>, ln_std: Array1<f64>,
    ) -> Self {
        Spectrum { periods, ln_mean, ln_std }
    }

    pub fn periods(&self) -> &Array1<f64> {
        &self.periods
    }

    pub fn ln_mean(&self) -> &Array1<f64> {
        &self.ln_mean
    }

    pub fn ln_std(&self) -> &Array1<f64> {
        &self.ln_std
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Split into `(periods, ln_mean, ln_std)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (self.periods, self.ln_mean, self.ln_std)
    }

    /// Median spectral accelerations `exp(ln_mean)` (g).
    pub fn spec_accels(&self) -> Array1<f64> {
        self.ln_mean.mapv(f64::exp)
    }

    /// fractile — spectral accelerations at non-exceedance probability `prob`.
    ///
    /// Parameters
    /// ----------
    /// - `prob`: `f64`
    ///   Probability in the open interval `(0, 1)`; `0.5` gives the median,
    ///   `0.84` roughly the median-plus-one-sigma spectrum.
    ///
    /// Returns
    /// -------
    /// `CSResult<Array1<f64>>`
    ///   `exp(ln_mean + z_p · ln_std)` per period.
    ///
    /// Errors
    /// ------
    /// - `CSError::InvalidProbability` when `prob` is not in `(0, 1)`.
    pub fn fractile(&self, prob: f64) -> CSResult<Array1<f64>> {
        if !(prob > 0.0 && prob < 1.0) {
            return Err(CSError::InvalidProbability { prob });
        }
        let z = Normal::standard().inverse_cdf(prob);
        Ok((&self.ln_mean + &(&self.ln_std * z)).mapv(f64::exp))
    }

    /// interp — resample the spectrum onto `periods` in log-period.
    ///
    /// Errors
    /// ------
    /// - Any `validate_periods` error for the requested grid.
    /// - `CSError::PeriodOutOfRange` when a requested period lies outside
    ///   this spectrum's grid (no extrapolation).
    pub fn interp(&self, periods: &[f64]) -> CSResult<Spectrum> {
        validate_periods(periods)?;
        let xp = self.periods.to_vec();
        let (min, max) = (xp[0], xp[xp.len() - 1]);
        if let Some(&period) = periods.iter().find(|&&p| p < min || p > max) {
            return Err(CSError::PeriodOutOfRange { period, min, max });
        }
        let mean = self.ln_mean.to_vec();
        let std = self.ln_std.to_vec();
        let ln_mean = periods.iter().map(|&p| interp_log_period(&xp, &mean, p)).collect();
        let ln_std = periods.iter().map(|&p| interp_log_period(&xp, &std, p)).collect();
        Ok(Spectrum::from_parts_unchecked(Array1::from(periods.to_vec()), ln_mean, ln_std))
    }

    /// Conditional mean spectrum vector given targets at several periods.
    ///
    /// See [`calc_cond_mean_spectrum_vector`].
    pub fn condition<C: PeriodCorrelation + ?Sized>(
        &self, conditioning: &Conditioning, correlation: &C,
    ) -> CSResult<CondSpectrum> {
        calc_cond_mean_spectrum_vector(
            &self.periods.to_vec(),
            &self.ln_mean.to_vec(),
            &self.ln_std.to_vec(),
            conditioning,
            correlation,
        )
    }

    /// Conditional mean spectrum given a target at a single period.
    ///
    /// See [`calc_cond_mean_spectrum`].
    pub fn condition_at<C: PeriodCorrelation + ?Sized>(
        &self, period_cond: f64, ln_psa_cond: f64, correlation: &C,
    ) -> CSResult<CondSpectrum> {
        calc_cond_mean_spectrum(
            &self.periods.to_vec(),
            &self.ln_mean.to_vec(),
            &self.ln_std.to_vec(),
            period_cond,
            ln_psa_cond,
            correlation,
        )
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
    // - Fractile evaluation at the median and at ±1σ.
    // - Interpolation onto a sub-grid and the out-of-range rejection.
    //
    // They intentionally DO NOT cover:
    // - Conditioning, which is tested in `conditional::solver` and
    //   `conditional::single`.
    // -------------------------------------------------------------------------

    fn sample() -> Spectrum {
        Spectrum::new(array![0.1, 1.0, 10.0], array![-1.0, -2.0, -4.0], array![0.5, 0.6, 0.8])
            .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the median and the 84th-percentile spectra.
    //
    // Given
    // -----
    // - A three-period spectrum.
    //
    // Expect
    // ------
    // - `fractile(0.5) == exp(ln_mean)`.
    // - `fractile(Φ(1)) ≈ exp(ln_mean + ln_std)`.
    fn fractile_matches_median_and_one_sigma() {
        // Arrange
        let spec = sample();
        let p_one_sigma = Normal::standard().cdf(1.0);

        // Act
        let median = spec.fractile(0.5).unwrap();
        let upper = spec.fractile(p_one_sigma).unwrap();

        // Assert
        for i in 0..3 {
            assert_abs_diff_eq!(median[i], spec.ln_mean()[i].exp(), epsilon = 1e-12);
            let expected = (spec.ln_mean()[i] + spec.ln_std()[i]).exp();
            assert_abs_diff_eq!(upper[i], expected, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure probabilities on the boundary are rejected.
    //
    // Given
    // -----
    // - prob = 0.0 and prob = 1.0.
    //
    // Expect
    // ------
    // - `CSError::InvalidProbability` for both.
    fn fractile_rejects_boundary_probabilities() {
        // Arrange
        let spec = sample();

        // Act & Assert
        assert!(matches!(spec.fractile(0.0), Err(CSError::InvalidProbability { .. })));
        assert!(matches!(spec.fractile(1.0), Err(CSError::InvalidProbability { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check log-period interpolation and the out-of-range guard.
    //
    // Given
    // -----
    // - The sample spectrum resampled at [√0.1, 1.0] and at [0.05].
    //
    // Expect
    // ------
    // - ln_mean = [-1.5, -2.0]; an error for 0.05 s.
    fn interp_resamples_in_log_period() {
        // Arrange
        let spec = sample();

        // Act
        let resampled = spec.interp(&[0.1_f64.sqrt(), 1.0]).unwrap();
        let out_of_range = spec.interp(&[0.05]);

        // Assert
        assert_abs_diff_eq!(resampled.ln_mean()[0], -1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(resampled.ln_std()[0], 0.55, epsilon = 1e-12);
        assert_eq!(resampled.ln_mean()[1], -2.0);
        assert!(matches!(out_of_range, Err(CSError::PeriodOutOfRange { .. })));
    }
}
