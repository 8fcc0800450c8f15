//! models::traits — the interface shared by attenuation models.
//!
//! A ground-motion model evaluates its prediction once, at construction, for
//! a validated scenario, and then exposes the result over its own period
//! grid. The provided methods derive everything callers need from the four
//! required accessors: linear-scale accelerations, PGA, a [`Spectrum`] for
//! conditioning, and interpolation onto other periods.
use ndarray::Array1;

use crate::{
    models::errors::{ModelError, ModelResult},
    spectrum::{Spectrum, interp_log_period},
};

/// Interface of an empirical attenuation model evaluated for one scenario.
///
/// Required methods
/// ----------------
/// - `name`, `abbrev`: display name and short code (e.g. `"Idriss (2014)"`,
///   `"I14"`).
/// - `periods`: the model's strictly increasing period grid (s).
/// - `ln_resp`: natural-log median spectral acceleration (g) per period.
/// - `ln_std`: logarithmic standard deviation per period.
/// - `index_pga`: row holding peak ground acceleration, if the model
///   predicts it.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{Array1, array};
/// # use rust_gmm::models::GroundMotionModel;
/// struct Flat {
///     periods: Array1<f64>,
///     ln_resp: Array1<f64>,
///     ln_std: Array1<f64>,
/// }
///
/// impl GroundMotionModel for Flat {
///     fn name(&self) -> &'static str { "Flat" }
///     fn abbrev(&self) -> &'static str { "F" }
///     fn periods(&self) -> &Array1<f64> { &self.periods }
///     fn ln_resp(&self) -> &Array1<f64> { &self.ln_resp }
///     fn ln_std(&self) -> &Array1<f64> { &self.ln_std }
///     fn index_pga(&self) -> Option<usize> { Some(0) }
/// }
///
/// let model = Flat {
///     periods: array![0.01, 1.0],
///     ln_resp: array![0.0, -1.0],
///     ln_std: array![0.6, 0.7],
/// };
/// assert_eq!(model.pga(), Some(1.0));
/// assert_eq!(model.spectrum().unwrap().len(), 2);
/// ```
pub trait GroundMotionModel {
    fn name(&self) -> &'static str;

    fn abbrev(&self) -> &'static str;

    fn periods(&self) -> &Array1<f64>;

    fn ln_resp(&self) -> &Array1<f64>;

    fn ln_std(&self) -> &Array1<f64>;

    fn index_pga(&self) -> Option<usize>;

    /// Median spectral accelerations (g) over the model's grid.
    fn spec_accels(&self) -> Array1<f64> {
        self.ln_resp().mapv(f64::exp)
    }

    /// Median peak ground acceleration (g).
    fn pga(&self) -> Option<f64> {
        self.index_pga().map(|i| self.ln_resp()[i].exp())
    }

    /// The prediction as a validated [`Spectrum`].
    ///
    /// Errors
    /// ------
    /// - `ModelError::InvalidSpectrum` when the grid or moments violate the
    ///   spectrum invariants.
    fn spectrum(&self) -> ModelResult<Spectrum> {
        Ok(Spectrum::new(self.periods().clone(), self.ln_resp().clone(), self.ln_std().clone())?)
    }

    /// Median spectral accelerations at `periods`, interpolated log-log.
    ///
    /// Errors
    /// ------
    /// - `ModelError::PeriodOutOfRange` for a period outside the grid or NaN.
    fn interp_spec_accels(&self, periods: &[f64]) -> ModelResult<Array1<f64>> {
        Ok(interp_model(self.periods(), self.ln_resp(), periods)?.mapv(f64::exp))
    }

    /// Logarithmic standard deviations at `periods`, interpolated in
    /// log-period.
    ///
    /// Errors
    /// ------
    /// - `ModelError::PeriodOutOfRange` for a period outside the grid or NaN.
    /// - `ModelError::EmptyTable` when the model has no periods.
    fn interp_ln_stds(&self, periods: &[f64]) -> ModelResult<Array1<f64>> {
        interp_model(self.periods(), self.ln_std(), periods)
    }
}

fn interp_model(xp: &Array1<f64>, fp: &Array1<f64>, periods: &[f64]) -> ModelResult<Array1<f64>> {
    let xp = xp.to_vec();
    let fp = fp.to_vec();
    let (Some(&min), Some(&max)) = (xp.first(), xp.last()) else {
        return Err(ModelError::EmptyTable);
    };
    periods
        .iter()
        .map(|&period| {
            if period >= min && period <= max {
                Ok(interp_log_period(&xp, &fp, period))
            } else {
                Err(ModelError::PeriodOutOfRange { period, min, max })
            }
        })
        .collect()
}
