//! correlation::traits — the period-to-period correlation service.
//!
//! A correlation service answers one question: given an ordered sequence of
//! periods and a reference period, how strongly does spectral acceleration
//! at each period co-vary with spectral acceleration at the reference?
//! Implementations must be symmetric (`ρ(a, b) = ρ(b, a)`) and return `1.0`
//! where the period equals the reference. The covariance builder checks both
//! properties, so implementations do not need to re-validate.
use ndarray::Array1;

/// PeriodCorrelation — empirical inter-period correlation model.
///
/// Required methods
/// ----------------
/// - `correl(periods, period_ref)`
///   Return one coefficient per entry of `periods`, each in `[-1, 1]`,
///   against `period_ref`.
///
/// Notes
/// -----
/// - Implementations should be pure: the solver may call `correl` once per
///   period in the grouped grid and assumes the answers are consistent.
pub trait PeriodCorrelation {
    fn correl(&self, periods: &[f64], period_ref: f64) -> Array1<f64>;
}

impl<T: PeriodCorrelation + ?Sized> PeriodCorrelation for &T {
    fn correl(&self, periods: &[f64], period_ref: f64) -> Array1<f64> {
        (**self).correl(periods, period_ref)
    }
}

/// FnCorrelation — adapt a pairwise closure into a [`PeriodCorrelation`].
///
/// Examples
/// --------
/// ```rust
/// # use rust_gmm::correlation::{FnCorrelation, PeriodCorrelation};
/// // Exponential decay in log-period distance.
/// let service = FnCorrelation(|a: f64, b: f64| (-(a.ln() - b.ln()).abs()).exp());
/// let row = service.correl(&[0.1, 1.0], 1.0);
/// assert_eq!(row[1], 1.0);
/// assert!(row[0] < 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnCorrelation<F>(pub F);

impl<F: Fn(f64, f64) -> f64> PeriodCorrelation for FnCorrelation<F> {
    fn correl(&self, periods: &[f64], period_ref: f64) -> Array1<f64> {
        periods.iter().map(|&p| (self.0)(p, period_ref)).collect()
    }
}
