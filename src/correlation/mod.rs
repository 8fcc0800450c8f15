//! correlation — inter-period correlation models for spectral acceleration.
//!
//! Purpose
//! -------
//! Define the correlation service consumed by the conditional spectrum
//! solvers and provide the empirical model they are normally paired with.
//!
//! Key behaviors
//! -------------
//! - [`PeriodCorrelation`]: the service trait, returning a row of
//!   coefficients against a reference period.
//! - [`BakerJayaram2008`]: the NGA-based closed-form correlation model.
//! - [`FnCorrelation`]: adapter for ad-hoc pairwise closures (useful for
//!   sensitivity studies and tests).
//!
//! Invariants & assumptions
//! ------------------------
//! - Services are pure, symmetric, and have a unit diagonal. The covariance
//!   builder in `conditional::covariance` verifies these properties on every
//!   call.
//!
//! Downstream usage
//! ----------------
//! - Pass any `&impl PeriodCorrelation` to
//!   [`calc_cond_mean_spectrum_vector`](crate::conditional::calc_cond_mean_spectrum_vector)
//!   or [`calc_cond_mean_spectrum`](crate::conditional::calc_cond_mean_spectrum).

pub mod baker_jayaram;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::baker_jayaram::BakerJayaram2008;
pub use self::traits::{FnCorrelation, PeriodCorrelation};
