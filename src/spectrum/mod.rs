//! spectrum — lognormal response spectra and period-grid helpers.
//!
//! Purpose
//! -------
//! Hold the value type shared by attenuation models (which produce spectra)
//! and the conditional spectrum solvers (which consume them).
//!
//! Key behaviors
//! -------------
//! - [`Spectrum`]: validated periods, `ln_mean`, and `ln_std`, with
//!   fractiles, interpolation, and conditioning helpers.
//! - [`interp_log_period`]: linear interpolation against `ln(T)`.
//!
//! Conventions
//! -----------
//! - Periods in seconds, spectral accelerations in g, natural logarithms
//!   throughout.
//! - Errors are reported as [`CSError`](crate::conditional::CSError) so that
//!   grid validation reads the same here and in the solvers.

pub mod interp;
pub mod response;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::interp::interp_log_period;
pub use self::response::Spectrum;
