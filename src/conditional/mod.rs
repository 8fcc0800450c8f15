//! conditional — conditional mean spectra given target spectral accelerations.
//!
//! Purpose
//! -------
//! Turn an unconditioned lognormal response spectrum into the statistically
//! consistent conditional spectrum implied by targets at one or more
//! conditioning periods and an inter-period correlation model. This is the
//! numerical core of the crate; attenuation models only supply its inputs.
//!
//! Key behaviors
//! -------------
//! - [`calc_cond_mean_spectrum_vector`] (CMSV): condition on several periods
//!   at once by partitioning the covariance `Σ = D · R · D` into
//!   conditioning and free blocks and applying the Gaussian conditioning
//!   identity.
//! - [`calc_cond_mean_spectrum`] (CMS): the single-period special case,
//!   allowing a conditioning period between grid nodes.
//! - Supporting pieces live in their own submodules: input validation
//!   ([`validation`]), covariance assembly ([`covariance`]), the symmetric
//!   eigen-solver for the conditioning block ([`linalg`]), and the
//!   grouping/restoration permutations ([`reconcile`]).
//! - Errors are reported as [`CSError`], classified by [`ErrorKind`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Period grids are strictly increasing and positive; a violation is an
//!   `ErrorKind::Ordering` or `ErrorKind::Input` error, never a silent sort.
//! - Outputs are aligned with the caller's period order; conditioning
//!   periods carry their target with a standard deviation of exactly zero.
//! - All computations are pure and call-scoped. Nothing is cached between
//!   calls, so concurrent use from several threads is safe.
//!
//! Conventions
//! -----------
//! - Natural logarithms of spectral acceleration (g) throughout; periods in
//!   seconds.
//! - The conditioning mask is explicit (`true` = conditioning). Targets at
//!   free periods are never read.
//! - Numerical tolerances are named constants in [`tolerances`].
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Obtain `(periods, ln_psas, ln_stds)` from a
//!      [`GroundMotionModel`](crate::models::GroundMotionModel) or build a
//!      [`Spectrum`](crate::spectrum::Spectrum) directly.
//!   2. Build a [`Conditioning`] from a mask and targets (or from
//!      `Option<f64>` targets).
//!   3. Call [`calc_cond_mean_spectrum_vector`] with a correlation service
//!      such as [`BakerJayaram2008`](crate::correlation::BakerJayaram2008).
//!   4. Read the moments from the returned [`CondSpectrum`] or evaluate
//!      fractiles from it.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the end-to-end pipeline
//!   (model → spectrum → CMSV) is exercised in `tests/`.

pub mod conditioning;
pub mod covariance;
pub mod errors;
pub mod linalg;
pub mod reconcile;
pub mod single;
pub mod solver;
pub mod tolerances;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::conditioning::Conditioning;
pub use self::covariance::{build_correlation, build_covariance};
pub use self::errors::{CSError, CSResult, ErrorKind};
pub use self::single::calc_cond_mean_spectrum;
pub use self::solver::{CondSpectrum, calc_cond_mean_spectrum_vector};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_gmm::conditional::prelude::*;

pub mod prelude {
    pub use super::{
        CSError, CSResult, CondSpectrum, Conditioning, ErrorKind, calc_cond_mean_spectrum,
        calc_cond_mean_spectrum_vector,
    };
}
