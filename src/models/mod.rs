//! models — empirical ground-motion (attenuation) models.
//!
//! Purpose
//! -------
//! Map earthquake source and site parameters to a lognormal distribution of
//! spectral acceleration over a fixed period grid, providing the
//! unconditioned spectra the conditional solvers start from.
//!
//! Key behaviors
//! -------------
//! - [`GroundMotionModel`]: common interface (`periods`, `ln_resp`,
//!   `ln_std`, PGA, interpolation, conversion to a
//!   [`Spectrum`](crate::spectrum::Spectrum)).
//! - [`params`]: parameter specifications, [`Scenario`], and
//!   [`validate_scenario`].
//! - [`coefficients`]: validated per-period coefficient tables read from
//!   CSV and shared through `Arc`.
//! - [`Idriss2014`]: the Idriss (2014) NGA-West2 model; [`ModelKind`] wraps
//!   the available models in one tagged type.
//!
//! Invariants & assumptions
//! ------------------------
//! - A model value is the prediction for one scenario; it is immutable and
//!   computed eagerly in the constructor.
//! - Scenario validation happens before any coefficient is read; a model
//!   never exists for an invalid scenario.
//!
//! Conventions
//! -----------
//! - Distances in km, velocities in m/s, periods in s, accelerations in g.
//! - Errors are [`ModelError`]; spectrum-level errors are wrapped as
//!   `ModelError::InvalidSpectrum`.

pub mod coefficients;
pub mod errors;
pub mod idriss_2014;
pub mod kind;
pub mod params;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coefficients::{
    CoefficientTable, Idriss2014Coefficients, Idriss2014Coeffs, PeriodRow,
};
pub use self::errors::{ModelError, ModelResult};
pub use self::idriss_2014::Idriss2014;
pub use self::kind::ModelKind;
pub use self::params::{
    CategoricalParameter, Mechanism, NumericParameter, ParamSpec, ParamValue, Scenario,
    ValidatedParams, validate_scenario,
};
pub use self::traits::GroundMotionModel;
