//! models::idriss_2014 — Idriss (2014) NGA-West2 ground-motion model.
//!
//! Purpose
//! -------
//! Predict 5%-damped spectral acceleration for shallow crustal earthquakes
//! in active tectonic regions (Idriss, 2014).
//!
//! Key behaviors
//! -------------
//! - Validate the scenario (`dist_rup`, `mag`, `v_s30`, `mechanism`).
//! - Pick the small-magnitude table for `M <= 6.75`, the large-magnitude
//!   table otherwise, and evaluate
//!
//!   ```text
//!   ln Sa = α1 + α2·M + α3·(8.5 − M)²
//!         − (β1 + β2·M)·ln(R_rup + 10) + γ·R_rup
//!         + ε·ln(Vs30) + φ·F
//!   σ_ln  = 1.18 + 0.035·ln(clip(T, 0.05, 3.0)) − 0.06·clip(M, 5.0, 7.5)
//!   ```
//!
//!   with `F = 1` for reverse faulting and `0` otherwise.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coefficients are injected through `Arc<Idriss2014Coefficients>`; no
//!   tables ship with the crate.
//! - The first table row is PGA.
use std::sync::Arc;

use ndarray::Array1;
use tracing::debug;

use crate::models::{
    coefficients::Idriss2014Coefficients,
    errors::{ModelError, ModelResult},
    params::{
        CategoricalParameter, Mechanism, NumericParameter, ParamSpec, Scenario, validate_scenario,
    },
    traits::GroundMotionModel,
};

/// Idriss2014 — the model evaluated for one scenario.
///
/// Fields
/// ------
/// - `mag`, `dist_rup`, `v_s30`, `mechanism`: validated scenario values.
/// - `coeffs`: shared coefficient tables.
/// - `ln_resp`, `ln_std`: predictions over `coeffs.periods()`.
#[derive(Debug, Clone)]
pub struct Idriss2014 {
    mag: f64,
    dist_rup: f64,
    v_s30: f64,
    mechanism: Mechanism,
    coeffs: Arc<Idriss2014Coefficients>,
    ln_resp: Array1<f64>,
    ln_std: Array1<f64>,
}

impl Idriss2014 {
    pub const NAME: &'static str = "Idriss (2014)";
    pub const ABBREV: &'static str = "I14";
    /// Reference shear-wave velocity (m/s).
    pub const V_REF: f64 = 1200.0;
    /// Upper magnitude of the small-magnitude table.
    pub const MAG_SPLIT: f64 = 6.75;
    pub const INDEX_PGA: usize = 0;

    pub const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::Numeric(NumericParameter {
            name: "dist_rup",
            required: true,
            min: None,
            max: Some(150.0),
            default: None,
        }),
        ParamSpec::Numeric(NumericParameter {
            name: "mag",
            required: true,
            min: Some(5.0),
            max: None,
            default: None,
        }),
        ParamSpec::Numeric(NumericParameter {
            name: "v_s30",
            required: true,
            min: Some(450.0),
            max: Some(1200.0),
            default: None,
        }),
        ParamSpec::Categorical(CategoricalParameter {
            name: "mechanism",
            required: true,
            options: &["SS", "RS"],
            default: Some("SS"),
        }),
    ];

    /// Evaluate the model for `scenario`.
    ///
    /// Parameters
    /// ----------
    /// - `coeffs`: `Arc<Idriss2014Coefficients>`
    ///   Small- and large-magnitude tables on a shared grid.
    /// - `scenario`: `&Scenario`
    ///   Must provide `dist_rup` (km), `mag`, and `v_s30` (m/s); `mechanism`
    ///   defaults to `"SS"`.
    ///
    /// Errors
    /// ------
    /// - Any `validate_scenario` error for [`Idriss2014::PARAMS`].
    /// - `ModelError::NonFiniteResponse` if the prediction is not finite
    ///   (e.g. `dist_rup <= -10`).
    pub fn new(coeffs: Arc<Idriss2014Coefficients>, scenario: &Scenario) -> ModelResult<Self> {
        let params = validate_scenario(Self::PARAMS, scenario)?;
        let mag = params.numeric("mag")?;
        let dist_rup = params.numeric("dist_rup")?;
        let v_s30 = params.numeric("v_s30")?;
        let mechanism: Mechanism = params.categorical("mechanism")?.parse()?;

        let ln_resp = calc_ln_resp(&coeffs, mag, dist_rup, v_s30, mechanism);
        if let Some((index, &value)) = ln_resp.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteResponse { index, value });
        }
        let ln_std = calc_ln_std(coeffs.periods(), mag);
        debug!(mag, dist_rup, v_s30, %mechanism, "evaluated Idriss (2014)");

        Ok(Idriss2014 { mag, dist_rup, v_s30, mechanism, coeffs, ln_resp, ln_std })
    }

    pub fn mag(&self) -> f64 {
        self.mag
    }

    pub fn dist_rup(&self) -> f64 {
        self.dist_rup
    }

    pub fn v_s30(&self) -> f64 {
        self.v_s30
    }

    pub fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    pub fn coefficients(&self) -> &Arc<Idriss2014Coefficients> {
        &self.coeffs
    }
}

fn calc_ln_resp(
    coeffs: &Idriss2014Coefficients, mag: f64, dist_rup: f64, v_s30: f64, mechanism: Mechanism,
) -> Array1<f64> {
    let table = if mag <= Idriss2014::MAG_SPLIT { coeffs.small() } else { coeffs.large() };
    let flag_mech = if mechanism == Mechanism::Reverse { 1.0 } else { 0.0 };
    table
        .rows()
        .iter()
        .map(|c| {
            let f_mag = c.alpha_1 + c.alpha_2 * mag + c.alpha_3 * (8.5 - mag).powi(2);
            let f_dst = -(c.beta_1 + c.beta_2 * mag) * (dist_rup + 10.0).ln() + c.gamma * dist_rup;
            let f_ste = c.epsilon * v_s30.ln();
            let f_mec = c.phi * flag_mech;
            f_mag + f_dst + f_ste + f_mec
        })
        .collect()
}

fn calc_ln_std(periods: &Array1<f64>, mag: f64) -> Array1<f64> {
    let mag_term = 0.06 * mag.clamp(5.0, 7.5);
    periods.mapv(|t| 1.18 + 0.035 * t.clamp(0.05, 3.0).ln() - mag_term)
}

impl GroundMotionModel for Idriss2014 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn abbrev(&self) -> &'static str {
        Self::ABBREV
    }

    fn periods(&self) -> &Array1<f64> {
        self.coeffs.periods()
    }

    fn ln_resp(&self) -> &Array1<f64> {
        &self.ln_resp
    }

    fn ln_std(&self) -> &Array1<f64> {
        &self.ln_std
    }

    fn index_pga(&self) -> Option<usize> {
        Some(Self::INDEX_PGA)
    }
}
