//! rust_gmm — ground-motion models and conditional spectra with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the conditional spectrum solvers, the correlation model, and the
//! attenuation models to Python via the `_rust_gmm` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`conditional`, `correlation`,
//!   `models`, `spectrum`) as the public crate surface.
//! - Define `#[pyfunction]`/`#[pyclass]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_gmm` Python extension when the
//!   `python-bindings` feature is enabled.
//! - Register the Python submodules (`conditional`, `correlation`, `models`)
//!   in `sys.modules` so that dotted imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The Python wrappers use the Baker & Jayaram (2008) correlation model;
//!   Rust callers can pass any [`correlation::PeriodCorrelation`].
//!
//! Conventions
//! -----------
//! - Natural-log spectral accelerations (g), periods in seconds.
//! - Rust errors (`CSError`, `ModelError`) surface in Python as
//!   `ValueError` carrying the `Display` message.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on the inner modules directly:
//!
//!   ```rust
//!   use rust_gmm::conditional::{Conditioning, calc_cond_mean_spectrum_vector};
//!   use rust_gmm::correlation::BakerJayaram2008;
//!
//!   let periods = [0.1, 0.5, 1.0];
//!   let cond = Conditioning::from_targets(&[None, Some(-1.0), None]).unwrap();
//!   let cs = calc_cond_mean_spectrum_vector(
//!       &periods, &[-1.2, -1.5, -2.0], &[0.6, 0.65, 0.7], &cond, &BakerJayaram2008,
//!   )
//!   .unwrap();
//!   assert_eq!(cs.ln_psas()[1], -1.0);
//!   ```
//!
//! - The Python packaging layer imports `_rust_gmm` and wraps it in
//!   user-facing functions.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the integration tests under `tests/`.

pub mod conditional;
pub mod correlation;
pub mod models;
pub mod spectrum;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::sync::Arc;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    correlation::{BakerJayaram2008, PeriodCorrelation},
    models::{GroundMotionModel, Idriss2014Coefficients},
    utils::{extract_conditioning, extract_f64_vec, extract_scenario},
};

/// Conditional mean spectrum vector from Python.
///
/// Parameters
/// ----------
/// - `periods`, `ln_psas`, `ln_stds`: 1-D float arrays of equal length.
/// - `mask`: 1-D bool array, `True` at conditioning periods.
/// - `targets`: 1-D float array; read only where `mask` is `True`.
///
/// Returns
/// -------
/// `(ln_psas_cmsv, ln_stds_cmsv)` as NumPy arrays in the order of `periods`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "calc_cond_mean_spectrum_vector",
    text_signature = "(periods, ln_psas, ln_stds, mask, targets, /)"
)]
fn py_calc_cond_mean_spectrum_vector<'py>(
    py: Python<'py>, periods: &Bound<'py, PyAny>, ln_psas: &Bound<'py, PyAny>,
    ln_stds: &Bound<'py, PyAny>, mask: &Bound<'py, PyAny>, targets: &Bound<'py, PyAny>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let periods = extract_f64_vec(py, periods, "periods")?;
    let ln_psas = extract_f64_vec(py, ln_psas, "ln_psas")?;
    let ln_stds = extract_f64_vec(py, ln_stds, "ln_stds")?;
    let conditioning = extract_conditioning(py, mask, targets)?;
    let (means, stds) = conditional::calc_cond_mean_spectrum_vector(
        &periods,
        &ln_psas,
        &ln_stds,
        &conditioning,
        &BakerJayaram2008,
    )?
    .into_parts();
    Ok((means.into_pyarray(py), stds.into_pyarray(py)))
}

/// Single-period conditional mean spectrum from Python.
///
/// Returns `(ln_psas_cms, ln_stds_cms)` over `periods`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "calc_cond_mean_spectrum",
    text_signature = "(periods, ln_psas, ln_stds, period_cond, ln_psa_cond, /)"
)]
fn py_calc_cond_mean_spectrum<'py>(
    py: Python<'py>, periods: &Bound<'py, PyAny>, ln_psas: &Bound<'py, PyAny>,
    ln_stds: &Bound<'py, PyAny>, period_cond: f64, ln_psa_cond: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let periods = extract_f64_vec(py, periods, "periods")?;
    let ln_psas = extract_f64_vec(py, ln_psas, "ln_psas")?;
    let ln_stds = extract_f64_vec(py, ln_stds, "ln_stds")?;
    let (means, stds) = conditional::calc_cond_mean_spectrum(
        &periods,
        &ln_psas,
        &ln_stds,
        period_cond,
        ln_psa_cond,
        &BakerJayaram2008,
    )?
    .into_parts();
    Ok((means.into_pyarray(py), stds.into_pyarray(py)))
}

/// Baker & Jayaram (2008) correlation of `periods` against `period_ref`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "calc_correl", text_signature = "(periods, period_ref, /)")]
fn py_calc_correl<'py>(
    py: Python<'py>, periods: &Bound<'py, PyAny>, period_ref: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let periods = extract_f64_vec(py, periods, "periods")?;
    Ok(BakerJayaram2008.correl(&periods, period_ref).into_pyarray(py))
}

/// Idriss2014 — Python-facing wrapper for the Idriss (2014) model.
///
/// Constructed from Python as
/// `Idriss2014(small_csv, large_csv, mag=..., dist_rup=..., v_s30=..., mechanism="SS")`,
/// where the CSV paths hold the small- and large-magnitude coefficient
/// tables and the keyword arguments form the scenario.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_gmm.models", name = "Idriss2014")]
pub struct PyIdriss2014 {
    inner: models::Idriss2014,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyIdriss2014 {
    #[new]
    #[pyo3(signature = (small_csv, large_csv, **kwargs))]
    pub fn new(
        small_csv: &str, large_csv: &str, kwargs: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<PyIdriss2014> {
        let coeffs = Arc::new(Idriss2014Coefficients::from_csv_paths(small_csv, large_csv)?);
        let scenario = extract_scenario(kwargs)?;
        let inner = models::Idriss2014::new(coeffs, &scenario)?;
        Ok(PyIdriss2014 { inner })
    }

    #[getter]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[getter]
    pub fn abbrev(&self) -> &'static str {
        self.inner.abbrev()
    }

    #[getter]
    pub fn periods<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.periods().clone().into_pyarray(py)
    }

    #[getter]
    pub fn ln_resp<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.ln_resp().clone().into_pyarray(py)
    }

    #[getter]
    pub fn ln_std<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.ln_std().clone().into_pyarray(py)
    }

    #[getter]
    pub fn spec_accels<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.spec_accels().into_pyarray(py)
    }

    #[getter]
    pub fn pga(&self) -> Option<f64> {
        self.inner.pga()
    }

    pub fn interp_spec_accels<'py>(
        &self, py: Python<'py>, periods: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let periods = extract_f64_vec(py, periods, "periods")?;
        Ok(self.inner.interp_spec_accels(&periods)?.into_pyarray(py))
    }

    pub fn interp_ln_stds<'py>(
        &self, py: Python<'py>, periods: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let periods = extract_f64_vec(py, periods, "periods")?;
        Ok(self.inner.interp_ln_stds(&periods)?.into_pyarray(py))
    }
}

/// _rust_gmm — PyO3 module initializer for the Python extension.
///
/// Creates the `conditional`, `correlation`, and `models` submodules,
/// attaches them to `_rust_gmm`, and registers them in `sys.modules` under
/// `rust_gmm.<name>` so they import with dotted paths.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_gmm<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let conditional_mod = PyModule::new(py, "conditional")?;
    conditional_mod
        .add_function(wrap_pyfunction!(py_calc_cond_mean_spectrum_vector, &conditional_mod)?)?;
    conditional_mod.add_function(wrap_pyfunction!(py_calc_cond_mean_spectrum, &conditional_mod)?)?;

    let correlation_mod = PyModule::new(py, "correlation")?;
    correlation_mod.add_function(wrap_pyfunction!(py_calc_correl, &correlation_mod)?)?;

    let models_mod = PyModule::new(py, "models")?;
    models_mod.add_class::<PyIdriss2014>()?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let sys_modules = py.import("sys")?.getattr("modules")?;
    let submodules = [
        ("conditional", &conditional_mod),
        ("correlation", &correlation_mod),
        ("models", &models_mod),
    ];
    for (name, submodule) in submodules {
        m.add_submodule(submodule)?;
        sys_modules.set_item(format!("rust_gmm.{name}"), submodule)?;
    }
    Ok(())
}
