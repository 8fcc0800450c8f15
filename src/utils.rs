//! utils — conversions between Python objects and crate types.
//!
//! Everything here is compiled only with the `python-bindings` feature and is
//! used by the PyO3 wrappers in `lib.rs`. Array-like inputs may be NumPy
//! arrays, pandas Series, or plain sequences.
#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    conditional::Conditioning,
    models::{ParamValue, Scenario},
};

/// Extract a contiguous read-only `float64` view of a 1-D array-like.
///
/// NumPy arrays are borrowed without copying when contiguous; Series are
/// converted through `to_numpy`; any other sequence of floats is copied.
///
/// Errors
/// ------
/// - `TypeError` when the object is none of the above.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }
    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }
    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D array-like of floats into a `Vec<f64>`, naming the argument in
/// error messages.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Extract a boolean mask from a NumPy `bool` array or a sequence of bools.
#[cfg(feature = "python-bindings")]
pub fn extract_mask(raw_mask: &Bound<'_, PyAny>) -> PyResult<Vec<bool>> {
    if let Ok(arr_ro) = raw_mask.extract::<PyReadonlyArray1<bool>>() {
        return Ok(arr_ro.as_array().to_vec());
    }
    raw_mask.extract::<Vec<bool>>().map_err(|_| {
        PyTypeError::new_err("mask must be a 1-D numpy bool array or a sequence of bool")
    })
}

/// Build a [`Conditioning`] from a mask and a target array of equal length.
///
/// Targets at free periods may be NaN.
#[cfg(feature = "python-bindings")]
pub fn extract_conditioning<'py>(
    py: Python<'py>, raw_mask: &Bound<'py, PyAny>, raw_targets: &Bound<'py, PyAny>,
) -> PyResult<Conditioning> {
    let mask = extract_mask(raw_mask)?;
    let targets = extract_f64_vec(py, raw_targets, "targets")?;
    Ok(Conditioning::new(mask, targets.into())?)
}

/// Convert a `dict` of scenario parameters into a [`Scenario`].
///
/// `str` values become categorical parameters; anything convertible to
/// `float` becomes numeric.
#[cfg(feature = "python-bindings")]
pub fn extract_scenario(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Scenario> {
    let mut scenario = Scenario::new();
    let Some(kwargs) = kwargs else {
        return Ok(scenario);
    };
    for (key, value) in kwargs.iter() {
        let name: String = key.extract()?;
        let value = if let Ok(s) = value.extract::<String>() {
            ParamValue::Categorical(s)
        } else {
            let v: f64 = value.extract().map_err(|_| {
                PyTypeError::new_err(format!("parameter {name:?} must be a float or a str"))
            })?;
            ParamValue::Numeric(v)
        };
        scenario.set(name, value);
    }
    Ok(scenario)
}
