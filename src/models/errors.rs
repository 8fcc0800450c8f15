//! Errors for ground-motion models (scenario validation, coefficient tables,
//! and model evaluation).
//!
//! This module defines [`ModelError`] and the [`ModelResult`] alias used by
//! everything under `models`. Like the conditional-spectrum errors, the type
//! implements `Display`/`Error` and converts to `PyErr` at the PyO3 boundary.
//!
//! ## Conventions
//! - Parameter names in messages are the snake_case names of the model's
//!   [`ParamSpec`](crate::models::ParamSpec) entries (`mag`, `dist_rup`, ...).
//! - Coefficient-table indices are 0-based data rows (header and comment
//!   lines excluded).
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::conditional::errors::CSError;

/// Result alias for model construction and evaluation.
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for ground-motion models.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Scenario validation ----
    /// A required parameter without a default was not supplied.
    MissingParameter { name: &'static str },

    /// A numeric parameter lies below its lower limit.
    BelowMinimum { name: &'static str, value: f64, min: f64 },

    /// A numeric parameter lies above its upper limit.
    AboveMaximum { name: &'static str, value: f64, max: f64 },

    /// A numeric parameter is NaN/±inf.
    NonFiniteParameter { name: &'static str, value: f64 },

    /// A categorical parameter is not one of the allowed options.
    InvalidCategory { name: &'static str, value: String, options: &'static [&'static str] },

    /// A parameter was supplied with the wrong kind (numeric vs categorical).
    WrongParameterKind { name: &'static str, expected: &'static str },

    /// A mechanism string is not one of `SS`, `NS`, `RS`.
    UnknownMechanism { value: String },

    // ---- Coefficient tables ----
    /// The table contains no rows.
    EmptyTable,

    /// A tabulated period is NaN/±inf or ≤ 0.
    NonPositivePeriod { index: usize, value: f64 },

    /// Tabulated periods are not strictly increasing.
    NonIncreasingPeriods { index: usize, prev: f64, next: f64 },

    /// Two tables that must share a period grid do not.
    MismatchedPeriodGrid { index: usize, left: f64, right: f64 },

    /// CSV reading or row deserialization failed.
    Csv { text: String },

    // ---- Model evaluation ----
    /// Requested period outside the model's period grid.
    PeriodOutOfRange { period: f64, min: f64, max: f64 },

    /// The model produced a non-finite log response at a grid index.
    NonFiniteResponse { index: usize, value: f64 },

    /// No model is registered under this name or abbreviation.
    UnknownModel { name: String },

    /// The model output did not form a valid spectrum.
    InvalidSpectrum(CSError),
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::InvalidSpectrum(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Scenario validation ----
            ModelError::MissingParameter { name } => {
                write!(f, "Required parameter `{name}` is missing.")
            }
            ModelError::BelowMinimum { name, value, min } => {
                write!(f, "Parameter `{name}` = {value} is below the minimum of {min}.")
            }
            ModelError::AboveMaximum { name, value, max } => {
                write!(f, "Parameter `{name}` = {value} is above the maximum of {max}.")
            }
            ModelError::NonFiniteParameter { name, value } => {
                write!(f, "Parameter `{name}` must be finite; got: {value}")
            }
            ModelError::InvalidCategory { name, value, options } => {
                write!(f, "Parameter `{name}` = {value:?} is not one of {options:?}.")
            }
            ModelError::WrongParameterKind { name, expected } => {
                write!(f, "Parameter `{name}` must be {expected}.")
            }
            ModelError::UnknownMechanism { value } => {
                write!(f, "Unknown fault mechanism {value:?} (expected 'SS', 'NS', or 'RS').")
            }
            // ---- Coefficient tables ----
            ModelError::EmptyTable => write!(f, "Coefficient table is empty."),
            ModelError::NonPositivePeriod { index, value } => {
                write!(f, "Tabulated period at row {index} must be finite and > 0; got: {value}")
            }
            ModelError::NonIncreasingPeriods { index, prev, next } => write!(
                f,
                "Tabulated periods must be strictly increasing; row {index} ({prev}) is not below row {} ({next}).",
                index + 1
            ),
            ModelError::MismatchedPeriodGrid { index, left, right } => write!(
                f,
                "Coefficient tables disagree on the period at row {index}: {left} vs {right}."
            ),
            ModelError::Csv { text } => write!(f, "Failed to read coefficient table: {text}"),
            // ---- Model evaluation ----
            ModelError::PeriodOutOfRange { period, min, max } => {
                write!(f, "Period {period} lies outside the model's grid [{min}, {max}].")
            }
            ModelError::NonFiniteResponse { index, value } => {
                write!(f, "Model response at index {index} is non-finite: {value}")
            }
            ModelError::UnknownModel { name } => write!(f, "Unknown ground-motion model {name:?}."),
            ModelError::InvalidSpectrum(err) => write!(f, "Invalid model spectrum: {err}"),
        }
    }
}

impl From<csv::Error> for ModelError {
    fn from(err: csv::Error) -> ModelError {
        ModelError::Csv { text: err.to_string() }
    }
}

impl From<CSError> for ModelError {
    fn from(err: CSError) -> ModelError {
        ModelError::InvalidSpectrum(err)
    }
}

/// Convert a [`ModelError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
