//! conditional::errors — error types for conditional-spectrum computations.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the covariance builder,
//! the conditional mean spectrum solvers, and the spectrum utilities. Errors
//! are grouped into a coarse taxonomy ([`ErrorKind`]) so callers can react to
//! ordering, configuration, and numerical failures without matching on every
//! variant.
//!
//! Key behaviors
//! -------------
//! - Define [`CSError`] and [`CSResult`] as the canonical error and result
//!   types for the `conditional` and `spectrum` subtrees.
//! - Attach human-readable `Display` messages embedding the offending index
//!   or value.
//! - Convert into `PyErr` (`ValueError`) when the `python-bindings` feature
//!   is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every failure aborts the whole computation; no variant is used to
//!   report a partial result.
//! - Indices carried by variants are 0-based and refer to the caller's
//!   original period ordering unless stated otherwise.
//!
//! Testing notes
//! -------------
//! - Unit tests check that payloads appear in `Display` messages and that
//!   [`CSError::kind`] classifies each family correctly.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type CSResult<T> = Result<T, CSError>;

/// Coarse classification of [`CSError`] variants.
///
/// - `Ordering`: periods are not strictly increasing.
/// - `Configuration`: the conditioning mask leaves nothing to condition on
///   or nothing to predict.
/// - `Numerical`: linear algebra broke down (singular block, non-finite
///   values, negative conditional variance).
/// - `Input`: malformed inputs (lengths, non-finite values, negative
///   standard deviations, out-of-range periods).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Ordering,
    Configuration,
    Numerical,
    Input,
}

/// CSError — failures of conditional-spectrum computations.
///
/// Variants
/// --------
/// - `Ordering { index, prev, next }`
///   `periods[index] >= periods[index + 1]`.
/// - `NoConditioningPeriods` / `NoFreePeriods`
///   The mask marks no period as conditioning, or every period.
/// - `SingularConditioningBlock { min_eigen, max_eigen }`
///   The covariance block of the conditioning periods cannot be inverted
///   reliably.
/// - `NonFiniteCorrelation { row, col, value }`
///   The correlation service returned NaN/±∞.
/// - `NonFiniteResult { index }`
///   The conditional mean or standard deviation is not finite.
/// - `NegativeConditionalVariance { index, value }`
///   The Schur-complement diagonal is negative beyond rounding.
/// - Remaining variants describe malformed inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum CSError {
    // ---- Ordering ----
    Ordering { index: usize, prev: f64, next: f64 },

    // ---- Configuration ----
    NoConditioningPeriods,
    NoFreePeriods,

    // ---- Numerical ----
    SingularConditioningBlock { min_eigen: f64, max_eigen: f64 },
    NonFiniteCorrelation { row: usize, col: usize, value: f64 },
    NonFiniteResult { index: usize },
    NegativeConditionalVariance { index: usize, value: f64 },

    // ---- Input ----
    EmptyPeriods,
    LengthMismatch { name: &'static str, expected: usize, actual: usize },
    NonPositivePeriod { index: usize, value: f64 },
    NonFiniteValue { name: &'static str, index: usize, value: f64 },
    NegativeStd { index: usize, value: f64 },
    NonFiniteTarget { index: usize, value: f64 },
    InvalidCorrelation { row: usize, col: usize, value: f64, reason: &'static str },
    PeriodOutOfRange { period: f64, min: f64, max: f64 },
    InvalidProbability { prob: f64 },
}

impl CSError {
    /// Coarse family of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CSError::Ordering { .. } => ErrorKind::Ordering,
            CSError::NoConditioningPeriods | CSError::NoFreePeriods => ErrorKind::Configuration,
            CSError::SingularConditioningBlock { .. }
            | CSError::NonFiniteCorrelation { .. }
            | CSError::NonFiniteResult { .. }
            | CSError::NegativeConditionalVariance { .. } => ErrorKind::Numerical,
            _ => ErrorKind::Input,
        }
    }
}

impl std::error::Error for CSError {}

impl std::fmt::Display for CSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Ordering ----
            CSError::Ordering { index, prev, next } => write!(
                f,
                "Periods must be strictly increasing; periods[{index}] = {prev} is not below periods[{}] = {next}.",
                index + 1
            ),
            // ---- Configuration ----
            CSError::NoConditioningPeriods => {
                write!(f, "At least one period must be marked as conditioning.")
            }
            CSError::NoFreePeriods => {
                write!(f, "Every period is conditioning; at least one free period is required.")
            }
            // ---- Numerical ----
            CSError::SingularConditioningBlock { min_eigen, max_eigen } => write!(
                f,
                "Covariance block of the conditioning periods is singular or ill-conditioned (eigenvalues in [{min_eigen}, {max_eigen}])."
            ),
            CSError::NonFiniteCorrelation { row, col, value } => {
                write!(f, "Correlation coefficient ({row}, {col}) is non-finite: {value}")
            }
            CSError::NonFiniteResult { index } => {
                write!(f, "Conditional spectrum is non-finite at index {index}.")
            }
            CSError::NegativeConditionalVariance { index, value } => {
                write!(f, "Conditional variance at index {index} is negative: {value}")
            }
            // ---- Input ----
            CSError::EmptyPeriods => write!(f, "Period sequence is empty."),
            CSError::LengthMismatch { name, expected, actual } => {
                write!(f, "`{name}` must have length {expected}; got {actual}.")
            }
            CSError::NonPositivePeriod { index, value } => {
                write!(f, "Period at index {index} must be finite and > 0; got: {value}")
            }
            CSError::NonFiniteValue { name, index, value } => {
                write!(f, "`{name}` at index {index} is non-finite: {value}")
            }
            CSError::NegativeStd { index, value } => {
                write!(f, "Standard deviation at index {index} must be >= 0; got: {value}")
            }
            CSError::NonFiniteTarget { index, value } => {
                write!(f, "Conditioning target at index {index} is non-finite: {value}")
            }
            CSError::InvalidCorrelation { row, col, value, reason } => {
                write!(f, "Invalid correlation coefficient ({row}, {col}) = {value}; {reason}")
            }
            CSError::PeriodOutOfRange { period, min, max } => {
                write!(f, "Period {period} lies outside the grid [{min}, {max}].")
            }
            CSError::InvalidProbability { prob } => {
                write!(f, "Probability must lie strictly between 0 and 1; got: {prob}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CSError> for PyErr {
    fn from(err: CSError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
