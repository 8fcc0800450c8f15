//! models::params — model parameter specifications and scenarios.
//!
//! Purpose
//! -------
//! Describe the inputs a ground-motion model accepts and validate a user
//! scenario against them before any prediction is made.
//!
//! Key behaviors
//! -------------
//! - [`NumericParameter`] / [`CategoricalParameter`] declare a name, whether
//!   the parameter is required, limits or options, and an optional default;
//!   models list them in a `&'static [ParamSpec]`.
//! - [`Scenario`] is a loosely-typed name → value map built by callers.
//! - [`validate_scenario`] fills defaults and checks limits, options, and
//!   kinds, producing [`ValidatedParams`] with typed accessors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Limits are inclusive: `min <= value <= max`.
//! - A missing parameter with a default takes the default whether or not it
//!   is required; a missing required parameter without a default fails.
//! - Scenario entries not named by any spec are ignored (logged at `debug`).
use std::{collections::BTreeMap, fmt, str::FromStr};

use tracing::debug;

use crate::models::errors::{ModelError, ModelResult};

/// Numeric model input with optional inclusive limits and default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericParameter {
    pub name: &'static str,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: Option<f64>,
}

/// Categorical model input restricted to `options`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoricalParameter {
    pub name: &'static str,
    pub required: bool,
    pub options: &'static [&'static str],
    pub default: Option<&'static str>,
}

/// One entry of a model's parameter specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSpec {
    Numeric(NumericParameter),
    Categorical(CategoricalParameter),
}

impl ParamSpec {
    pub fn name(&self) -> &'static str {
        match self {
            ParamSpec::Numeric(p) => p.name,
            ParamSpec::Categorical(p) => p.name,
        }
    }
}

/// A scenario value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Numeric(f64),
    Categorical(String),
}

/// Scenario — earthquake source and site parameters by name.
///
/// Examples
/// --------
/// ```rust
/// # use rust_gmm::models::Scenario;
/// let scenario = Scenario::new()
///     .with_numeric("mag", 6.5)
///     .with_numeric("dist_rup", 20.0)
///     .with_categorical("mechanism", "RS");
/// assert_eq!(scenario.numeric("mag"), Some(6.5));
/// assert_eq!(scenario.categorical("mechanism"), Some("RS"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    values: BTreeMap<String, ParamValue>,
}

impl Scenario {
    pub fn new() -> Self {
        Scenario::default()
    }

    pub fn with_numeric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), ParamValue::Numeric(value));
        self
    }

    pub fn with_categorical(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), ParamValue::Categorical(value.into()));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Numeric value under `name`, if present and numeric.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Numeric(v)) => Some(*v),
            _ => None,
        }
    }

    /// Categorical value under `name`, if present and categorical.
    pub fn categorical(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Categorical(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Scenario values after validation against a `ParamSpec` list.
///
/// Only parameters that were supplied or defaulted are present; typed
/// accessors fail with `MissingParameter` for absent optional entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ValidatedParams {
    pub fn numeric(&self, name: &'static str) -> ModelResult<f64> {
        match self.values.get(name) {
            Some(ParamValue::Numeric(v)) => Ok(*v),
            Some(ParamValue::Categorical(_)) => {
                Err(ModelError::WrongParameterKind { name, expected: "numeric" })
            }
            None => Err(ModelError::MissingParameter { name }),
        }
    }

    pub fn categorical(&self, name: &'static str) -> ModelResult<&str> {
        match self.values.get(name) {
            Some(ParamValue::Categorical(v)) => Ok(v.as_str()),
            Some(ParamValue::Numeric(_)) => {
                Err(ModelError::WrongParameterKind { name, expected: "categorical" })
            }
            None => Err(ModelError::MissingParameter { name }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// validate_scenario — check a scenario against a model's parameter specs.
///
/// Parameters
/// ----------
/// - `specs`: `&[ParamSpec]`
///   The model's parameter specification.
/// - `scenario`: `&Scenario`
///   Caller-supplied values.
///
/// Returns
/// -------
/// `ModelResult<ValidatedParams>`
///   Supplied values plus defaults for anything omitted.
///
/// Errors
/// ------
/// - `MissingParameter` for a required parameter without value or default.
/// - `NonFiniteParameter`, `BelowMinimum`, `AboveMaximum` for numeric
///   values.
/// - `InvalidCategory` for categorical values outside the options.
/// - `WrongParameterKind` when a numeric parameter is given a string or
///   vice versa.
pub fn validate_scenario(specs: &[ParamSpec], scenario: &Scenario) -> ModelResult<ValidatedParams> {
    let mut values = BTreeMap::new();
    for spec in specs {
        let value = match spec {
            ParamSpec::Numeric(p) => {
                check_numeric(p, scenario.get(p.name))?.map(ParamValue::Numeric)
            }
            ParamSpec::Categorical(p) => {
                check_categorical(p, scenario.get(p.name))?.map(ParamValue::Categorical)
            }
        };
        if let Some(value) = value {
            values.insert(spec.name(), value);
        }
    }
    for name in scenario.names() {
        if !specs.iter().any(|s| s.name() == name) {
            debug!(name, "ignoring scenario parameter not used by the model");
        }
    }
    Ok(ValidatedParams { values })
}

fn check_numeric(spec: &NumericParameter, value: Option<&ParamValue>) -> ModelResult<Option<f64>> {
    let name = spec.name;
    let value = match value {
        Some(ParamValue::Numeric(v)) => *v,
        Some(ParamValue::Categorical(_)) => {
            return Err(ModelError::WrongParameterKind { name, expected: "numeric" });
        }
        None => match (spec.default, spec.required) {
            (Some(default), _) => return Ok(Some(default)),
            (None, true) => return Err(ModelError::MissingParameter { name }),
            (None, false) => return Ok(None),
        },
    };
    if !value.is_finite() {
        return Err(ModelError::NonFiniteParameter { name, value });
    }
    if let Some(min) = spec.min {
        if value < min {
            return Err(ModelError::BelowMinimum { name, value, min });
        }
    }
    if let Some(max) = spec.max {
        if value > max {
            return Err(ModelError::AboveMaximum { name, value, max });
        }
    }
    Ok(Some(value))
}

fn check_categorical(
    spec: &CategoricalParameter, value: Option<&ParamValue>,
) -> ModelResult<Option<String>> {
    let name = spec.name;
    let value = match value {
        Some(ParamValue::Categorical(v)) => v,
        Some(ParamValue::Numeric(_)) => {
            return Err(ModelError::WrongParameterKind { name, expected: "categorical" });
        }
        None => match (spec.default, spec.required) {
            (Some(default), _) => return Ok(Some(default.to_string())),
            (None, true) => return Err(ModelError::MissingParameter { name }),
            (None, false) => return Ok(None),
        },
    };
    if !spec.options.contains(&value.as_str()) {
        return Err(ModelError::InvalidCategory {
            name,
            value: value.clone(),
            options: spec.options,
        });
    }
    Ok(Some(value.clone()))
}

/// Fault mechanism of the rupture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    StrikeSlip,
    Normal,
    Reverse,
}

impl Mechanism {
    pub fn abbrev(&self) -> &'static str {
        match self {
            Mechanism::StrikeSlip => "SS",
            Mechanism::Normal => "NS",
            Mechanism::Reverse => "RS",
        }
    }
}

impl FromStr for Mechanism {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SS" => Ok(Mechanism::StrikeSlip),
            "NS" => Ok(Mechanism::Normal),
            "RS" => Ok(Mechanism::Reverse),
            _ => Err(ModelError::UnknownMechanism { value: s.to_string() }),
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults, limits, options, and kind checks in `validate_scenario`.
    // - Mechanism parsing.
    // -------------------------------------------------------------------------

    const SPECS: &[ParamSpec] = &[
        ParamSpec::Numeric(NumericParameter {
            name: "mag",
            required: true,
            min: Some(5.0),
            max: None,
            default: None,
        }),
        ParamSpec::Numeric(NumericParameter {
            name: "depth",
            required: false,
            min: None,
            max: Some(20.0),
            default: None,
        }),
        ParamSpec::Categorical(CategoricalParameter {
            name: "mechanism",
            required: true,
            options: &["SS", "RS"],
            default: Some("SS"),
        }),
    ];

    #[test]
    // Purpose
    // -------
    // A scenario with only the required numeric value validates and picks
    // up the categorical default.
    //
    // Given
    // -----
    // - mag = 6.0, nothing else.
    //
    // Expect
    // ------
    // - mag = 6.0, mechanism = "SS", depth absent.
    fn validate_scenario_fills_defaults() {
        // Arrange
        let scenario = Scenario::new().with_numeric("mag", 6.0);

        // Act
        let params = validate_scenario(SPECS, &scenario).unwrap();

        // Assert
        assert_eq!(params.numeric("mag").unwrap(), 6.0);
        assert_eq!(params.categorical("mechanism").unwrap(), "SS");
        assert!(!params.contains("depth"));
        assert_eq!(params.numeric("depth"), Err(ModelError::MissingParameter { name: "depth" }));
    }

    #[test]
    // Purpose
    // -------
    // Each validation rule reports the offending parameter.
    //
    // Given
    // -----
    // - Missing mag, mag below 5, depth above 20, NaN mag, an invalid
    //   mechanism, and a string for mag.
    //
    // Expect
    // ------
    // - The matching `ModelError` variant for each.
    fn validate_scenario_rejects_invalid_values() {
        // Arrange
        let missing = Scenario::new();
        let below = Scenario::new().with_numeric("mag", 4.0);
        let above = Scenario::new().with_numeric("mag", 6.0).with_numeric("depth", 25.0);
        let nan = Scenario::new().with_numeric("mag", f64::NAN);
        let category = Scenario::new().with_numeric("mag", 6.0).with_categorical("mechanism", "NS");
        let kind = Scenario::new().with_categorical("mag", "large");

        // Act & Assert
        assert_eq!(
            validate_scenario(SPECS, &missing),
            Err(ModelError::MissingParameter { name: "mag" })
        );
        assert!(matches!(
            validate_scenario(SPECS, &below),
            Err(ModelError::BelowMinimum { name: "mag", .. })
        ));
        assert!(matches!(
            validate_scenario(SPECS, &above),
            Err(ModelError::AboveMaximum { name: "depth", .. })
        ));
        assert!(matches!(
            validate_scenario(SPECS, &nan),
            Err(ModelError::NonFiniteParameter { name: "mag", .. })
        ));
        assert!(matches!(
            validate_scenario(SPECS, &category),
            Err(ModelError::InvalidCategory { name: "mechanism", .. })
        ));
        assert!(matches!(
            validate_scenario(SPECS, &kind),
            Err(ModelError::WrongParameterKind { name: "mag", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Limits are inclusive.
    //
    // Given
    // -----
    // - mag = 5.0 exactly and depth = 20.0 exactly.
    //
    // Expect
    // ------
    // - Validation succeeds.
    fn validate_scenario_limits_are_inclusive() {
        // Arrange
        let scenario = Scenario::new().with_numeric("mag", 5.0).with_numeric("depth", 20.0);

        // Act
        let params = validate_scenario(SPECS, &scenario).unwrap();

        // Assert
        assert_eq!(params.numeric("depth").unwrap(), 20.0);
    }

    #[test]
    // Purpose
    // -------
    // Mechanism strings parse case-insensitively and render back.
    //
    // Given
    // -----
    // - "ss", "NS", "RS", and "XX".
    //
    // Expect
    // ------
    // - The three known mechanisms, and `UnknownMechanism` for "XX".
    fn mechanism_from_str_parses_abbreviations() {
        // Act & Assert
        assert_eq!("ss".parse::<Mechanism>().unwrap(), Mechanism::StrikeSlip);
        assert_eq!("NS".parse::<Mechanism>().unwrap(), Mechanism::Normal);
        assert_eq!("RS".parse::<Mechanism>().unwrap(), Mechanism::Reverse);
        assert_eq!(Mechanism::Reverse.to_string(), "RS");
        assert!(matches!(
            "XX".parse::<Mechanism>(),
            Err(ModelError::UnknownMechanism { .. })
        ));
    }
}
