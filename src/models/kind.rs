//! models::kind — closed set of available ground-motion models.
//!
//! [`ModelKind`] lets callers hold any available model behind one concrete
//! type (for instance in a `Vec` or across the Python boundary) while still
//! going through [`GroundMotionModel`]. Adding a model means adding a variant
//! and one arm per delegating method.
use std::sync::Arc;

use ndarray::Array1;

use crate::models::{
    coefficients::Idriss2014Coefficients,
    errors::{ModelError, ModelResult},
    idriss_2014::Idriss2014,
    params::Scenario,
    traits::GroundMotionModel,
};

/// Tagged union over the crate's ground-motion models.
#[derive(Debug, Clone)]
pub enum ModelKind {
    Idriss2014(Idriss2014),
}

impl ModelKind {
    /// Construct a model by display name or abbreviation.
    ///
    /// Parameters
    /// ----------
    /// - `name`: `&str`
    ///   `"Idriss (2014)"` or `"I14"` (abbreviations are case-insensitive).
    /// - `coeffs`: `Arc<Idriss2014Coefficients>`
    ///   Coefficient tables for the requested model.
    /// - `scenario`: `&Scenario`
    ///
    /// Errors
    /// ------
    /// - `ModelError::UnknownModel` for an unrecognized name.
    /// - Any construction error of the selected model.
    pub fn from_name(
        name: &str, coeffs: Arc<Idriss2014Coefficients>, scenario: &Scenario,
    ) -> ModelResult<Self> {
        let name = name.trim();
        if name == Idriss2014::NAME || name.eq_ignore_ascii_case(Idriss2014::ABBREV) {
            return Ok(ModelKind::Idriss2014(Idriss2014::new(coeffs, scenario)?));
        }
        Err(ModelError::UnknownModel { name: name.to_string() })
    }

    fn inner(&self) -> &dyn GroundMotionModel {
        match self {
            ModelKind::Idriss2014(m) => m,
        }
    }
}

impl From<Idriss2014> for ModelKind {
    fn from(model: Idriss2014) -> Self {
        ModelKind::Idriss2014(model)
    }
}

impl GroundMotionModel for ModelKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn abbrev(&self) -> &'static str {
        self.inner().abbrev()
    }

    fn periods(&self) -> &Array1<f64> {
        self.inner().periods()
    }

    fn ln_resp(&self) -> &Array1<f64> {
        self.inner().ln_resp()
    }

    fn ln_std(&self) -> &Array1<f64> {
        self.inner().ln_std()
    }

    fn index_pga(&self) -> Option<usize> {
        self.inner().index_pga()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coefficients::{CoefficientTable, Idriss2014Coeffs};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Name/abbreviation lookup and delegation to the wrapped model.
    // -------------------------------------------------------------------------

    fn tables() -> Arc<Idriss2014Coefficients> {
        let row = |period: f64| Idriss2014Coeffs {
            period,
            alpha_1: 1.0,
            alpha_2: 0.0,
            alpha_3: 0.0,
            beta_1: 0.0,
            beta_2: 0.0,
            gamma: 0.0,
            epsilon: 0.0,
            phi: 0.0,
        };
        let table = CoefficientTable::from_rows(vec![row(0.01), row(1.0)]).unwrap();
        Arc::new(Idriss2014Coefficients::new(table.clone(), table).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // Build by abbreviation and delegate the trait methods.
    //
    // Given
    // -----
    // - Constant tables with ln Sa = 1 at every period; name "i14".
    //
    // Expect
    // ------
    // - name "Idriss (2014)", PGA = e, and an `UnknownModel` error for "XYZ".
    fn from_name_builds_and_delegates() {
        // Arrange
        let scenario = Scenario::new()
            .with_numeric("mag", 6.0)
            .with_numeric("dist_rup", 10.0)
            .with_numeric("v_s30", 760.0);

        // Act
        let model = ModelKind::from_name("i14", tables(), &scenario).unwrap();
        let unknown = ModelKind::from_name("XYZ", tables(), &scenario);

        // Assert
        assert_eq!(model.name(), "Idriss (2014)");
        assert_eq!(model.abbrev(), "I14");
        assert_eq!(model.periods().len(), 2);
        assert_eq!(model.pga(), Some(1.0_f64.exp()));
        assert!(matches!(unknown, Err(ModelError::UnknownModel { .. })));
    }
}
