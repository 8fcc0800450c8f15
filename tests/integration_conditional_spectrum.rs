//! Integration tests for the model → spectrum → conditional spectrum pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow a hazard analyst follows: load coefficient
//!   tables, evaluate a ground-motion model for a scenario, turn it into a
//!   spectrum, and condition that spectrum on target accelerations.
//! - Check that the single-period and vector solvers agree on real model
//!   output, and that error classes surface through the public API.
//!
//! Coverage
//! --------
//! - `models`:
//!   - `CoefficientTable::from_csv_reader`, `Idriss2014Coefficients::new`.
//!   - `ModelKind::from_name` and the `GroundMotionModel` provided methods.
//! - `spectrum`:
//!   - `Spectrum::interp`, `Spectrum::condition`, `Spectrum::condition_at`.
//! - `conditional`:
//!   - `calc_cond_mean_spectrum_vector` and `calc_cond_mean_spectrum` with
//!     the Baker & Jayaram (2008) correlation.
//!   - Ordering and configuration error paths.
//!
//! Exclusions
//! ----------
//! - Published Idriss (2014) coefficients: the tables below are synthetic
//!   but have the published layout.
//! - Python bindings, which are exercised from Python.
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use ndarray::Array1;
use rust_gmm::{
    conditional::{
        CSError, Conditioning, ErrorKind, calc_cond_mean_spectrum, calc_cond_mean_spectrum_vector,
    },
    correlation::BakerJayaram2008,
    models::{
        CoefficientTable, GroundMotionModel, Idriss2014Coefficients, Idriss2014Coeffs, ModelKind,
        Scenario,
    },
};

const SMALL_CSV: &str = "\
# Idriss (2014) layout, synthetic values, M <= 6.75
period,alpha_1,alpha_2,alpha_3,beta_1,beta_2,gamma,epsilon,phi
0.01,7.0,-0.2,-0.01,2.9,-0.2,-0.003,-0.85,0.08
0.1,7.8,-0.2,-0.01,2.9,-0.2,-0.003,-0.75,0.08
0.2,8.0,-0.2,-0.02,2.8,-0.19,-0.003,-0.72,0.08
0.5,6.9,-0.05,-0.03,2.6,-0.16,-0.002,-0.80,0.06
1.0,6.0,0.05,-0.04,2.5,-0.15,-0.001,-0.85,0.05
2.0,4.9,0.15,-0.05,2.4,-0.14,-0.001,-0.90,0.04
5.0,3.0,0.30,-0.06,2.3,-0.13,0.000,-0.95,0.02
";

const LARGE_CSV: &str = "\
# Idriss (2014) layout, synthetic values, M > 6.75
period,alpha_1,alpha_2,alpha_3,beta_1,beta_2,gamma,epsilon,phi
0.01,9.0,-0.5,-0.01,2.9,-0.2,-0.003,-0.85,0.08
0.1,9.8,-0.5,-0.01,2.9,-0.2,-0.003,-0.75,0.08
0.2,10.0,-0.5,-0.02,2.8,-0.19,-0.003,-0.72,0.08
0.5,8.9,-0.35,-0.03,2.6,-0.16,-0.002,-0.80,0.06
1.0,8.0,-0.25,-0.04,2.5,-0.15,-0.001,-0.85,0.05
2.0,6.9,-0.15,-0.05,2.4,-0.14,-0.001,-0.90,0.04
5.0,5.0,0.00,-0.06,2.3,-0.13,0.000,-0.95,0.02
";

/// Purpose
/// -------
/// Load the synthetic small- and large-magnitude tables into shared
/// coefficients.
///
/// Invariants
/// ----------
/// - Panics on a malformed table; that is a test configuration error.
fn coefficients() -> Arc<Idriss2014Coefficients> {
    let small = CoefficientTable::<Idriss2014Coeffs>::from_csv_reader(SMALL_CSV.as_bytes())
        .expect("small table should parse");
    let large = CoefficientTable::<Idriss2014Coeffs>::from_csv_reader(LARGE_CSV.as_bytes())
        .expect("large table should parse");
    Arc::new(Idriss2014Coefficients::new(small, large).expect("tables share a grid"))
}

/// Purpose
/// -------
/// A moderate crustal scenario: M 6.5 at 25 km on a 760 m/s site.
fn scenario() -> Scenario {
    Scenario::new().with_numeric("mag", 6.5).with_numeric("dist_rup", 25.0).with_numeric(
        "v_s30",
        760.0,
    )
}

fn model() -> ModelKind {
    ModelKind::from_name("Idriss (2014)", coefficients(), &scenario())
        .expect("scenario is within the model's limits")
}

#[test]
// Purpose
// -------
// Condition a model spectrum at two periods at once.
//
// Given
// -----
// - The Idriss (2014) spectrum for the reference scenario.
// - Targets one standard deviation above the median at 0.2 s and 1.0 s.
//
// Expect
// ------
// - Targets reproduced exactly with zero std.
// - The 0.5 s mean, between the two conditioning periods, pulled upward.
// - Every free std strictly reduced and positive.
// - The median fractile equal to exp of the conditional means.
fn model_spectrum_conditioned_on_two_periods() {
    // Arrange
    let model = model();
    let spec = model.spectrum().unwrap();
    let mu = spec.ln_mean().clone();
    let sd = spec.ln_std().clone();
    let mut targets = vec![None; spec.len()];
    targets[2] = Some(mu[2] + sd[2]);
    targets[4] = Some(mu[4] + sd[4]);
    let cond = Conditioning::from_targets(&targets).unwrap();

    // Act
    let cs = spec.condition(&cond, &BakerJayaram2008).unwrap();
    let median = cs.fractile(0.5).unwrap();

    // Assert
    assert_eq!(cs.ln_psas()[2], mu[2] + sd[2]);
    assert_eq!(cs.ln_psas()[4], mu[4] + sd[4]);
    assert_eq!(cs.ln_stds()[2], 0.0);
    assert_eq!(cs.ln_stds()[4], 0.0);
    assert!(cs.ln_psas()[3] > mu[3]);
    for i in [0, 1, 3, 5, 6] {
        assert!(cs.ln_stds()[i] < sd[i], "std not reduced at {i}");
        assert!(cs.ln_stds()[i] > 0.0);
    }
    for i in 0..spec.len() {
        assert_abs_diff_eq!(median[i], cs.ln_psas()[i].exp(), epsilon = 1e-12);
    }
}

#[test]
// Purpose
// -------
// The single-period and vector solvers agree on model output.
//
// Given
// -----
// - The model spectrum conditioned at 0.5 s on ln Sa = μ + 1.5σ.
//
// Expect
// ------
// - Identical results to 1e-10 at every period.
fn scalar_and_vector_solvers_agree_on_model_output() {
    // Arrange
    let model = model();
    let periods = model.periods().to_vec();
    let ln_psas = model.ln_resp().to_vec();
    let ln_stds = model.ln_std().to_vec();
    let target = ln_psas[3] + 1.5 * ln_stds[3];
    let mut mask = vec![false; periods.len()];
    mask[3] = true;
    let cond = Conditioning::new(mask, Array1::from_elem(periods.len(), target)).unwrap();

    // Act
    let vector =
        calc_cond_mean_spectrum_vector(&periods, &ln_psas, &ln_stds, &cond, &BakerJayaram2008)
            .unwrap();
    let scalar =
        calc_cond_mean_spectrum(&periods, &ln_psas, &ln_stds, 0.5, target, &BakerJayaram2008)
            .unwrap();

    // Assert
    for i in 0..periods.len() {
        assert_abs_diff_eq!(scalar.ln_psas()[i], vector.ln_psas()[i], epsilon = 1e-10);
        assert_abs_diff_eq!(scalar.ln_stds()[i], vector.ln_stds()[i], epsilon = 1e-10);
    }
}

#[test]
// Purpose
// -------
// Resample the model onto a user grid and condition between nodes.
//
// Given
// -----
// - The model spectrum interpolated onto [0.15, 0.3, 0.75, 1.5].
// - A conditioning period of 0.3 s (a node of the resampled grid, but not
//   of the model grid).
//
// Expect
// ------
// - The resampled medians match `interp_spec_accels`.
// - The target is reproduced at 0.3 s with zero std.
fn resampled_spectrum_conditions_at_user_period() {
    // Arrange
    let model = model();
    let grid = [0.15, 0.3, 0.75, 1.5];
    let spec = model.spectrum().unwrap().interp(&grid).unwrap();
    let target = spec.ln_mean()[1] + 0.5;

    // Act
    let accels = model.interp_spec_accels(&grid).unwrap();
    let cs = spec.condition_at(0.3, target, &BakerJayaram2008).unwrap();

    // Assert
    for i in 0..grid.len() {
        assert_abs_diff_eq!(spec.spec_accels()[i], accels[i], epsilon = 1e-12);
    }
    assert_eq!(cs.mask(), &[false, true, false, false]);
    assert_eq!(cs.ln_psas()[1], target);
    assert_eq!(cs.ln_stds()[1], 0.0);
    assert!(cs.ln_psas()[0] > spec.ln_mean()[0]);
}

#[test]
// Purpose
// -------
// Reverse faulting raises the prediction by φ and large magnitudes switch
// tables.
//
// Given
// -----
// - The reference scenario with mechanism RS, and with M 7.0.
//
// Expect
// ------
// - ln PGA(RS) − ln PGA(SS) = φ of the PGA row (0.08).
// - The M 7.0 model reads the large-magnitude PGA row.
fn mechanism_and_magnitude_change_prediction() {
    // Arrange
    let reverse = scenario().with_categorical("mechanism", "RS");
    let large = scenario().with_numeric("mag", 7.0);
    let expected_m7 = 9.0 - 0.5 * 7.0 - 0.01 * 1.5_f64.powi(2)
        - (2.9 - 0.2 * 7.0) * 35.0_f64.ln()
        - 0.003 * 25.0
        - 0.85 * 760.0_f64.ln();

    // Act
    let ss = model();
    let rs = ModelKind::from_name("I14", coefficients(), &reverse).unwrap();
    let m7 = ModelKind::from_name("I14", coefficients(), &large).unwrap();

    // Assert
    assert_abs_diff_eq!(rs.ln_resp()[0] - ss.ln_resp()[0], 0.08, epsilon = 1e-12);
    assert_abs_diff_eq!(m7.ln_resp()[0], expected_m7, epsilon = 1e-12);
}

#[test]
// Purpose
// -------
// Error classes surface through the public API.
//
// Given
// -----
// - Periods out of order; every period conditioned; dist_rup beyond the
//   model limit.
//
// Expect
// ------
// - `ErrorKind::Ordering`, `ErrorKind::Configuration`, and a model
//   validation error.
fn error_paths_surface_through_public_api() {
    // Arrange
    let unsorted = [0.2, 0.1, 0.5];
    let cond_one = Conditioning::from_targets(&[Some(-1.0), None, None]).unwrap();
    let cond_all = Conditioning::from_targets(&[Some(-1.0), Some(-1.2), Some(-1.5)]).unwrap();
    let far = scenario().with_numeric("dist_rup", 300.0);

    // Act
    let ordering = calc_cond_mean_spectrum_vector(
        &unsorted,
        &[-1.0, -1.2, -1.5],
        &[0.6, 0.6, 0.65],
        &cond_one,
        &BakerJayaram2008,
    );
    let configuration = calc_cond_mean_spectrum_vector(
        &[0.1, 0.2, 0.5],
        &[-1.0, -1.2, -1.5],
        &[0.6, 0.6, 0.65],
        &cond_all,
        &BakerJayaram2008,
    );
    let invalid = ModelKind::from_name("I14", coefficients(), &far);

    // Assert
    assert_eq!(ordering.map_err(|e| e.kind()).err(), Some(ErrorKind::Ordering));
    assert_eq!(configuration.clone().map_err(|e| e.kind()).err(), Some(ErrorKind::Configuration));
    assert_eq!(configuration.err(), Some(CSError::NoFreePeriods));
    assert!(invalid.is_err());
}
