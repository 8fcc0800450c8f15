//! correlation::baker_jayaram — Baker & Jayaram (2008) correlation model.
//!
//! Purpose
//! -------
//! Implement the empirical correlation of ε (the normalized residual of
//! log spectral acceleration) between two periods, from Baker & Jayaram
//! (2008, Earthquake Spectra 24(1), 299–317), fitted to the NGA database.
//!
//! Key behaviors
//! -------------
//! - Evaluate the piecewise closed-form coefficient ρ(T₁, T₂) through
//!   [`BakerJayaram2008::correl_pair`].
//! - Implement [`PeriodCorrelation`] so the model plugs directly into the
//!   conditional spectrum solvers.
//!
//! Invariants & assumptions
//! ------------------------
//! - ρ is symmetric in its arguments and equals 1 (up to rounding) when the
//!   periods coincide.
//! - The model was fitted on 0.01 s ≤ T ≤ 10 s. Periods outside that range
//!   are evaluated with the same formula and not rejected.
//!
//! Conventions
//! -----------
//! - With `T_min = min(T₁, T₂)` and `T_max = max(T₁, T₂)`:
//!   - `C₁ = 1 − cos(π/2 − 0.366 ln(T_max / max(T_min, 0.109)))`
//!   - `C₂ = 1 − 0.105 (1 − 1/(1 + e^{100 T_max − 5})) (T_max − T_min)/(T_max − 0.0099)`
//!     for `T_max < 0.2`, otherwise 0
//!   - `C₃ = C₂` if `T_max < 0.109`, otherwise `C₁`
//!   - `C₄ = C₁ + ½ (√C₃ − C₃)(1 + cos(π T_min / 0.109))`
//!
//! Testing notes
//! -------------
//! - Unit tests check symmetry, the unit diagonal, decay with period
//!   separation, and reference values in each branch.
use std::f64::consts::{FRAC_PI_2, PI};

use ndarray::Array1;

use crate::correlation::traits::PeriodCorrelation;

/// Corner period separating the short-period branches (s).
const T_CORNER: f64 = 0.109;

/// Upper limit of the short-period C₂ term (s).
const T_SHORT: f64 = 0.2;

/// BakerJayaram2008 — NGA-based inter-period correlation of ε.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakerJayaram2008;

impl BakerJayaram2008 {
    /// Correlation coefficient between ε at periods `t1` and `t2` (s).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_gmm::correlation::BakerJayaram2008;
    /// let rho = BakerJayaram2008::correl_pair(0.2, 1.0);
    /// assert!((rho - 0.4444).abs() < 1e-3);
    /// assert_eq!(rho, BakerJayaram2008::correl_pair(1.0, 0.2));
    /// ```
    pub fn correl_pair(t1: f64, t2: f64) -> f64 {
        if t1 == t2 {
            return 1.0;
        }
        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let c1 = 1.0 - (FRAC_PI_2 - 0.366 * (t_max / t_min.max(T_CORNER)).ln()).cos();
        let c2 = if t_max < T_SHORT {
            1.0 - 0.105
                * (1.0 - 1.0 / (1.0 + (100.0 * t_max - 5.0).exp()))
                * (t_max - t_min)
                / (t_max - 0.0099)
        } else {
            0.0
        };
        let c3 = if t_max < T_CORNER { c2 } else { c1 };
        let c4 = c1 + 0.5 * (c3.sqrt() - c3) * (1.0 + (PI * t_min / T_CORNER).cos());

        if t_max < T_CORNER {
            c2
        } else if t_min > T_CORNER {
            c1
        } else if t_max < T_SHORT {
            c2.min(c4)
        } else {
            c4
        }
    }
}

impl PeriodCorrelation for BakerJayaram2008 {
    fn correl(&self, periods: &[f64], period_ref: f64) -> Array1<f64> {
        periods.iter().map(|&p| BakerJayaram2008::correl_pair(p, period_ref)).collect()
    }
}
