//! Interpolation of spectral ordinates in log-period.
//!
//! Response spectra are tabulated on sparse, roughly log-spaced period
//! grids, so values are interpolated linearly against `ln(T)`. Callers
//! interpolate either log-values (`ln_mean`, giving log-log interpolation of
//! the spectral acceleration) or standard deviations.

/// Linear interpolation of `fp` against `ln(xp)`, evaluated at `ln(x)`.
///
/// Parameters
/// ----------
/// - `xp`: `&[f64]`
///   Strictly increasing, positive grid (validated by the caller).
/// - `fp`: `&[f64]`
///   Ordinates aligned with `xp`.
/// - `x`: `f64`
///   Query period with `xp[0] <= x <= xp[last]`.
///
/// Returns
/// -------
/// `f64`
///   The interpolated ordinate; exact grid values are returned unchanged.
///
/// Panics
/// ------
/// - If `xp` is empty or `fp` is shorter than `xp`. Range checks on `x` are
///   the caller's responsibility; out-of-range queries return the first or
///   last ordinate.
pub fn interp_log_period(xp: &[f64], fp: &[f64], x: f64) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    // First grid index strictly above x; 1 <= hi <= last here.
    let hi = xp.partition_point(|&p| p <= x);
    let lo = hi - 1;
    if xp[lo] == x {
        return fp[lo];
    }
    let w = (x.ln() - xp[lo].ln()) / (xp[hi].ln() - xp[lo].ln());
    fp[lo] + w * (fp[hi] - fp[lo])
}
