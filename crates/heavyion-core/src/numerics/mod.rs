//! Small numeric helpers shared by the physics kernels.

/// Round `value` half away from zero to `decimals` places.
///
/// Only used at presentation boundaries; kernels keep full precision.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // avoid rendering -0.000
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// `ln(1 + e^x)` that stays finite for large `x`.
///
/// Above `overflow_threshold` the asymptote `x` is returned directly; for
/// strongly negative `x` the result decays smoothly to zero via `ln_1p`.
pub fn log_one_plus_exp(x: f64, overflow_threshold: f64) -> f64 {
    if x > overflow_threshold {
        x
    } else {
        x.exp().ln_1p()
    }
}

/// Sum of the cube roots of two mass numbers, the recurring `A_p^(1/3) + A_t^(1/3)`.
pub fn cube_root_sum(ap: f64, at: f64) -> f64 {
    ap.cbrt() + at.cbrt()
}
