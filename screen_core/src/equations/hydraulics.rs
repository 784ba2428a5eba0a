//! # Hydraulic Formulas
//!
//! Head loss across a partially blinded bar grate. `p` is the blinded
//! fraction of the open area (0.1 = 10 % of the gaps clogged).
//!
//! ## Notation
//!
//! - `s` = clear gap between bars (m)
//! - `b` = bar width (m)
//! - `B` = clear screen width (m)
//! - `Q` = volume flow (m³/s)
//! - `k` = bar shape factor
//! - `α` = tilt angle of the grate

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.80665;

/// Open share of the grate face: e = s / (s + b)
#[inline]
pub fn efficiency(gap_m: f64, bar_width_m: f64) -> f64 {
    gap_m / (gap_m + bar_width_m)
}

/// Relative flow area of a grate blinded by fraction `p`: e - p·e
#[inline]
pub fn relative_flow_area(gap_m: f64, bar_width_m: f64, blinding: f64) -> f64 {
    gap_m / (gap_m + bar_width_m) - blinding * gap_m / (bar_width_m + gap_m)
}

/// Equivalent thickening of each bar caused by blinding (m).
#[inline]
pub fn blinding_factor(gap_m: f64, bar_width_m: f64, relative_flow_area: f64) -> f64 {
    gap_m - relative_flow_area * (gap_m + bar_width_m)
}

/// Free term of the level-difference cubic (m³).
///
/// # Formula
/// - d = (Q / B / (e·(1-p)))² / 2g · sin α · k · ((b + f) / (s - f))^(4/3)
#[allow(clippy::too_many_arguments)]
pub fn loss_term(
    water_flow_m3s: f64,
    inner_screen_width_m: f64,
    efficiency: f64,
    blinding: f64,
    tilt_angle_rad: f64,
    shape_factor: f64,
    bar_width_m: f64,
    gap_m: f64,
    blinding_factor: f64,
) -> f64 {
    let velocity = water_flow_m3s / inner_screen_width_m / (efficiency * (1.0 - blinding));
    velocity.powi(2) / (2.0 * GRAVITY)
        * tilt_angle_rad.sin()
        * shape_factor
        * ((bar_width_m + blinding_factor) / (gap_m - blinding_factor)).powf(4.0 / 3.0)
}

/// Level difference across the grate (m).
///
/// Real root of the cubic `x³ + b·x² + c·x - d = 0` with `b = 2·h` and
/// `c = h²` for final level `h`, in closed (Cardano) form.
pub fn level_difference(final_level_m: f64, d: f64) -> f64 {
    let b = 2.0 * final_level_m;
    let c = final_level_m.powi(2);
    let discriminant = 27.0 * d.powi(2) + 18.0 * b * c * d + 4.0 * c.powi(3)
        - 4.0 * b.powi(3) * d
        - b.powi(2) * c.powi(2);
    let root = (27.0 * d + 9.0 * b * c - 2.0 * b.powi(3) + 5.19615 * discriminant.sqrt()).cbrt();
    let shift = 2187.0 * c - 729.0 * b.powi(2);
    0.264567 * root - 0.000576096 * shift / root - 0.333333 * b
}

/// Mean velocity through the open gaps (m/s).
#[inline]
pub fn gap_velocity(water_flow_m3s: f64, inner_screen_width_m: f64, start_level_m: f64, efficiency: f64, blinding: f64) -> f64 {
    water_flow_m3s / (inner_screen_width_m * start_level_m * efficiency * (1.0 - blinding))
}

/// Mean velocity in the channel upstream of the screen (m/s).
#[inline]
pub fn upstream_velocity(water_flow_m3s: f64, channel_width_m: f64, start_level_m: f64) -> f64 {
    water_flow_m3s / (channel_width_m * start_level_m)
}
