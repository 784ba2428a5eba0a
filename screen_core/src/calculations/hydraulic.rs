//! # Hydraulic Assessment
//!
//! Optional check of the screen against a design flow: the water level
//! ahead of the grate and the flow velocities at four degrees of blinding.
//! Runs only when the input carries [`HydraulicInput`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::derivation::Derivation;
use super::envelope::Envelope;
use super::screen::ScreenInput;
use crate::equations::hydraulics;
use crate::errors::{CalcError, CalcResult};

/// Standard tilt of the grate (deg)
pub const DEFAULT_TILT_ANGLE_DEG: f64 = 80.0;
/// Flattest allowed tilt (deg)
pub const MIN_TILT_ANGLE_DEG: f64 = 45.0;
/// Steepest allowed tilt (deg)
pub const MAX_TILT_ANGLE_DEG: f64 = 90.0;

/// Blinded fractions of the grate the assessment is evaluated at
pub const BLINDING_LEVELS: [f64; 4] = [0.1, 0.2, 0.3, 0.4];

fn default_tilt_angle() -> f64 {
    DEFAULT_TILT_ANGLE_DEG
}

/// Design flow conditions.
///
/// ## JSON Example
///
/// ```json
/// { "water_flow_m3s": 0.25, "final_level_m": 0.5, "tilt_angle_deg": 80.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicInput {
    /// Volume flow through the channel (m³/s)
    pub water_flow_m3s: f64,
    /// Water level downstream of the screen (m)
    pub final_level_m: f64,
    /// Grate tilt from horizontal (deg)
    #[serde(default = "default_tilt_angle")]
    pub tilt_angle_deg: f64,
}

impl HydraulicInput {
    pub fn new(water_flow_m3s: f64, final_level_m: f64) -> Self {
        Self {
            water_flow_m3s,
            final_level_m,
            tilt_angle_deg: DEFAULT_TILT_ANGLE_DEG,
        }
    }

    /// Validate the raw values (positivity, finiteness).
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.water_flow_m3s.is_finite() && self.water_flow_m3s > 0.0) {
            return Err(CalcError::invalid_input(
                "water_flow_m3s",
                self.water_flow_m3s.to_string(),
                "Water flow must be positive",
            ));
        }
        if !(self.final_level_m.is_finite() && self.final_level_m > 0.0) {
            return Err(CalcError::invalid_input(
                "final_level_m",
                self.final_level_m.to_string(),
                "Final water level must be positive",
            ));
        }
        if !self.tilt_angle_deg.is_finite() {
            return Err(CalcError::invalid_input(
                "tilt_angle_deg",
                self.tilt_angle_deg.to_string(),
                "Tilt angle must be a number",
            ));
        }
        Ok(())
    }
}

/// Hydraulic state at one degree of blinding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicPoint {
    /// Blinded fraction of the grate (0.1 = 10 %)
    pub blinding: f64,
    pub relative_flow_area: f64,
    /// Equivalent bar thickening (m)
    pub blinding_factor_m: f64,
    /// Level rise across the grate (m)
    pub level_difference_m: f64,
    /// Water level ahead of the grate (m)
    pub start_level_m: f64,
    /// Channel velocity ahead of the screen (m/s)
    pub upstream_velocity_ms: f64,
    /// Velocity through the open gaps (m/s)
    pub gap_velocity_ms: f64,
}

/// Check the operating point against the channel and the grate.
pub fn check_operating_point(input: &ScreenInput, hydraulic: &HydraulicInput, envelope: &Envelope) -> CalcResult<()> {
    if hydraulic.final_level_m >= input.channel_height_m {
        return Err(CalcError::WaterAboveChannel {
            final_level_m: hydraulic.final_level_m,
            channel_height_m: input.channel_height_m,
        });
    }
    if hydraulic.final_level_m >= envelope.inner_screen_height_m {
        return Err(CalcError::WaterAboveGrate {
            final_level_m: hydraulic.final_level_m,
            inner_screen_height_m: envelope.inner_screen_height_m,
        });
    }
    if !(MIN_TILT_ANGLE_DEG..=MAX_TILT_ANGLE_DEG).contains(&hydraulic.tilt_angle_deg) {
        return Err(CalcError::TiltAngleOutOfRange {
            tilt_angle_deg: hydraulic.tilt_angle_deg,
            min_deg: MIN_TILT_ANGLE_DEG,
            max_deg: MAX_TILT_ANGLE_DEG,
        });
    }
    Ok(())
}

/// Evaluate the grate at every blinding level.
pub fn assess(
    input: &ScreenInput,
    hydraulic: &HydraulicInput,
    derivation: &Derivation,
    envelope: &Envelope,
) -> CalcResult<Vec<HydraulicPoint>> {
    check_operating_point(input, hydraulic, envelope)?;

    let gap = input.gap_m;
    let bar = derivation.profile_width_m;
    let efficiency = hydraulics::efficiency(gap, bar);
    let tilt = hydraulic.tilt_angle_deg.to_radians();

    BLINDING_LEVELS
        .iter()
        .map(|&blinding| {
            let relative_flow_area = hydraulics::relative_flow_area(gap, bar, blinding);
            let blinding_factor = hydraulics::blinding_factor(gap, bar, relative_flow_area);
            let d = hydraulics::loss_term(
                hydraulic.water_flow_m3s,
                derivation.inner_screen_width_m,
                efficiency,
                blinding,
                tilt,
                input.filter_profile.shape_factor(),
                bar,
                gap,
                blinding_factor,
            );
            let level_difference_m = hydraulics::level_difference(hydraulic.final_level_m, d);
            let start_level_m = hydraulic.final_level_m + level_difference_m;
            let point = HydraulicPoint {
                blinding,
                relative_flow_area,
                blinding_factor_m: blinding_factor,
                level_difference_m,
                start_level_m,
                upstream_velocity_ms: hydraulics::upstream_velocity(
                    hydraulic.water_flow_m3s,
                    input.channel_width_m,
                    start_level_m,
                ),
                gap_velocity_ms: hydraulics::gap_velocity(
                    hydraulic.water_flow_m3s,
                    derivation.inner_screen_width_m,
                    start_level_m,
                    efficiency,
                    blinding,
                ),
            };
            if !point.start_level_m.is_finite() || !point.gap_velocity_ms.is_finite() {
                return Err(CalcError::internal(format!(
                    "non-finite hydraulic result at blinding {}",
                    blinding
                )));
            }
            debug!(blinding, level_difference_m, "hydraulic point");
            Ok(point)
        })
        .collect()
}
