//! # Installation Envelope
//!
//! Clearances the installer needs (clear grate height, discharge opening)
//! and the catalogued drive power. Reported alongside the mass; none of it
//! feeds the bill of materials.

use serde::{Deserialize, Serialize};

use super::screen::ScreenInput;
use crate::equations::geometry;

/// Envelope dimensions and drive selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Clear height of the grate (m)
    pub inner_screen_height_m: f64,
    /// Width of the discharge opening (m)
    pub discharge_width_m: f64,
    /// Channel floor to discharge (m)
    pub discharge_full_height_m: f64,
    /// Channel rim to discharge (m)
    pub discharge_height_m: f64,
    /// Catalogued drive power (W); `None` when no drive covers the size
    pub drive_power_w: Option<f64>,
}

impl Envelope {
    pub fn compute(input: &ScreenInput) -> Self {
        let discharge_full_height_m = geometry::discharge_full_height(input.screen_height_code);
        Envelope {
            inner_screen_height_m: geometry::inner_screen_height(input.grate_height_code),
            discharge_width_m: geometry::discharge_width(input.screen_width_code),
            discharge_full_height_m,
            discharge_height_m: discharge_full_height_m - input.channel_height_m,
            drive_power_w: geometry::drive_power(input.screen_width_code, input.screen_height_code),
        }
    }
}
