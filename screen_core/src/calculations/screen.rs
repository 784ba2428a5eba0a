//! # Bar Screen Calculation
//!
//! Derives the specification of a mechanically raked bar screen from its
//! installation parameters: geometry, bill of materials, total mass,
//! designation and standard-size flag, with an audit trail of every step.
//!
//! ## Pipeline
//!
//! ```text
//! ScreenInput ─validate─► derivation (gates 1-4) ─► envelope
//!     ─► hydraulics (optional, gated) ─► bill of materials ─► designation
//!     ─► ScreenResult
//! ```
//!
//! Any gate failure ends the calculation with a [`CalcError`]; the partial
//! trace is dropped.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::calculations::screen::{calculate, ScreenInput};
//! use screen_core::catalog::FilterProfile;
//!
//! let input = ScreenInput {
//!     screen_width_code: 10,
//!     screen_height_code: 12,
//!     grate_height_code: 12,
//!     channel_width_m: 1.05,
//!     channel_height_m: 1.0,
//!     filter_profile: FilterProfile::Medium,
//!     gap_m: 0.01,
//!     hydraulics: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.designation, "РКЭ 1012.777.10");
//! assert!(result.is_standard_size);
//! println!("Mass: {:.1} kg", result.total_mass_kg);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::assembly::{self, Assembly};
use super::derivation::{self, Derivation};
use super::envelope::Envelope;
use super::hydraulic::{self, HydraulicInput, HydraulicPoint};
use crate::catalog::{self, FilterProfile, SizeCode};
use crate::designation;
use crate::errors::{CalcError, CalcResult};
use crate::trace::{TraceEntry, TraceRecorder};

/// Installation parameters of a screen.
///
/// Lengths are in meters. The size codes are catalog indices.
///
/// ## JSON Example
///
/// ```json
/// {
///   "screen_width_code": 10,
///   "screen_height_code": 12,
///   "grate_height_code": 12,
///   "channel_width_m": 1.05,
///   "channel_height_m": 1.0,
///   "filter_profile": "medium",
///   "gap_m": 0.01
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenInput {
    /// Nominal width size code of the screen
    pub screen_width_code: SizeCode,

    /// Nominal height size code of the screen
    pub screen_height_code: SizeCode,

    /// Height size code of the filtering grate
    pub grate_height_code: SizeCode,

    /// Channel width in meters
    pub channel_width_m: f64,

    /// Channel depth in meters
    pub channel_height_m: f64,

    /// Cross-section of the grate bars
    pub filter_profile: FilterProfile,

    /// Clear gap between bars in meters
    pub gap_m: f64,

    /// Design flow for the optional hydraulic assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydraulics: Option<HydraulicInput>,
}

impl ScreenInput {
    /// Validate the raw values before any derivation.
    ///
    /// This is the domain check of the bundle itself; the product gates run
    /// during the derivation.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, code) in [
            ("screen_width_code", self.screen_width_code),
            ("screen_height_code", self.screen_height_code),
            ("grate_height_code", self.grate_height_code),
        ] {
            if code <= 0 {
                return Err(CalcError::invalid_input(field, code.to_string(), "Size code must be positive"));
            }
            if code > catalog::MAX_SIZE_CODE {
                return Err(CalcError::invalid_input(
                    field,
                    code.to_string(),
                    format!("Size code must not exceed {}", catalog::MAX_SIZE_CODE),
                ));
            }
        }
        for (field, value, reason) in [
            ("channel_width_m", self.channel_width_m, "Channel width must be positive"),
            ("channel_height_m", self.channel_height_m, "Channel height must be positive"),
            ("gap_m", self.gap_m, "Gap must be positive"),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), reason));
            }
        }
        for (field, value) in [
            ("channel_width_m", self.channel_width_m),
            ("channel_height_m", self.channel_height_m),
        ] {
            if value > catalog::MAX_CHANNEL_DIMENSION_M {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Channel dimension must not exceed {} m", catalog::MAX_CHANNEL_DIMENSION_M),
                ));
            }
        }
        if let Some(hydraulics) = &self.hydraulics {
            hydraulics.validate()?;
        }
        Ok(())
    }
}

/// Calculation switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcOptions {
    /// Heavy version of the drive unit (adds a fixed increment to its mass)
    #[serde(default)]
    pub heavy_drive: bool,
}

/// Complete specification of a calculated screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Catalog designation, e.g. `РКЭ 1012.777.10`
    pub designation: String,

    /// Total assembly mass (kg)
    pub total_mass_kg: f64,

    /// Whether the size lies in the catalogued range; otherwise the mass is
    /// an extrapolation
    pub is_standard_size: bool,

    /// Formatted calculation steps in computation order
    pub trace: Vec<TraceEntry>,

    /// Derived geometry
    pub derivation: Derivation,

    /// Installation envelope and drive power
    pub envelope: Envelope,

    /// Bill of materials the total mass is rolled up from
    pub breakdown: Assembly,

    /// Hydraulic assessment, when flow conditions were given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydraulics: Option<Vec<HydraulicPoint>>,
}

impl ScreenResult {
    /// Pretty JSON of the whole result
    pub fn to_json_pretty(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Calculate a screen with default options.
///
/// # Returns
///
/// * `Ok(ScreenResult)` - full specification
/// * `Err(CalcError)` - invalid input or a failed gate
pub fn calculate(input: &ScreenInput) -> CalcResult<ScreenResult> {
    calculate_with_options(input, &CalcOptions::default())
}

/// Calculate a screen with explicit options.
pub fn calculate_with_options(input: &ScreenInput, options: &CalcOptions) -> CalcResult<ScreenResult> {
    input.validate()?;

    let mut trace = TraceRecorder::new();
    let derivation = derivation::derive(input, &mut trace)?;
    let envelope = Envelope::compute(input);

    let hydraulics = match &input.hydraulics {
        Some(conditions) => Some(hydraulic::assess(input, conditions, &derivation, &envelope)?),
        None => None,
    };

    let breakdown = assembly::build(input, &derivation, options, &mut trace);
    let total_mass_kg = breakdown.mass_kg();
    if !total_mass_kg.is_finite() {
        return Err(CalcError::internal("total mass is not a finite number"));
    }

    let designation = designation::encode(input, derivation.channel_size_code);
    let is_standard_size = catalog::is_standard_size(input.screen_width_code, input.screen_height_code);
    if !is_standard_size {
        warn!(
            screen_width_code = input.screen_width_code,
            screen_height_code = input.screen_height_code,
            "size outside the standard range, mass is approximate"
        );
    }
    info!(%designation, total_mass_kg, "screen calculated");

    Ok(ScreenResult {
        designation,
        total_mass_kg,
        is_standard_size,
        trace: trace.into_entries(),
        derivation,
        envelope,
        breakdown,
        hydraulics,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Width 10, height 12, grate 12, 1.05 x 1.00 m channel, 777 bars, 10 mm gap
    pub(crate) fn reference_input() -> ScreenInput {
        ScreenInput {
            screen_width_code: 10,
            screen_height_code: 12,
            grate_height_code: 12,
            channel_width_m: 1.05,
            channel_height_m: 1.0,
            filter_profile: FilterProfile::Medium,
            gap_m: 0.01,
            hydraulics: None,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&reference_input()).unwrap();
        assert_eq!(result.designation, "РКЭ 1012.777.10");
        assert!((result.total_mass_kg - 727.8313).abs() < 1e-9);
        assert!(result.is_standard_size);
        assert_eq!(result.trace.len(), 54);
        assert!(result.hydraulics.is_none());
    }

    #[test]
    fn test_reference_trace_head() {
        let result = calculate(&reference_input()).unwrap();
        let head: Vec<&str> = result.trace.iter().take(13).map(|e| e.text.as_str()).collect();
        assert_eq!(
            head,
            vec![
                "Channel width size code: 10",
                "Height from channel floor to screen pivot: 2.212 m",
                "Stand height from channel rim to screen pivot: 1.212 m",
                "Stand height size code: 13",
                "Clear screen width: 0.868 m",
                "Filter bar width: 0.0078 m",
                "Filter bar count: 49",
                "Channel/screen width code difference: 0",
                "Table height size code: 10",
                "Front cover height size code: 10",
                "Chain length: 5.600 m",
                "Rake count: 7",
                "Front cover count: 2",
            ]
        );
        for (i, entry) in result.trace.iter().enumerate() {
            assert_eq!(entry.index, i + 1);
        }
        assert_eq!(
            result.trace.last().unwrap().text,
            "Mass of screen (РКЭ-00.00.00.00): 727.8 kg"
        );
    }

    #[test]
    fn test_total_matches_breakdown() {
        let result = calculate(&reference_input()).unwrap();
        assert_eq!(result.total_mass_kg.to_bits(), result.breakdown.mass_kg().to_bits());
    }

    #[test]
    fn test_deterministic() {
        let a = calculate(&reference_input()).unwrap();
        let b = calculate(&reference_input()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_mass_kg.to_bits(), b.total_mass_kg.to_bits());
        assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());

        let mut bad = reference_input();
        bad.gap_m = 0.5;
        assert_eq!(
            calculate(&bad).unwrap_err().to_string(),
            calculate(&bad).unwrap_err().to_string()
        );
    }

    #[test]
    fn test_gate_one_boundary() {
        let mut input = reference_input();
        input.grate_height_code = 15;
        let result = calculate(&input).unwrap();
        assert!((result.total_mass_kg - 748.0402).abs() < 1e-9);
        assert_eq!(result.designation, "РКЭ 1012(0015).777.10");

        input.grate_height_code = 16;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().starts_with("Screen too tall for grate"));
    }

    #[test]
    fn test_gate_two_boundary() {
        let mut input = reference_input();
        for (width, code) in [(1.1, 10), (1.2, 11), (1.3, 12)] {
            input.channel_width_m = width;
            let result = calculate(&input).unwrap();
            assert_eq!(result.derivation.channel_size_code, code);
            assert_eq!(result.derivation.width_code_difference, code - 10);
        }

        input.channel_width_m = 1.0;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().starts_with("Channel too narrow"));

        input.channel_width_m = 1.4;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().starts_with("Channel too wide"));
    }

    #[test]
    fn test_gate_three_boundary() {
        let mut input = reference_input();
        input.channel_height_m = 1.5;
        assert_eq!(calculate(&input).unwrap().derivation.stand_size_code, 7);

        input.channel_height_m = 1.7;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err, CalcError::ChannelTooDeep { stand_size_code: 4 });
        assert!(err.to_string().starts_with("Channel too deep"));
    }

    #[test]
    fn test_gate_four_boundary() {
        let mut input = reference_input();
        // (0.868 - 0.35) / (0.0078 + 0.35) = 1.45 -> 2 bars
        input.gap_m = 0.35;
        assert_eq!(calculate(&input).unwrap().derivation.profile_count, 2);

        // (0.868 - 0.5) / (0.0078 + 0.5) = 0.72 -> 1 bar
        input.gap_m = 0.5;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err, CalcError::GapTooLarge { profile_count: 1 });
        assert!(err.to_string().starts_with("Gap too large"));
    }

    #[test]
    fn test_designation_block_presence() {
        let nominal = calculate(&reference_input()).unwrap();
        assert!(!nominal.designation.contains('('));

        let mut input = reference_input();
        input.channel_width_m = 1.2;
        let wider = calculate(&input).unwrap();
        assert_eq!(wider.designation, "РКЭ 1012(1100).777.10");
    }

    #[test]
    fn test_non_standard_size() {
        let input = ScreenInput {
            screen_width_code: 25,
            screen_height_code: 31,
            grate_height_code: 31,
            channel_width_m: 2.6,
            channel_height_m: 2.0,
            filter_profile: FilterProfile::Wide,
            gap_m: 0.02,
            hydraulics: None,
        };
        let result = calculate(&input).unwrap();
        assert!(!result.is_standard_size);
        assert_eq!(result.designation, "РКЭ 2531.3999.20");
        assert_eq!(result.derivation.stand_size_code, 22);
        assert!((result.total_mass_kg - 1500.3902).abs() < 1e-9);
        assert_eq!(result.envelope.drive_power_w, None);
    }

    #[test]
    fn test_small_screen_uses_chain_table() {
        let input = ScreenInput {
            screen_width_code: 10,
            screen_height_code: 6,
            grate_height_code: 6,
            channel_width_m: 1.05,
            channel_height_m: 0.5,
            filter_profile: FilterProfile::Narrow,
            gap_m: 0.005,
            hydraulics: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.derivation.chain_length_m, 3.528);
        assert_eq!(result.derivation.rake_count, 4);
        assert_eq!(result.derivation.stand_size_code, 10);
        assert!((result.total_mass_kg - 596.72748).abs() < 1e-9);
        assert_eq!(result.envelope.drive_power_w, Some(370.0));
    }

    #[test]
    fn test_wide_frame_variant() {
        let input = ScreenInput {
            screen_width_code: 16,
            screen_height_code: 21,
            grate_height_code: 24,
            channel_width_m: 1.75,
            channel_height_m: 1.3,
            filter_profile: FilterProfile::Wide,
            gap_m: 0.012,
            hydraulics: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.derivation.cover_count, 4);
        assert_eq!(result.derivation.rake_count, 9);
        assert_eq!(result.designation, "РКЭ 1621(0024).3999.12");
        assert!((result.total_mass_kg - 1048.3779).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_drive_option() {
        let light = calculate(&reference_input()).unwrap();
        let heavy = calculate_with_options(&reference_input(), &CalcOptions { heavy_drive: true }).unwrap();
        assert!((heavy.total_mass_kg - light.total_mass_kg - catalog::HEAVY_DRIVE_INCREMENT_KG).abs() < 1e-9);
        assert_eq!(heavy.designation, light.designation);
    }

    #[test]
    fn test_hydraulics_included_when_requested() {
        let mut input = reference_input();
        input.hydraulics = Some(HydraulicInput::new(0.25, 0.5));
        let result = calculate(&input).unwrap();
        let points = result.hydraulics.unwrap();
        assert_eq!(points.len(), 4);
        assert!((points[0].start_level_m - 0.5497).abs() < 1e-3);
        // the trail does not change
        assert_eq!(result.trace.len(), 54);
    }

    #[test]
    fn test_invalid_inputs_rejected_before_gates() {
        let mut input = reference_input();
        input.gap_m = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = reference_input();
        input.channel_width_m = f64::NAN;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = reference_input();
        input.screen_width_code = 0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_out_of_range_magnitudes_are_rejected() {
        let mut input = reference_input();
        input.screen_height_code = i32::MAX;
        input.grate_height_code = i32::MAX;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("screen_height_code"));

        let mut input = reference_input();
        input.channel_height_m = 1e12;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("channel_height_m"));

        let mut input = reference_input();
        input.channel_width_m = 1e12;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_largest_accepted_values_do_not_overflow() {
        let mut input = reference_input();
        input.screen_width_code = catalog::MAX_SIZE_CODE;
        input.screen_height_code = catalog::MAX_SIZE_CODE;
        input.grate_height_code = catalog::MAX_SIZE_CODE;
        input.channel_width_m = catalog::MAX_CHANNEL_DIMENSION_M;
        // channel code 199 is far wider than the screen
        assert!(matches!(calculate(&input), Err(CalcError::ChannelTooWide { .. })));

        let mut input = reference_input();
        input.channel_height_m = catalog::MAX_CHANNEL_DIMENSION_M;
        assert!(matches!(calculate(&input), Err(CalcError::ChannelTooDeep { .. })));
    }

    #[test]
    fn test_input_json_roundtrip() {
        let json = r#"{
            "screen_width_code": 10,
            "screen_height_code": 12,
            "grate_height_code": 12,
            "channel_width_m": 1.05,
            "channel_height_m": 1.0,
            "filter_profile": "medium",
            "gap_m": 0.01
        }"#;
        let parsed: ScreenInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, reference_input());
    }
}
