//! # Product Catalog
//!
//! Catalogued data for the bar screen product line: the three filter
//! profiles, size-code limits, and the fixed masses of standard parts and
//! fasteners that enter the bill of materials unchanged.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::catalog::{FilterProfile, is_standard_size};
//!
//! let profile: FilterProfile = "medium".parse().unwrap();
//! assert_eq!(profile.token(), "777");
//! assert!((profile.bar_width_m() - 0.0078).abs() < 1e-12);
//!
//! assert!(is_standard_size(24, 30));
//! assert!(!is_standard_size(25, 30));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalcError;

/// Integer index into the catalog of width or height dimensions.
pub type SizeCode = i32;

/// Number of identical items (bars, rakes, covers).
pub type Count = u32;

// ============================================================================
// Size Limits
// ============================================================================

/// Largest width code of the standard size range
pub const MAX_STANDARD_WIDTH_CODE: SizeCode = 24;

/// Largest height code of the standard size range
pub const MAX_STANDARD_HEIGHT_CODE: SizeCode = 30;

/// Largest width code driven by the small (370 W) drive
pub const MAX_SMALL_DRIVE_WIDTH_CODE: SizeCode = 10;

/// Largest height code driven by the small (370 W) drive
pub const MAX_SMALL_DRIVE_HEIGHT_CODE: SizeCode = 9;

/// Width + height codes must stay below this for the 1100 W drive
pub const LARGE_DRIVE_CODE_SUM_LIMIT: SizeCode = 54;

/// Width code at and below which the narrow frame variants apply
/// (two front covers, light cover-support beam)
pub const NARROW_FRAME_MAX_WIDTH_CODE: SizeCode = 10;

/// Grate may exceed the screen height by at most this many codes
pub const MAX_GRATE_OVERHANG_CODES: SizeCode = 3;

/// Channel size code may exceed the screen width code by at most this much
pub const MAX_CHANNEL_WIDTH_EXCESS: SizeCode = 2;

/// Smallest catalogued stand height code
pub const MIN_STAND_SIZE_CODE: SizeCode = 7;

/// A grate needs at least this many bars
pub const MIN_PROFILE_COUNT: i64 = 2;

/// Largest size code accepted as input; designation fields hold two digits
pub const MAX_SIZE_CODE: SizeCode = 99;

/// Largest channel width or depth accepted as input (m)
pub const MAX_CHANNEL_DIMENSION_M: f64 = 20.0;

/// Product series prefix of every designation
pub const SERIES: &str = "РКЭ";

/// Whether the size codes fall inside the catalogued (standard) range.
///
/// Results outside the range are still computed, but the fitted mass
/// formulas are extrapolated and the figures are approximate.
pub fn is_standard_size(screen_width_code: SizeCode, screen_height_code: SizeCode) -> bool {
    screen_width_code <= MAX_STANDARD_WIDTH_CODE && screen_height_code <= MAX_STANDARD_HEIGHT_CODE
}

// ============================================================================
// Filter Profiles
// ============================================================================

/// Cross-section of the bars in the filtering grate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterProfile {
    /// 6x30 flat bar, 6.0 mm wide
    Narrow,
    /// 777 profile, 7.8 mm wide
    Medium,
    /// 3999 profile, 9.5 mm wide
    Wide,
}

impl FilterProfile {
    /// All catalogued profiles
    pub const ALL: [FilterProfile; 3] = [FilterProfile::Narrow, FilterProfile::Medium, FilterProfile::Wide];

    /// Descriptive name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            FilterProfile::Narrow => "narrow",
            FilterProfile::Medium => "medium",
            FilterProfile::Wide => "wide",
        }
    }

    /// Catalog token used in designations
    pub fn token(&self) -> &'static str {
        match self {
            FilterProfile::Narrow => "6x30",
            FilterProfile::Medium => "777",
            FilterProfile::Wide => "3999",
        }
    }

    /// Physical width of one bar (m)
    pub fn bar_width_m(&self) -> f64 {
        match self {
            FilterProfile::Narrow => 0.006,
            FilterProfile::Medium => 0.0078,
            FilterProfile::Wide => 0.0095,
        }
    }

    /// Head-loss shape factor of the bar section
    pub fn shape_factor(&self) -> f64 {
        match self {
            FilterProfile::Narrow => 2.42,
            FilterProfile::Medium => 0.95,
            FilterProfile::Wide => 1.5,
        }
    }

    /// Mass of one bar for the given grate height code (kg)
    pub fn bar_mass_kg(&self, grate_height_code: SizeCode) -> f64 {
        let g = grate_height_code as f64;
        match self {
            FilterProfile::Narrow => 0.144 * g - 0.158,
            FilterProfile::Medium => 0.1887 * g - 0.194,
            FilterProfile::Wide => 0.1167 * g - 0.13,
        }
    }
}

impl fmt::Display for FilterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.token())
    }
}

impl FromStr for FilterProfile {
    type Err = CalcError;

    /// Accepts the descriptive names and the catalog tokens, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FilterProfile::ALL
            .into_iter()
            .find(|p| p.name() == wanted || p.token() == wanted)
            .ok_or_else(|| {
                let known: Vec<String> = FilterProfile::ALL.iter().map(|p| p.to_string()).collect();
                CalcError::invalid_input(
                    "filter_profile",
                    wanted,
                    format!("Expected one of: {}", known.join(", ")),
                )
            })
    }
}

// ============================================================================
// Standard Parts (fixed masses, kg)
// ============================================================================

/// Split shackle, РКЭ-01.01.00.02
pub const SPLIT_SHACKLE_KG: f64 = 0.42;
/// Fasteners of the frame, РКЭ-01.01.00.00
pub const FRAME_FASTENERS_KG: f64 = 2.22;
/// Set screw of the insert grate, РКЭ-01.03.00.02
pub const SET_SCREW_KG: f64 = 0.16;
/// Ski, РКЭ-01.00.00.01
pub const SKI_KG: f64 = 0.62;
/// Fasteners of the body, РКЭ-01.00.00.00
pub const BODY_FASTENERS_KG: f64 = 1.07;
/// Socket wrench, РКЭ-07.00.00.00
pub const SOCKET_WRENCH_KG: f64 = 1.08;
/// Side lid, РКЭ-11.00.00.00
pub const SIDE_LID_KG: f64 = 0.42;
/// Scraper stop, РКЭ-12.00.00.00
pub const SCRAPER_STOP_KG: f64 = 0.16;
/// Slider, РКЭ-18.00.00.00
pub const SLIDER_KG: f64 = 1.13;
/// Drive guide, РКЭ-00.00.00.05
pub const DRIVE_GUIDE_KG: f64 = 0.87;
/// Scraper bushing, РКЭ-00.00.00.09
pub const SCRAPER_BUSHING_KG: f64 = 0.01;
/// Tr20x4 lead nut, РКЭ-00.00.00.13
pub const LEAD_NUT_KG: f64 = 0.15;
/// Fasteners of the complete screen, РКЭ-00.00.00.00
pub const SCREEN_FASTENERS_KG: f64 = 1.24;

/// Extra drive mass of the heavy version
pub const HEAVY_DRIVE_INCREMENT_KG: f64 = 2.29;

/// Linear mass of the МС56-Р-100 chain (kg/m)
pub const CHAIN_KG_PER_M: f64 = 4.18;

/// Chain pitch between neighbouring rakes (m)
pub const RAKE_SPACING_M: f64 = 0.825;
