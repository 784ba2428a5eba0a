//! # Geometry and Count Formulas
//!
//! Size codes, distances and item counts of the screen. Every function is a
//! pure closed-form expression over size codes and SI lengths; the
//! coefficients are regressions over the product catalog.
//!
//! ## Rounding
//!
//! Size codes are rounded half away from zero (`f64::round`). The bar count
//! uses the ceiling so the grate is never under-populated.

use crate::catalog::{
    Count, SizeCode, LARGE_DRIVE_CODE_SUM_LIMIT, MAX_SMALL_DRIVE_HEIGHT_CODE,
    MAX_SMALL_DRIVE_WIDTH_CODE, MAX_STANDARD_HEIGHT_CODE, MAX_STANDARD_WIDTH_CODE,
    NARROW_FRAME_MAX_WIDTH_CODE, RAKE_SPACING_M,
};

// =============================================================================
// CHANNEL AND STAND
// =============================================================================

/// Width size code of the channel the screen is installed in.
///
/// # Formula
/// - code = round((W - 0.1) / 0.1)
#[inline]
pub fn channel_size_code(channel_width_m: f64) -> SizeCode {
    ((channel_width_m - 0.1) / 0.1).round() as SizeCode
}

/// Height from the channel floor to the screen pivot axis (m).
///
/// # Formula
/// - h = 0.0985·H + 1.0299
#[inline]
pub fn screen_pivot_height(screen_height_code: SizeCode) -> f64 {
    0.0985 * screen_height_code as f64 + 1.0299
}

/// Stand height from the channel rim to the pivot axis (m).
#[inline]
pub fn stand_height(screen_pivot_height_m: f64, channel_height_m: f64) -> f64 {
    screen_pivot_height_m - channel_height_m
}

/// Height size code of the floor stand, in steps of 3 codes (0.3 m).
///
/// Saturates at the `SizeCode` range for heights far outside the catalog.
///
/// # Formula
/// - code = round((h - 1.0035) / 0.3)·3 + 10
#[inline]
pub fn stand_size_code(stand_height_m: f64) -> SizeCode {
    (((stand_height_m - 1.0035) / 0.3).round() as SizeCode)
        .saturating_mul(3)
        .saturating_add(10)
}

// =============================================================================
// GRATE
// =============================================================================

/// Clear width between the side plates (m).
#[inline]
pub fn inner_screen_width(screen_width_code: SizeCode) -> f64 {
    0.1 * screen_width_code as f64 - 0.132
}

/// Number of bars that fit across the clear width.
///
/// Returned unbounded (it may be zero or negative for absurd gaps); the
/// caller gates it before narrowing to a [`Count`].
///
/// # Formula
/// - n = ⌈(B - s) / (b + s)⌉
#[inline]
pub fn profile_count(inner_screen_width_m: f64, bar_width_m: f64, gap_m: f64) -> i64 {
    ((inner_screen_width_m - gap_m) / (bar_width_m + gap_m)).ceil() as i64
}

// =============================================================================
// LAYOUT
// =============================================================================

/// How many width codes the channel exceeds the screen by.
#[inline]
pub fn width_code_difference(channel_size_code: SizeCode, screen_width_code: SizeCode) -> SizeCode {
    channel_size_code.saturating_sub(screen_width_code)
}

/// Height size code of the backwall table.
#[inline]
pub fn backwall_size_code(screen_height_code: SizeCode, grate_height_code: SizeCode) -> SizeCode {
    screen_height_code.saturating_sub(grate_height_code).saturating_add(10)
}

/// Height size code of the front cover: the lower of table and stand.
#[inline]
pub fn cover_size_code(backwall_size_code: SizeCode, stand_size_code: SizeCode) -> SizeCode {
    backwall_size_code.min(stand_size_code)
}

/// Length of one drive chain (m).
///
/// Height codes 6, 7 and 9 use catalogued lengths, every other code the
/// linear fit.
pub fn chain_length(screen_height_code: SizeCode) -> f64 {
    match screen_height_code {
        6 => 3.528,
        7 => 4.158,
        9 => 4.662,
        h => 0.2 * h as f64 + 3.2,
    }
}

/// Number of rakes carried by the chain.
#[inline]
pub fn rake_count(chain_length_m: f64) -> Count {
    (chain_length_m / RAKE_SPACING_M).round() as Count
}

/// Number of front covers.
#[inline]
pub fn cover_count(screen_width_code: SizeCode) -> Count {
    if screen_width_code <= NARROW_FRAME_MAX_WIDTH_CODE {
        2
    } else {
        4
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Clear height of the grate (m). Does not include the tray.
#[inline]
pub fn inner_screen_height(grate_height_code: SizeCode) -> f64 {
    (98.481 * grate_height_code as f64 - 173.215) / 1e3
}

/// Width of the discharge opening (m).
#[inline]
pub fn discharge_width(screen_width_code: SizeCode) -> f64 {
    (100.0 * screen_width_code as f64 - 129.0) / 1e3
}

/// Height of the discharge above the channel floor (m).
#[inline]
pub fn discharge_full_height(screen_height_code: SizeCode) -> f64 {
    (98.4667 * screen_height_code as f64 + 961.4) / 1e3
}

/// Catalogued drive power for the size (W), if any drive covers it.
pub fn drive_power(screen_width_code: SizeCode, screen_height_code: SizeCode) -> Option<f64> {
    if screen_width_code <= MAX_SMALL_DRIVE_WIDTH_CODE && screen_height_code <= MAX_SMALL_DRIVE_HEIGHT_CODE {
        return Some(370.0);
    }
    if screen_width_code <= MAX_STANDARD_WIDTH_CODE {
        if screen_height_code <= MAX_STANDARD_HEIGHT_CODE {
            return Some(750.0);
        }
        if screen_width_code.saturating_add(screen_height_code) < LARGE_DRIVE_CODE_SUM_LIMIT {
            return Some(1100.0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_size_code_rounds_half_away_from_zero() {
        // (1.05 - 0.1) / 0.1 = 9.5 -> 10
        assert_eq!(channel_size_code(1.05), 10);
        assert_eq!(channel_size_code(1.0), 9);
        assert_eq!(channel_size_code(1.2), 11);
    }

    #[test]
    fn test_channel_size_code_is_monotonic() {
        let mut previous = channel_size_code(0.5);
        for step in 1..=300 {
            let width = 0.5 + step as f64 * 0.01;
            let code = channel_size_code(width);
            assert!(code >= previous, "code dropped at width {}", width);
            previous = code;
        }
    }

    #[test]
    fn test_stand_size_code_steps_of_three() {
        // pivot 2.2119, channel 1.0 -> stand 1.2119 -> round(0.6947) = 1 -> 13
        let stand = stand_height(screen_pivot_height(12), 1.0);
        assert!((stand - 1.2119).abs() < 1e-9);
        assert_eq!(stand_size_code(stand), 13);
        assert_eq!(stand_size_code(1.0035), 10);
        assert_eq!(stand_size_code(0.7119), 7);
    }

    #[test]
    fn test_profile_count_uses_ceiling() {
        // (0.868 - 0.01) / (0.0078 + 0.01) = 48.2 -> 49
        assert_eq!(profile_count(0.868, 0.0078, 0.01), 49);
        assert_eq!(profile_count(0.868, 0.0078, 0.35), 2);
        assert_eq!(profile_count(0.868, 0.0078, 0.5), 1);
    }

    #[test]
    fn test_chain_length_table_and_fit() {
        assert_eq!(chain_length(6), 3.528);
        assert_eq!(chain_length(7), 4.158);
        assert_eq!(chain_length(9), 4.662);
        assert!((chain_length(12) - 5.6).abs() < 1e-12);
        assert!((chain_length(8) - 4.8).abs() < 1e-12);
    }

    #[test]
    fn test_rake_and_cover_counts() {
        assert_eq!(rake_count(5.6), 7);
        assert_eq!(rake_count(3.528), 4);
        assert_eq!(cover_count(10), 2);
        assert_eq!(cover_count(11), 4);
    }

    #[test]
    fn test_cover_size_code_takes_minimum() {
        assert_eq!(cover_size_code(10, 13), 10);
        assert_eq!(cover_size_code(10, 7), 7);
    }

    #[test]
    fn test_drive_power_ranges() {
        assert_eq!(drive_power(10, 9), Some(370.0));
        assert_eq!(drive_power(10, 12), Some(750.0));
        assert_eq!(drive_power(24, 30), Some(750.0));
        // 20 + 33 = 53 < 54
        assert_eq!(drive_power(20, 33), Some(1100.0));
        // 24 + 33 = 57
        assert_eq!(drive_power(24, 33), None);
        assert_eq!(drive_power(25, 12), None);
    }

    #[test]
    fn test_extreme_codes_saturate() {
        assert_eq!(stand_size_code(-1e12), SizeCode::MIN + 10);
        assert_eq!(stand_size_code(1e12), SizeCode::MAX);
        assert_eq!(drive_power(10, SizeCode::MAX), None);
        assert_eq!(drive_power(SizeCode::MAX, SizeCode::MAX), None);
        assert_eq!(backwall_size_code(SizeCode::MAX, 1), SizeCode::MAX);
        assert_eq!(backwall_size_code(1, SizeCode::MAX), 1 - SizeCode::MAX + 10);
        assert_eq!(width_code_difference(SizeCode::MAX, 1), SizeCode::MAX - 1);
    }

    #[test]
    fn test_envelope_dimensions() {
        assert!((inner_screen_height(12) - 1.008557).abs() < 1e-9);
        assert!((discharge_width(10) - 0.871).abs() < 1e-12);
        assert!((discharge_full_height(12) - 2.1430004).abs() < 1e-9);
    }
}
