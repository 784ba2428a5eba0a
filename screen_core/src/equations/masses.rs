//! # Part and Sub-Assembly Mass Formulas
//!
//! Linear and bilinear fits of part masses (kg) against size codes. Each
//! function is named after the physical part; the catalog drawing number is
//! given in its doc comment.
//!
//! ## Notation
//!
//! - `W` = screen width code
//! - `H` = screen height code
//! - `G` = grate height code
//! - `ΔW` = channel size code minus screen width code
//! - `T` = backwall (table) height code
//! - `C` = front cover height code
//! - `S` = stand height code

use crate::catalog::{SizeCode, CHAIN_KG_PER_M, HEAVY_DRIVE_INCREMENT_KG, NARROW_FRAME_MAX_WIDTH_CODE};

// =============================================================================
// FRAME (РКЭ-01.01.00.00)
// =============================================================================

/// Left side plate, 01.01.01.00: m = 2.7233·H + 46.32
#[inline]
pub fn left_side_plate(h: SizeCode) -> f64 {
    2.7233 * h as f64 + 46.32
}

/// Right side plate, 01.01.11.00: m = 2.7467·H + 46.03
#[inline]
pub fn right_side_plate(h: SizeCode) -> f64 {
    2.7467 * h as f64 + 46.03
}

/// Cross beam, 01.01.02.00
#[inline]
pub fn cross_beam(w: SizeCode) -> f64 {
    0.5963 * w as f64 - 0.3838
}

/// Pivot axis beam, 01.01.03.00
#[inline]
pub fn pivot_beam(w: SizeCode) -> f64 {
    0.5881 * w as f64 + 0.4531
}

/// Top beam, 01.01.04.00
#[inline]
pub fn top_beam(w: SizeCode) -> f64 {
    0.8544 * w as f64 - 0.1806
}

/// Middle beam, 01.01.05.00
#[inline]
pub fn middle_beam(w: SizeCode) -> f64 {
    0.6313 * w as f64 + 0.1013
}

/// Hinge, 01.01.07.00: grows with the channel overhang ΔW
#[inline]
pub fn hinge(width_code_difference: SizeCode) -> f64 {
    0.605 * width_code_difference as f64 + 3.36
}

/// Spacer beam, 01.01.08.00
#[inline]
pub fn spacer_beam(w: SizeCode) -> f64 {
    0.445 * w as f64 - 0.245
}

/// Cover support beam, 01.01.09.00 (two fits split at the narrow frame limit)
pub fn cover_support_beam(w: SizeCode) -> f64 {
    let wf = w as f64;
    if w <= NARROW_FRAME_MAX_WIDTH_CODE {
        0.136 * wf + 0.13
    } else {
        0.1358 * wf + 0.2758
    }
}

// =============================================================================
// BODY (РКЭ-01.00.00.00)
// =============================================================================

/// Tray, 01.02.00.00
#[inline]
pub fn tray(w: SizeCode) -> f64 {
    1.5024 * w as f64 - 0.1065
}

/// Insert grate beam, 01.03.01.00
#[inline]
pub fn grate_beam(w: SizeCode) -> f64 {
    0.6919 * w as f64 - 0.7431
}

/// Backwall table, 01.04.00.00
///
/// # Formula
/// - m = 0.2886·T·W - 0.2754·T + 2.2173·W - 2.6036
pub fn table(backwall_size_code: SizeCode, w: SizeCode) -> f64 {
    let t = backwall_size_code as f64;
    let wf = w as f64;
    0.2886 * t * wf - 0.2754 * t + 2.2173 * wf - 2.6036
}

// =============================================================================
// SCREEN (РКЭ-00.00.00.00)
// =============================================================================

/// Drive unit, 02.00.00.00, optionally in the heavy version
pub fn drive_unit(w: SizeCode, heavy: bool) -> f64 {
    let increment = if heavy { HEAVY_DRIVE_INCREMENT_KG } else { 0.0 };
    1.85 * w as f64 + 97.28 + increment
}

/// Side shield, 03.00.00.00
///
/// # Formula
/// - m = 0.12·ΔW·G + 2.12·ΔW + 0.4967·G - 1.32
pub fn shield(width_code_difference: SizeCode, g: SizeCode) -> f64 {
    let d = width_code_difference as f64;
    let gf = g as f64;
    0.12 * d * gf + 2.12 * d + 0.4967 * gf - 1.32
}

/// Rake, 04.00.00.00. Profile type and gap do not affect it.
#[inline]
pub fn rake(w: SizeCode) -> f64 {
    0.5524 * w as f64 + 0.2035
}

/// Scraper, 05.00.00.00
#[inline]
pub fn scraper(w: SizeCode) -> f64 {
    0.8547 * w as f64 + 1.4571
}

/// Top lid, 06.00.00.00
#[inline]
pub fn lid(w: SizeCode) -> f64 {
    0.5218 * w as f64 + 0.6576
}

/// Floor stand, 08.00.00.00
#[inline]
pub fn floor_stand(stand_size_code: SizeCode) -> f64 {
    1.8267 * stand_size_code as f64 + 8.0633
}

/// Discharge chute with hood, 09.00.00.00
#[inline]
pub fn discharge_chute(w: SizeCode) -> f64 {
    1.7871 * w as f64 - 0.4094
}

/// Front cover, 10.00.00.00 (two bilinear fits split at the narrow frame limit)
pub fn front_cover(cover_size_code: SizeCode, w: SizeCode) -> f64 {
    let c = cover_size_code as f64;
    let wf = w as f64;
    if w <= NARROW_FRAME_MAX_WIDTH_CODE {
        0.06 * c * wf - 0.055 * c + 0.3167 * wf + 0.3933
    } else {
        0.03 * c * wf - 0.0183 * c + 0.1582 * wf + 0.6052
    }
}

/// Bar frame, 13.00.00.00
// TODO: check against the channel height instead of the grate height once
// frames for deep channels are catalogued.
#[inline]
pub fn bar_frame(g: SizeCode, w: SizeCode) -> f64 {
    0.1811 * g as f64 + 0.49 * w as f64 + 0.7867
}

/// Level probe, 19.00.00.00
#[inline]
pub fn level_probe(g: SizeCode) -> f64 {
    0.0161 * g as f64 + 0.2067
}

/// One МС56-Р-100 drive chain
#[inline]
pub fn chain(chain_length_m: f64) -> f64 {
    CHAIN_KG_PER_M * chain_length_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_parts() {
        assert!((left_side_plate(12) - 78.9996).abs() < 1e-9);
        assert!((right_side_plate(12) - 78.9904).abs() < 1e-9);
        assert!((hinge(0) - 3.36).abs() < 1e-12);
        assert!((hinge(2) - 4.57).abs() < 1e-9);
    }

    #[test]
    fn test_cover_support_beam_branches() {
        assert!((cover_support_beam(10) - 1.49).abs() < 1e-9);
        assert!((cover_support_beam(11) - 1.7696).abs() < 1e-9);
    }

    #[test]
    fn test_table_is_bilinear() {
        // 0.2886*10*10 - 0.2754*10 + 2.2173*10 - 2.6036 = 45.6754
        assert!((table(10, 10) - 45.6754).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_drive_increment() {
        let light = drive_unit(10, false);
        let heavy = drive_unit(10, true);
        assert!((light - 115.78).abs() < 1e-9);
        assert!((heavy - light - HEAVY_DRIVE_INCREMENT_KG).abs() < 1e-9);
    }

    #[test]
    fn test_front_cover_branches() {
        // narrow: 0.06*10*10 - 0.055*10 + 3.167 + 0.3933 = 9.0103
        assert!((front_cover(10, 10) - 9.0103).abs() < 1e-9);
        // wide: 0.03*10*16 - 0.183 + 2.5312 + 0.6052 = 7.7534
        assert!((front_cover(10, 16) - 7.7534).abs() < 1e-9);
    }

    #[test]
    fn test_chain_mass() {
        assert!((chain(5.6) - 23.408).abs() < 1e-9);
    }

    #[test]
    fn test_shield_without_overhang() {
        // 0.4967*12 - 1.32 = 4.6404
        assert!((shield(0, 12) - 4.6404).abs() < 1e-9);
    }
}
