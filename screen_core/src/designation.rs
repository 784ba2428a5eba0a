//! # Designation Encoder
//!
//! Builds the catalog code of a configured screen:
//!
//! ```text
//! РКЭ WWHH[(CCGG)].PROFILE.GAP
//! ```
//!
//! - `WW`, `HH` - nominal width and height codes, two digits
//! - `(CCGG)` - only when the channel code differs from the width code or
//!   the grate code from the height code; a field that matches nominal is
//!   written as `00`
//! - `PROFILE` - catalog token of the filter profile
//! - `GAP` - gap in millimeters, general number format
//!
//! ## Example
//!
//! ```rust
//! use screen_core::designation::format_gap_mm;
//!
//! assert_eq!(format_gap_mm(0.01), "10");
//! assert_eq!(format_gap_mm(0.0125), "12.5");
//! ```

use crate::calculations::ScreenInput;
use crate::catalog::{SizeCode, SERIES};
use crate::units::{Meters, Millimeters};

/// Significant digits of the gap field
const GAP_SIGNIFICANT_DIGITS: i32 = 6;

/// Encode the designation for an input whose channel code is known.
pub fn encode(input: &ScreenInput, channel_size_code: SizeCode) -> String {
    let mut dsg = format!("{} {:02}{:02}", SERIES, input.screen_width_code, input.screen_height_code);

    let channel_matches = channel_size_code == input.screen_width_code;
    let grate_matches = input.grate_height_code == input.screen_height_code;
    if !channel_matches || !grate_matches {
        dsg.push('(');
        dsg.push_str(&axis_field(channel_matches, channel_size_code));
        dsg.push_str(&axis_field(grate_matches, input.grate_height_code));
        dsg.push(')');
    }

    dsg.push('.');
    dsg.push_str(input.filter_profile.token());
    dsg.push('.');
    dsg.push_str(&format_gap_mm(input.gap_m));
    dsg
}

fn axis_field(matches_nominal: bool, code: SizeCode) -> String {
    if matches_nominal {
        "00".to_string()
    } else {
        format!("{:02}", code)
    }
}

/// Gap in millimeters, formatted like C's `%g`: six significant digits,
/// trailing zeros trimmed, scientific notation outside `1e-4..1e6`.
pub fn format_gap_mm(gap_m: f64) -> String {
    let mm = Millimeters::from(Meters(gap_m)).0;
    if mm == 0.0 || !mm.is_finite() {
        return format!("{}", mm);
    }
    // the exponent after rounding to the significant digits picks the style
    let scientific = format!("{:.*e}", (GAP_SIGNIFICANT_DIGITS - 1) as usize, mm);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if (-4..GAP_SIGNIFICANT_DIGITS).contains(&exponent) {
        let decimals = (GAP_SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, mm)).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
