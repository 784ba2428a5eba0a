//! # Validity Gates
//!
//! Checkpoints of the derivation. Each gate looks at raw input or at a
//! value derived just before it and either lets the calculation continue or
//! rejects the configuration. Gates never retry or adjust values.

use tracing::debug;

use crate::catalog::{
    Count, SizeCode, MAX_CHANNEL_WIDTH_EXCESS, MAX_GRATE_OVERHANG_CODES, MIN_PROFILE_COUNT,
    MIN_STAND_SIZE_CODE,
};
use crate::errors::{CalcError, CalcResult};

/// Gate 1: the grate may not overhang the screen by more than three codes.
pub fn check_grate_height(screen_height_code: SizeCode, grate_height_code: SizeCode) -> CalcResult<()> {
    let overhang = screen_height_code - grate_height_code;
    debug!(overhang, "gate: grate height");
    if overhang < -MAX_GRATE_OVERHANG_CODES {
        return Err(CalcError::ScreenTooTall {
            screen_height_code,
            grate_height_code,
        });
    }
    Ok(())
}

/// Gate 2: the channel must be between 0 and 2 codes wider than the screen.
pub fn check_channel_width(channel_size_code: SizeCode, screen_width_code: SizeCode) -> CalcResult<()> {
    let excess = channel_size_code - screen_width_code;
    debug!(excess, "gate: channel width");
    if excess < 0 {
        return Err(CalcError::ChannelTooNarrow {
            channel_size_code,
            screen_width_code,
        });
    }
    if excess > MAX_CHANNEL_WIDTH_EXCESS {
        return Err(CalcError::ChannelTooWide {
            channel_size_code,
            screen_width_code,
        });
    }
    Ok(())
}

/// Gate 3: the channel must leave room for the smallest stand.
pub fn check_stand(stand_size_code: SizeCode) -> CalcResult<()> {
    debug!(stand_size_code, "gate: stand height");
    if stand_size_code < MIN_STAND_SIZE_CODE {
        return Err(CalcError::ChannelTooDeep { stand_size_code });
    }
    Ok(())
}

/// Gate 4: at least two bars must fit. Returns the count narrowed to [`Count`].
pub fn check_profile_count(profile_count: i64) -> CalcResult<Count> {
    debug!(profile_count, "gate: bar count");
    if profile_count < MIN_PROFILE_COUNT {
        return Err(CalcError::GapTooLarge { profile_count });
    }
    Count::try_from(profile_count)
        .map_err(|_| CalcError::internal(format!("bar count {} does not fit a count", profile_count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grate_height_boundary() {
        assert!(check_grate_height(12, 15).is_ok());
        assert_eq!(
            check_grate_height(12, 16),
            Err(CalcError::ScreenTooTall {
                screen_height_code: 12,
                grate_height_code: 16,
            })
        );
        // A grate shorter than the screen is always fine
        assert!(check_grate_height(30, 6).is_ok());
    }

    #[test]
    fn test_channel_width_window() {
        assert!(matches!(check_channel_width(9, 10), Err(CalcError::ChannelTooNarrow { .. })));
        for code in 10..=12 {
            assert!(check_channel_width(code, 10).is_ok());
        }
        assert!(matches!(check_channel_width(13, 10), Err(CalcError::ChannelTooWide { .. })));
    }

    #[test]
    fn test_stand_minimum() {
        assert!(check_stand(7).is_ok());
        assert_eq!(check_stand(4), Err(CalcError::ChannelTooDeep { stand_size_code: 4 }));
    }

    #[test]
    fn test_profile_count_minimum() {
        assert_eq!(check_profile_count(2), Ok(2));
        assert_eq!(check_profile_count(1), Err(CalcError::GapTooLarge { profile_count: 1 }));
        assert!(check_profile_count(-3).is_err());
    }
}
