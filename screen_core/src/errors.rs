//! # Error Types
//!
//! Structured error types for screen_core. Validation failures are the
//! expected, user-correctable kind: each one names the gate that rejected the
//! configuration and carries the derived values that tripped it, so a caller
//! can explain the rejection without re-running the calculation.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::errors::{CalcError, CalcResult};
//!
//! fn validate_gap(gap_m: f64) -> CalcResult<()> {
//!     if gap_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "gap_m",
//!             gap_m.to_string(),
//!             "Gap must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_gap(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::SizeCode;

/// Result type alias for screen_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for screen calculations.
///
/// Every variant except [`CalcError::Internal`] and
/// [`CalcError::SerializationError`] is a validation failure: the input
/// describes a screen the product line cannot build.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A raw input value is outside its domain (non-positive, not finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The grate is more than three height codes taller than the screen
    #[error("Screen too tall for grate: screen height code {screen_height_code}, grate height code {grate_height_code}")]
    ScreenTooTall {
        screen_height_code: SizeCode,
        grate_height_code: SizeCode,
    },

    /// The channel size code is below the screen width code
    #[error("Channel too narrow: channel size code {channel_size_code} is below screen width code {screen_width_code}")]
    ChannelTooNarrow {
        channel_size_code: SizeCode,
        screen_width_code: SizeCode,
    },

    /// The channel size code exceeds the screen width code by more than 2
    #[error("Channel too wide: channel size code {channel_size_code} exceeds screen width code {screen_width_code} by more than 2")]
    ChannelTooWide {
        channel_size_code: SizeCode,
        screen_width_code: SizeCode,
    },

    /// The stand would be shorter than the smallest catalogued stand
    #[error("Channel too deep: stand size code {stand_size_code} is below the minimum of 7")]
    ChannelTooDeep { stand_size_code: SizeCode },

    /// Fewer than two filter bars fit across the screen
    #[error("Gap too large: only {profile_count} filter bar(s) fit across the screen")]
    GapTooLarge { profile_count: i64 },

    /// Water level after the screen reaches the channel rim
    #[error("Water level above channel: final level {final_level_m:.3} m, channel height {channel_height_m:.3} m")]
    WaterAboveChannel {
        final_level_m: f64,
        channel_height_m: f64,
    },

    /// Water level after the screen reaches the top of the grate
    #[error("Water level above grate: final level {final_level_m:.3} m, clear grate height {inner_screen_height_m:.3} m")]
    WaterAboveGrate {
        final_level_m: f64,
        inner_screen_height_m: f64,
    },

    /// Tilt angle outside the range the frame can be installed at
    #[error("Tilt angle out of range: {tilt_angle_deg} deg (allowed {min_deg}..={max_deg} deg, standard 80 +- 5)")]
    TiltAngleOutOfRange {
        tilt_angle_deg: f64,
        min_deg: f64,
        max_deg: f64,
    },

    /// JSON serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Broken calculation invariant (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is a user-correctable rejection of the input.
    ///
    /// Internal and serialization errors are programming-bug signals and
    /// return `false`.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            CalcError::Internal { .. } | CalcError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ScreenTooTall { .. } => "SCREEN_TOO_TALL",
            CalcError::ChannelTooNarrow { .. } => "CHANNEL_TOO_NARROW",
            CalcError::ChannelTooWide { .. } => "CHANNEL_TOO_WIDE",
            CalcError::ChannelTooDeep { .. } => "CHANNEL_TOO_DEEP",
            CalcError::GapTooLarge { .. } => "GAP_TOO_LARGE",
            CalcError::WaterAboveChannel { .. } => "WATER_ABOVE_CHANNEL",
            CalcError::WaterAboveGrate { .. } => "WATER_ABOVE_GRATE",
            CalcError::TiltAngleOutOfRange { .. } => "TILT_ANGLE_OUT_OF_RANGE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
