//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the screen calculation
//! deals in. Everything inside the engine is SI (meters, kilograms); the
//! catalog and the operators speak millimeters, so the conversion lives here
//! rather than being scattered across front ends.
//!
//! ## Example
//!
//! ```rust
//! use screen_core::units::{Meters, Millimeters};
//!
//! let gap = Millimeters(10.0);
//! let gap_m: Meters = gap.into();
//! assert!((gap_m.0 - 0.01).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} m", p, self.0),
            None => write!(f, "{} m", self.0),
        }
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl Add for Kilograms {
    type Output = Kilograms;
    fn add(self, rhs: Kilograms) -> Kilograms {
        Kilograms(self.0 + rhs.0)
    }
}

impl Mul<f64> for Kilograms {
    type Output = Kilograms;
    fn mul(self, rhs: f64) -> Kilograms {
        Kilograms(self.0 * rhs)
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} kg", p, self.0),
            None => write!(f, "{} kg", self.0),
        }
    }
}

// ============================================================================
// Flow Units
// ============================================================================

/// Volume flow rate in liters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerSecond(pub f64);

/// Volume flow rate in cubic meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<LitersPerSecond> for CubicMetersPerSecond {
    fn from(lps: LitersPerSecond) -> Self {
        CubicMetersPerSecond(lps.0 / 1000.0)
    }
}
