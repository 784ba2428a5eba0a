//! # Screen Equations
//!
//! All closed-form formulas of the bar screen in one place. Keeping them
//! free of tracing, validation and bookkeeping means every coefficient can be
//! checked against the catalog fits in isolation.
//!
//! ## Modules
//!
//! - [`geometry`] - size codes, distances, item counts, envelope, drive power
//! - [`masses`] - part and sub-assembly mass fits
//! - [`hydraulics`] - head loss across a blinded grate
//!
//! ## Conventions
//!
//! - Lengths in meters, masses in kilograms, flows in m³/s
//! - Size codes are integer catalog indices, never raw measurements

pub mod geometry;
pub mod hydraulics;
pub mod masses;
