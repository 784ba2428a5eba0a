//! # screen_core - Bar Screen Calculation Engine
//!
//! `screen_core` computes the specification of a mechanically raked bar
//! screen for a wastewater channel: geometry, bill of materials, total mass,
//! catalog designation and an audit trail of every step. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Ordered by types**: Derivation stages consume each other, so nothing
//!   is read before it is computed
//!
//! ## Quick Start
//!
//! ```rust
//! use screen_core::{calculate, FilterProfile, ScreenInput};
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
//! for entry in &result.trace {
//!     println!("{}", entry);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Derivation, gates, bill of materials, entry point
//! - [`equations`] - Pure geometry, mass and hydraulic formulas
//! - [`catalog`] - Series constants, filter profiles, fixed part masses
//! - [`designation`] - Catalog code encoder
//! - [`trace`] - Audit trail
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod designation;
pub mod equations;
pub mod errors;
pub mod trace;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with_options, CalcOptions, ScreenInput, ScreenResult};
pub use catalog::FilterProfile;
pub use errors::{CalcError, CalcResult};
pub use trace::TraceEntry;
