//! # Screen Calculations
//!
//! The calculation is split by concern, each step feeding the next:
//!
//! - [`gates`] - The four validity checks between derivation stages
//! - [`derivation`] - Staged geometric derivation
//! - [`envelope`] - Installation clearances and drive power
//! - [`hydraulic`] - Optional flow assessment at several blinding levels
//! - [`assembly`] - Bill of materials and mass roll-up
//! - [`screen`] - `ScreenInput` / `ScreenResult` and the `calculate` entry point
//!
//! Like every calculation in this crate it follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function

pub mod assembly;
pub mod derivation;
pub mod envelope;
pub mod gates;
pub mod hydraulic;
pub mod screen;

// Re-export commonly used types
pub use assembly::{Assembly, Component, MassTerm, Multiplicity};
pub use derivation::Derivation;
pub use envelope::Envelope;
pub use hydraulic::{HydraulicInput, HydraulicPoint};
pub use screen::{calculate, calculate_with_options, CalcOptions, ScreenInput, ScreenResult};
