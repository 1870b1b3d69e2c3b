//! # rcbeam_core - RC Beam Capacity Engine
//!
//! `rcbeam_core` computes the load a simply-supported reinforced-concrete beam
//! can carry, two ways:
//!
//! - **Deterministic**: IS 456 limit-state flexure and shear checks, with the
//!   governing mode, self-weight deduction, and advisory warnings
//! - **Learned**: a trained regression model behind the
//!   [`CapacityPredictor`](prediction::CapacityPredictor) trait
//!
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Wire types keep the field names of the HTTP API
//! - **Rich Errors**: Structured error types naming the offending field
//! - **Auditable**: Every formula is registered with its code clause
//!
//! ## Quick Start
//!
//! ```rust
//! use rcbeam_core::calculations::{calculate, BeamParameters};
//!
//! let params = BeamParameters::default();
//! let result = calculate(&params).unwrap();
//!
//! println!("Net capacity: {:.1} kN ({})", result.wu_kn_net, result.mode);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("Wu_kN_net"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Input validation and the staged capacity check
//! - [`equations`] - Closed-form formulas and the equation registry
//! - [`materials`] - Concrete and steel grades, shear strength table
//! - [`prediction`] - Learned-model entry point and the dense network adapter
//! - [`report`] - Typst/PDF calculation report
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod prediction;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, calculate, BeamParameters, BeamSpec, CapacityAnalysis, CapacityResult, FailureMode};
pub use errors::{CalcError, CalcResult};
pub use prediction::{predict_capacity, CapacityPredictor, PredictionResult, ScaledNetwork};
