//! # Error Types
//!
//! Structured error types for rcbeam_core. Boundary validation failures name the
//! offending wire field so a caller can point the user at the exact input.
//!
//! Advisory conditions (overstressed section, self-weight failure) are *not*
//! errors; they ride along on a successful result as
//! [`CapacityWarning`](crate::calculations::CapacityWarning).
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if !(500.0..=10_000.0).contains(&span_mm) {
//!         return Err(CalcError::invalid_input(
//!             "L",
//!             span_mm.to_string(),
//!             "must be between 500 and 10000 mm",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(120.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rcbeam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its declared domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Effective depth came out non-positive; the section cannot be designed
    #[error("Invalid geometry: effective depth {effective_depth_mm:.1} mm - {reason}")]
    InvalidGeometry {
        effective_depth_mm: f64,
        reason: String,
    },

    /// Calculation produced an unusable value (non-finite, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// The learned-model capability could not produce a prediction
    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },

    /// A model artifact could not be loaded or has inconsistent shapes
    #[error("Model artifact invalid: {reason}")]
    InvalidModel { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
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

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(effective_depth_mm: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            effective_depth_mm,
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a PredictionFailed error
    pub fn prediction_failed(reason: impl Into<String>) -> Self {
        CalcError::PredictionFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidModel error
    pub fn invalid_model(reason: impl Into<String>) -> Self {
        CalcError::InvalidModel {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller supplied bad data (as opposed to an internal fault).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::InvalidGeometry { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::PredictionFailed { .. } => "PREDICTION_FAILED",
            CalcError::InvalidModel { .. } => "INVALID_MODEL",
            CalcError::FileError { .. } => "FILE_ERROR",
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
