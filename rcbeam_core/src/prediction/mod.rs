//! # Learned-Model Prediction
//!
//! Second entry point: the same beam description fed to a trained regression
//! model instead of the code procedure. The model is a capability behind
//! [`CapacityPredictor`]; this module only assembles features and wraps the
//! output.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::calculations::BeamParameters;
//! use rcbeam_core::errors::CalcResult;
//! use rcbeam_core::prediction::{predict_capacity, CapacityPredictor};
//!
//! /// Toy model: capacity grows with the bar count
//! struct BarCount;
//!
//! impl CapacityPredictor for BarCount {
//!     fn predict(&self, features: &[f64]) -> CalcResult<f64> {
//!         Ok(features[6] * 20.0)
//!     }
//! }
//!
//! let out = predict_capacity(&BeamParameters::default(), &BarCount).unwrap();
//! assert_eq!(out.predicted_capacity_kn, 40.0);
//! ```

pub mod network;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{BeamParameters, BeamSpec};
use crate::errors::{CalcError, CalcResult};

pub use network::{Activation, DenseLayer, NetworkArtifact, ScaledNetwork, StandardScaler};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 9;

/// Model input names, in feature order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fck",
    "fy",
    "b",
    "D",
    "L",
    "main_dia",
    "main_count",
    "stirrup_dia",
    "spacing",
];

/// A trained model mapping the feature vector to capacity in kN.
///
/// Implementations must be shareable across threads so one loaded model can
/// serve concurrent requests.
pub trait CapacityPredictor: Send + Sync {
    /// Predict capacity (kN) for features in [`FEATURE_NAMES`] order
    fn predict(&self, features: &[f64]) -> CalcResult<f64>;
}

/// Prediction output in wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "predicted_capacity_kN")]
    pub predicted_capacity_kn: f64,
}

/// Validate parameters and run the predictor.
///
/// Validation is identical to [`calculate`](crate::calculations::calculate),
/// so an input rejected there is rejected here with the same error.
pub fn predict_capacity(params: &BeamParameters, predictor: &dyn CapacityPredictor) -> CalcResult<PredictionResult> {
    let spec = params.validate()?;
    predict_spec(&spec, predictor)
}

/// Run the predictor on an already validated beam.
pub fn predict_spec(spec: &BeamSpec, predictor: &dyn CapacityPredictor) -> CalcResult<PredictionResult> {
    let features = spec.features();
    let value = predictor.predict(&features)?;
    if !value.is_finite() {
        return Err(CalcError::prediction_failed(format!("model returned {}", value)));
    }
    debug!(predicted_kn = value, "prediction complete");
    Ok(PredictionResult {
        predicted_capacity_kn: value,
    })
}
