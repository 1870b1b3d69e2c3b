//! # Scaled Dense Network
//!
//! A feed-forward regression network stored as JSON, with the standard scaler
//! it was trained behind. Inference only.
//!
//! ## Artifact Format
//!
//! ```json
//! {
//!   "scaler": { "mean": [9 values], "scale": [9 values] },
//!   "layers": [
//!     { "weights": [[...9 values], ...], "bias": [...], "activation": "relu" },
//!     { "weights": [[...]], "bias": [0.0], "activation": "linear" }
//!   ]
//! }
//! ```
//!
//! `weights` is row-major with one row per output unit. Layer `k` must have as
//! many columns as layer `k-1` has rows, and the last layer has one row.

use std::path::Path;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::prediction::{CapacityPredictor, FEATURE_COUNT};

// ============================================================================
// Artifact (serialized form)
// ============================================================================

/// Layer activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Linear,
    Sigmoid,
    Tanh,
}

impl Activation {
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Linear => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }
}

/// Scaler parameters as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Dense layer as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerArtifact {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

/// Whole model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkArtifact {
    pub scaler: ScalerArtifact,
    pub layers: Vec<LayerArtifact>,
}

// ============================================================================
// Loaded model
// ============================================================================

/// Standardization `(x - mean) / scale` per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: DVector<f64>,
    scale: DVector<f64>,
}

impl StandardScaler {
    /// Build a scaler; every scale entry must be finite and non-zero.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> CalcResult<Self> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(CalcError::invalid_model(format!(
                "scaler must have {} entries, got mean {} / scale {}",
                FEATURE_COUNT,
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(CalcError::invalid_model(format!("scale[{}] is {}", i, scale[i])));
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err(CalcError::invalid_model("scaler mean has non-finite entries"));
        }
        Ok(Self {
            mean: DVector::from_vec(mean),
            scale: DVector::from_vec(scale),
        })
    }

    pub fn transform(&self, features: &[f64]) -> DVector<f64> {
        let x = DVector::from_column_slice(features);
        (x - &self.mean).component_div(&self.scale)
    }
}

/// One dense layer, `activation(W·x + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    weights: DMatrix<f64>,
    bias: DVector<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn from_artifact(index: usize, layer: LayerArtifact) -> CalcResult<Self> {
        let rows = layer.weights.len();
        let cols = layer.weights.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(CalcError::invalid_model(format!("layer {} has empty weights", index)));
        }
        if let Some(r) = layer.weights.iter().position(|row| row.len() != cols) {
            return Err(CalcError::invalid_model(format!(
                "layer {} row {} has {} columns, expected {}",
                index,
                r,
                layer.weights[r].len(),
                cols
            )));
        }
        if layer.bias.len() != rows {
            return Err(CalcError::invalid_model(format!(
                "layer {} bias has {} entries, expected {}",
                index,
                layer.bias.len(),
                rows
            )));
        }

        let flat: Vec<f64> = layer.weights.into_iter().flatten().collect();
        Ok(Self {
            weights: DMatrix::from_row_slice(rows, cols, &flat),
            bias: DVector::from_vec(layer.bias),
            activation: layer.activation,
        })
    }

    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn forward(&self, x: &DVector<f64>) -> DVector<f64> {
        let z = &self.weights * x + &self.bias;
        z.map(|v| self.activation.apply(v))
    }
}

/// Scaler plus dense layers, ready to predict.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledNetwork {
    scaler: StandardScaler,
    layers: Vec<DenseLayer>,
}

impl ScaledNetwork {
    /// Build from a parsed artifact, checking every shape.
    pub fn from_artifact(artifact: NetworkArtifact) -> CalcResult<Self> {
        let scaler = StandardScaler::new(artifact.scaler.mean, artifact.scaler.scale)?;
        if artifact.layers.is_empty() {
            return Err(CalcError::invalid_model("model has no layers"));
        }

        let layers = artifact
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, layer)| DenseLayer::from_artifact(i, layer))
            .collect::<CalcResult<Vec<_>>>()?;

        let mut width = FEATURE_COUNT;
        for (i, layer) in layers.iter().enumerate() {
            if layer.inputs() != width {
                return Err(CalcError::invalid_model(format!(
                    "layer {} expects {} inputs, previous width is {}",
                    i,
                    layer.inputs(),
                    width
                )));
            }
            width = layer.outputs();
        }
        if width != 1 {
            return Err(CalcError::invalid_model(format!("model output width is {}, expected 1", width)));
        }

        Ok(Self { scaler, layers })
    }

    /// Parse and validate a JSON artifact.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let artifact: NetworkArtifact =
            serde_json::from_str(json).map_err(|e| CalcError::invalid_model(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    /// Load a JSON artifact from disk.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let network = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            layers = network.layers.len(),
            "loaded capacity model"
        );
        Ok(network)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl CapacityPredictor for ScaledNetwork {
    fn predict(&self, features: &[f64]) -> CalcResult<f64> {
        if features.len() != FEATURE_COUNT {
            return Err(CalcError::prediction_failed(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                features.len()
            )));
        }
        let output = self
            .layers
            .iter()
            .fold(self.scaler.transform(features), |x, layer| layer.forward(&x));
        output
            .get(0)
            .copied()
            .ok_or_else(|| CalcError::prediction_failed("model produced no output"))
    }
}
