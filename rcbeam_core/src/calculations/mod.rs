//! # Capacity Calculation
//!
//! The deterministic capacity check, split into the stages it is evaluated in:
//!
//! ```text
//! BeamParameters ─validate─▶ BeamSpec ─▶ section ─┬─▶ flexure ─┬─▶ capacity
//!                                                 └────────────┴─▶ shear ─┘
//! ```
//!
//! Each stage is a pure function returning a serializable struct. The wire
//! entry point is [`calculate`]; [`analyze`] keeps every intermediate value
//! for reports.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::calculations::{calculate, BeamParameters, FailureMode};
//!
//! let params: BeamParameters = serde_json::from_str(r#"{
//!     "fck": 25, "fy": 415, "b": 300, "D": 450, "L": 4000,
//!     "load_type": "Point Load", "main_dia": 16, "main_count": 4,
//!     "stirrup_dia": 8, "spacing": 150
//! }"#).unwrap();
//!
//! let result = calculate(&params).unwrap();
//! assert_eq!(result.d_mm, 409.0);
//! assert_eq!(result.mode, FailureMode::Flexural);
//! assert!(result.warnings.is_empty());
//! ```

pub mod capacity;
pub mod flexure;
pub mod input;
pub mod section;
pub mod shear;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::equations::registry::{capacity_equations_for, EquationTracker};
use crate::errors::{CalcError, CalcResult};

pub use capacity::{classify_failure_mode, resolve, CapacityResult, CapacityWarning, FailureMode, Resolution};
pub use flexure::{flexural_capacity, FlexuralCapacity};
pub use input::{BeamParameters, BeamSpec, LoadPattern};
pub use section::{derive_section, DerivedSection};
pub use shear::{shear_capacity, ShearCapacity};

/// Full trace of one capacity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityAnalysis {
    pub section: DerivedSection,
    pub flexure: FlexuralCapacity,
    pub shear: ShearCapacity,
    pub resolution: Resolution,
    /// Equations applied, in evaluation order
    pub equations: EquationTracker,
}

impl CapacityAnalysis {
    /// The wire-shaped result
    pub fn result(&self) -> &CapacityResult {
        &self.resolution.result
    }

    pub fn into_result(self) -> CapacityResult {
        self.resolution.result
    }
}

/// Run every stage on a validated beam and keep the intermediates.
///
/// # Errors
///
/// - [`CalcError::InvalidGeometry`] when the effective depth is not positive
/// - [`CalcError::CalculationFailed`] if any reported value is not finite
pub fn analyze(spec: &BeamSpec) -> CalcResult<CapacityAnalysis> {
    let span = debug_span!("analyze", beam = %spec.describe(), load = %spec.load_pattern());
    let _guard = span.enter();

    let section = derive_section(spec)?;
    let flexure = flexural_capacity(spec, &section);
    let shear = shear_capacity(spec, &section, &flexure);
    let resolution = resolve(spec, &section, &flexure, &shear);

    ensure_finite(&resolution.result)?;

    let mut equations = EquationTracker::new();
    for equation in capacity_equations_for(spec.load_pattern() == LoadPattern::TwoPoint) {
        equations.record(equation, equation.metadata().category.display_name());
    }
    debug!(equations = equations.usages().len(), mode = %resolution.mode, "capacity resolved");

    Ok(CapacityAnalysis {
        section,
        flexure,
        shear,
        resolution,
        equations,
    })
}

/// Validate raw parameters and compute the capacity.
///
/// Deterministic: the same parameters always give a bit-identical result.
pub fn calculate(params: &BeamParameters) -> CalcResult<CapacityResult> {
    let spec = params.validate()?;
    calculate_spec(&spec)
}

/// Compute the capacity of an already validated beam.
pub fn calculate_spec(spec: &BeamSpec) -> CalcResult<CapacityResult> {
    analyze(spec).map(CapacityAnalysis::into_result)
}

fn ensure_finite(result: &CapacityResult) -> CalcResult<()> {
    let fields = [
        ("Wu_kN_gross", result.wu_kn_gross),
        ("Wu_kN_net", result.wu_kn_net),
        ("Mu_kNm", result.mu_knm),
        ("Vu_kN", result.vu_kn),
        ("d_mm", result.d_mm),
        ("pt_percent", result.pt_percent),
        ("tau_v", result.tau_v),
        ("tau_c", result.tau_c),
        ("tau_c_max", result.tau_c_max),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(CalcError::calculation_failed(
            "Capacity",
            format!("{} is not finite ({})", name, value),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::Equation;
    use approx::assert_relative_eq;

    fn reference() -> BeamParameters {
        BeamParameters {
            fck: 25,
            fy: 415,
            b: 300.0,
            overall_depth: 450.0,
            span: 4000.0,
            load_type: "Point Load".to_string(),
            main_dia: 16.0,
            main_count: 4,
            stirrup_dia: 8.0,
            spacing: 150.0,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&reference()).unwrap();

        assert_eq!(result.d_mm, 409.0);
        assert_eq!(result.mode, FailureMode::Flexural);
        assert!(result.warnings.is_empty());
        assert_relative_eq!(result.mu_knm, 105.65, epsilon = 0.01);
        assert_relative_eq!(result.wu_kn_gross, 105.65, epsilon = 0.01);
        assert_relative_eq!(result.wu_kn_net, result.wu_kn_gross - 13.5, epsilon = 1e-9);
        assert_eq!(result.tau_c_max, 3.1);
    }

    #[test]
    fn test_idempotent() {
        let a = serde_json::to_string(&calculate(&reference()).unwrap()).unwrap();
        let b = serde_json::to_string(&calculate(&reference()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeated_analyses_are_equal() {
        let spec = reference().validate().unwrap();
        let first = analyze(&spec).unwrap();
        assert_eq!(first, analyze(&spec).unwrap());

        let two_point = BeamParameters {
            load_type: "Two Point Load".to_string(),
            ..reference()
        };
        assert_ne!(first, analyze(&two_point.validate().unwrap()).unwrap());
    }

    #[test]
    fn test_invalid_input_stops_before_calculation() {
        let params = BeamParameters { fck: 45, ..reference() };
        assert_eq!(calculate(&params).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_self_weight_failure_warning() {
        // Lightest steel on the heaviest, longest section
        let params = BeamParameters {
            fck: 20,
            b: 1000.0,
            overall_depth: 1000.0,
            span: 10_000.0,
            main_dia: 8.0,
            main_count: 1,
            stirrup_dia: 6.0,
            spacing: 300.0,
            ..reference()
        };
        let result = calculate(&params).unwrap();
        assert!(result.wu_kn_net <= 0.0);
        assert_eq!(result.warnings, vec!["Beam fails under self weight!".to_string()]);
    }

    #[test]
    fn test_analysis_keeps_intermediates() {
        let analysis = analyze(&reference().validate().unwrap()).unwrap();
        assert_eq!(analysis.section.effective_depth_mm, analysis.result().d_mm);
        assert_eq!(analysis.resolution.wu_n, analysis.flexure.w_flex_n.min(analysis.shear.w_shear_n));
        assert_relative_eq!(analysis.resolution.self_weight_kn, 13.5, epsilon = 1e-12);

        let used = analysis.equations.unique_equations();
        assert!(used.contains(&Equation::PointLoadFromMoment));
        assert!(!used.contains(&Equation::TwoPointLoadFromMoment));
    }

    #[test]
    fn test_ensure_finite_rejects_nan() {
        let mut result = calculate(&reference()).unwrap();
        result.tau_v = f64::NAN;
        let err = ensure_finite(&result).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("tau_v"));
    }
}
