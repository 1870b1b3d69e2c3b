//! # Capacity Resolution
//!
//! Combines the flexural and shear limiting loads into the reported capacity:
//! governing load, self-weight deduction, failure mode, and advisory warnings.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "Wu_kN_gross": 105.65,
//!   "Wu_kN_net": 92.15,
//!   "Mu_kNm": 105.65,
//!   "Vu_kN": 147.42,
//!   "d_mm": 409.0,
//!   "pt_percent": 0.655,
//!   "tau_v": 0.43,
//!   "tau_c": 0.395,
//!   "tau_c_max": 3.1,
//!   "mode": "Flexural",
//!   "warnings": []
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::{BeamSpec, DerivedSection, FlexuralCapacity, ShearCapacity};
use crate::equations::beam;
use crate::materials::RC_UNIT_WEIGHT_KN_M3;
use crate::units::{KiloNewtonMeters, KiloNewtons, Meters, Millimeters, NewtonMillimeters, Newtons};

/// A mode governs only when its load is below this fraction of the other
pub const MODE_BAND: f64 = 0.9;

// ============================================================================
// Failure mode
// ============================================================================

/// Which limit state governs the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    /// Flexural load at least 10 % below shear load
    Flexural,
    /// Shear load at least 10 % below flexural load
    Shear,
    /// Within 10 % of each other
    Combined,
}

impl FailureMode {
    pub const ALL: [FailureMode; 3] = [FailureMode::Flexural, FailureMode::Shear, FailureMode::Combined];

    pub fn display_name(&self) -> &'static str {
        match self {
            FailureMode::Flexural => "Flexural",
            FailureMode::Shear => "Shear",
            FailureMode::Combined => "Combined",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classify the governing mode from the two limiting loads.
///
/// # Example
///
/// ```rust
/// use rcbeam_core::calculations::{classify_failure_mode, FailureMode};
///
/// assert_eq!(classify_failure_mode(100.0, 200.0), FailureMode::Flexural);
/// assert_eq!(classify_failure_mode(200.0, 100.0), FailureMode::Shear);
/// assert_eq!(classify_failure_mode(100.0, 105.0), FailureMode::Combined);
/// ```
pub fn classify_failure_mode(w_flex: f64, w_shear: f64) -> FailureMode {
    if w_flex < MODE_BAND * w_shear {
        FailureMode::Flexural
    } else if w_shear < MODE_BAND * w_flex {
        FailureMode::Shear
    } else {
        FailureMode::Combined
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Advisory condition attached to an otherwise valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityWarning {
    /// τv > τc,max: the section is too small whatever the stirrups
    ShearStressExceedsMax,
    /// Net capacity ≤ 0: the beam cannot carry its own weight
    FailsUnderSelfWeight,
}

impl CapacityWarning {
    /// Message text as it appears in the result's `warnings` list
    pub fn message(&self) -> &'static str {
        match self {
            CapacityWarning::ShearStressExceedsMax => "τv exceeds τc,max → unsafe section.",
            CapacityWarning::FailsUnderSelfWeight => "Beam fails under self weight!",
        }
    }
}

impl std::fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Capacity of one beam, in the wire shape.
///
/// Forces in kN, moment in kN·m, stresses in N/mm².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Governing total load before self-weight (kN)
    #[serde(rename = "Wu_kN_gross")]
    pub wu_kn_gross: f64,
    /// Governing total load less self-weight (kN)
    #[serde(rename = "Wu_kN_net")]
    pub wu_kn_net: f64,
    /// Moment of resistance (kN·m)
    #[serde(rename = "Mu_kNm")]
    pub mu_knm: f64,
    /// Shear resistance (kN)
    #[serde(rename = "Vu_kN")]
    pub vu_kn: f64,
    /// Effective depth (mm)
    pub d_mm: f64,
    /// Tension reinforcement percentage
    pub pt_percent: f64,
    /// Nominal shear stress at the flexural limiting load
    pub tau_v: f64,
    /// Design shear strength of concrete
    pub tau_c: f64,
    /// Maximum shear stress for the grade
    pub tau_c_max: f64,
    /// Governing failure mode
    pub mode: FailureMode,
    /// Advisory messages, shear-stress warning first
    pub warnings: Vec<String>,
}

impl CapacityResult {
    /// True when no advisory warning fired
    pub fn is_safe(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Resolver output: the wire result plus the intermediate values behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Governing total load (N)
    pub wu_n: f64,
    /// Self-weight over the full length (kN)
    pub self_weight_kn: f64,
    pub mode: FailureMode,
    /// Warnings in emission order
    pub warnings: Vec<CapacityWarning>,
    pub result: CapacityResult,
}

/// Resolve the governing capacity.
pub fn resolve(
    spec: &BeamSpec,
    derived: &DerivedSection,
    flexure: &FlexuralCapacity,
    shear: &ShearCapacity,
) -> Resolution {
    let wu_n = flexure.w_flex_n.min(shear.w_shear_n);

    let self_weight_kn = beam::self_weight_kn(
        RC_UNIT_WEIGHT_KN_M3,
        Meters::from(Millimeters(spec.width_mm())).value(),
        Meters::from(Millimeters(spec.overall_depth_mm())).value(),
        Meters::from(Millimeters(spec.span_mm())).value(),
    );
    let wu_kn_gross = KiloNewtons::from(Newtons(wu_n)).value();
    let wu_kn_net = wu_kn_gross - self_weight_kn;

    let mode = classify_failure_mode(flexure.w_flex_n, shear.w_shear_n);

    let mut warnings = Vec::new();
    if shear.tau_v > shear.tau_c_max {
        warn!(tau_v = shear.tau_v, tau_c_max = shear.tau_c_max, "nominal shear stress exceeds maximum");
        warnings.push(CapacityWarning::ShearStressExceedsMax);
    }
    if wu_kn_net <= 0.0 {
        warn!(wu_kn_net, self_weight_kn, "beam fails under self weight");
        warnings.push(CapacityWarning::FailsUnderSelfWeight);
    }

    let result = CapacityResult {
        wu_kn_gross,
        wu_kn_net,
        mu_knm: KiloNewtonMeters::from(NewtonMillimeters(flexure.mu_nmm)).value(),
        vu_kn: KiloNewtons::from(Newtons(shear.vu_n)).value(),
        d_mm: derived.effective_depth_mm,
        pt_percent: flexure.pt_percent,
        tau_v: shear.tau_v,
        tau_c: shear.tau_c,
        tau_c_max: shear.tau_c_max,
        mode,
        warnings: warnings.iter().map(|w| w.message().to_string()).collect(),
    };

    Resolution {
        wu_n,
        self_weight_kn,
        mode,
        warnings,
        result,
    }
}
