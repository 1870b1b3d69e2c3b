//! # Section Geometry
//!
//! Effective depth and reinforcement areas of the validated beam.
//!
//! ## Assumptions
//!
//! - Clear cover 25 mm to the stirrups
//! - One layer of main bars
//! - Two-legged vertical stirrups

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::BeamSpec;
use crate::equations::section;
use crate::errors::{CalcError, CalcResult};

/// Clear cover to the stirrups (mm)
pub const COVER_MM: f64 = 25.0;

/// Legs per stirrup
pub const STIRRUP_LEGS: u32 = 2;

/// Geometry derived from the raw dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedSection {
    /// Effective depth d (mm), always positive
    pub effective_depth_mm: f64,
    /// Area of tension steel Ast (mm²)
    pub ast_mm2: f64,
    /// Area of stirrup legs Asv (mm²)
    pub asv_mm2: f64,
}

/// Derive effective depth and steel areas.
///
/// # Errors
///
/// [`CalcError::InvalidGeometry`] when `d ≤ 0`. No partial result is produced.
pub fn derive_section(spec: &BeamSpec) -> CalcResult<DerivedSection> {
    let d = section::effective_depth(
        spec.overall_depth_mm(),
        COVER_MM,
        spec.stirrup_dia_mm(),
        spec.main_dia_mm(),
    );
    if !(d > 0.0) {
        return Err(CalcError::invalid_geometry(d, "Invalid effective depth"));
    }

    let derived = DerivedSection {
        effective_depth_mm: d,
        ast_mm2: section::main_steel_area(spec.main_dia_mm(), spec.main_count()),
        asv_mm2: section::stirrup_area(spec.stirrup_dia_mm(), STIRRUP_LEGS),
    };
    debug!(
        d_mm = derived.effective_depth_mm,
        ast_mm2 = derived.ast_mm2,
        asv_mm2 = derived.asv_mm2,
        "section derived"
    );
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::BeamParameters;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_section() {
        let params = BeamParameters {
            b: 300.0,
            main_count: 4,
            ..BeamParameters::default()
        };
        let derived = derive_section(&params.validate().unwrap()).unwrap();

        assert_eq!(derived.effective_depth_mm, 409.0);
        assert_relative_eq!(derived.ast_mm2, 804.248, epsilon = 1e-3);
        assert_relative_eq!(derived.asv_mm2, 100.531, epsilon = 1e-3);
    }

    #[test]
    fn test_depth_formula_over_bar_sizes() {
        for main_dia in [8.0, 12.0, 20.0, 32.0] {
            for stirrup_dia in [6.0, 10.0, 12.0] {
                let params = BeamParameters {
                    overall_depth: 300.0,
                    main_dia,
                    stirrup_dia,
                    ..BeamParameters::default()
                };
                let derived = derive_section(&params.validate().unwrap()).unwrap();
                assert_eq!(
                    derived.effective_depth_mm,
                    300.0 - 25.0 - stirrup_dia - main_dia / 2.0
                );
            }
        }
    }

    #[test]
    fn test_smallest_section_still_positive() {
        // Worst case in bounds: D = 200, 12φ stirrups, 32φ bars -> d = 147
        let params = BeamParameters {
            overall_depth: 200.0,
            main_dia: 32.0,
            stirrup_dia: 12.0,
            ..BeamParameters::default()
        };
        let derived = derive_section(&params.validate().unwrap()).unwrap();
        assert_eq!(derived.effective_depth_mm, 147.0);
    }

    #[test]
    fn test_non_positive_depth_is_invalid_geometry() {
        // Default bars: 25 cover + 8φ stirrups + 16φ / 2 = 41 mm above d
        let spec = BeamParameters::default().validate().unwrap();

        for overall_depth in [30.0, 41.0] {
            let err = derive_section(&spec.with_overall_depth_unchecked(overall_depth)).unwrap_err();
            match err {
                CalcError::InvalidGeometry { effective_depth_mm, .. } => {
                    assert_eq!(effective_depth_mm, overall_depth - 41.0);
                }
                other => panic!("expected InvalidGeometry, got {:?}", other),
            }
        }

        let thin = derive_section(&spec.with_overall_depth_unchecked(42.0)).unwrap();
        assert_eq!(thin.effective_depth_mm, 1.0);
    }

    #[test]
    fn test_nan_depth_is_invalid_geometry() {
        let spec = BeamParameters::default().validate().unwrap();
        let err = derive_section(&spec.with_overall_depth_unchecked(f64::NAN)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }
}
