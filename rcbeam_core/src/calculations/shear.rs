//! # Shear Capacity
//!
//! Shear resistance of concrete plus vertical stirrups, and the total load
//! at which shear governs.
//!
//! The shear demand used for the nominal stress check is the support shear
//! at the flexural limiting load, so `τv` tells how hard the section is
//! working in shear when it reaches its moment capacity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{BeamSpec, DerivedSection, FlexuralCapacity};
use crate::equations::{beam, is456};
use crate::materials::ShearStrengthTable;

/// Intermediate and final shear values. Forces in N, stresses in N/mm².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearCapacity {
    /// Design shear strength of concrete
    pub tau_c: f64,
    /// Maximum shear stress for the grade
    pub tau_c_max: f64,
    /// Support shear at the flexural limiting load (N)
    pub v_n: f64,
    /// Nominal shear stress
    pub tau_v: f64,
    /// Concrete contribution (N)
    pub vc_n: f64,
    /// Stirrup contribution (N)
    pub vs_n: f64,
    /// Total shear resistance (N)
    pub vu_n: f64,
    /// Total load at which shear governs (N)
    pub w_shear_n: f64,
}

/// Compute the shear capacity.
pub fn shear_capacity(spec: &BeamSpec, derived: &DerivedSection, flexure: &FlexuralCapacity) -> ShearCapacity {
    let grade = spec.concrete();
    let b = spec.width_mm();
    let d = derived.effective_depth_mm;

    let tau_c = ShearStrengthTable::design_shear_strength(grade, flexure.pt_percent);
    let tau_c_max = ShearStrengthTable::max_shear_stress(grade);

    let v = beam::support_shear(flexure.w_flex_n);
    let tau_v = is456::nominal_shear_stress(v, b, d);

    let vc = is456::concrete_shear_capacity(tau_c, b, d);
    let vs = is456::stirrup_shear_capacity(spec.steel().fy_mpa(), derived.asv_mm2, d, spec.spacing_mm());
    let vu = vc + vs;

    let w_shear = beam::load_from_support_shear(vu);

    debug!(tau_c, tau_v, vc_n = vc, vs_n = vs, w_shear_n = w_shear, "shear resolved");

    ShearCapacity {
        tau_c,
        tau_c_max,
        v_n: v,
        tau_v,
        vc_n: vc,
        vs_n: vs,
        vu_n: vu,
        w_shear_n: w_shear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{derive_section, flexural_capacity, BeamParameters};
    use approx::assert_relative_eq;

    fn run(params: BeamParameters) -> (FlexuralCapacity, ShearCapacity) {
        let spec = params.validate().unwrap();
        let derived = derive_section(&spec).unwrap();
        let flex = flexural_capacity(&spec, &derived);
        let shear = shear_capacity(&spec, &derived, &flex);
        (flex, shear)
    }

    #[test]
    fn test_reference_shear() {
        let (flex, shear) = run(BeamParameters {
            b: 300.0,
            main_count: 4,
            ..BeamParameters::default()
        });

        // pt = 0.6555 between 0.50 (0.37) and 0.75 (0.41)
        assert_relative_eq!(shear.tau_c, 0.37 + (flex.pt_percent - 0.5) / 0.25 * 0.04, epsilon = 1e-12);
        assert_eq!(shear.tau_c_max, 3.1);
        assert_relative_eq!(shear.v_n, flex.w_flex_n / 2.0);
        assert_relative_eq!(shear.tau_v, shear.v_n / (300.0 * 409.0));
        assert_relative_eq!(shear.vc_n, shear.tau_c * 300.0 * 409.0);
        // 0.87*415*100.531*409/150
        assert_relative_eq!(shear.vs_n, 98_969.0, epsilon = 2.0);
        assert_relative_eq!(shear.vu_n, shear.vc_n + shear.vs_n);
        assert_relative_eq!(shear.w_shear_n, 2.0 * shear.vu_n);
    }

    #[test]
    fn test_light_steel_uses_lowest_table_entry() {
        // 1-8φ in a wide section: pt far below 0.15
        let (flex, shear) = run(BeamParameters {
            fck: 40,
            b: 1000.0,
            overall_depth: 1000.0,
            main_dia: 8.0,
            main_count: 1,
            ..BeamParameters::default()
        });
        assert!(flex.pt_percent < 0.15);
        assert_eq!(shear.tau_c, 0.32);
    }

    #[test]
    fn test_closer_stirrups_carry_more() {
        let base = BeamParameters::default();
        let (_, wide) = run(BeamParameters { spacing: 300.0, ..base.clone() });
        let (_, close) = run(BeamParameters { spacing: 80.0, ..base });
        assert!(close.vs_n > wide.vs_n);
        assert_eq!(close.vc_n, wide.vc_n);
    }
}
