//! # Flexural Capacity
//!
//! Moment of resistance of the singly reinforced section and the applied load
//! that produces it.
//!
//! ## Procedure
//!
//! 1. Neutral axis from equilibrium, clamped to `0.48·d`
//! 2. `Mu` from the stress-block resultant, capped at `Mu,lim`
//! 3. `Mu` converted to a total load over the effective span for the load pattern
//! 4. Reinforcement percentage `pt` for the shear stage

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{BeamSpec, DerivedSection, LoadPattern};
use crate::equations::{beam, is456, section};

/// Intermediate and final flexural values. Forces in N, lengths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexuralCapacity {
    /// Neutral axis depth from equilibrium, before clamping (mm)
    pub xu_balanced_mm: f64,
    /// Limiting neutral axis depth 0.48·d (mm)
    pub xu_max_mm: f64,
    /// Neutral axis depth used (mm)
    pub xu_mm: f64,
    /// True when the section is over-reinforced and xu was clamped
    pub xu_clamped: bool,
    /// Limiting moment 0.138·fck·b·d² (N·mm)
    pub mu_lim_nmm: f64,
    /// Moment of resistance (N·mm)
    pub mu_nmm: f64,
    /// Span used for load conversion (mm)
    pub effective_span_mm: f64,
    /// Total load at which flexure governs (N)
    pub w_flex_n: f64,
    /// Tension reinforcement percentage
    pub pt_percent: f64,
}

/// Compute the flexural capacity.
pub fn flexural_capacity(spec: &BeamSpec, derived: &DerivedSection) -> FlexuralCapacity {
    let fck = spec.concrete().fck_mpa();
    let fy = spec.steel().fy_mpa();
    let b = spec.width_mm();
    let d = derived.effective_depth_mm;

    let xu_balanced = is456::neutral_axis_depth(fy, derived.ast_mm2, fck, b);
    let xu_max = is456::limiting_neutral_axis_depth(d);
    let xu = xu_balanced.min(xu_max);

    let mu_lim = is456::limiting_moment(fck, b, d);
    let mu = is456::moment_of_resistance(fck, b, xu, d).min(mu_lim);

    let effective_span = beam::effective_span(spec.span_mm(), d);
    let w_flex = match spec.load_pattern() {
        LoadPattern::SinglePoint => beam::point_load_from_moment(mu, effective_span),
        LoadPattern::TwoPoint => beam::two_point_load_from_moment(mu, effective_span),
    };

    let pt = section::reinforcement_percentage(derived.ast_mm2, b, d);

    debug!(xu_mm = xu, xu_max_mm = xu_max, mu_nmm = mu, w_flex_n = w_flex, pt, "flexure resolved");

    FlexuralCapacity {
        xu_balanced_mm: xu_balanced,
        xu_max_mm: xu_max,
        xu_mm: xu,
        xu_clamped: xu_balanced > xu_max,
        mu_lim_nmm: mu_lim,
        mu_nmm: mu,
        effective_span_mm: effective_span,
        w_flex_n: w_flex,
        pt_percent: pt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{derive_section, BeamParameters};
    use approx::assert_relative_eq;

    fn run(params: BeamParameters) -> FlexuralCapacity {
        let spec = params.validate().unwrap();
        let derived = derive_section(&spec).unwrap();
        flexural_capacity(&spec, &derived)
    }

    fn reference() -> BeamParameters {
        BeamParameters {
            b: 300.0,
            main_count: 4,
            ..BeamParameters::default()
        }
    }

    #[test]
    fn test_under_reinforced_reference() {
        let flex = run(reference());

        // xu = 0.87*415*804.248/(0.36*25*300)
        assert_relative_eq!(flex.xu_mm, 107.546, epsilon = 1e-3);
        assert!(!flex.xu_clamped);
        // Mu = 0.36*25*300*xu*(409 - 0.42*xu)
        assert_relative_eq!(flex.mu_nmm, 105.65e6, max_relative = 1e-3);
        assert_eq!(flex.effective_span_mm, 4000.0);
        assert_relative_eq!(flex.w_flex_n, 4.0 * flex.mu_nmm / 4000.0);
        assert_relative_eq!(flex.pt_percent, 0.6554, epsilon = 1e-4);
    }

    #[test]
    fn test_two_point_is_one_and_a_half_times_single() {
        let single = run(reference());
        let two = run(BeamParameters {
            load_type: "Two Point Load".to_string(),
            ..reference()
        });
        assert_eq!(single.mu_nmm, two.mu_nmm);
        assert_relative_eq!(two.w_flex_n, 1.5 * single.w_flex_n, max_relative = 1e-12);
    }

    #[test]
    fn test_over_reinforced_is_clamped_and_capped() {
        // 8-32φ Fe500 in a narrow M20 section
        let flex = run(BeamParameters {
            fck: 20,
            fy: 500,
            b: 150.0,
            overall_depth: 300.0,
            main_dia: 32.0,
            main_count: 8,
            ..BeamParameters::default()
        });
        assert!(flex.xu_clamped);
        assert_eq!(flex.xu_mm, flex.xu_max_mm);
        assert!(flex.mu_nmm <= flex.mu_lim_nmm);
        assert_relative_eq!(flex.mu_nmm, flex.mu_lim_nmm, max_relative = 2e-3);
    }
}
