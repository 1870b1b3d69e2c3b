//! # Simply-Supported Beam Statics
//!
//! Closed-form relations between applied point loads, midspan moment, and
//! support shear for a simply-supported span, written in the *inverse* form the
//! capacity check needs: given a resisting moment or shear, what total load
//! produces it?
//!
//! ## Notation
//!
//! - `L` = Span (mm)
//! - `W` = Total applied load (N); for two-point loading each load is W/2
//! - `M` = Maximum moment (N·mm)
//! - `V` = Support shear (N)
//!
//! ## Load Patterns
//!
//! ```text
//!   Single point              Two-point (third points)
//!         W                      W/2       W/2
//!         ↓                       ↓         ↓
//!   △─────┴─────△            △────┴────┴────△
//!   ←──── L ────→            ← L/3 → L/3 → L/3 →
//!   M = WL/4                 M = WL/6
//! ```
//!
//! In both cases the reactions are W/2, so V = W/2.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Case 1a
//! - IS 875 (Part 1): unit weight of reinforced concrete

// =============================================================================
// MOMENT ⇄ LOAD
// =============================================================================

/// Total midspan point load that produces moment `m` on span `l`
///
/// # Formula
/// M = WL/4  ⇒  W = 4M/L
#[inline]
pub fn point_load_from_moment(m_nmm: f64, l_mm: f64) -> f64 {
    4.0 * m_nmm / l_mm
}

/// Total of two third-point loads that produces moment `m` on span `l`
///
/// # Formula
/// M = WL/6  ⇒  W = 6M/L
#[inline]
pub fn two_point_load_from_moment(m_nmm: f64, l_mm: f64) -> f64 {
    6.0 * m_nmm / l_mm
}

// =============================================================================
// SHEAR ⇄ LOAD
// =============================================================================

/// Support shear for a symmetric total load
///
/// # Formula
/// V = W/2
#[inline]
pub fn support_shear(total_load_n: f64) -> f64 {
    total_load_n / 2.0
}

/// Total symmetric load that produces support shear `v`
///
/// # Formula
/// W = 2V
#[inline]
pub fn load_from_support_shear(v_n: f64) -> f64 {
    2.0 * v_n
}

// =============================================================================
// SPAN AND SELF-WEIGHT
// =============================================================================

/// Span used to convert moment capacity to load.
///
/// # Formula
/// L_eff = min(L + d, L)
///
/// With d > 0 this is always L. The form is kept as-is so results match the
/// published capacity tables produced with it.
#[inline]
pub fn effective_span(span_mm: f64, effective_depth_mm: f64) -> f64 {
    (span_mm + effective_depth_mm).min(span_mm)
}

/// Self-weight of a prismatic rectangular beam over its full length
///
/// # Formula
/// W_sw = γ × b × D × L   (all lengths in m, γ in kN/m³, result in kN)
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::beam::self_weight_kn;
///
/// // 300 x 450 beam, 4 m long, γ = 25 kN/m³
/// let sw = self_weight_kn(25.0, 0.3, 0.45, 4.0);
/// assert!((sw - 13.5).abs() < 1e-9);
/// ```
#[inline]
pub fn self_weight_kn(unit_weight_kn_m3: f64, b_m: f64, depth_m: f64, length_m: f64) -> f64 {
    unit_weight_kn_m3 * b_m * depth_m * length_m
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_load_inversion() {
        // P = 100 kN on 4 m: M = 100 kN·m; inverting returns P
        let m = 100_000.0 * 4000.0 / 4.0;
        assert_relative_eq!(point_load_from_moment(m, 4000.0), 100_000.0);
    }

    #[test]
    fn test_two_point_load_inversion() {
        // W = 60 kN as 2 x 30 kN at third points of 3 m: M = 30 kN x 1 m
        let m = 30_000.0 * 1000.0;
        assert_relative_eq!(two_point_load_from_moment(m, 3000.0), 60_000.0);
    }

    #[test]
    fn test_two_point_carries_more_for_same_moment() {
        let m = 50.0e6;
        assert!(two_point_load_from_moment(m, 5000.0) > point_load_from_moment(m, 5000.0));
    }

    #[test]
    fn test_shear_round_trip() {
        assert_eq!(load_from_support_shear(support_shear(84_000.0)), 84_000.0);
    }

    #[test]
    fn test_effective_span_is_clear_span() {
        assert_eq!(effective_span(4000.0, 409.0), 4000.0);
        assert_eq!(effective_span(500.0, 950.0), 500.0);
    }

    #[test]
    fn test_self_weight_scales_linearly() {
        let base = self_weight_kn(25.0, 0.3, 0.5, 5.0);
        assert_relative_eq!(self_weight_kn(25.0, 0.6, 0.5, 5.0), 2.0 * base);
        assert_relative_eq!(self_weight_kn(25.0, 0.3, 1.0, 5.0), 2.0 * base);
        assert_relative_eq!(self_weight_kn(25.0, 0.3, 0.5, 10.0), 2.0 * base);
    }
}
