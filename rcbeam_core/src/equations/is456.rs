//! # IS 456 Limit State Formulas
//!
//! Flexure (Annex G) and shear (Clause 40) expressions for a singly reinforced
//! rectangular section at the limit state of collapse.
//!
//! ## Notation
//!
//! - `fck` = Characteristic cube strength of concrete (MPa)
//! - `fy` = Characteristic yield strength of steel (MPa)
//! - `xu` = Depth of neutral axis (mm)
//! - `Mu` = Moment of resistance (N·mm)
//! - `τv`, `τc` = Nominal and design shear stresses (N/mm²)
//! - `sv` = Stirrup spacing (mm)
//!
//! ## Stress Block
//!
//! The parabolic-rectangular concrete block is replaced by its resultant
//! `0.36·fck·b·xu` acting `0.42·xu` below the compression face. Steel is taken
//! at its design stress `0.87·fy`.

/// Design stress factor on steel yield (1/γm with γm = 1.15)
pub const STEEL_DESIGN_FACTOR: f64 = 0.87;

/// Compression block resultant coefficient
pub const STRESS_BLOCK_FACTOR: f64 = 0.36;

/// Depth of compression resultant as a fraction of xu
pub const LEVER_ARM_FACTOR: f64 = 0.42;

/// xu,max / d applied to every steel grade
pub const XU_MAX_RATIO: f64 = 0.48;

/// Mu,lim / (fck·b·d²) applied to every steel grade
pub const MU_LIM_COEFFICIENT: f64 = 0.138;

// =============================================================================
// FLEXURE
// =============================================================================

/// Depth of neutral axis from force equilibrium
///
/// # Formula (Annex G-1.1)
/// xu = 0.87·fy·Ast / (0.36·fck·b)
#[inline]
pub fn neutral_axis_depth(fy: f64, ast_mm2: f64, fck: f64, b_mm: f64) -> f64 {
    STEEL_DESIGN_FACTOR * fy * ast_mm2 / (STRESS_BLOCK_FACTOR * fck * b_mm)
}

/// Limiting depth of neutral axis
///
/// # Formula (Clause 38.1)
/// xu,max = 0.48·d
#[inline]
pub fn limiting_neutral_axis_depth(d_mm: f64) -> f64 {
    XU_MAX_RATIO * d_mm
}

/// Moment of resistance from the concrete compression resultant
///
/// # Formula (Annex G-1.1)
/// Mu = 0.36·fck·b·xu·(d − 0.42·xu)
#[inline]
pub fn moment_of_resistance(fck: f64, b_mm: f64, xu_mm: f64, d_mm: f64) -> f64 {
    STRESS_BLOCK_FACTOR * fck * b_mm * xu_mm * (d_mm - LEVER_ARM_FACTOR * xu_mm)
}

/// Limiting moment of resistance of a balanced section
///
/// # Formula (Annex G-1.1)
/// Mu,lim = 0.138·fck·b·d²
#[inline]
pub fn limiting_moment(fck: f64, b_mm: f64, d_mm: f64) -> f64 {
    MU_LIM_COEFFICIENT * fck * b_mm * d_mm * d_mm
}

// =============================================================================
// SHEAR
// =============================================================================

/// Nominal shear stress
///
/// # Formula (Clause 40.1)
/// τv = V / (b·d)
#[inline]
pub fn nominal_shear_stress(v_n: f64, b_mm: f64, d_mm: f64) -> f64 {
    v_n / (b_mm * d_mm)
}

/// Shear carried by concrete
///
/// # Formula (Clause 40.2)
/// Vc = τc·b·d
#[inline]
pub fn concrete_shear_capacity(tau_c: f64, b_mm: f64, d_mm: f64) -> f64 {
    tau_c * b_mm * d_mm
}

/// Shear carried by vertical stirrups
///
/// # Formula (Clause 40.4a)
/// Vs = 0.87·fy·Asv·d / sv
#[inline]
pub fn stirrup_shear_capacity(fy: f64, asv_mm2: f64, d_mm: f64, spacing_mm: f64) -> f64 {
    STEEL_DESIGN_FACTOR * fy * asv_mm2 * d_mm / spacing_mm
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_neutral_axis_depth() {
        // 4-16φ Fe415 in M25, b = 300: xu = 0.87*415*804.25 / (0.36*25*300)
        let xu = neutral_axis_depth(415.0, 804.248, 25.0, 300.0);
        assert_relative_eq!(xu, 107.546, epsilon = 1e-3);
    }

    #[test]
    fn test_balanced_section_reaches_limiting_moment() {
        // At xu = 0.48d, Mu = 0.36*0.48*(1 - 0.42*0.48)*fck*b*d² ≈ 0.1380*fck*b*d²
        let d = 400.0;
        let mu = moment_of_resistance(20.0, 250.0, limiting_neutral_axis_depth(d), d);
        let mu_lim = limiting_moment(20.0, 250.0, d);
        assert_relative_eq!(mu, mu_lim, max_relative = 1e-3);
    }

    #[test]
    fn test_moment_grows_with_xu_below_limit() {
        let d = 500.0;
        let low = moment_of_resistance(30.0, 300.0, 50.0, d);
        let high = moment_of_resistance(30.0, 300.0, 150.0, d);
        assert!(high > low);
    }

    #[test]
    fn test_shear_components() {
        assert_relative_eq!(nominal_shear_stress(60_000.0, 300.0, 400.0), 0.5);
        assert_relative_eq!(concrete_shear_capacity(0.5, 300.0, 400.0), 60_000.0);
        // 0.87*415*100.53*400/150
        assert_relative_eq!(
            stirrup_shear_capacity(415.0, 100.531, 400.0, 150.0),
            96_791.2,
            epsilon = 0.5
        );
    }
}
