//! # Cross-Section Formulas
//!
//! Geometric properties of a singly reinforced rectangular RC section.
//!
//! ## Notation
//!
//! - `D` = Overall depth of section (mm)
//! - `d` = Effective depth, compression face to centroid of tension steel (mm)
//! - `b` = Width of section (mm)
//! - `φ` = Bar diameter (mm)
//! - `Ast` = Area of tension reinforcement (mm²)
//! - `Asv` = Total area of stirrup legs at one section (mm²)
//! - `pt` = Tension reinforcement percentage
//!
//! ```text
//!     ┌───────── b ─────────┐
//!     │                     │  ─┬─
//!     │                     │   │
//!   D │                     │   d
//!     │  ○      ○      ○    │  ─┴─  centroid of main bars
//!     └─────────────────────┘  cover + stirrup + φ/2 below
//! ```
//!
//! ## References
//!
//! - IS 456:2000 Clause 26.4: Nominal cover to reinforcement
//! - IS 456:2000 Clause 40.1: Nominal shear stress (definition of d)

use std::f64::consts::PI;

// =============================================================================
// REINFORCEMENT AREAS
// =============================================================================

/// Cross-sectional area of one round bar
///
/// # Formula
/// A = (π/4) × φ²
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::section::bar_area;
///
/// // 16 mm bar
/// let area = bar_area(16.0);
/// assert!((area - 201.06).abs() < 0.01);
/// ```
#[inline]
pub fn bar_area(dia_mm: f64) -> f64 {
    PI / 4.0 * (dia_mm * dia_mm)
}

/// Total area of a group of identical main bars
///
/// # Formula
/// Ast = (π/4) × φ² × n
#[inline]
pub fn main_steel_area(dia_mm: f64, count: u32) -> f64 {
    bar_area(dia_mm) * f64::from(count)
}

/// Area of a stirrup crossing the section on all of its legs
///
/// # Formula
/// Asv = (π/4) × φ² × legs
#[inline]
pub fn stirrup_area(dia_mm: f64, legs: u32) -> f64 {
    bar_area(dia_mm) * f64::from(legs)
}

// =============================================================================
// DEPTHS AND RATIOS
// =============================================================================

/// Effective depth of a singly reinforced section with one layer of bars
///
/// # Formula
/// d = D − cover − φ_stirrup − φ_main/2
///
/// The result may be zero or negative for nonsensical inputs; callers decide
/// how to treat that.
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::section::effective_depth;
///
/// let d = effective_depth(450.0, 25.0, 8.0, 16.0);
/// assert_eq!(d, 409.0);
/// ```
#[inline]
pub fn effective_depth(overall_depth_mm: f64, cover_mm: f64, stirrup_dia_mm: f64, main_dia_mm: f64) -> f64 {
    overall_depth_mm - cover_mm - stirrup_dia_mm - main_dia_mm / 2.0
}

/// Tension reinforcement percentage
///
/// # Formula
/// pt = 100 × Ast / (b × d)
#[inline]
pub fn reinforcement_percentage(ast_mm2: f64, b_mm: f64, d_mm: f64) -> f64 {
    100.0 * ast_mm2 / (b_mm * d_mm)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bar_area() {
        // 12 mm bar: 113.097 mm²
        assert_relative_eq!(bar_area(12.0), 113.097, epsilon = 1e-3);
    }

    #[test]
    fn test_bar_area_squares_diameter_first() {
        // (π/4)·(φ²), bit for bit, over the whole bar range
        for tenths in 60..=320 {
            let dia = f64::from(tenths) / 10.0;
            assert_eq!(bar_area(dia).to_bits(), (std::f64::consts::FRAC_PI_4 * (dia * dia)).to_bits());
        }
    }

    #[test]
    fn test_main_steel_area() {
        // 4 - 16φ = 804.25 mm²
        assert_relative_eq!(main_steel_area(16.0, 4), 804.248, epsilon = 1e-3);
    }

    #[test]
    fn test_two_legged_stirrup() {
        // 2L - 8φ = 100.53 mm²
        assert_relative_eq!(stirrup_area(8.0, 2), 100.531, epsilon = 1e-3);
    }

    #[test]
    fn test_effective_depth_can_go_negative() {
        assert_eq!(effective_depth(40.0, 25.0, 12.0, 32.0), -13.0);
    }

    #[test]
    fn test_reinforcement_percentage() {
        // 1000 mm² in a 250 x 400 section = 1.0 %
        assert_relative_eq!(reinforcement_percentage(1000.0, 250.0, 400.0), 1.0);
    }
}
