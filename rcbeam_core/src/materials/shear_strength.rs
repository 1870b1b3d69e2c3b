//! Design Shear Strength of Concrete (IS 456 Tables 19 and 20)
//!
//! `τc` depends on the concrete grade and the tension reinforcement percentage
//! `pt = 100·Ast/(b·d)`. Values between the tabulated `pt` breakpoints are
//! linearly interpolated; outside `[0.15, 1.0]` the end values hold flat.
//!
//! `τc,max` is the ceiling on nominal shear stress regardless of shear
//! reinforcement.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::{ConcreteGrade, ShearStrengthTable};
//!
//! let tau_c = ShearStrengthTable::design_shear_strength(ConcreteGrade::M25, 0.5);
//! assert!((tau_c - 0.37).abs() < 1e-12);
//!
//! // Flat beyond the last breakpoint
//! let high = ShearStrengthTable::design_shear_strength(ConcreteGrade::M25, 3.0);
//! assert!((high - 0.46).abs() < 1e-12);
//! ```

use crate::materials::ConcreteGrade;

/// Tension reinforcement percentages at which τc is tabulated
pub const PT_BREAKPOINTS: [f64; 5] = [0.15, 0.25, 0.50, 0.75, 1.0];

/// Lowest tabulated pt; smaller ratios use this row entry
pub const PT_MIN: f64 = PT_BREAKPOINTS[0];

/// Highest tabulated pt; larger ratios use this row entry
pub const PT_MAX: f64 = PT_BREAKPOINTS[PT_BREAKPOINTS.len() - 1];

/// One grade's row of the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearStrengthRow {
    /// τc (N/mm²) at each entry of [`PT_BREAKPOINTS`]
    pub tau_c: [f64; 5],
    /// τc,max (N/mm²)
    pub tau_c_max: f64,
}

const M20: ShearStrengthRow = ShearStrengthRow {
    tau_c: [0.28, 0.32, 0.36, 0.40, 0.45],
    tau_c_max: 2.8,
};
const M25: ShearStrengthRow = ShearStrengthRow {
    tau_c: [0.29, 0.33, 0.37, 0.41, 0.46],
    tau_c_max: 3.1,
};
const M30: ShearStrengthRow = ShearStrengthRow {
    tau_c: [0.30, 0.34, 0.38, 0.42, 0.47],
    tau_c_max: 3.5,
};
const M35: ShearStrengthRow = ShearStrengthRow {
    tau_c: [0.31, 0.35, 0.39, 0.43, 0.48],
    tau_c_max: 3.7,
};
const M40: ShearStrengthRow = ShearStrengthRow {
    tau_c: [0.32, 0.36, 0.40, 0.44, 0.49],
    tau_c_max: 4.0,
};

/// Static shear strength table keyed by concrete grade.
pub struct ShearStrengthTable;

impl ShearStrengthTable {
    /// Get the table row for a grade
    pub fn row(grade: ConcreteGrade) -> &'static ShearStrengthRow {
        match grade {
            ConcreteGrade::M20 => &M20,
            ConcreteGrade::M25 => &M25,
            ConcreteGrade::M30 => &M30,
            ConcreteGrade::M35 => &M35,
            ConcreteGrade::M40 => &M40,
        }
    }

    /// Design shear strength τc (N/mm²) for a reinforcement percentage.
    ///
    /// `pt` is clamped to `[PT_MIN, PT_MAX]` before interpolation, so the
    /// result is never extrapolated.
    pub fn design_shear_strength(grade: ConcreteGrade, pt_percent: f64) -> f64 {
        let pt = pt_percent.clamp(PT_MIN, PT_MAX);
        interpolate(&PT_BREAKPOINTS, &Self::row(grade).tau_c, pt)
    }

    /// Maximum shear stress τc,max (N/mm²)
    pub fn max_shear_stress(grade: ConcreteGrade) -> f64 {
        Self::row(grade).tau_c_max
    }
}

/// Piecewise-linear interpolation over sorted breakpoints.
///
/// Inputs at or beyond either end return the end value.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let (Some(&x_first), Some(&x_last)) = (xs.first(), xs.last()) else {
        return f64::NAN;
    };
    if x <= x_first {
        return ys[0];
    }
    if x >= x_last {
        return ys[ys.len() - 1];
    }

    for (xw, yw) in xs.windows(2).zip(ys.windows(2)) {
        let (x0, x1) = (xw[0], xw[1]);
        // Exact hits return the tabulated value with no rounding drift
        if x == x1 {
            return yw[1];
        }
        if x < x1 {
            let frac = (x - x0) / (x1 - x0);
            return yw[0] + frac * (yw[1] - yw[0]);
        }
    }

    ys[ys.len() - 1]
}
