//! # Materials Database
//!
//! Material grades and code tables for reinforced-concrete design per IS 456.
//!
//! ## Contents
//!
//! - **Concrete**: characteristic-strength grades M20 to M40
//! - **Reinforcement**: Fe415 and Fe500 deformed bars
//! - **Shear strength**: design shear strength τc and its ceiling τc,max
//!
//! The grade sets are closed: every table lookup is total over the enums, so no
//! lookup can fail at runtime.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::{ConcreteGrade, SteelGrade, ShearStrengthTable};
//!
//! let concrete = ConcreteGrade::M25;
//! let steel = SteelGrade::Fe415;
//! println!("fck = {} MPa, fy = {} MPa", concrete.fck_mpa(), steel.fy_mpa());
//!
//! let tau_c_max = ShearStrengthTable::max_shear_stress(concrete);
//! assert_eq!(tau_c_max, 3.1);
//! ```

pub mod concrete;
pub mod rebar;
pub mod shear_strength;

pub use concrete::ConcreteGrade;
pub use rebar::SteelGrade;
pub use shear_strength::{ShearStrengthRow, ShearStrengthTable, PT_BREAKPOINTS, PT_MAX, PT_MIN};

/// Unit weight of reinforced concrete (kN/m³), IS 875 Part 1
pub const RC_UNIT_WEIGHT_KN_M3: f64 = 25.0;
