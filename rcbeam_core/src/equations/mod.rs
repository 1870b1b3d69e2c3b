//! # Capacity Equations
//!
//! Every closed-form expression the capacity engine evaluates lives here, so
//! each can be checked against its code clause in isolation.
//!
//! ## Modules
//!
//! - [`section`] - Bar areas, effective depth, reinforcement percentage
//! - [`is456`] - Limit-state flexure and shear resistance (IS 456)
//! - [`beam`] - Simply-supported statics in load-from-capacity form
//! - [`registry`] - Equation metadata and tracking for report appendices
//!
//! ## Units
//!
//! All functions take and return N and mm (N·mm for moments, N/mm² for
//! stresses) except [`beam::self_weight_kn`], which works in kN and m.
//!
//! ## References
//!
//! - IS 456:2000: Plain and Reinforced Concrete, Code of Practice
//! - IS 875 (Part 1):1987: Dead Loads
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod is456;
pub mod registry;
pub mod section;

pub use beam::{
    effective_span,
    load_from_support_shear,
    point_load_from_moment,
    self_weight_kn,
    support_shear,
    two_point_load_from_moment,
};

pub use is456::{
    concrete_shear_capacity,
    limiting_moment,
    limiting_neutral_axis_depth,
    moment_of_resistance,
    neutral_axis_depth,
    nominal_shear_stress,
    stirrup_shear_capacity,
};

pub use section::{
    bar_area,
    effective_depth,
    main_steel_area,
    reinforcement_percentage,
    stirrup_area,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    capacity_calculation_equations,
    capacity_equations_for,
    generate_equations_markdown,
};
