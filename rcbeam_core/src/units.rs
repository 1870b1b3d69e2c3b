//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by IS 456 calculations. These are
//! plain f64 newtypes: JSON stays just numbers and the conversions that matter
//! (N → kN, N·mm → kN·m, mm → m) happen in exactly one place.
//!
//! ## Working Units
//!
//! The engine works internally in the units the design code tabulates:
//! - Length: millimetres (mm); metres (m) for self-weight
//! - Force: newtons (N); reported in kilonewtons (kN)
//! - Moment: newton-millimetres (N·mm); reported in kilonewton-metres (kN·m)
//! - Stress: N/mm², kept as plain f64
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::units::{KiloNewtons, Millimeters, Meters, Newtons};
//!
//! let span: Meters = Millimeters(4000.0).into();
//! assert_eq!(span.0, 4.0);
//!
//! let load: KiloNewtons = Newtons(105_000.0).into();
//! assert_eq!(load.0, 105.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres (1 kN·m = 1e6 N·mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Raw access
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),+) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )+
    };
}

impl_value!(Meters, KiloNewtons, KiloNewtonMeters);
