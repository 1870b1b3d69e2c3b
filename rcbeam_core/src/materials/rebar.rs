//! Reinforcing Steel Grades (IS 1786)
//!
//! High-yield deformed bars. On the wire a grade is its characteristic yield
//! strength `fy` in MPa.

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Reinforcement grade, identified by characteristic yield strength fy (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SteelGrade {
    /// Fe415, fy = 415 MPa
    Fe415,
    /// Fe500, fy = 500 MPa
    Fe500,
}

impl SteelGrade {
    /// All supported grades
    pub const ALL: [SteelGrade; 2] = [SteelGrade::Fe415, SteelGrade::Fe500];

    /// Characteristic yield strength fy in MPa
    pub fn fy_mpa(&self) -> f64 {
        f64::from(self.fy())
    }

    /// fy as the integer used on the wire
    pub fn fy(&self) -> u32 {
        match self {
            SteelGrade::Fe415 => 415,
            SteelGrade::Fe500 => 500,
        }
    }

    /// Look up a grade by its fy value
    pub fn from_fy(fy: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.fy() == fy)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::Fe415 => "Fe415",
            SteelGrade::Fe500 => "Fe500",
        }
    }
}

impl TryFrom<u32> for SteelGrade {
    type Error = CalcError;

    fn try_from(fy: u32) -> Result<Self, Self::Error> {
        Self::from_fy(fy)
            .ok_or_else(|| CalcError::invalid_input("fy", fy.to_string(), "must be one of 415, 500 MPa"))
    }
}

impl From<SteelGrade> for u32 {
    fn from(grade: SteelGrade) -> Self {
        grade.fy()
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
