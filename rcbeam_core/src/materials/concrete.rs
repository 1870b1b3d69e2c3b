//! Concrete Grades (IS 456 Table 2)
//!
//! Only the grades covered by the design shear strength table are accepted.
//! On the wire a grade is its characteristic cube strength `fck` in MPa.

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Concrete grade per IS 456, identified by characteristic strength fck (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ConcreteGrade {
    /// M20, fck = 20 MPa
    M20,
    /// M25, fck = 25 MPa
    M25,
    /// M30, fck = 30 MPa
    M30,
    /// M35, fck = 35 MPa
    M35,
    /// M40, fck = 40 MPa
    M40,
}

impl ConcreteGrade {
    /// All supported grades, weakest first
    pub const ALL: [ConcreteGrade; 5] = [
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
    ];

    /// Characteristic compressive strength fck in MPa
    pub fn fck_mpa(&self) -> f64 {
        f64::from(self.fck())
    }

    /// fck as the integer used on the wire
    pub fn fck(&self) -> u32 {
        match self {
            ConcreteGrade::M20 => 20,
            ConcreteGrade::M25 => 25,
            ConcreteGrade::M30 => 30,
            ConcreteGrade::M35 => 35,
            ConcreteGrade::M40 => 40,
        }
    }

    /// Look up a grade by its fck value
    pub fn from_fck(fck: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.fck() == fck)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
        }
    }
}

impl TryFrom<u32> for ConcreteGrade {
    type Error = CalcError;

    fn try_from(fck: u32) -> Result<Self, Self::Error> {
        Self::from_fck(fck).ok_or_else(|| {
            CalcError::invalid_input("fck", fck.to_string(), "must be one of 20, 25, 30, 35, 40 MPa")
        })
    }
}

impl From<ConcreteGrade> for u32 {
    fn from(grade: ConcreteGrade) -> Self {
        grade.fck()
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fck_lookup() {
        assert_eq!(ConcreteGrade::from_fck(25), Some(ConcreteGrade::M25));
        assert_eq!(ConcreteGrade::from_fck(22), None);
        assert_eq!(ConcreteGrade::M40.fck_mpa(), 40.0);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ConcreteGrade::M30).unwrap();
        assert_eq!(json, "30");
        let parsed: ConcreteGrade = serde_json::from_str("35").unwrap();
        assert_eq!(parsed, ConcreteGrade::M35);
    }

    #[test]
    fn test_rejects_unknown_grade() {
        assert!(serde_json::from_str::<ConcreteGrade>("45").is_err());
        let err = ConcreteGrade::try_from(15).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
