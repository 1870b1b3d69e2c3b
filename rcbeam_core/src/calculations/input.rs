//! # Beam Input
//!
//! Two shapes of the same beam description:
//!
//! - [`BeamParameters`] is the raw wire form. Any JSON object with the right
//!   keys deserializes into it, whatever the values.
//!   [`BeamParameters::from_json`] does the same but reports a missing or
//!   mistyped field as [`CalcError::InvalidInput`] naming that field.
//! - [`BeamSpec`] is the validated form. The only way to build one is
//!   [`BeamParameters::validate`], so every calculation downstream can rely on
//!   grades being tabulated and dimensions being inside their bounds.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "fck": 25,
//!   "fy": 415,
//!   "b": 300,
//!   "D": 450,
//!   "L": 4000,
//!   "load_type": "Point Load",
//!   "main_dia": 16,
//!   "main_count": 4,
//!   "stirrup_dia": 8,
//!   "spacing": 150
//! }
//! ```

use std::ops::RangeInclusive;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteGrade, SteelGrade};

// ============================================================================
// Domain bounds (mm unless noted)
// ============================================================================

/// Beam width
pub const WIDTH_RANGE: RangeInclusive<f64> = 150.0..=1000.0;
/// Overall depth
pub const DEPTH_RANGE: RangeInclusive<f64> = 200.0..=1000.0;
/// Span
pub const SPAN_RANGE: RangeInclusive<f64> = 500.0..=10_000.0;
/// Main bar diameter
pub const MAIN_DIA_RANGE: RangeInclusive<f64> = 8.0..=32.0;
/// Number of main bars
pub const MAIN_COUNT_RANGE: RangeInclusive<i64> = 1..=8;
/// Stirrup diameter
pub const STIRRUP_DIA_RANGE: RangeInclusive<f64> = 6.0..=12.0;
/// Stirrup spacing
pub const SPACING_RANGE: RangeInclusive<f64> = 80.0..=300.0;

// ============================================================================
// Load pattern
// ============================================================================

/// How the applied load is arranged on the simply-supported span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadPattern {
    /// One load at midspan (M = WL/4)
    #[serde(rename = "Point Load")]
    SinglePoint,
    /// Two equal loads at the third points (M = WL/6)
    #[serde(rename = "Two Point Load")]
    TwoPoint,
}

impl LoadPattern {
    pub const ALL: [LoadPattern; 2] = [LoadPattern::SinglePoint, LoadPattern::TwoPoint];

    /// Wire name, also used for display
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadPattern::SinglePoint => "Point Load",
            LoadPattern::TwoPoint => "Two Point Load",
        }
    }

    /// Parse the wire name. Matching is exact.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.display_name() == name)
    }
}

impl std::fmt::Display for LoadPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Raw wire input
// ============================================================================

/// Beam description exactly as it arrives on the wire.
///
/// Integer fields are `i64` so that out-of-range integers (negative counts,
/// unknown grades) reach [`validate`](Self::validate) and are reported by
/// field name instead of failing deserialization. They also accept a
/// whole-number float (`4.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    /// Concrete grade, MPa
    #[serde(deserialize_with = "whole_number")]
    pub fck: i64,
    /// Steel grade, MPa
    #[serde(deserialize_with = "whole_number")]
    pub fy: i64,
    /// Width, mm
    pub b: f64,
    /// Overall depth, mm
    #[serde(rename = "D")]
    pub overall_depth: f64,
    /// Span, mm
    #[serde(rename = "L")]
    pub span: f64,
    /// "Point Load" or "Two Point Load"
    pub load_type: String,
    /// Main bar diameter, mm
    pub main_dia: f64,
    /// Number of main bars
    #[serde(deserialize_with = "whole_number")]
    pub main_count: i64,
    /// Stirrup diameter, mm
    pub stirrup_dia: f64,
    /// Stirrup spacing, mm
    pub spacing: f64,
}

impl Default for BeamParameters {
    /// The starting values offered by the input form
    fn default() -> Self {
        Self {
            fck: 25,
            fy: 415,
            b: 230.0,
            overall_depth: 450.0,
            span: 4000.0,
            load_type: LoadPattern::SinglePoint.display_name().to_string(),
            main_dia: 16.0,
            main_count: 2,
            stirrup_dia: 8.0,
            spacing: 150.0,
        }
    }
}

impl BeamParameters {
    /// Parse a JSON object, naming the first missing or mistyped field.
    ///
    /// Fields are read in wire order. Values are not range-checked here; that
    /// is [`validate`](Self::validate)'s job.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rcbeam_core::calculations::BeamParameters;
    ///
    /// let err = BeamParameters::from_json(r#"{"fck": 25, "fy": 415}"#).unwrap_err();
    /// assert_eq!(err.error_code(), "INVALID_INPUT");
    /// assert!(err.to_string().contains("'b'"));
    /// ```
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CalcError::invalid_input("input", "<unparsed>", format!("not valid JSON: {}", e)))?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(CalcError::invalid_input("input", other.to_string(), "must be a JSON object")),
        };

        Ok(Self {
            fck: integer_field(&map, "fck")?,
            fy: integer_field(&map, "fy")?,
            b: number_field(&map, "b")?,
            overall_depth: number_field(&map, "D")?,
            span: number_field(&map, "L")?,
            load_type: string_field(&map, "load_type")?,
            main_dia: number_field(&map, "main_dia")?,
            main_count: integer_field(&map, "main_count")?,
            stirrup_dia: number_field(&map, "stirrup_dia")?,
            spacing: number_field(&map, "spacing")?,
        })
    }

    /// Validate every field and produce a [`BeamSpec`].
    ///
    /// Fields are checked in wire order and the first offending one is
    /// reported. NaN fails every range check.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rcbeam_core::calculations::BeamParameters;
    ///
    /// let mut params = BeamParameters::default();
    /// params.spacing = 40.0;
    ///
    /// let err = params.validate().unwrap_err();
    /// assert_eq!(err.error_code(), "INVALID_INPUT");
    /// assert!(err.to_string().contains("spacing"));
    /// ```
    pub fn validate(&self) -> CalcResult<BeamSpec> {
        let concrete = u32::try_from(self.fck)
            .ok()
            .and_then(ConcreteGrade::from_fck)
            .ok_or_else(|| {
                CalcError::invalid_input("fck", self.fck.to_string(), "must be one of 20, 25, 30, 35, 40 MPa")
            })?;
        let steel = u32::try_from(self.fy)
            .ok()
            .and_then(SteelGrade::from_fy)
            .ok_or_else(|| CalcError::invalid_input("fy", self.fy.to_string(), "must be one of 415, 500 MPa"))?;

        let b_mm = check_range("b", self.b, WIDTH_RANGE)?;
        let overall_depth_mm = check_range("D", self.overall_depth, DEPTH_RANGE)?;
        let span_mm = check_range("L", self.span, SPAN_RANGE)?;

        let load_pattern = LoadPattern::from_wire(&self.load_type).ok_or_else(|| {
            CalcError::invalid_input(
                "load_type",
                self.load_type.clone(),
                "must be \"Point Load\" or \"Two Point Load\"",
            )
        })?;

        let main_dia_mm = check_range("main_dia", self.main_dia, MAIN_DIA_RANGE)?;
        let main_count = u32::try_from(self.main_count)
            .ok()
            .filter(|_| MAIN_COUNT_RANGE.contains(&self.main_count))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "main_count",
                    self.main_count.to_string(),
                    format!("must be an integer in [{}, {}]", MAIN_COUNT_RANGE.start(), MAIN_COUNT_RANGE.end()),
                )
            })?;
        let stirrup_dia_mm = check_range("stirrup_dia", self.stirrup_dia, STIRRUP_DIA_RANGE)?;
        let spacing_mm = check_range("spacing", self.spacing, SPACING_RANGE)?;

        Ok(BeamSpec {
            concrete,
            steel,
            b_mm,
            overall_depth_mm,
            span_mm,
            load_pattern,
            main_dia_mm,
            main_count,
            stirrup_dia_mm,
            spacing_mm,
        })
    }
}

fn required<'a>(map: &'a Map<String, Value>, field: &str) -> CalcResult<&'a Value> {
    map.get(field)
        .ok_or_else(|| CalcError::invalid_input(field, "<missing>", "field required"))
}

fn number_field(map: &Map<String, Value>, field: &str) -> CalcResult<f64> {
    let value = required(map, field)?;
    value
        .as_f64()
        .ok_or_else(|| CalcError::invalid_input(field, value.to_string(), "must be a number"))
}

fn integer_field(map: &Map<String, Value>, field: &str) -> CalcResult<i64> {
    let value = required(map, field)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(whole_f64))
        .ok_or_else(|| CalcError::invalid_input(field, value.to_string(), "must be an integer"))
}

fn string_field(map: &Map<String, Value>, field: &str) -> CalcResult<String> {
    let value = required(map, field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CalcError::invalid_input(field, value.to_string(), "must be a string"))
}

/// `Some` only for a finite float with no fractional part that fits in i64
fn whole_f64(x: f64) -> Option<i64> {
    if x.is_finite() && x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireInteger {
        Int(i64),
        Float(f64),
    }

    match WireInteger::deserialize(deserializer)? {
        WireInteger::Int(n) => Ok(n),
        WireInteger::Float(x) => {
            whole_f64(x).ok_or_else(|| de::Error::custom(format!("expected an integer, found {}", x)))
        }
    }
}

fn check_range(field: &str, value: f64, range: RangeInclusive<f64>) -> CalcResult<f64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("must be between {} and {} mm", range.start(), range.end()),
        ))
    }
}

// ============================================================================
// Validated input
// ============================================================================

/// A beam whose every field is inside its declared domain.
///
/// Fields are private; read them through the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeamSpec {
    concrete: ConcreteGrade,
    steel: SteelGrade,
    b_mm: f64,
    overall_depth_mm: f64,
    span_mm: f64,
    load_pattern: LoadPattern,
    main_dia_mm: f64,
    main_count: u32,
    stirrup_dia_mm: f64,
    spacing_mm: f64,
}

impl BeamSpec {
    pub fn concrete(&self) -> ConcreteGrade {
        self.concrete
    }

    pub fn steel(&self) -> SteelGrade {
        self.steel
    }

    /// Width b (mm)
    pub fn width_mm(&self) -> f64 {
        self.b_mm
    }

    /// Overall depth D (mm)
    pub fn overall_depth_mm(&self) -> f64 {
        self.overall_depth_mm
    }

    /// Span L (mm)
    pub fn span_mm(&self) -> f64 {
        self.span_mm
    }

    pub fn load_pattern(&self) -> LoadPattern {
        self.load_pattern
    }

    pub fn main_dia_mm(&self) -> f64 {
        self.main_dia_mm
    }

    pub fn main_count(&self) -> u32 {
        self.main_count
    }

    pub fn stirrup_dia_mm(&self) -> f64 {
        self.stirrup_dia_mm
    }

    pub fn spacing_mm(&self) -> f64 {
        self.spacing_mm
    }

    /// Feature vector for learned-model prediction.
    ///
    /// Order: `[fck, fy, b, D, L, main_dia, main_count, stirrup_dia, spacing]`.
    /// The load pattern is not a feature.
    pub fn features(&self) -> [f64; 9] {
        [
            self.concrete.fck_mpa(),
            self.steel.fy_mpa(),
            self.b_mm,
            self.overall_depth_mm,
            self.span_mm,
            self.main_dia_mm,
            f64::from(self.main_count),
            self.stirrup_dia_mm,
            self.spacing_mm,
        ]
    }

    /// Short one-line description, e.g. "300x450 M25/Fe415, L=4000, 4-16φ, 8φ@150"
    pub fn describe(&self) -> String {
        format!(
            "{}x{} {}/{}, L={}, {}-{}φ, {}φ@{}",
            self.b_mm,
            self.overall_depth_mm,
            self.concrete,
            self.steel,
            self.span_mm,
            self.main_count,
            self.main_dia_mm,
            self.stirrup_dia_mm,
            self.spacing_mm
        )
    }
}

#[cfg(test)]
impl BeamSpec {
    /// Overall depth outside the validated bounds, for exercising the geometry gate
    pub(crate) fn with_overall_depth_unchecked(mut self, overall_depth_mm: f64) -> Self {
        self.overall_depth_mm = overall_depth_mm;
        self
    }
}

impl From<&BeamSpec> for BeamParameters {
    fn from(spec: &BeamSpec) -> Self {
        Self {
            fck: i64::from(spec.concrete.fck()),
            fy: i64::from(spec.steel.fy()),
            b: spec.b_mm,
            overall_depth: spec.overall_depth_mm,
            span: spec.span_mm,
            load_type: spec.load_pattern.display_name().to_string(),
            main_dia: spec.main_dia_mm,
            main_count: i64::from(spec.main_count),
            stirrup_dia: spec.stirrup_dia_mm,
            spacing: spec.spacing_mm,
        }
    }
}
