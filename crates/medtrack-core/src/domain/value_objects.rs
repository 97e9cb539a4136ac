//! Domain value objects: UnitVocabulary, CodedUnit, ApproxMeasurement.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. The unit
//! display strings offered to users live in `units.rs`; this file only
//! defines the types, their string representations and their parsers.

use crate::domain::{error::DomainError, locale::NumberLocale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── UnitVocabulary ────────────────────────────────────────────────────────────

/// The fixed vocabulary a structured measurement's unit code belongs to.
///
/// The vocabulary is decided by the record field being written, never by
/// user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitVocabulary {
    DoseUnits,
    StrengthUnit,
    FrequencyUnits,
}

impl UnitVocabulary {
    pub const ALL: [UnitVocabulary; 3] = [Self::DoseUnits, Self::StrengthUnit, Self::FrequencyUnits];

    /// The vocabulary identifier recorded alongside the unit code.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::DoseUnits => "medication-dose-units",
            Self::StrengthUnit => "medication-strength-unit",
            Self::FrequencyUnits => "medication-frequency-units",
        }
    }

    /// Short name used on the command line.
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::DoseUnits => "dose",
            Self::StrengthUnit => "strength",
            Self::FrequencyUnits => "frequency",
        }
    }
}

impl fmt::Display for UnitVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UnitVocabulary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dose" | "medication-dose-units" => Ok(Self::DoseUnits),
            "strength" | "medication-strength-unit" => Ok(Self::StrengthUnit),
            "frequency" | "medication-frequency-units" => Ok(Self::FrequencyUnits),
            other => Err(DomainError::UnknownVocabulary(other.to_string())),
        }
    }
}

// ── CodedUnit ─────────────────────────────────────────────────────────────────

/// A unit as recorded on a structured measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedUnit {
    pub text: String,
    pub code: String,
    pub vocabulary: String,
}

impl CodedUnit {
    /// A unit whose code is its display text, tagged with `vocabulary`.
    pub fn from_text(text: impl Into<String>, vocabulary: UnitVocabulary) -> Self {
        let text = text.into();
        Self {
            code: text.clone(),
            text,
            vocabulary: vocabulary.id().to_string(),
        }
    }
}

// ── ApproxMeasurement ─────────────────────────────────────────────────────────

/// A dose, strength or frequency: either an amount with a coded unit, or a
/// free-text description that is only ever displayed.
///
/// Only one representation exists at a time. Renderers must prefer the
/// structured form and fall back to the display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApproxMeasurement {
    Structured { value: f64, units: CodedUnit },
    Display { display_text: String },
}

impl ApproxMeasurement {
    pub fn structured(value: f64, units: CodedUnit) -> Self {
        Self::Structured { value, units }
    }

    pub fn from_display_text(text: impl Into<String>) -> Self {
        Self::Display {
            display_text: text.into(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Structured { value, .. } => Some(*value),
            Self::Display { .. } => None,
        }
    }

    pub fn units(&self) -> Option<&CodedUnit> {
        match self {
            Self::Structured { units, .. } => Some(units),
            Self::Display { .. } => None,
        }
    }

    /// Human-readable text, e.g. `500 mg` or `A single tablet`.
    pub fn display_text(&self) -> String {
        match self {
            Self::Structured { value, units } => format!("{} {}", format_amount(*value), units.text),
            Self::Display { display_text } => display_text.clone(),
        }
    }

    /// The amount as it would be typed into an amount input read in `locale`.
    ///
    /// `None` for free-text measurements, whose text belongs in the unit input.
    pub fn amount_text(&self, locale: NumberLocale) -> Option<String> {
        self.value().map(|v| locale.format(v))
    }

    /// Text for the unit input: the unit for structured values, otherwise the
    /// free-text description.
    pub fn unit_text(&self) -> &str {
        match self {
            Self::Structured { units, .. } => &units.text,
            Self::Display { display_text } => display_text,
        }
    }
}

impl fmt::Display for ApproxMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// `500.0` renders as `500`, `12.5` stays `12.5`.
pub fn format_amount(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_ids_are_fixed() {
        assert_eq!(UnitVocabulary::DoseUnits.id(), "medication-dose-units");
        assert_eq!(UnitVocabulary::StrengthUnit.id(), "medication-strength-unit");
    }

    #[test]
    fn vocabulary_parses_short_and_full_names() {
        assert_eq!(
            "dose".parse::<UnitVocabulary>().unwrap(),
            UnitVocabulary::DoseUnits
        );
        assert_eq!(
            "medication-strength-unit".parse::<UnitVocabulary>().unwrap(),
            UnitVocabulary::StrengthUnit
        );
        assert!("volume".parse::<UnitVocabulary>().is_err());
    }

    #[test]
    fn structured_display_drops_trailing_zero() {
        let m = ApproxMeasurement::structured(500.0, CodedUnit::from_text("mg", UnitVocabulary::StrengthUnit));
        assert_eq!(m.display_text(), "500 mg");

        let m = ApproxMeasurement::structured(2.5, CodedUnit::from_text("Tablets", UnitVocabulary::DoseUnits));
        assert_eq!(m.display_text(), "2.5 Tablets");
    }

    #[test]
    fn display_only_measurement_renders_its_text() {
        let m = ApproxMeasurement::from_display_text("A single tablet");
        assert_eq!(m.display_text(), "A single tablet");
        assert_eq!(m.amount_text(NumberLocale::posix()), None);
        assert_eq!(m.unit_text(), "A single tablet");
        assert!(!m.is_structured());
    }

    #[test]
    fn structured_projection_splits_amount_and_unit() {
        let m = ApproxMeasurement::structured(
            500.0,
            CodedUnit::from_text("Milligrams (mg)", UnitVocabulary::StrengthUnit),
        );
        assert_eq!(m.amount_text(NumberLocale::posix()).as_deref(), Some("500"));
        assert_eq!(m.unit_text(), "Milligrams (mg)");
    }

    #[test]
    fn coded_unit_uses_text_as_code() {
        let u = CodedUnit::from_text("Tablets", UnitVocabulary::DoseUnits);
        assert_eq!(u.code, "Tablets");
        assert_eq!(u.vocabulary, "medication-dose-units");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let m = ApproxMeasurement::from_display_text("twice daily");
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"kind\":\"display\""));
    }
}
