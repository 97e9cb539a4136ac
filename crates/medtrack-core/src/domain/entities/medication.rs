//! The `MedicationRecord` entity and its staged builder.
//!
//! # Builder states
//!
//! [`MedicationRecordBuilder`] is either *unbound* (no record attached) or
//! *bound* (a record was supplied through [`MedicationRecordBuilder::attach`]).
//! The state is checked at run time: the record to edit is usually produced by
//! another component after the builder already exists, so it cannot be pinned
//! in the type.
//!
//! Every `update_*` setter is independently optional and answers a plain
//! `bool`: `true` when it changed the record, `false` when its input was absent
//! or its amount did not parse. Absent and malformed input are not
//! distinguished. Calling a setter, or `build`, on an unbound builder is a
//! programming error and panics.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    locale::NumberLocale,
    value_objects::{ApproxMeasurement, CodedUnit, UnitVocabulary},
};

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable identifier of a stored medication record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidRecordId(s.to_string()))
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// A medication as stored in a health record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: RecordId,
    pub name: Option<String>,
    pub dose: Option<ApproxMeasurement>,
    pub strength: Option<ApproxMeasurement>,
    pub frequency: Option<ApproxMeasurement>,
}

impl MedicationRecord {
    /// A fresh, empty medication with a new id.
    pub fn new() -> Self {
        Self::with_id(RecordId::new())
    }

    pub fn with_id(id: RecordId) -> Self {
        Self {
            id,
            name: None,
            dose: None,
            strength: None,
            frequency: None,
        }
    }

    /// Name for listings; `(unnamed)` when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

impl Default for MedicationRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MedicationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())?;
        if let Some(strength) = &self.strength {
            write!(f, " {strength}")?;
        }
        if let Some(dose) = &self.dose {
            write!(f, ", {dose}")?;
        }
        if let Some(frequency) = &self.frequency {
            write!(f, ", {frequency}")?;
        }
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum BuilderState {
    Unbound,
    Bound(MedicationRecord),
}

/// Populates a [`MedicationRecord`] from raw form strings.
#[derive(Debug, Clone)]
pub struct MedicationRecordBuilder {
    state: BuilderState,
    locale: NumberLocale,
}

impl MedicationRecordBuilder {
    /// An unbound builder that reads amounts in the POSIX locale.
    pub fn new() -> Self {
        Self::with_locale(NumberLocale::default())
    }

    pub fn with_locale(locale: NumberLocale) -> Self {
        Self {
            state: BuilderState::Unbound,
            locale,
        }
    }

    /// Attach the record to mutate.
    ///
    /// Re-attaching replaces the previous target; changes made to it are
    /// dropped with it.
    pub fn attach(mut self, record: MedicationRecord) -> Self {
        self.state = BuilderState::Bound(record);
        self
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BuilderState::Bound(_))
    }

    /// The attached record, if any.
    pub fn record(&self) -> Option<&MedicationRecord> {
        match &self.state {
            BuilderState::Bound(record) => Some(record),
            BuilderState::Unbound => None,
        }
    }

    /// Set the name to the trimmed text. `None` leaves the record untouched.
    ///
    /// An empty string is still a present argument and is applied.
    ///
    /// # Panics
    /// Panics if no record is attached.
    pub fn update_name(&mut self, name: Option<&str>) -> bool {
        let record = self.record_mut();
        let Some(name) = name else {
            return false;
        };
        record.name = Some(name.trim().to_string());
        true
    }

    /// # Panics
    /// Panics if no record is attached.
    pub fn update_dose(&mut self, amount: &str, unit: Option<&str>) -> bool {
        self.record_mut();
        match self.measurement(amount, unit, UnitVocabulary::DoseUnits) {
            Some(dose) => {
                self.record_mut().dose = Some(dose);
                true
            }
            None => false,
        }
    }

    /// # Panics
    /// Panics if no record is attached.
    pub fn update_strength(&mut self, amount: &str, unit: Option<&str>) -> bool {
        self.record_mut();
        match self.measurement(amount, unit, UnitVocabulary::StrengthUnit) {
            Some(strength) => {
                self.record_mut().strength = Some(strength);
                true
            }
            None => false,
        }
    }

    /// # Panics
    /// Panics if no record is attached.
    pub fn update_frequency(&mut self, amount: &str, unit: Option<&str>) -> bool {
        self.record_mut();
        match self.measurement(amount, unit, UnitVocabulary::FrequencyUnits) {
            Some(frequency) => {
                self.record_mut().frequency = Some(frequency);
                true
            }
            None => false,
        }
    }

    /// Free-text frequency, e.g. `with breakfast`.
    ///
    /// # Panics
    /// Panics if no record is attached.
    pub fn update_frequency_from_display_text(&mut self, text: Option<&str>) -> bool {
        let record = self.record_mut();
        let Some(text) = text else {
            return false;
        };
        record.frequency = Some(ApproxMeasurement::from_display_text(text));
        true
    }

    /// Hand back the attached record.
    ///
    /// # Panics
    /// Panics if no record is attached. Use [`Self::try_build`] for a fallible
    /// variant.
    pub fn build(self) -> MedicationRecord {
        match self.try_build() {
            Ok(record) => record,
            Err(_) => unbound(),
        }
    }

    pub fn try_build(self) -> Result<MedicationRecord, DomainError> {
        match self.state {
            BuilderState::Bound(record) => Ok(record),
            BuilderState::Unbound => Err(DomainError::BuilderUnbound),
        }
    }

    fn measurement(
        &self,
        amount: &str,
        unit: Option<&str>,
        vocabulary: UnitVocabulary,
    ) -> Option<ApproxMeasurement> {
        let value = self.locale.parse(amount)?;
        let unit = unit?;
        Some(ApproxMeasurement::structured(
            value,
            CodedUnit::from_text(unit, vocabulary),
        ))
    }

    fn record_mut(&mut self) -> &mut MedicationRecord {
        match &mut self.state {
            BuilderState::Bound(record) => record,
            BuilderState::Unbound => unbound(),
        }
    }
}

impl Default for MedicationRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cold]
fn unbound() -> ! {
    panic!("{}", DomainError::BuilderUnbound)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn bound() -> MedicationRecordBuilder {
        MedicationRecordBuilder::new().attach(MedicationRecord::new())
    }

    fn dose_of(b: &MedicationRecordBuilder) -> Option<&ApproxMeasurement> {
        b.record().and_then(|r| r.dose.as_ref())
    }

    // ── Name ──────────────────────────────────────────────────────────────────

    #[test]
    fn update_name_given_string() {
        let mut b = bound();
        assert!(b.update_name(Some("Advil")));
        assert_eq!(b.record().unwrap().name.as_deref(), Some("Advil"));
    }

    #[test]
    fn update_name_trims_whitespace() {
        let mut b = bound();
        assert!(b.update_name(Some("  Advil \n")));
        assert_eq!(b.record().unwrap().name.as_deref(), Some("Advil"));
    }

    #[test]
    fn update_name_given_empty_string_still_applies() {
        let mut b = bound();
        assert!(b.update_name(Some("")));
        assert_eq!(b.record().unwrap().name.as_deref(), Some(""));
    }

    #[test]
    fn update_name_given_none_leaves_name_unchanged() {
        let mut record = MedicationRecord::new();
        record.name = Some("Tylenol".into());
        let mut b = MedicationRecordBuilder::new().attach(record);

        assert!(!b.update_name(None));
        assert_eq!(b.record().unwrap().name.as_deref(), Some("Tylenol"));
    }

    // ── Dose ──────────────────────────────────────────────────────────────────

    #[test]
    fn update_dose_given_amount_and_unit() {
        let mut b = bound();
        assert!(b.update_dose("2", Some("Tablets")));

        let dose = dose_of(&b).unwrap();
        assert_eq!(dose.value(), Some(2.0));
        let units = dose.units().unwrap();
        assert_eq!(units.text, "Tablets");
        assert_eq!(units.code, "Tablets");
        assert_eq!(units.vocabulary, "medication-dose-units");
        assert_eq!(dose.display_text(), "2 Tablets");
    }

    #[test]
    fn update_dose_given_non_numeric_amount_is_noop() {
        let mut b = bound();
        assert!(b.update_dose("1", Some("Capsules")));
        assert!(!b.update_dose("abc", Some("Tablets")));
        assert_eq!(dose_of(&b).unwrap().display_text(), "1 Capsules");
    }

    #[test]
    fn update_dose_given_nil_unit_fails() {
        let mut b = bound();
        assert!(!b.update_dose("100", None));
        assert!(!b.update_dose("", None));
        assert!(dose_of(&b).is_none());
    }

    #[test]
    fn update_dose_given_empty_unit_counts_as_present() {
        let mut b = bound();
        assert!(b.update_dose("5", Some("")));
        assert_eq!(dose_of(&b).unwrap().units().unwrap().text, "");
    }

    // ── Strength ──────────────────────────────────────────────────────────────

    #[test]
    fn update_strength_given_amount_and_unit() {
        let mut b = bound();
        assert!(b.update_strength("500", Some("mg")));

        let strength = b.record().unwrap().strength.as_ref().unwrap();
        assert_eq!(strength.display_text(), "500 mg");
        assert_eq!(strength.units().unwrap().vocabulary, "medication-strength-unit");
    }

    #[test]
    fn update_strength_given_non_double_amount() {
        let mut b = bound();
        assert!(!b.update_strength("abc", Some("ml")));
        assert!(!b.update_strength("12abc", Some("ml")));
        assert!(b.record().unwrap().strength.is_none());
    }

    // ── Frequency ─────────────────────────────────────────────────────────────

    #[test]
    fn update_frequency_given_amount_and_unit() {
        let mut b = bound();
        assert!(b.update_frequency("2", Some("times per week")));
        let freq = b.record().unwrap().frequency.as_ref().unwrap();
        assert_eq!(freq.display_text(), "2 times per week");
        assert_eq!(freq.units().unwrap().vocabulary, "medication-frequency-units");
    }

    #[test]
    fn update_frequency_given_non_double_amount() {
        let mut b = bound();
        assert!(!b.update_frequency("xyz", Some("times a day")));
        assert!(b.record().unwrap().frequency.is_none());
    }

    #[test]
    fn update_frequency_from_display_text() {
        let mut b = bound();
        assert!(!b.update_frequency_from_display_text(None));
        assert!(b.update_frequency_from_display_text(Some("with breakfast")));
        let freq = b.record().unwrap().frequency.as_ref().unwrap();
        assert!(!freq.is_structured());
        assert_eq!(freq.display_text(), "with breakfast");
    }

    // ── Locale ────────────────────────────────────────────────────────────────

    #[test]
    fn amounts_follow_builder_locale() {
        let mut b = MedicationRecordBuilder::with_locale(NumberLocale::new(',', None))
            .attach(MedicationRecord::new());
        assert!(b.update_dose("2,5", Some("ml")));
        assert_eq!(dose_of(&b).unwrap().value(), Some(2.5));
        assert!(!b.update_dose("2.5", Some("ml")));
    }

    // ── States ────────────────────────────────────────────────────────────────

    #[test]
    #[should_panic(expected = "before a record was attached")]
    fn update_before_attach_panics() {
        let mut b = MedicationRecordBuilder::new();
        b.update_dose("2", Some("Tablets"));
    }

    #[test]
    #[should_panic(expected = "before a record was attached")]
    fn absent_argument_before_attach_still_panics() {
        let mut b = MedicationRecordBuilder::new();
        b.update_name(None);
    }

    #[test]
    #[should_panic(expected = "before a record was attached")]
    fn update_strength_before_attach_panics() {
        let mut b = MedicationRecordBuilder::new();
        b.update_strength("500", Some("mg"));
    }

    #[test]
    #[should_panic(expected = "before a record was attached")]
    fn update_frequency_before_attach_panics() {
        let mut b = MedicationRecordBuilder::new();
        b.update_frequency("2", Some("times per day"));
    }

    #[test]
    #[should_panic(expected = "before a record was attached")]
    fn update_frequency_text_before_attach_panics() {
        let mut b = MedicationRecordBuilder::new();
        b.update_frequency_from_display_text(Some("as needed"));
    }

    #[test]
    #[should_panic]
    fn build_before_attach_panics() {
        MedicationRecordBuilder::new().build();
    }

    #[test]
    fn try_build_before_attach_is_error() {
        assert_eq!(
            MedicationRecordBuilder::new().try_build(),
            Err(DomainError::BuilderUnbound)
        );
    }

    #[test]
    fn reattach_discards_previous_target() {
        let first = MedicationRecord::new();
        let second = MedicationRecord::new();
        let second_id = second.id;

        let mut b = MedicationRecordBuilder::new().attach(first);
        b.update_name(Some("Advil"));
        let mut b = b.attach(second);
        assert_eq!(b.record().unwrap().name, None);
        b.update_name(Some("Aspirin"));

        let built = b.build();
        assert_eq!(built.id, second_id);
        assert_eq!(built.name.as_deref(), Some("Aspirin"));
    }

    #[test]
    fn build_round_trips_inputs() {
        let record = MedicationRecord::new();
        let id = record.id;
        let mut b = MedicationRecordBuilder::new().attach(record);
        assert!(b.update_name(Some("Advil")));
        assert!(b.update_dose("2", Some("Tablets")));
        let built = b.build();

        assert_eq!(built.id, id);
        assert_eq!(built.name.as_deref(), Some("Advil"));
        let dose = built.dose.unwrap();
        assert_eq!(dose.value(), Some(2.0));
        assert_eq!(dose.units().unwrap().text, "Tablets");
    }

    // ── Identity ──────────────────────────────────────────────────────────────

    #[test]
    fn record_id_parses_and_displays() {
        let id = RecordId::new();
        assert_eq!(id.to_string().parse::<RecordId>().unwrap(), id);
        assert!("not-an-id".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_display_lists_present_fields() {
        let mut b = bound();
        b.update_name(Some("Advil"));
        b.update_strength("200", Some("mg"));
        b.update_dose("2", Some("Tablets"));
        assert_eq!(b.build().to_string(), "Advil 200 mg, 2 Tablets");
    }
}
