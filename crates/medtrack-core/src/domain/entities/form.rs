//! The add/edit medication form.

use serde::Serialize;

use crate::domain::{
    entities::{
        field::{FieldDescriptor, PickerField},
        medication::{MedicationRecord, MedicationRecordBuilder},
    },
    locale::NumberLocale,
    units,
    validation::{FormReport, FormValidationAggregator, Widget},
    value_objects::{ApproxMeasurement, UnitVocabulary},
};

/// Inputs of the medication screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationForm {
    pub name: FieldDescriptor,
    pub strength_amount: FieldDescriptor,
    pub strength_unit: PickerField,
    pub dose_amount: FieldDescriptor,
    pub dose_unit: PickerField,
    pub frequency_amount: PickerField,
    pub frequency_unit: PickerField,
    /// Free-text frequency, used when no amount/unit pair is given.
    pub frequency_text: FieldDescriptor,
    locale: NumberLocale,
}

/// Which builder setters took effect during [`MedicationForm::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppliedFields {
    pub name: bool,
    pub strength: bool,
    pub dose: bool,
    pub frequency: bool,
}

impl AppliedFields {
    pub fn count(&self) -> usize {
        [self.name, self.strength, self.dose, self.frequency]
            .into_iter()
            .filter(|applied| *applied)
            .count()
    }
}

impl MedicationForm {
    /// An empty form reading numbers in `locale`.
    pub fn new(locale: NumberLocale) -> Self {
        let amount = |label: &str| FieldDescriptor::new(label).numeric().with_locale(locale);
        let picker = |label: &str, choices: &[&str]| {
            PickerField::new(FieldDescriptor::new(label), choices.iter().copied())
        };

        Self {
            name: FieldDescriptor::new("name").required(),
            strength_amount: amount("strength amount"),
            strength_unit: picker("strength unit", units::choices_for(UnitVocabulary::StrengthUnit)),
            dose_amount: amount("dose amount"),
            dose_unit: picker("dose unit", units::choices_for(UnitVocabulary::DoseUnits)),
            frequency_amount: PickerField::new(
                FieldDescriptor::new("frequency amount").numeric().with_locale(locale),
                units::FREQUENCY_AMOUNTS.iter().copied(),
            ),
            frequency_unit: picker(
                "frequency unit",
                units::choices_for(UnitVocabulary::FrequencyUnits),
            ),
            frequency_text: FieldDescriptor::new("frequency"),
            locale,
        }
    }

    /// Locale the amount inputs are read in.
    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// An unbound builder reading amounts the way this form validates them.
    pub fn builder(&self) -> MedicationRecordBuilder {
        MedicationRecordBuilder::with_locale(self.locale)
    }

    /// A form showing an existing record, for editing.
    pub fn prefill(record: &MedicationRecord, locale: NumberLocale) -> Self {
        let mut form = Self::new(locale);
        if let Some(name) = &record.name {
            form.name.set_text(name.as_str());
        }
        if let Some(strength) = &record.strength {
            fill(&mut form.strength_amount, &mut form.strength_unit, strength, locale);
        }
        if let Some(dose) = &record.dose {
            fill(&mut form.dose_amount, &mut form.dose_unit, dose, locale);
        }
        match &record.frequency {
            Some(frequency) if frequency.is_structured() => {
                form.frequency_amount
                    .set_text(frequency.amount_text(locale).unwrap_or_default());
                form.frequency_unit.set_text(frequency.unit_text());
            }
            Some(frequency) => form.frequency_text.set_text(frequency.unit_text()),
            None => {}
        }
        form
    }

    /// Widgets in screen order.
    pub fn widgets(&self) -> [&dyn Widget; 8] {
        [
            &self.name,
            &self.strength_amount,
            &self.strength_unit,
            &self.dose_amount,
            &self.dose_unit,
            &self.frequency_amount,
            &self.frequency_unit,
            &self.frequency_text,
        ]
    }

    pub fn evaluate(&self) -> FormReport {
        FormValidationAggregator::evaluate(&self.widgets())
    }

    pub fn can_submit(&self) -> bool {
        FormValidationAggregator::can_submit(&self.widgets())
    }

    /// Feed the inputs to `builder`. Blank inputs are passed as absent.
    ///
    /// A structured frequency wins over the free-text one when both are
    /// given.
    ///
    /// # Panics
    /// Panics if `builder` has no record attached.
    pub fn apply(&self, builder: &mut MedicationRecordBuilder) -> AppliedFields {
        let name = builder.update_name(self.name.value());
        let strength = builder.update_strength(
            self.strength_amount.text(),
            self.strength_unit.value(),
        );
        let dose = builder.update_dose(self.dose_amount.text(), self.dose_unit.value());
        let mut frequency = builder.update_frequency(
            self.frequency_amount.text(),
            self.frequency_unit.value(),
        );
        if !frequency {
            frequency = builder.update_frequency_from_display_text(self.frequency_text.value());
        }

        AppliedFields {
            name,
            strength,
            dose,
            frequency,
        }
    }
}

impl Default for MedicationForm {
    fn default() -> Self {
        Self::new(NumberLocale::default())
    }
}

fn fill(
    amount: &mut FieldDescriptor,
    unit: &mut PickerField,
    measurement: &ApproxMeasurement,
    locale: NumberLocale,
) {
    amount.set_text(measurement.amount_text(locale).unwrap_or_default());
    unit.set_text(measurement.unit_text());
}
