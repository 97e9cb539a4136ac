//! Unit display strings offered as picker choices.
//!
//! The lists are static configuration, not computed. Each vocabulary is
//! described exactly once in [`UNIT_REGISTRY`]; lookups are linear scans.

use crate::domain::value_objects::UnitVocabulary;

/// The choices offered for one vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct UnitDef {
    pub vocabulary: UnitVocabulary,
    pub choices: &'static [&'static str],
}

pub static DOSE_UNITS: &[&str] = &[
    "Applicatorfuls",
    "Bags",
    "Bars",
    "Capsules",
    "Doses",
    "Dropperfuls",
    "Drops",
    "Grams (g)",
    "Inhalations",
    "Lozenges",
    "Micrograms (mcg)",
    "Milligrams (mg)",
    "Milliliters (ml)",
    "Packets",
    "Pads",
    "Patches",
    "Percent (%)",
    "Puffs",
    "Scoops",
    "Shots",
    "Sprays",
    "Suppositories",
    "Syringe",
    "Tablespoons (tbsp)",
    "Tablets",
    "Teaspoons (tsp)",
    "Units (U)",
];

pub static STRENGTH_UNITS: &[&str] = &[
    "Colony forming units per milliliter (cfu/ml)",
    "International unit (iu)",
    "Micrograms (mcg)",
    "Milliequivalent (meq)",
    "Milliequivalent per milliliter (meq/ml)",
    "Milligram (mg)",
    "Milligram per milliliter (mg/ml)",
    "Milliliter (ml)",
    "Percent (%)",
    "Unit (unt)",
    "Units per milliliter (unt/ml)",
];

pub static FREQUENCY_AMOUNTS: &[&str] = &["1", "2", "3", "4", "5", "6", "7"];

pub static FREQUENCY_UNITS: &[&str] = &["times per day", "times per week", "times per month"];

/// Single source of truth for unit choices.
pub static UNIT_REGISTRY: &[UnitDef] = &[
    UnitDef {
        vocabulary: UnitVocabulary::DoseUnits,
        choices: DOSE_UNITS,
    },
    UnitDef {
        vocabulary: UnitVocabulary::StrengthUnit,
        choices: STRENGTH_UNITS,
    },
    UnitDef {
        vocabulary: UnitVocabulary::FrequencyUnits,
        choices: FREQUENCY_UNITS,
    },
];

/// Unit choices for a vocabulary.
pub fn choices_for(vocabulary: UnitVocabulary) -> &'static [&'static str] {
    UNIT_REGISTRY
        .iter()
        .find(|def| def.vocabulary == vocabulary)
        .map(|def| def.choices)
        .unwrap_or(&[])
}

/// Whether `unit` is one of the offered choices (exact match).
pub fn is_known_unit(vocabulary: UnitVocabulary, unit: &str) -> bool {
    choices_for(vocabulary).contains(&unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vocabulary_is_registered() {
        for vocab in UnitVocabulary::ALL {
            assert!(!choices_for(vocab).is_empty(), "no choices for {vocab}");
        }
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(DOSE_UNITS.len(), 27);
        assert_eq!(STRENGTH_UNITS.len(), 11);
        assert_eq!(FREQUENCY_AMOUNTS.len(), 7);
    }

    #[test]
    fn known_unit_lookup_is_exact() {
        assert!(is_known_unit(UnitVocabulary::DoseUnits, "Tablets"));
        assert!(!is_known_unit(UnitVocabulary::DoseUnits, "tablets"));
        assert!(is_known_unit(UnitVocabulary::FrequencyUnits, "times per week"));
    }
}
