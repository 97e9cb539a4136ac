//! Built-in unit vocabulary.

use medtrack_core::{
    application::ports::VocabularySource,
    domain::{UnitVocabulary, units},
    error::MedtrackResult,
};

/// Serves the unit lists compiled into the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticVocabulary;

impl StaticVocabulary {
    pub fn new() -> Self {
        Self
    }
}

impl VocabularySource for StaticVocabulary {
    fn choices(&self, vocabulary: UnitVocabulary) -> MedtrackResult<Vec<String>> {
        Ok(units::choices_for(vocabulary)
            .iter()
            .map(|choice| choice.to_string())
            .collect())
    }
}
