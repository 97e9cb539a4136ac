//! Medication Service - submit, edit and browse medication records.
//!
//! The submit flow is:
//! 1. Evaluate every form input
//! 2. Reject the form if any input is invalid
//! 3. Attach a record to a builder and apply the inputs
//! 4. Persist the built record

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{MedicationRepository, VocabularySource},
    domain::{
        AppliedFields, DomainError, MedicationForm, MedicationRecord, NumberLocale, RecordId,
        UnitVocabulary,
    },
    error::MedtrackResult,
};

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: MedicationRecord,
    pub applied: AppliedFields,
}

/// Service for medication records.
pub struct MedicationService {
    repository: Box<dyn MedicationRepository>,
    vocabulary: Box<dyn VocabularySource>,
}

impl MedicationService {
    /// Create a new medication service with the given adapters.
    pub fn new(
        repository: Box<dyn MedicationRepository>,
        vocabulary: Box<dyn VocabularySource>,
    ) -> Self {
        Self {
            repository,
            vocabulary,
        }
    }

    /// Build a new record from `form` and store it.
    #[instrument(skip_all, fields(name = %form.name.text()))]
    pub fn submit_new(&self, form: &MedicationForm) -> MedtrackResult<Submission> {
        Self::gate(form)?;

        let mut builder = form.builder().attach(MedicationRecord::new());
        let applied = form.apply(&mut builder);
        let record = builder.try_build()?;
        Self::log_applied(&applied);

        self.repository.insert(record.clone())?;
        info!(id = %record.id, "Medication stored");

        Ok(Submission { record, applied })
    }

    /// Apply `form` on top of the stored record `id`.
    ///
    /// Inputs left blank keep the stored value.
    #[instrument(skip_all, fields(id = %id))]
    pub fn submit_edit(&self, id: &RecordId, form: &MedicationForm) -> MedtrackResult<Submission> {
        Self::gate(form)?;

        let existing = self.repository.get(id)?;
        let mut builder = form.builder().attach(existing);
        let applied = form.apply(&mut builder);
        let record = builder.try_build()?;
        Self::log_applied(&applied);

        self.repository.update(record.clone())?;
        info!("Medication updated");

        Ok(Submission { record, applied })
    }

    /// A form showing the stored record `id`.
    pub fn edit_form(&self, id: &RecordId, locale: NumberLocale) -> MedtrackResult<MedicationForm> {
        let record = self.repository.get(id)?;
        Ok(MedicationForm::prefill(&record, locale))
    }

    pub fn list(&self) -> MedtrackResult<Vec<MedicationRecord>> {
        self.repository.list()
    }

    pub fn get(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        self.repository.get(id)
    }

    #[instrument(skip(self))]
    pub fn remove(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        let removed = self.repository.remove(id)?;
        info!(name = removed.display_name(), "Medication removed");
        Ok(removed)
    }

    /// Choices offered by the unit picker for `vocabulary`.
    pub fn unit_choices(&self, vocabulary: UnitVocabulary) -> MedtrackResult<Vec<String>> {
        self.vocabulary.choices(vocabulary)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn gate(form: &MedicationForm) -> MedtrackResult<()> {
        let report = form.evaluate();
        if report.all_valid() {
            return Ok(());
        }

        for field in report.invalid() {
            warn!(field = %field.label, status = %field.status, "Invalid input");
        }
        Err(DomainError::FormRejected {
            fields: report.invalid_labels(),
        }
        .into())
    }

    fn log_applied(applied: &AppliedFields) {
        debug!(
            name = applied.name,
            strength = applied.strength,
            dose = applied.dose,
            frequency = applied.frequency,
            "Builder setters applied"
        );
    }
}
