//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `medtrack-adapters` crate provides implementations.

use uuid::Uuid;

use crate::domain::{ActionPlan, ActionPlanTask, MedicationRecord, RecordId, UnitVocabulary};
use crate::error::MedtrackResult;

/// Port for medication record storage.
///
/// Implemented by:
/// - `medtrack_adapters::store::InMemoryMedicationStore` (testing)
/// - `medtrack_adapters::store::JsonFileStore` (production)
#[cfg_attr(test, mockall::automock)]
pub trait MedicationRepository: Send + Sync {
    /// All stored records, in insertion order.
    fn list(&self) -> MedtrackResult<Vec<MedicationRecord>>;

    /// Get a record by id.
    fn get(&self, id: &RecordId) -> MedtrackResult<MedicationRecord>;

    /// Store a new record. Fails if the id is taken.
    fn insert(&self, record: MedicationRecord) -> MedtrackResult<()>;

    /// Replace an existing record. Fails if the id is unknown.
    fn update(&self, record: MedicationRecord) -> MedtrackResult<()>;

    /// Remove a record, returning it.
    fn remove(&self, id: &RecordId) -> MedtrackResult<MedicationRecord>;
}

/// Port for the unit choices offered to the user.
///
/// Implemented by:
/// - `medtrack_adapters::vocabulary::StaticVocabulary` (built-in lists)
#[cfg_attr(test, mockall::automock)]
pub trait VocabularySource: Send + Sync {
    fn choices(&self, vocabulary: UnitVocabulary) -> MedtrackResult<Vec<String>>;
}

/// Port for the action plan backend.
///
/// Implemented by:
/// - `medtrack_adapters::action_plan::InMemoryActionPlanClient` (testing)
/// - `medtrack_adapters::store::JsonFileStore` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ActionPlanClient: Send + Sync {
    /// Every plan visible to the user.
    fn list_plans(&self) -> MedtrackResult<Vec<ActionPlan>>;

    /// Create a plan and return it as stored.
    fn create_plan(&self, plan: ActionPlan) -> MedtrackResult<ActionPlan>;

    /// Create a task and attach it to plan `plan_id`.
    fn create_task(&self, plan_id: &Uuid, task: ActionPlanTask) -> MedtrackResult<ActionPlanTask>;
}
