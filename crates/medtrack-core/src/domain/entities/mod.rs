pub mod action_plan;
pub mod field;
pub mod form;
pub mod medication;

pub use crate::domain::DomainError;
pub use action_plan::{ActionPlan, ActionPlanTask, ActionPlanTaskBuilder};
pub use field::{FieldDescriptor, PickerField, StaticLabel};
pub use form::{AppliedFields, MedicationForm};
pub use medication::{MedicationRecord, MedicationRecordBuilder, RecordId};
