//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "submit the medication form" or "schedule a
//! reminder".

pub mod action_plan_service;
pub mod medication_service;

pub use action_plan_service::{ActionPlanService, ReminderRequest};
pub use medication_service::{MedicationService, Submission};
