// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Medtrack.
//!
//! Pure business logic: field validation, the medication record builder and
//! action-plan task assembly. Persistence and vocabulary lookups are reached
//! through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Tracing lives in the application services
//! - **Plain results**: Ordinary invalid input is reported as `bool` or
//!   [`FieldStatus`], never as an error
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod locale;
pub mod units;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    action_plan::{
        ActionPlan, ActionPlanTask, ActionPlanTaskBuilder, CompletionMetrics, Objective,
        OccurrenceMetrics, ReminderState, Schedule, ScheduledDay, TargetEvent, TrackingPolicy,
        WindowType, find_plan_for_application,
    },
    field::{FieldDescriptor, PickerField, StaticLabel},
    form::{AppliedFields, MedicationForm},
    medication::{MedicationRecord, MedicationRecordBuilder, RecordId},
};

pub use error::{DomainError, ErrorCategory};

pub use locale::{NumberLocale, parse_decimal};

pub use validation::{
    FieldReport, FieldStatus, FieldValidator, FormReport, FormValidationAggregator, Validate,
    Widget,
};

pub use value_objects::{ApproxMeasurement, CodedUnit, UnitVocabulary};
