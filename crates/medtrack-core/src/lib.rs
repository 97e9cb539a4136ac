//! Medtrack Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Medtrack
//! medication tracker, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           medtrack-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (MedicationService, ActionPlanService)  │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Repository, Vocabulary, ActionPlans)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    medtrack-adapters (Infrastructure)   │
//! │   (JsonFileStore, StaticVocabulary)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FieldValidator, MedicationRecordBuilder)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use medtrack_core::domain::{MedicationForm, MedicationRecord};
//!
//! let mut form = MedicationForm::default();
//! form.name.set_text("Advil");
//! form.dose_amount.set_text("2");
//! form.dose_unit.set_text("Tablets");
//! assert!(form.can_submit());
//!
//! let mut builder = form.builder().attach(MedicationRecord::new());
//! form.apply(&mut builder);
//! let record = builder.build();
//! assert_eq!(record.dose.unwrap().display_text(), "2 Tablets");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ActionPlanService, MedicationService, ReminderRequest, Submission,
        ports::{ActionPlanClient, MedicationRepository, VocabularySource},
    };
    pub use crate::domain::{
        ActionPlan, ActionPlanTask, ApproxMeasurement, FieldDescriptor, FieldStatus,
        FieldValidator, FormValidationAggregator, MedicationForm, MedicationRecord,
        MedicationRecordBuilder, NumberLocale, RecordId, UnitVocabulary,
    };
    pub use crate::error::{MedtrackError, MedtrackResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
