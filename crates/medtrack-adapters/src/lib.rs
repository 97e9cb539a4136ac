//! Infrastructure adapters for Medtrack.
//!
//! This crate implements the ports defined in `medtrack-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod action_plan;
pub mod store;
pub mod vocabulary;

// Re-export commonly used adapters
pub use action_plan::InMemoryActionPlanClient;
pub use store::{InMemoryMedicationStore, JsonFileStore};
pub use vocabulary::StaticVocabulary;
