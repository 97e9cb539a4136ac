//! Medication record storage.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::InMemoryMedicationStore;
