//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `medtrack-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `MedicationRepository`: Medication record storage
//!   - `VocabularySource`: Unit choices offered by pickers
//!   - `ActionPlanClient`: Action plan and task creation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ActionPlanClient, MedicationRepository, VocabularySource};
