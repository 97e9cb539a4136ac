//! JSON file store for medications and action plans.
//!
//! The whole store is one JSON document. Every operation reads the file,
//! applies the change and writes it back through a temporary file that is
//! renamed over the original. A missing file is an empty store.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use medtrack_core::{
    application::{
        ApplicationError,
        ports::{ActionPlanClient, MedicationRepository},
    },
    domain::{ActionPlan, ActionPlanTask, MedicationRecord, RecordId},
    error::{MedtrackError, MedtrackResult},
};

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    medications: Vec<MedicationRecord>,
    #[serde(default)]
    action_plans: Vec<ActionPlan>,
}

/// Failures reading or writing the store file.
#[derive(Debug, Error)]
pub enum StoreFileError {
    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid medication store: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode medication store: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreFileError> for MedtrackError {
    fn from(err: StoreFileError) -> Self {
        match &err {
            StoreFileError::Io { path, .. } => ApplicationError::StorageFailed {
                path: path.clone(),
                reason: err.to_string(),
            }
            .into(),
            StoreFileError::Decode { .. } | StoreFileError::Encode(_) => {
                ApplicationError::Serialization(err.to_string()).into()
            }
        }
    }
}

/// File-backed store implementing both the medication and action plan ports.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Use the store at `path`. Nothing is read until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument, StoreFileError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store file missing, starting empty");
                return Ok(StoreDocument::default());
            }
            Err(source) => {
                return Err(StoreFileError::Io {
                    op: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        serde_json::from_str(&text).map_err(|source| StoreFileError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreFileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreFileError::Io {
                op: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreFileError::Io {
            op: "write",
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreFileError::Io {
            op: "replace",
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            medications = doc.medications.len(),
            plans = doc.action_plans.len(),
            "Store written"
        );
        Ok(())
    }

    /// Run `f` on the loaded document and persist it if `f` succeeds.
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut StoreDocument) -> MedtrackResult<T>,
    ) -> MedtrackResult<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(StoreDocument) -> MedtrackResult<T>) -> MedtrackResult<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        f(self.load()?)
    }
}

impl MedicationRepository for JsonFileStore {
    fn list(&self) -> MedtrackResult<Vec<MedicationRecord>> {
        self.read(|doc| Ok(doc.medications))
    }

    fn get(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        self.read(|doc| {
            doc.medications
                .into_iter()
                .find(|r| r.id == *id)
                .ok_or_else(|| ApplicationError::RecordNotFound { id: *id }.into())
        })
    }

    fn insert(&self, record: MedicationRecord) -> MedtrackResult<()> {
        self.modify(|doc| {
            if doc.medications.iter().any(|r| r.id == record.id) {
                return Err(ApplicationError::RecordExists { id: record.id }.into());
            }
            doc.medications.push(record);
            Ok(())
        })
    }

    fn update(&self, record: MedicationRecord) -> MedtrackResult<()> {
        self.modify(|doc| {
            let slot = doc
                .medications
                .iter_mut()
                .find(|r| r.id == record.id)
                .ok_or(ApplicationError::RecordNotFound { id: record.id })?;
            *slot = record;
            Ok(())
        })
    }

    fn remove(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        self.modify(|doc| {
            let pos = doc
                .medications
                .iter()
                .position(|r| r.id == *id)
                .ok_or(ApplicationError::RecordNotFound { id: *id })?;
            Ok(doc.medications.remove(pos))
        })
    }
}

impl ActionPlanClient for JsonFileStore {
    fn list_plans(&self) -> MedtrackResult<Vec<ActionPlan>> {
        self.read(|doc| Ok(doc.action_plans))
    }

    fn create_plan(&self, plan: ActionPlan) -> MedtrackResult<ActionPlan> {
        self.modify(|doc| {
            doc.action_plans.push(plan.clone());
            Ok(plan)
        })
    }

    fn create_task(&self, plan_id: &Uuid, task: ActionPlanTask) -> MedtrackResult<ActionPlanTask> {
        self.modify(|doc| {
            let plan = doc
                .action_plans
                .iter_mut()
                .find(|p| p.id == *plan_id)
                .ok_or_else(|| ApplicationError::ActionPlanUnavailable {
                    reason: format!("no plan with id {plan_id}"),
                })?;
            plan.tasks.push(task.clone());
            Ok(task)
        })
    }
}
