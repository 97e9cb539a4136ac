//! In-memory medication store.

use std::sync::{Arc, RwLock};

use medtrack_core::{
    application::{ApplicationError, ports::MedicationRepository},
    domain::{MedicationRecord, RecordId},
    error::MedtrackResult,
};

/// Thread-safe in-memory medication store.
///
/// Records keep their insertion order.
#[derive(Clone, Default)]
pub struct InMemoryMedicationStore {
    inner: Arc<RwLock<Vec<MedicationRecord>>>,
}

impl InMemoryMedicationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = MedicationRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(records.into_iter().collect())),
        }
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.inner.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MedicationRepository for InMemoryMedicationStore {
    fn list(&self) -> MedtrackResult<Vec<MedicationRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }

    fn get(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or_else(|| ApplicationError::RecordNotFound { id: *id }.into())
    }

    fn insert(&self, record: MedicationRecord) -> MedtrackResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.iter().any(|r| r.id == record.id) {
            return Err(ApplicationError::RecordExists { id: record.id }.into());
        }
        inner.push(record);
        Ok(())
    }

    fn update(&self, record: MedicationRecord) -> MedtrackResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let slot = inner
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(ApplicationError::RecordNotFound { id: record.id })?;
        *slot = record;
        Ok(())
    }

    fn remove(&self, id: &RecordId) -> MedtrackResult<MedicationRecord> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let pos = inner
            .iter()
            .position(|r| r.id == *id)
            .ok_or(ApplicationError::RecordNotFound { id: *id })?;
        Ok(inner.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medtrack_core::{domain::MedicationRecordBuilder, error::MedtrackError};

    fn named(name: &str) -> MedicationRecord {
        let mut b = MedicationRecordBuilder::new().attach(MedicationRecord::new());
        b.update_name(Some(name));
        b.build()
    }

    #[test]
    fn insert_preserves_order() {
        let store = InMemoryMedicationStore::new();
        store.insert(named("Advil")).unwrap();
        store.insert(named("Tylenol")).unwrap();

        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .filter_map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Advil", "Tylenol"]);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let record = named("Advil");
        let store = InMemoryMedicationStore::with_records([record.clone()]);
        let err = store.insert(record).unwrap_err();
        assert!(matches!(
            err,
            MedtrackError::Application(ApplicationError::RecordExists { .. })
        ));
    }

    #[test]
    fn update_replaces_in_place() {
        let first = named("Advil");
        let mut changed = first.clone();
        changed.name = Some("Advil Liqui-Gels".into());

        let store = InMemoryMedicationStore::with_records([first, named("Tylenol")]);
        store.update(changed.clone()).unwrap();
        assert_eq!(store.list().unwrap()[0], changed);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let store = InMemoryMedicationStore::new();
        let id = RecordId::new();
        assert!(store.get(&id).is_err());
        assert!(store.remove(&id).is_err());
        assert!(store.update(named("x")).is_err());
    }

    #[test]
    fn remove_returns_record() {
        let record = named("Advil");
        let id = record.id;
        let store = InMemoryMedicationStore::with_records([record]);
        assert_eq!(store.remove(&id).unwrap().id, id);
        assert!(store.is_empty());
    }
}
