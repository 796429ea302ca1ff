//! In-memory timetable store.

use parking_lot::RwLock;
use tracing::debug;

use super::{StoredTimetable, TimetableStore};
use crate::error::StoreError;
use crate::models::{Timetable, TimetableId};

/// Insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredTimetable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl TimetableStore for MemoryStore {
    fn save(&self, timetable: Timetable) -> Result<TimetableId, StoreError> {
        let id = TimetableId::new();
        self.records.write().push(StoredTimetable { id, timetable });
        debug!(%id, "timetable saved");
        Ok(id)
    }

    fn load_by_id(&self, id: TimetableId) -> Result<Timetable, StoreError> {
        self.records
            .read()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.timetable.clone())
            .ok_or(StoreError::NotFound { id })
    }

    fn update(&self, id: TimetableId, timetable: Timetable) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound { id })?;
        slot.timetable = timetable;
        debug!(%id, "timetable updated");
        Ok(())
    }

    fn delete_by_id(&self, id: TimetableId) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let pos = records
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound { id })?;
        records.remove(pos);
        debug!(%id, "timetable deleted");
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoredTimetable>, StoreError> {
        Ok(self.records.read().clone())
    }
}
