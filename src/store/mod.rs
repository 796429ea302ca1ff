//! Timetable persistence boundary.
//!
//! The engine never touches disk or network. Stores implement
//! [`TimetableStore`]; [`MemoryStore`] is the in-process implementation
//! used for tests and embedding.
//!
//! Concurrency follows load → mutate → validate → save. Two concurrent
//! edits of the same timetable resolve as last write wins.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::{CategoryFilter, Faculty, Timetable, TimetableId};

/// A stored timetable with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTimetable {
    pub id: TimetableId,
    pub timetable: Timetable,
}

/// Persistence operations consumed by the service layer.
pub trait TimetableStore: Send + Sync {
    /// Persists a new timetable and returns its identifier.
    fn save(&self, timetable: Timetable) -> Result<TimetableId, StoreError>;

    fn load_by_id(&self, id: TimetableId) -> Result<Timetable, StoreError>;

    /// Replaces an existing timetable.
    fn update(&self, id: TimetableId, timetable: Timetable) -> Result<(), StoreError>;

    fn delete_by_id(&self, id: TimetableId) -> Result<(), StoreError>;

    /// All timetables, oldest first.
    fn list(&self) -> Result<Vec<StoredTimetable>, StoreError>;

    /// Timetables of one faculty, optionally narrowed to one category.
    fn list_by_faculty_and_category(
        &self,
        faculty: Faculty,
        filter: CategoryFilter,
    ) -> Result<Vec<StoredTimetable>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|s| s.timetable.faculty == faculty && filter.matches(s.timetable.category()))
            .collect())
    }
}
