//! Timetable service: generation and edits against a store.
//!
//! Each method corresponds to one route of the timetable API:
//!
//! | Method | Route |
//! |--------|-------|
//! | [`generate`](TimetableService::generate) | `POST /timetables/generate` |
//! | [`list`](TimetableService::list) | `GET /timetables` |
//! | [`get`](TimetableService::get) | `GET /timetables/:id` |
//! | [`replace_modules`](TimetableService::replace_modules) | `PUT /timetables/:id` |
//! | [`delete`](TimetableService::delete) | `DELETE /timetables/:id` |
//! | [`list_by_faculty`](TimetableService::list_by_faculty) | `GET /timetables/faculty/:faculty/:category` |
//!
//! Edits load the stored timetable, rebuild its module list, re-run the
//! conflict check, and only then write back. A rejected edit leaves the
//! stored record untouched.

use rand::Rng;
use tracing::{info, warn};

use crate::builder::TimetableBuilder;
use crate::error::{TimetableError, TimetableResult};
use crate::models::{
    CategoryFilter, Faculty, ModuleEntry, ModulePatch, Timetable, TimetableId, TimetableRequest,
};
use crate::store::{StoredTimetable, TimetableStore};
use crate::validation::validate_entries;

/// A single-module edit.
#[derive(Debug, Clone, PartialEq)]
pub enum TimetableEdit {
    /// Append a module at an explicit day and slot.
    AddModule(ModuleEntry),
    /// Remove the entry at `index`.
    RemoveModule { index: usize },
    /// Change fields of the entry at `index`.
    UpdateModule { index: usize, patch: ModulePatch },
}

/// Generation and edit operations over a [`TimetableStore`].
#[derive(Debug)]
pub struct TimetableService<S> {
    store: S,
    builder: TimetableBuilder,
}

impl<S: TimetableStore> TimetableService<S> {
    pub fn new(store: S, builder: TimetableBuilder) -> Self {
        Self { store, builder }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates a timetable and persists it.
    pub fn generate<R: Rng>(
        &self,
        request: &TimetableRequest,
        rng: &mut R,
    ) -> TimetableResult<(TimetableId, Timetable)> {
        let timetable = self.builder.build(request, rng)?;
        let id = self.store.save(timetable.clone())?;
        info!(%id, "timetable stored");
        Ok((id, timetable))
    }

    pub fn list(&self) -> TimetableResult<Vec<StoredTimetable>> {
        Ok(self.store.list()?)
    }

    pub fn get(&self, id: TimetableId) -> TimetableResult<Timetable> {
        Ok(self.store.load_by_id(id)?)
    }

    /// Timetables for a faculty; `CategoryFilter::All` returns every category.
    pub fn list_by_faculty(
        &self,
        faculty: Faculty,
        filter: CategoryFilter,
    ) -> TimetableResult<Vec<StoredTimetable>> {
        Ok(self.store.list_by_faculty_and_category(faculty, filter)?)
    }

    /// Replaces a timetable's module list.
    ///
    /// The new list is cleaned for the timetable's category and checked
    /// for double bookings. Category, faculty and `generated_at` are kept.
    pub fn replace_modules(
        &self,
        id: TimetableId,
        entries: Vec<ModuleEntry>,
    ) -> TimetableResult<Timetable> {
        let current = self.store.load_by_id(id)?;
        self.commit(id, current, &entries)
    }

    /// Applies a single-module edit.
    pub fn apply_edit(&self, id: TimetableId, edit: TimetableEdit) -> TimetableResult<Timetable> {
        let current = self.store.load_by_id(id)?;
        let mut entries: Vec<ModuleEntry> = current.modules.iter().map(ModuleEntry::from).collect();
        let len = entries.len();

        match edit {
            TimetableEdit::AddModule(entry) => entries.push(entry),
            TimetableEdit::RemoveModule { index } => {
                if index >= len {
                    return Err(TimetableError::ModuleIndexOutOfRange { index, len });
                }
                entries.remove(index);
            }
            TimetableEdit::UpdateModule { index, patch } => {
                let entry = entries
                    .get_mut(index)
                    .ok_or(TimetableError::ModuleIndexOutOfRange { index, len })?;
                patch.apply(entry);
            }
        }

        self.commit(id, current, &entries)
    }

    pub fn delete(&self, id: TimetableId) -> TimetableResult<()> {
        self.store.delete_by_id(id)?;
        info!(%id, "timetable deleted");
        Ok(())
    }

    fn commit(
        &self,
        id: TimetableId,
        current: Timetable,
        entries: &[ModuleEntry],
    ) -> TimetableResult<Timetable> {
        let modules = validate_entries(current.category(), entries).inspect_err(|e| {
            warn!(%id, error = %e, "timetable edit rejected");
        })?;
        let updated = Timetable { modules, ..current };
        self.store.update(id, updated.clone())?;
        info!(%id, entries = updated.modules.len(), "timetable edited");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RawModule, Semester, TimeSlot, WeekType};
    use crate::store::MemoryStore;
    use chrono::Weekday;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn service() -> TimetableService<MemoryStore> {
        TimetableService::new(MemoryStore::new(), TimetableBuilder::default())
    }

    fn weekly_request() -> TimetableRequest {
        TimetableRequest::all_semester(Faculty::Computing, Semester::Y1S1, WeekType::WD).with_modules(
            (0..4)
                .map(|i| RawModule::new(format!("Module {i}"), format!("IT10{i}0"), "Lecturer", format!("Room{i}")))
                .collect(),
        )
    }

    fn generate(svc: &TimetableService<MemoryStore>) -> (TimetableId, Timetable) {
        let mut rng = SmallRng::seed_from_u64(42);
        svc.generate(&weekly_request(), &mut rng).unwrap()
    }

    /// An entry that overlaps `existing` in the same venue and day.
    fn clashing_entry(existing: &ModuleEntry) -> ModuleEntry {
        ModuleEntry::new(
            RawModule::new("Intruder", "IT9990", "Visitor", existing.module.venue.clone().unwrap()),
            existing.day,
            existing.slot,
        )
    }

    #[test]
    fn test_generate_persists() {
        let svc = service();
        let (id, t) = generate(&svc);
        assert_eq!(svc.get(id).unwrap(), t);
        assert_eq!(svc.list().unwrap().len(), 1);
    }

    #[test]
    fn test_generate_failure_persists_nothing() {
        let svc = service();
        let mut req = weekly_request();
        req.modules.truncate(3);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(svc.generate(&req, &mut rng).is_err());
        assert!(svc.store().is_empty());
    }

    #[test]
    fn test_add_conflicting_module_rejected_and_store_unchanged() {
        let svc = service();
        let (id, before) = generate(&svc);
        let first = ModuleEntry::from(&before.modules[0]);

        let err = svc
            .apply_edit(id, TimetableEdit::AddModule(clashing_entry(&first)))
            .unwrap_err();
        assert!(matches!(err, TimetableError::DoubleBooking { ref venue, day, .. }
            if *venue == first.module.venue.clone().unwrap() && day == first.day));
        assert_eq!(err.status_code(), 400);
        assert_eq!(svc.get(id).unwrap(), before);
    }

    #[test]
    fn test_add_free_module_accepted() {
        let svc = service();
        let (id, before) = generate(&svc);
        let entry = ModuleEntry::new(
            RawModule::new("Ethics", "IT1050", "Dr. Nanda", "Annex"),
            Weekday::Fri,
            TimeSlot::parse("17:00", "19:00").unwrap(),
        );
        let after = svc.apply_edit(id, TimetableEdit::AddModule(entry)).unwrap();
        assert_eq!(after.modules.len(), before.modules.len() + 1);
        assert_eq!(after.generated_at, before.generated_at);
        assert_eq!(svc.get(id).unwrap(), after);
    }

    #[test]
    fn test_replace_modules_conflict_rejected() {
        let svc = service();
        let (id, before) = generate(&svc);
        let mut entries: Vec<ModuleEntry> = before.modules.iter().map(ModuleEntry::from).collect();
        let clash = clashing_entry(&entries[0]);
        entries.push(clash);

        assert!(matches!(
            svc.replace_modules(id, entries),
            Err(TimetableError::DoubleBooking { .. })
        ));
        assert_eq!(svc.get(id).unwrap(), before);
    }

    #[test]
    fn test_replace_modules_drops_exam_type_on_weekly() {
        let svc = service();
        let (id, _) = generate(&svc);
        let slot = TimeSlot::parse("08:00", "10:00").unwrap();
        let entries = vec![
            ModuleEntry::new(RawModule::new("A", "IT1", "L", "R1").with_exam_type("Written"), Weekday::Mon, slot),
            ModuleEntry::new(RawModule::new("B", "IT2", "L", "R1"), Weekday::Tue, slot),
        ];
        let t = svc.replace_modules(id, entries).unwrap();
        assert_eq!(t.modules.len(), 2);
        assert!(t.modules.iter().all(|e| e.module.exam_type.is_none()));
    }

    #[test]
    fn test_exam_edit_requires_exam_type() {
        let svc = service();
        let req = TimetableRequest::exam(Category::MidExam, Faculty::Engineering).with_modules(
            (0..4)
                .map(|i| RawModule::new("Exam", format!("EE{i}"), "Invigilator", format!("Hall{i}")).with_exam_type("Written"))
                .collect(),
        );
        let mut rng = SmallRng::seed_from_u64(5);
        let (id, before) = svc.generate(&req, &mut rng).unwrap();

        let patch = ModulePatch {
            exam_type: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            svc.apply_edit(id, TimetableEdit::UpdateModule { index: 0, patch }),
            Err(TimetableError::MissingExamType { .. })
        ));
        assert_eq!(svc.get(id).unwrap(), before);
    }

    #[test]
    fn test_update_and_remove_module() {
        let svc = service();
        let (id, before) = generate(&svc);

        let patch = ModulePatch {
            instructor: Some("Prof. New".into()),
            ..Default::default()
        };
        let t = svc
            .apply_edit(id, TimetableEdit::UpdateModule { index: 0, patch })
            .unwrap();
        assert_eq!(t.modules[0].module.instructor, "Prof. New");

        let t = svc.apply_edit(id, TimetableEdit::RemoveModule { index: 0 }).unwrap();
        assert_eq!(t.modules.len(), before.modules.len() - 1);

        let len = t.modules.len();
        assert_eq!(
            svc.apply_edit(id, TimetableEdit::RemoveModule { index: 99 }).unwrap_err(),
            TimetableError::ModuleIndexOutOfRange { index: 99, len }
        );
    }

    #[test]
    fn test_missing_timetable_is_not_found() {
        let svc = service();
        let id = TimetableId::new();
        let err = svc.get(id).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert!(svc.delete(id).unwrap_err().is_not_found());
        assert!(svc.replace_modules(id, Vec::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_by_faculty_filter() {
        let svc = service();
        generate(&svc);
        let exam = TimetableRequest::exam(Category::FinalExam, Faculty::Computing).with_modules(
            (0..4)
                .map(|i| RawModule::new("Exam", format!("IT9{i}"), "Invigilator", format!("Hall{i}")).with_exam_type("Online"))
                .collect(),
        );
        let mut rng = SmallRng::seed_from_u64(2);
        svc.generate(&exam, &mut rng).unwrap();

        let all: CategoryFilter = "All".parse().unwrap();
        assert_eq!(svc.list_by_faculty(Faculty::Computing, all).unwrap().len(), 2);
        let finals: CategoryFilter = "Final Exam".parse().unwrap();
        assert_eq!(svc.list_by_faculty(Faculty::Computing, finals).unwrap().len(), 1);
        assert!(svc.list_by_faculty(Faculty::Law, all).unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let svc = service();
        let (id, _) = generate(&svc);
        svc.delete(id).unwrap();
        assert!(svc.list().unwrap().is_empty());
    }
}
