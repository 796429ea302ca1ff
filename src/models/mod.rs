//! Timetable domain models.
//!
//! Provides the core data types for timetable generation requests and
//! the generated aggregate.
//!
//! # Domain Mappings
//!
//! | u-timetable | Weekly timetable | Exam timetable |
//! |-------------|------------------|----------------|
//! | Module | Lecture series | Exam paper |
//! | Venue | Lecture hall | Exam hall |
//! | TimeSlot | Class period | Exam sitting |
//! | Timetable | Semester schedule | Exam schedule |

mod category;
mod module;
mod slot;
mod timetable;

pub use category::{
    Category, CategoryFilter, Faculty, Semester, TimetablePlan, UnknownVariant, WeekType, ALL_DAYS,
};
pub use module::{Module, ModuleEntry, ModulePatch, RawModule, ScheduledModule};
pub use slot::{parse_hhmm, TimeSlot};
pub use timetable::{Timetable, TimetableId, TimetableRequest};
