//! Input validation and double-booking detection.
//!
//! Two kinds of checks live here:
//! - Request shape: required fields, module count, exam types. Applied
//!   in a fixed order, stopping at the first failure.
//! - Conflicts: no two entries may share venue and day with overlapping
//!   `[start, end)` slots. Applied to every generated timetable and to
//!   every edited module list before it reaches the store.
//!
//! # Complexity
//! The conflict scan is pairwise, O(n²) in entry count. Timetables hold
//! tens of entries.

use crate::error::{TimetableError, TimetableResult};
use crate::models::{
    Category, Faculty, ModuleEntry, ScheduledModule, TimetablePlan, TimetableRequest,
};

/// A double booking between two entries, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub first: usize,
    pub second: usize,
}

impl Conflict {
    /// Converts to the error reported for this pair, or `None` when
    /// either index falls outside `entries`.
    pub fn to_error(self, entries: &[ScheduledModule]) -> Option<TimetableError> {
        let a = entries.get(self.first)?;
        let b = entries.get(self.second)?;
        Some(TimetableError::DoubleBooking {
            venue: a.venue().to_string(),
            day: a.day,
            first: a.module.module_code.clone(),
            second: b.module.module_code.clone(),
        })
    }
}

/// Checks the no-double-booking invariant, failing on the first conflict.
///
/// Pairs are scanned `(i, j)` with `i < j` in list order, so the reported
/// conflict is the one with the smallest `i`, then smallest `j`.
pub fn check_conflicts(entries: &[ScheduledModule]) -> TimetableResult<()> {
    match first_conflict(entries).and_then(|c| c.to_error(entries)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Finds the first conflicting pair, if any.
pub fn first_conflict(entries: &[ScheduledModule]) -> Option<Conflict> {
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            if a.collides_with(b) {
                return Some(Conflict { first: i, second: j });
            }
        }
    }
    None
}

/// A request whose top-level fields passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub plan: TimetablePlan,
    pub faculty: Faculty,
}

/// Validates a generation request's shape.
///
/// Checks, in order:
/// 1. `category` and `faculty` present
/// 2. `semester` and `weekType` present for `All Semester`
/// 3. at least `min_modules` modules
/// 4. every module has an exam type when the category is an exam
///
/// Fields that don't apply to the category (a semester on an exam
/// request, say) are ignored.
pub fn validate_request(
    request: &TimetableRequest,
    min_modules: usize,
) -> TimetableResult<ValidatedRequest> {
    let category = request.category.ok_or_else(|| missing("category"))?;
    let faculty = request.faculty.ok_or_else(|| missing("faculty"))?;

    let plan = match category {
        Category::AllSemester => TimetablePlan::AllSemester {
            semester: request.semester.ok_or_else(|| missing("semester"))?,
            week_type: request.week_type.ok_or_else(|| missing("weekType"))?,
        },
        exam => TimetablePlan::exam(exam).ok_or_else(|| missing("category"))?,
    };

    if request.modules.len() < min_modules {
        return Err(TimetableError::InsufficientModules {
            found: request.modules.len(),
            required: min_modules,
        });
    }

    if category.is_exam() {
        if let Some((index, module)) = request
            .modules
            .iter()
            .enumerate()
            .find(|(_, m)| !m.has_exam_type())
        {
            return Err(TimetableError::MissingExamType {
                module: module.label(index),
            });
        }
    }

    Ok(ValidatedRequest { plan, faculty })
}

/// Cleans an edited module list for a timetable of the given category
/// and checks it for double bookings.
///
/// Exam types are required on exam timetables and stripped otherwise;
/// every slot must satisfy `start < end`. The list is accepted or
/// rejected as a whole.
pub fn validate_entries(
    category: Category,
    entries: &[ModuleEntry],
) -> TimetableResult<Vec<ScheduledModule>> {
    let cleaned = entries
        .iter()
        .enumerate()
        .map(|(i, e)| e.clean(category, i))
        .collect::<TimetableResult<Vec<_>>>()?;
    check_conflicts(&cleaned)?;
    Ok(cleaned)
}

fn missing(field: &str) -> TimetableError {
    TimetableError::MissingField {
        field: field.to_string(),
    }
}
