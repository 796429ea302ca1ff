//! Timetable aggregate and generation request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Category, Faculty, RawModule, ScheduledModule, Semester, TimetablePlan, WeekType};

/// Store-assigned timetable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimetableId(Uuid);

impl TimetableId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimetableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimetableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TimetableId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Body of a generation request. Every field is optional on the wire;
/// presence rules are enforced by the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    pub category: Option<Category>,
    pub faculty: Option<Faculty>,
    pub semester: Option<Semester>,
    pub week_type: Option<WeekType>,
    #[serde(default)]
    pub modules: Vec<RawModule>,
}

impl TimetableRequest {
    /// Creates a request for a recurring semester timetable.
    pub fn all_semester(faculty: Faculty, semester: Semester, week_type: WeekType) -> Self {
        Self {
            category: Some(Category::AllSemester),
            faculty: Some(faculty),
            semester: Some(semester),
            week_type: Some(week_type),
            modules: Vec::new(),
        }
    }

    /// Creates a request for an exam timetable.
    pub fn exam(category: Category, faculty: Faculty) -> Self {
        Self {
            category: Some(category),
            faculty: Some(faculty),
            ..Default::default()
        }
    }

    /// Adds a module.
    pub fn with_module(mut self, module: RawModule) -> Self {
        self.modules.push(module);
        self
    }

    /// Replaces the module list.
    pub fn with_modules(mut self, modules: Vec<RawModule>) -> Self {
        self.modules = modules;
        self
    }
}

/// A generated timetable, ready to persist.
///
/// Invariant: no two entries share venue and day with overlapping slots.
/// `generated_at` is set once at generation and never changed by edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(flatten)]
    pub plan: TimetablePlan,
    pub faculty: Faculty,
    pub modules: Vec<ScheduledModule>,
    pub generated_at: DateTime<Utc>,
}

impl Timetable {
    pub fn category(&self) -> Category {
        self.plan.category()
    }

    /// Number of scheduled entries.
    pub fn entry_count(&self) -> usize {
        self.modules.len()
    }

    /// Entries for a given module code.
    pub fn entries_for_module(&self, module_code: &str) -> Vec<&ScheduledModule> {
        self.modules
            .iter()
            .filter(|m| m.module.module_code == module_code)
            .collect()
    }
}
