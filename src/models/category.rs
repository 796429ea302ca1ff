//! Timetable classification: category, faculty, semester, week type.
//!
//! A timetable is either a recurring weekly schedule for one semester
//! (`All Semester`) or a one-shot exam timetable. [`TimetablePlan`]
//! carries exactly the fields valid for each kind, so a recurring
//! timetable always has a semester and week type, and an exam
//! timetable never does.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Recurring weekly class timetable for a whole semester.
    #[serde(rename = "All Semester", alias = "AllSemester")]
    AllSemester,
    /// Mid-semester exam timetable.
    #[serde(rename = "Mid Exam", alias = "MidExam")]
    MidExam,
    /// End-of-semester exam timetable.
    #[serde(rename = "Final Exam", alias = "FinalExam")]
    FinalExam,
    /// Repeat sitting of the mid-semester exams.
    #[serde(rename = "Repeat Mid", alias = "RepeatMid")]
    RepeatMid,
    /// Repeat sitting of the final exams.
    #[serde(rename = "Repeat Final", alias = "RepeatFinal")]
    RepeatFinal,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::AllSemester,
        Category::MidExam,
        Category::FinalExam,
        Category::RepeatMid,
        Category::RepeatFinal,
    ];

    /// Whether this is one of the exam categories.
    #[inline]
    pub fn is_exam(self) -> bool {
        self != Category::AllSemester
    }

    /// Wire name (`"All Semester"`, `"Final Exam"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::AllSemester => "All Semester",
            Category::MidExam => "Mid Exam",
            Category::FinalExam => "Final Exam",
            Category::RepeatMid => "Repeat Mid",
            Category::RepeatFinal => "Repeat Final",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Category::ALL
            .into_iter()
            .find(|c| {
                let name: String = c.as_str().chars().filter(|ch| !ch.is_whitespace()).collect();
                name.eq_ignore_ascii_case(&squashed)
            })
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// Category filter for listing queries. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every category.
    All,
    /// Match one category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a category passes this filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Owning faculty of a timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faculty {
    Computing,
    Engineering,
    Business,
    Humanities,
    Science,
    Law,
}

impl Faculty {
    pub const ALL: [Faculty; 6] = [
        Faculty::Computing,
        Faculty::Engineering,
        Faculty::Business,
        Faculty::Humanities,
        Faculty::Science,
        Faculty::Law,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Faculty::Computing => "computing",
            Faculty::Engineering => "engineering",
            Faculty::Business => "business",
            Faculty::Humanities => "humanities",
            Faculty::Science => "science",
            Faculty::Law => "law",
        }
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Faculty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Faculty::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("faculty", s))
    }
}

/// Academic year and semester (`Y1S1` = year 1, semester 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    Y1S1,
    Y1S2,
    Y2S1,
    Y2S2,
    Y3S1,
    Y3S2,
    Y4S1,
    Y4S2,
}

/// Weekday (`WD`) or weekend (`WE`) delivery of a recurring timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekType {
    /// Monday to Friday.
    WD,
    /// Saturday and Sunday.
    WE,
}

impl WeekType {
    /// Candidate days for this week type, in calendar order.
    pub fn days(self) -> &'static [Weekday] {
        match self {
            WeekType::WD => &WEEKDAYS,
            WeekType::WE => &WEEKEND,
        }
    }
}

const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Every day of the week, Monday first.
pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Category together with the fields that category requires.
///
/// Serialized with an inline `category` tag so a stored timetable reads
/// `{"category": "All Semester", "semester": "Y1S1", "weekType": "WD", ...}`
/// or `{"category": "Final Exam", ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum TimetablePlan {
    #[serde(rename = "All Semester", alias = "AllSemester")]
    AllSemester {
        semester: Semester,
        #[serde(rename = "weekType")]
        week_type: WeekType,
    },
    #[serde(rename = "Mid Exam", alias = "MidExam")]
    MidExam,
    #[serde(rename = "Final Exam", alias = "FinalExam")]
    FinalExam,
    #[serde(rename = "Repeat Mid", alias = "RepeatMid")]
    RepeatMid,
    #[serde(rename = "Repeat Final", alias = "RepeatFinal")]
    RepeatFinal,
}

impl TimetablePlan {
    /// Builds the plan for an exam category.
    ///
    /// Returns `None` for `AllSemester`, which needs a semester and week type.
    pub fn exam(category: Category) -> Option<Self> {
        match category {
            Category::AllSemester => None,
            Category::MidExam => Some(TimetablePlan::MidExam),
            Category::FinalExam => Some(TimetablePlan::FinalExam),
            Category::RepeatMid => Some(TimetablePlan::RepeatMid),
            Category::RepeatFinal => Some(TimetablePlan::RepeatFinal),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            TimetablePlan::AllSemester { .. } => Category::AllSemester,
            TimetablePlan::MidExam => Category::MidExam,
            TimetablePlan::FinalExam => Category::FinalExam,
            TimetablePlan::RepeatMid => Category::RepeatMid,
            TimetablePlan::RepeatFinal => Category::RepeatFinal,
        }
    }

    #[inline]
    pub fn is_exam(&self) -> bool {
        self.category().is_exam()
    }
}

/// A string that names no known variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
