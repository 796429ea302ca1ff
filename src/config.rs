//! Engine configuration.
//!
//! Defaults reproduce the stock behavior: four modules minimum, exam
//! batches capped at seven with the excess dropped, one or two weekdays
//! per recurring module, and the five canonical slots. Embedding
//! applications can override any field from TOML:
//!
//! ```toml
//! min_modules = 4
//! exam_overflow = "reject"
//! weekday_days = { min = 1, max = 2 }
//! slots = [
//!     { startTime = "09:00", endTime = "11:00" },
//!     { startTime = "14:00", endTime = "16:00" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};
use crate::models::{TimeSlot, WeekType, ALL_DAYS};
use crate::scheduler::SlotCatalog;

/// What to do with exam modules beyond [`EngineConfig::exam_day_cap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamOverflow {
    /// Place the first `exam_day_cap` modules and drop the rest, logging
    /// a warning with the dropped count.
    #[default]
    Truncate,
    /// Fail the request with `TooManyExamModules`.
    Reject,
    /// Place every module, cycling through the shuffled week. Reused days
    /// can double-book a venue, which the conflict check then rejects.
    Wrap,
}

/// Inclusive bounds on how many days a weekday module occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySpan {
    pub min: usize,
    pub max: usize,
}

impl Default for DaySpan {
    fn default() -> Self {
        Self { min: 1, max: 2 }
    }
}

/// Configuration for timetable generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum module count for a generation request.
    pub min_modules: usize,
    /// Maximum exam modules placed per generation (one per day of the week).
    pub exam_day_cap: usize,
    /// Policy for exam modules beyond the cap.
    pub exam_overflow: ExamOverflow,
    /// Days per module on weekday (`WD`) timetables.
    pub weekday_days: DaySpan,
    /// Custom slot catalog. `None` = the five canonical windows.
    pub slots: Option<Vec<TimeSlot>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_modules: 4,
            exam_day_cap: ALL_DAYS.len(),
            exam_overflow: ExamOverflow::Truncate,
            weekday_days: DaySpan::default(),
            slots: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(source: &str) -> TimetableResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| TimetableError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the exam overflow policy.
    pub fn with_exam_overflow(mut self, policy: ExamOverflow) -> Self {
        self.exam_overflow = policy;
        self
    }

    /// Sets a custom slot catalog.
    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.slots = Some(slots);
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> TimetableResult<()> {
        if self.min_modules == 0 {
            return Err(TimetableError::Config("min_modules must be at least 1".into()));
        }
        if self.exam_day_cap == 0 || self.exam_day_cap > ALL_DAYS.len() {
            return Err(TimetableError::Config(format!(
                "exam_day_cap must be between 1 and {}",
                ALL_DAYS.len()
            )));
        }
        let span = self.weekday_days;
        let weekdays = WeekType::WD.days().len();
        if span.min == 0 || span.min > span.max || span.max > weekdays {
            return Err(TimetableError::Config(format!(
                "weekday_days must satisfy 1 <= min <= max <= {weekdays}, got {}..={}",
                span.min, span.max
            )));
        }
        self.slot_catalog().map(|_| ())
    }

    /// Builds the slot catalog this configuration describes.
    pub fn slot_catalog(&self) -> TimetableResult<SlotCatalog> {
        match &self.slots {
            Some(slots) => SlotCatalog::new(slots.clone()),
            None => Ok(SlotCatalog::canonical()),
        }
    }
}
