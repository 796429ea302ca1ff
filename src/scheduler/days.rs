//! Day assignment.
//!
//! # Policy
//!
//! | Plan | Candidate days | Days per module |
//! |------|----------------|-----------------|
//! | All Semester, `WD` | Mon–Fri | random 1–2, distinct |
//! | All Semester, `WE` | Sat, Sun | exactly 1 |
//! | Exam categories | all 7, shuffled once per call | 1, at `index mod 7` |
//!
//! Exam batches are capped at `exam_day_cap` modules (default 7). What
//! happens to modules past the cap is governed by [`ExamOverflow`].

use chrono::Weekday;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::config::{DaySpan, EngineConfig, ExamOverflow};
use crate::error::{TimetableError, TimetableResult};
use crate::models::{TimetablePlan, WeekType, ALL_DAYS};

/// One module placed on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAssignment {
    /// Position of the module in the cleaned batch.
    pub module_index: usize,
    pub day: Weekday,
}

/// Selects the day(s) each module occupies.
#[derive(Debug, Clone)]
pub struct DayAssigner {
    weekday_days: DaySpan,
    exam_day_cap: usize,
    exam_overflow: ExamOverflow,
}

impl Default for DayAssigner {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            weekday_days: config.weekday_days,
            exam_day_cap: config.exam_day_cap,
            exam_overflow: config.exam_overflow,
        }
    }
}

impl DayAssigner {
    /// Builds an assigner from a configuration, rejecting inconsistent
    /// day spans and caps.
    pub fn from_config(config: &EngineConfig) -> TimetableResult<Self> {
        config.validate()?;
        Ok(Self {
            weekday_days: config.weekday_days,
            exam_day_cap: config.exam_day_cap,
            exam_overflow: config.exam_overflow,
        })
    }

    /// Assigns days to `module_count` modules under the given plan.
    ///
    /// Assignments come out grouped by module, in module order. Exam
    /// plans may place fewer modules than given (see [`ExamOverflow`]).
    pub fn assign<R: Rng>(
        &self,
        plan: &TimetablePlan,
        module_count: usize,
        rng: &mut R,
    ) -> TimetableResult<Vec<DayAssignment>> {
        match plan {
            TimetablePlan::AllSemester {
                week_type: WeekType::WD,
                ..
            } => Ok(self.assign_weekdays(module_count, rng)),
            TimetablePlan::AllSemester {
                week_type: WeekType::WE,
                ..
            } => Ok(Self::assign_weekend(module_count, rng)),
            _ => self.assign_exam_days(module_count, rng),
        }
    }

    fn assign_weekdays<R: Rng>(&self, module_count: usize, rng: &mut R) -> Vec<DayAssignment> {
        let candidates = WeekType::WD.days();
        let mut out = Vec::with_capacity(module_count * self.weekday_days.max);

        for module_index in 0..module_count {
            let mut days = candidates.to_vec();
            days.shuffle(rng);
            let take = rng.random_range(self.weekday_days.min..=self.weekday_days.max);
            let mut picked = days[..take.min(days.len())].to_vec();
            picked.sort_by_key(|d| d.num_days_from_monday());
            out.extend(picked.into_iter().map(|day| DayAssignment { module_index, day }));
        }

        out
    }

    fn assign_weekend<R: Rng>(module_count: usize, rng: &mut R) -> Vec<DayAssignment> {
        let candidates = WeekType::WE.days();
        (0..module_count)
            .map(|module_index| DayAssignment {
                module_index,
                day: candidates[rng.random_range(0..candidates.len())],
            })
            .collect()
    }

    fn assign_exam_days<R: Rng>(
        &self,
        module_count: usize,
        rng: &mut R,
    ) -> TimetableResult<Vec<DayAssignment>> {
        let placed = match self.exam_overflow {
            _ if module_count <= self.exam_day_cap => module_count,
            ExamOverflow::Truncate => {
                warn!(
                    modules = module_count,
                    cap = self.exam_day_cap,
                    dropped = module_count - self.exam_day_cap,
                    "exam batch exceeds day cap, dropping trailing modules"
                );
                self.exam_day_cap
            }
            ExamOverflow::Reject => {
                return Err(TimetableError::TooManyExamModules {
                    found: module_count,
                    max: self.exam_day_cap,
                })
            }
            ExamOverflow::Wrap => module_count,
        };

        let mut days = ALL_DAYS.to_vec();
        days.shuffle(rng);

        Ok((0..placed)
            .map(|module_index| DayAssignment {
                module_index,
                day: days[module_index % days.len()],
            })
            .collect())
    }
}
