//! Module scheduler: turns day assignments into scheduled entries.
//!
//! # Algorithm
//!
//! 1. Ask the [`DayAssigner`] for `(module, day)` pairs.
//! 2. For each pair, draw a slot from the [`SlotCatalog`].
//! 3. Emit one [`ScheduledModule`] per pair, module fields untouched.
//!
//! A module assigned two days yields two entries. No conflict avoidance
//! happens here; the validator decides whether the result is accepted.

use rand::Rng;

use super::{DayAssigner, DayAssignment, SlotCatalog};
use crate::config::EngineConfig;
use crate::error::TimetableResult;
use crate::models::{Module, ScheduledModule, TimetablePlan};

/// Attaches a day and slot to every cleaned module.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::models::{Category, RawModule, Semester, TimetablePlan, WeekType};
/// use u_timetable::scheduler::ModuleScheduler;
///
/// let modules: Vec<_> = ["IT1010", "IT1020"]
///     .iter()
///     .map(|code| RawModule::new("Intro", *code, "Dr. Silva", "A401")
///         .clean(Category::AllSemester, 0)
///         .unwrap())
///     .collect();
/// let plan = TimetablePlan::AllSemester { semester: Semester::Y1S1, week_type: WeekType::WE };
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let entries = ModuleScheduler::default().schedule(&plan, &modules, &mut rng).unwrap();
/// assert_eq!(entries.len(), 2); // weekend modules get exactly one day
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleScheduler {
    days: DayAssigner,
    slots: SlotCatalog,
}

impl ModuleScheduler {
    pub fn new(days: DayAssigner, slots: SlotCatalog) -> Self {
        Self { days, slots }
    }

    /// Builds a scheduler from a validated configuration.
    pub fn from_config(config: &EngineConfig) -> TimetableResult<Self> {
        Ok(Self::new(
            DayAssigner::from_config(config)?,
            config.slot_catalog()?,
        ))
    }

    pub fn slot_catalog(&self) -> &SlotCatalog {
        &self.slots
    }

    /// Assigns days, then slots, to every module.
    pub fn schedule<R: Rng>(
        &self,
        plan: &TimetablePlan,
        modules: &[Module],
        rng: &mut R,
    ) -> TimetableResult<Vec<ScheduledModule>> {
        let assignments = self.days.assign(plan, modules.len(), rng)?;
        Ok(self.place(modules, &assignments, rng))
    }

    /// Draws a slot for each assignment. Assignments pointing past the
    /// end of `modules` are skipped.
    pub fn place<R: Rng>(
        &self,
        modules: &[Module],
        assignments: &[DayAssignment],
        rng: &mut R,
    ) -> Vec<ScheduledModule> {
        assignments
            .iter()
            .filter_map(|a| {
                let module = modules.get(a.module_index)?;
                Some(ScheduledModule::new(
                    module.clone(),
                    a.day,
                    self.slots.pick_slot(rng),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExamOverflow;
    use crate::models::{Category, RawModule, Semester, WeekType};
    use chrono::Weekday;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn modules(category: Category, n: usize) -> Vec<Module> {
        (0..n)
            .map(|i| {
                RawModule::new(format!("Module {i}"), format!("IT10{i:02}"), "Lecturer", format!("R{i}"))
                    .with_exam_type("Written")
                    .clean(category, i)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_place_preserves_module_fields() {
        let ms = modules(Category::FinalExam, 2);
        let assignments = vec![
            DayAssignment { module_index: 0, day: Weekday::Mon },
            DayAssignment { module_index: 0, day: Weekday::Thu },
            DayAssignment { module_index: 1, day: Weekday::Fri },
        ];
        let mut rng = SmallRng::seed_from_u64(5);
        let scheduler = ModuleScheduler::default();
        let out = scheduler.place(&ms, &assignments, &mut rng);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].module, ms[0]);
        assert_eq!(out[1].module, ms[0]);
        assert_eq!(out[1].day, Weekday::Thu);
        assert_eq!(out[2].module.exam_type.as_deref(), Some("Written"));
        assert!(out.iter().all(|e| scheduler.slot_catalog().contains(&e.slot)));
    }

    #[test]
    fn test_place_skips_unknown_index() {
        let ms = modules(Category::AllSemester, 1);
        let assignments = vec![DayAssignment { module_index: 4, day: Weekday::Mon }];
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(ModuleScheduler::default().place(&ms, &assignments, &mut rng).is_empty());
    }

    #[test]
    fn test_weekday_fan_out() {
        let ms = modules(Category::AllSemester, 4);
        let plan = TimetablePlan::AllSemester {
            semester: Semester::Y1S1,
            week_type: WeekType::WD,
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let out = ModuleScheduler::default().schedule(&plan, &ms, &mut rng).unwrap();
        assert!(out.len() >= 4 && out.len() <= 8);
        for m in &ms {
            let n = out.iter().filter(|e| e.module == *m).count();
            assert!((1..=2).contains(&n));
        }
    }

    #[test]
    fn test_exam_reject_propagates() {
        let config = EngineConfig::default().with_exam_overflow(ExamOverflow::Reject);
        let scheduler = ModuleScheduler::from_config(&config).unwrap();
        let ms = modules(Category::MidExam, 8);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(scheduler.schedule(&TimetablePlan::MidExam, &ms, &mut rng).is_err());
    }

    #[test]
    fn test_from_config_rejects_empty_and_inverted_spans() {
        use crate::config::DaySpan;
        use crate::error::TimetableError;

        for span in [DaySpan { min: 0, max: 0 }, DaySpan { min: 3, max: 2 }] {
            let config = EngineConfig {
                weekday_days: span,
                ..Default::default()
            };
            assert!(matches!(
                ModuleScheduler::from_config(&config),
                Err(TimetableError::Config(_))
            ));
        }
    }
}
