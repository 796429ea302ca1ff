//! Timetable builder: the generation entry point.
//!
//! # Pipeline
//!
//! ```text
//! Received → Validated → Scheduled → ConflictChecked → Accepted
//!     └──────────┴───────────┴──────────────┴──────────→ Rejected
//! ```
//!
//! Each stage either advances or rejects the whole request. Nothing is
//! returned for a rejected request besides the error, so a caller that
//! persists only `Ok` results never writes a partial timetable.

use chrono::Utc;
use rand::Rng;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::TimetableResult;
use crate::models::{Module, Timetable, TimetableRequest};
use crate::scheduler::ModuleScheduler;
use crate::validation::{check_conflicts, validate_request};

/// Stages of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Received,
    Validated,
    Scheduled,
    ConflictChecked,
    Accepted,
    Rejected,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStage::Received => "received",
            GenerationStage::Validated => "validated",
            GenerationStage::Scheduled => "scheduled",
            GenerationStage::ConflictChecked => "conflict_checked",
            GenerationStage::Accepted => "accepted",
            GenerationStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Validates a request, schedules its modules, and checks the result.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::TimetableBuilder;
/// use u_timetable::models::{Faculty, RawModule, Semester, TimetableRequest, WeekType};
///
/// let request = TimetableRequest::all_semester(Faculty::Computing, Semester::Y1S1, WeekType::WD)
///     .with_module(RawModule::new("Programming", "IT1010", "Dr. Silva", "A401"))
///     .with_module(RawModule::new("Mathematics", "IT1020", "Dr. Perera", "A402"))
///     .with_module(RawModule::new("Networks", "IT1030", "Mr. Jay", "B201"))
///     .with_module(RawModule::new("Databases", "IT1040", "Ms. Rao", "B202"));
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let timetable = TimetableBuilder::default().build(&request, &mut rng).unwrap();
/// assert!(timetable.modules.len() >= 4);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableBuilder {
    min_modules: usize,
    scheduler: ModuleScheduler,
}

impl Default for TimetableBuilder {
    fn default() -> Self {
        Self {
            min_modules: EngineConfig::default().min_modules,
            scheduler: ModuleScheduler::default(),
        }
    }
}

impl TimetableBuilder {
    /// Creates a builder from a validated configuration.
    pub fn new(config: &EngineConfig) -> TimetableResult<Self> {
        config.validate()?;
        Ok(Self {
            min_modules: config.min_modules,
            scheduler: ModuleScheduler::from_config(config)?,
        })
    }

    pub fn scheduler(&self) -> &ModuleScheduler {
        &self.scheduler
    }

    /// Generates a timetable.
    ///
    /// The returned aggregate already satisfies the no-double-booking
    /// invariant; the caller persists it as a unit.
    pub fn build<R: Rng>(
        &self,
        request: &TimetableRequest,
        rng: &mut R,
    ) -> TimetableResult<Timetable> {
        debug!(stage = %GenerationStage::Received, modules = request.modules.len());

        let result = self.run(request, rng);
        match &result {
            Ok(t) => info!(
                stage = %GenerationStage::Accepted,
                category = %t.category(),
                faculty = %t.faculty,
                entries = t.modules.len(),
                "timetable generated"
            ),
            Err(e) => warn!(stage = %GenerationStage::Rejected, error = %e, "timetable rejected"),
        }
        result
    }

    fn run<R: Rng>(&self, request: &TimetableRequest, rng: &mut R) -> TimetableResult<Timetable> {
        let valid = validate_request(request, self.min_modules)?;
        let category = valid.plan.category();
        let modules = request
            .modules
            .iter()
            .enumerate()
            .map(|(i, raw)| raw.clean(category, i))
            .collect::<TimetableResult<Vec<Module>>>()?;
        debug!(stage = %GenerationStage::Validated, %category);

        let entries = self.scheduler.schedule(&valid.plan, &modules, rng)?;
        debug!(stage = %GenerationStage::Scheduled, entries = entries.len());

        check_conflicts(&entries)?;
        debug!(stage = %GenerationStage::ConflictChecked);

        Ok(Timetable {
            plan: valid.plan,
            faculty: valid.faculty,
            modules: entries,
            generated_at: Utc::now(),
        })
    }
}
