//! Randomized day and slot assignment.
//!
//! # Components
//!
//! - [`SlotCatalog`]: fixed table of valid windows, one random pick per entry.
//! - [`DayAssigner`]: category-specific day selection.
//! - [`ModuleScheduler`]: combines both into scheduled entries.
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so seeding
//! the generator fixes every outcome. Nothing here avoids conflicts; the
//! result is checked by [`crate::validation::check_conflicts`].

mod days;
mod placement;
mod slots;

pub use days::{DayAssigner, DayAssignment};
pub use placement::ModuleScheduler;
pub use slots::SlotCatalog;
