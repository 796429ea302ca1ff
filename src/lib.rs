//! Academic timetable generation and conflict validation.
//!
//! Assigns each course or exam module a day and time slot, then rejects
//! any timetable in which two entries double-book a venue.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `RawModule`, `Module`, `ScheduledModule`,
//!   `TimeSlot`, `TimetablePlan`, `Timetable`
//! - **`scheduler`**: Randomized placement — `SlotCatalog`, `DayAssigner`,
//!   `ModuleScheduler`
//! - **`validation`**: Request shape checks and double-booking detection
//! - **`builder`**: `TimetableBuilder`, the generation pipeline
//! - **`store`**: `TimetableStore` persistence boundary and `MemoryStore`
//! - **`service`**: `TimetableService`, generation and edits against a store
//! - **`config`**: `EngineConfig`, loadable from TOML
//!
//! # Determinism
//!
//! Every random choice draws from a caller-supplied [`rand::Rng`]. A seeded
//! generator reproduces the same timetable for the same request.
//!
//! # Concurrency
//!
//! Generation is synchronous and shares no mutable state between calls.
//! The store is the only shared resource.

pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod validation;

pub use builder::{GenerationStage, TimetableBuilder};
pub use config::{EngineConfig, ExamOverflow};
pub use error::{ErrorBody, StoreError, TimetableError, TimetableResult};
pub use service::{TimetableEdit, TimetableService};
