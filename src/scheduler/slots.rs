//! Slot catalog.
//!
//! A fixed, ordered table of valid time windows. Random placement only
//! ever draws from this table, so generated entries are never zero-length
//! or malformed, and the overlap check works over a small closed set.

use chrono::NaiveTime;
use rand::Rng;

use crate::error::{TimetableError, TimetableResult};
use crate::models::TimeSlot;

/// Canonical windows as (start hour, end hour).
const CANONICAL_HOURS: [(u32, u32); 5] = [(8, 10), (10, 12), (13, 15), (15, 17), (17, 19)];

/// Ordered, non-empty set of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// The five canonical windows: 08–10, 10–12, 13–15, 15–17, 17–19.
    pub fn canonical() -> Self {
        let slots = CANONICAL_HOURS
            .iter()
            .filter_map(|&(start, end)| {
                Some(TimeSlot {
                    start: NaiveTime::from_hms_opt(start, 0, 0)?,
                    end: NaiveTime::from_hms_opt(end, 0, 0)?,
                })
            })
            .collect();
        Self { slots }
    }

    /// Creates a catalog from custom slots.
    ///
    /// Fails if the list is empty or any slot has `start >= end`.
    pub fn new(slots: Vec<TimeSlot>) -> TimetableResult<Self> {
        if slots.is_empty() {
            return Err(TimetableError::Config("slot catalog must not be empty".into()));
        }
        for slot in &slots {
            slot.validate()
                .map_err(|e| TimetableError::Config(e.to_string()))?;
        }
        Ok(Self { slots })
    }

    /// Picks one slot uniformly at random.
    pub fn pick_slot<R: Rng>(&self, rng: &mut R) -> TimeSlot {
        self.slots[rng.random_range(0..self.slots.len())]
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}
