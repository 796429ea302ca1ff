//! Time slot model.
//!
//! A slot is a clock-time window within a single day. Slots are compared
//! as half-open intervals `[start, end)`, so back-to-back windows such as
//! 08:00–10:00 and 10:00–12:00 never overlap.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TimetableError;

/// A `[start, end)` clock-time window.
///
/// Invariant: `start < end`. Enforced by [`TimeSlot::new`]; deserialized
/// slots are re-checked wherever they enter the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Window start (inclusive).
    #[serde(rename = "startTime", with = "hhmm")]
    pub start: NaiveTime,
    /// Window end (exclusive).
    #[serde(rename = "endTime", with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted windows.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimetableError> {
        let slot = Self { start, end };
        slot.validate()?;
        Ok(slot)
    }

    /// Creates a slot from `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimetableError> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    /// Checks the `start < end` invariant.
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.start < self.end {
            Ok(())
        } else {
            Err(TimetableError::InvalidTimeRange {
                start: self.start.format(hhmm::FORMAT).to_string(),
                end: self.end.format(hhmm::FORMAT).to_string(),
            })
        }
    }

    /// Whether two windows overlap (half-open semantics).
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(hhmm::FORMAT),
            self.end.format(hhmm::FORMAT)
        )
    }
}

/// Parses an `HH:MM` clock time.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, TimetableError> {
    NaiveTime::parse_from_str(value.trim(), hhmm::FORMAT)
        .map_err(|_| TimetableError::InvalidTime(value.to_string()))
}

/// Serde adapter for `HH:MM` clock times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
