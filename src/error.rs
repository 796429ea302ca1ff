//! Error types.
//!
//! Every engine failure is scoped to a single request: validation and
//! conflict errors map to 400, store lookups to 404. Nothing is retried;
//! the caller resubmits corrected input.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::TimetableId;

/// Result alias for engine operations.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Failure of a generation or edit request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A required request or module field is absent.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Fewer modules than a generation run requires.
    #[error("at least {required} modules are required to generate a timetable, got {found}")]
    InsufficientModules { found: usize, required: usize },

    /// An exam timetable module has no exam type.
    #[error("module {module} is missing an exam type")]
    MissingExamType { module: String },

    /// Two entries share a venue and day with overlapping times.
    #[error("double booking at venue {venue} on {day}: {first} overlaps {second}")]
    DoubleBooking {
        venue: String,
        day: Weekday,
        /// Module code of the earlier entry.
        first: String,
        /// Module code of the later entry.
        second: String,
    },

    /// Exam batch exceeds the day cap under the rejecting overflow policy.
    #[error("exam timetables take at most {max} modules, got {found}")]
    TooManyExamModules { found: usize, max: usize },

    /// A slot whose start is not before its end.
    #[error("invalid time range {start}-{end}: start must be before end")]
    InvalidTimeRange { start: String, end: String },

    /// A clock time that is not `HH:MM`.
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// An edit addressed a module index that does not exist.
    #[error("module index {index} out of range for timetable with {len} modules")]
    ModuleIndexOutOfRange { index: usize, len: usize },

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TimetableError {
    /// HTTP status equivalent for the routing layer.
    pub fn status_code(&self) -> u16 {
        match self {
            TimetableError::Store(StoreError::NotFound { .. }) => 404,
            TimetableError::Config(_) => 500,
            _ => 400,
        }
    }

    /// Whether this failure came from a missing timetable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TimetableError::Store(StoreError::NotFound { .. }))
    }
}

/// Failure reported by a [`TimetableStore`](crate::store::TimetableStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("timetable {id} not found")]
    NotFound { id: TimetableId },
}

/// Error response body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&TimetableError> for ErrorBody {
    fn from(err: &TimetableError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
