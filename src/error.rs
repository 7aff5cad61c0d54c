// Error types for the timeline core

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the grid, business-day and clipping calculations.
///
/// The two variants describe the same condition (an end date before its
/// start date) but are reported separately: a bad view window ends the
/// render pass, while a bad segment only costs that one segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid range: end {end} precedes start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid segment range for project {project_id} ({label}): end {end} precedes start {start}")]
    InvalidSegmentRange {
        project_id: String,
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Reject `[start, end]` spans that run backwards.
pub fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<(), ScheduleError> {
    if end < start {
        return Err(ScheduleError::InvalidRange { start, end });
    }
    Ok(())
}
