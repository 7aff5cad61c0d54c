// Segment clipping
// Intersects one labeled date interval with the visible window

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::timeline::{Clip, ClippedSegment};

/// Clip `[seg_start, seg_end]` to `[view_start, view_end]`.
///
/// An inverted segment is rejected before the window is looked at, so it
/// fails even when it lies entirely outside the view. Both bounds are
/// inclusive: a segment ending on `view_start` still yields a one-day clip.
/// The window itself is assumed valid.
pub fn clip(
    project_id: &str,
    label: &str,
    seg_start: NaiveDate,
    seg_end: NaiveDate,
    view_start: NaiveDate,
    view_end: NaiveDate,
) -> Result<Clip, ScheduleError> {
    if seg_end < seg_start {
        return Err(ScheduleError::InvalidSegmentRange {
            project_id: project_id.to_string(),
            label: label.to_string(),
            start: seg_start,
            end: seg_end,
        });
    }

    if seg_end < view_start || seg_start > view_end {
        return Ok(Clip::Empty);
    }

    Ok(Clip::Visible(ClippedSegment {
        project_id: project_id.to_string(),
        label: label.to_string(),
        start: seg_start.max(view_start),
        end: seg_end.min(view_end),
    }))
}
