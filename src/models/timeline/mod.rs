//! Render payload types.
//!
//! Everything here is derived per render pass and never stored. The
//! external chart renderer consumes [`RenderPayload`] as-is (it serializes
//! to JSON with ISO dates).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::project::Progress;
use crate::models::settings::TickSpacing;
use crate::utils::date::midnight;

/// A segment intersected with the view window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClippedSegment {
    pub project_id: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ClippedSegment {
    pub fn start_instant(&self) -> NaiveDateTime {
        midnight(self.start)
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        midnight(self.end)
    }
}

/// Result of clipping a segment: either the visible part or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clip {
    Visible(ClippedSegment),
    Empty,
}

impl Clip {
    pub fn is_empty(&self) -> bool {
        matches!(self, Clip::Empty)
    }

    pub fn visible(self) -> Option<ClippedSegment> {
        match self {
            Clip::Visible(segment) => Some(segment),
            Clip::Empty => None,
        }
    }
}

/// One drawable bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub segment_id: String,
    pub project_id: String,
    /// Position of this bar among its project's bars, starting at 0
    pub row: usize,
    /// "<project name> / <segment label>"
    pub display_name: String,
    pub project_name: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: Progress,
    pub color: String,
    pub progress_color: String,
    pub opacity: f32,
    /// Weekdays covered by the clipped span
    pub business_days: u32,
}

/// Month heading drawn above the axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAnnotation {
    pub label: String,
    pub midpoint: NaiveDate,
}

/// A segment left out of the payload because its dates run backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSegment {
    pub segment_id: String,
    pub project_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub view_start: NaiveDate,
    pub view_end: NaiveDate,
    pub rows: Vec<TimelineRow>,
    pub ticks: Vec<NaiveDate>,
    pub grid_lines: Vec<NaiveDate>,
    pub month_boundaries: Vec<NaiveDate>,
    pub month_annotations: Vec<MonthAnnotation>,
    pub tick_spacing: TickSpacing,
    pub today: Option<NaiveDate>,
    pub skipped: Vec<SkippedSegment>,
}

impl RenderPayload {
    /// True when there are no bars to draw.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
