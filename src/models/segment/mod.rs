// Segment model
// A labeled sub-interval of a project's schedule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::project::Project;

/// Label given to the segment that mirrors a project's own span.
pub const PRIMARY_SEGMENT_LABEL: &str = "Main schedule";

/// One bar on the timeline, e.g. "foundation work" within a larger contract.
///
/// `project_id` is not checked against the projects table; segments whose
/// project is missing are simply left out when the timeline is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: String,
    pub project_id: String,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Segment {
    pub fn new(
        segment_id: impl Into<String>,
        project_id: impl Into<String>,
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            segment_id: segment_id.into(),
            project_id: project_id.into(),
            label: label.into(),
            start_date,
            end_date,
        }
    }

    /// The implicit segment covering a project's whole span, id `<project id>-main`.
    pub fn primary_for(project: &Project) -> Self {
        Self::new(
            format!("{}-main", project.id),
            project.id.clone(),
            PRIMARY_SEGMENT_LABEL,
            project.start_date,
            project.end_date,
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.segment_id.trim().is_empty() {
            return Err("Segment id cannot be empty".to_string());
        }

        if self.end_date < self.start_date {
            return Err("Segment end date must not be before its start date".to_string());
        }

        Ok(())
    }
}
