// Segment editor
// Applies a bar edit to the segment and its owning project as one undoable step

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::project::Progress;
use crate::models::segment::Segment;
use crate::services::history::EditHistoryManager;

/// Form values for one segment and the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEdit {
    pub segment_id: String,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Written to the owning project
    pub progress: Progress,
    /// Written to the owning project; blank clears it
    pub note: Option<String>,
}

impl SegmentEdit {
    /// Pre-fill the form from the current tables.
    pub fn for_segment(history: &EditHistoryManager, segment_id: &str) -> Option<Self> {
        let segment = find_segment(history, segment_id)?;
        let project = history
            .projects()
            .iter()
            .find(|p| p.id == segment.project_id)?;

        Some(Self {
            segment_id: segment.segment_id,
            label: segment.label,
            start_date: segment.start_date,
            end_date: segment.end_date,
            progress: project.progress,
            note: project.note.clone(),
        })
    }
}

/// The stored segment with `segment_id`, or the primary segment the timeline
/// draws for a project that owns none.
fn find_segment(history: &EditHistoryManager, segment_id: &str) -> Option<Segment> {
    let segments = history.segments();
    if let Some(segment) = segments.iter().find(|s| s.segment_id == segment_id) {
        return Some(segment.clone());
    }

    history
        .projects()
        .iter()
        .filter(|p| !segments.iter().any(|s| s.project_id == p.id))
        .map(Segment::primary_for)
        .find(|s| s.segment_id == segment_id)
}

/// Validate `edit` and commit it through the history manager.
///
/// Nothing is committed when the segment is unknown, its project is gone,
/// or the dates are inverted. Editing a project's implicit primary segment
/// stores it in the segments table.
pub fn apply_segment_edit(history: &mut EditHistoryManager, edit: &SegmentEdit) -> Result<()> {
    let mut segment = find_segment(history, &edit.segment_id)
        .ok_or_else(|| anyhow!("Segment not found: {}", edit.segment_id))?;

    segment.label = edit.label.trim().to_string();
    segment.start_date = edit.start_date;
    segment.end_date = edit.end_date;
    segment.validate().map_err(|e| anyhow!(e))?;

    let project_id = segment.project_id.clone();
    let mut projects = history.projects().to_vec();
    let project = projects
        .iter_mut()
        .find(|p| p.id == project_id)
        .ok_or_else(|| anyhow!("Project {} for segment {} not found", project_id, edit.segment_id))?;

    project.progress = edit.progress;
    project.note = edit
        .note
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    let mut segments = history.segments().to_vec();
    match segments.iter().position(|s| s.segment_id == segment.segment_id) {
        Some(index) => segments[index] = segment,
        None => {
            log::debug!("Storing primary segment {}", segment.segment_id);
            segments.push(segment);
        }
    }

    history.apply_mutation(projects, segments);
    log::info!("Updated segment {} of project {}", edit.segment_id, project_id);
    Ok(())
}
