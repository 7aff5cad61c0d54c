//! Timeline assembly.
//!
//! Merges projects with their segments, clips each bar to the view window,
//! and bundles the rows with the axis grid from [`crate::services::grid`]
//! into a [`RenderPayload`]. Nothing here draws; the payload is handed to
//! an external chart renderer.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::{ensure_ordered, ScheduleError};
use crate::models::project::{Progress, Project};
use crate::models::segment::Segment;
use crate::models::settings::{DisplaySettings, GridMode};
use crate::models::timeline::{Clip, RenderPayload, SkippedSegment, TimelineRow};
use crate::services::business_days::business_days;
use crate::services::clip::clip;
use crate::services::grid;

/// Bar color used when a project has none of its own.
pub const DEFAULT_COLOR: &str = "#f97316";

pub const SELECTED_OPACITY: f32 = 1.0;
pub const UNSELECTED_OPACITY: f32 = 0.7;

/// Legend color for each progress state.
pub fn progress_color(progress: Progress) -> &'static str {
    match progress {
        Progress::Planned => "#f59e0b",
        Progress::InProgress => "#f97316",
        Progress::Done => "#22c55e",
    }
}

/// The project's own color, or [`DEFAULT_COLOR`] when it is missing or blank.
pub fn resolve_display_color(project: &Project) -> &str {
    project
        .color
        .as_deref()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_COLOR)
}

/// What the render consumer asks for.
#[derive(Debug, Clone)]
pub struct TimelineRequest {
    pub view_start: NaiveDate,
    pub view_end: NaiveDate,
    pub settings: DisplaySettings,
    /// Projects drawn at full opacity
    pub selected_ids: Vec<String>,
    /// Date the today marker would be drawn on
    pub today: NaiveDate,
}

impl TimelineRequest {
    pub fn new(view_start: NaiveDate, view_end: NaiveDate, today: NaiveDate) -> Self {
        Self {
            view_start,
            view_end,
            settings: DisplaySettings::default(),
            selected_ids: Vec::new(),
            today,
        }
    }

    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_selected(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.selected_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Build the render payload for `projects` and `segments`.
///
/// An inverted view window fails the whole pass. An inverted segment is
/// skipped, logged, and listed in [`RenderPayload::skipped`]; the rest of
/// the timeline is still produced.
pub fn assemble(
    projects: &[Project],
    segments: &[Segment],
    request: &TimelineRequest,
) -> Result<RenderPayload, ScheduleError> {
    let view_start = request.view_start;
    let view_end = request.view_end;
    ensure_ordered(view_start, view_end)?;

    let project_index: HashMap<&str, usize> = projects
        .iter()
        .enumerate()
        .map(|(index, project)| (project.id.as_str(), index))
        .collect();

    let mut owned: Vec<Vec<Segment>> = vec![Vec::new(); projects.len()];
    for segment in segments {
        match project_index.get(segment.project_id.as_str()) {
            Some(&index) => owned[index].push(segment.clone()),
            None => log::debug!(
                "Segment {} references unknown project {}; not rendered",
                segment.segment_id,
                segment.project_id
            ),
        }
    }

    let selected: HashSet<&str> = request.selected_ids.iter().map(String::as_str).collect();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (project, project_segments) in projects.iter().zip(owned) {
        let project_segments = if project_segments.is_empty() {
            vec![Segment::primary_for(project)]
        } else {
            project_segments
        };

        let mut visible = Vec::new();
        for segment in project_segments {
            match clip(
                &project.id,
                &segment.label,
                segment.start_date,
                segment.end_date,
                view_start,
                view_end,
            ) {
                Ok(Clip::Visible(clipped)) => visible.push((segment.segment_id, clipped)),
                Ok(Clip::Empty) => {}
                Err(err) => {
                    log::warn!("Skipping segment {}: {}", segment.segment_id, err);
                    skipped.push(SkippedSegment {
                        segment_id: segment.segment_id,
                        project_id: project.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        visible.sort_by(|(a_id, a), (b_id, b)| a.start.cmp(&b.start).then_with(|| a_id.cmp(b_id)));

        let color = resolve_display_color(project).to_string();
        let opacity = if selected.contains(project.id.as_str()) {
            SELECTED_OPACITY
        } else {
            UNSELECTED_OPACITY
        };

        for (row, (segment_id, clipped)) in visible.into_iter().enumerate() {
            rows.push(TimelineRow {
                segment_id,
                project_id: project.id.clone(),
                row,
                display_name: format!("{} / {}", project.name, clipped.label),
                project_name: project.name.clone(),
                business_days: business_days(clipped.start, clipped.end)?,
                label: clipped.label,
                start: clipped.start,
                end: clipped.end,
                progress: project.progress,
                color: color.clone(),
                progress_color: progress_color(project.progress).to_string(),
                opacity,
            });
        }
    }

    let grid_lines = match request.settings.grid_mode {
        GridMode::Week => grid::week_grid_lines(view_start, view_end)?,
        GridMode::Day => grid::day_grid_lines(view_start, view_end)?,
    };
    let today = (request.settings.show_today
        && request.today >= view_start
        && request.today <= view_end)
        .then_some(request.today);

    log::debug!(
        "Assembled {} row(s) for {}..{} ({} skipped)",
        rows.len(),
        view_start,
        view_end,
        skipped.len()
    );

    Ok(RenderPayload {
        view_start,
        view_end,
        rows,
        ticks: grid::tick_positions(view_start, view_end)?,
        grid_lines,
        month_boundaries: grid::month_boundaries(view_start, view_end)?,
        month_annotations: grid::month_annotations(view_start, view_end)?,
        tick_spacing: request.settings.zoom.tick_spacing(),
        today,
        skipped,
    })
}
