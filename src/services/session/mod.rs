// Session state
// Everything one user session holds between renders

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::project::Project;
use crate::models::segment::Segment;
use crate::models::settings::{AppConfig, DisplaySettings};
use crate::models::timeline::RenderPayload;
use crate::services::editor::SegmentEdit;
use crate::services::filter::ProjectFilter;
use crate::services::history::{EditHistoryManager, HistoryOutcome};
use crate::services::io::ImportResult;
use crate::services::timeline::{assemble, TimelineRequest};

/// Created once per session and passed by reference to every operation.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub history: EditHistoryManager,
    pub filter: ProjectFilter,
    pub settings: DisplaySettings,
    /// Project ids drawn at full opacity
    pub selected_ids: Vec<String>,
    /// Segment currently open in the editor
    pub active_segment: Option<String>,
}

impl SessionState {
    pub fn new(projects: Vec<Project>, segments: Vec<Segment>) -> Self {
        Self {
            history: EditHistoryManager::new(projects, segments),
            filter: ProjectFilter::default(),
            settings: DisplaySettings::default(),
            selected_ids: Vec::new(),
            active_segment: None,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.settings = config.display;
        self
    }

    /// Replace both tables with an import, as one undoable step.
    pub fn import(&mut self, result: ImportResult) {
        log::info!(
            "Importing {} project(s), {} row(s) skipped",
            result.projects.len(),
            result.skipped
        );
        self.history.apply_mutation(result.projects, result.segments);
        self.active_segment = None;
    }

    /// Filter the current tables and assemble the timeline for the window.
    pub fn render(
        &self,
        view_start: NaiveDate,
        view_end: NaiveDate,
        today: NaiveDate,
    ) -> Result<RenderPayload, ScheduleError> {
        let (projects, segments) = self
            .filter
            .apply(self.history.projects(), self.history.segments());
        let request = TimelineRequest::new(view_start, view_end, today)
            .with_settings(self.settings)
            .with_selected(self.selected_ids.iter().cloned());
        assemble(&projects, &segments, &request)
    }

    pub fn undo(&mut self) -> HistoryOutcome {
        let outcome = self.history.undo();
        self.drop_stale_selection();
        outcome
    }

    pub fn redo(&mut self) -> HistoryOutcome {
        let outcome = self.history.redo();
        self.drop_stale_selection();
        outcome
    }

    fn drop_stale_selection(&mut self) {
        let stale = match &self.active_segment {
            Some(active) => SegmentEdit::for_segment(&self.history, active).is_none(),
            None => false,
        };
        if stale {
            self.active_segment = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::Progress;
    use crate::models::settings::GridMode;
    use crate::services::editor::apply_segment_edit;
    use crate::services::history::HistoryNotice;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> SessionState {
        let projects = vec![
            Project::new("0", "Riverside Warehouse", ymd(2025, 7, 1), ymd(2025, 10, 30))
                .with_owner("Sato")
                .with_progress(Progress::InProgress),
            Project::new("1", "North Bridge Repair", ymd(2025, 7, 1), ymd(2025, 11, 18))
                .with_owner("Ito"),
        ];
        let segments = projects.iter().map(Segment::primary_for).collect();
        SessionState::new(projects, segments)
    }

    #[test]
    fn test_render_applies_filter() {
        let mut state = session();
        state.filter.owners = vec!["Ito".to_string()];

        let payload = state
            .render(ymd(2025, 7, 1), ymd(2025, 12, 31), ymd(2025, 8, 1))
            .unwrap();
        assert_eq!(payload.rows.len(), 1);
        assert_eq!(payload.rows[0].project_id, "1");
    }

    #[test]
    fn test_render_uses_settings_and_selection() {
        let mut state = session();
        state.settings.grid_mode = GridMode::Day;
        state.selected_ids = vec!["0".to_string()];

        let payload = state
            .render(ymd(2025, 7, 1), ymd(2025, 7, 31), ymd(2025, 7, 15))
            .unwrap();
        assert_eq!(payload.grid_lines.len(), 31);
        assert_eq!(payload.rows[0].opacity, 1.0);
        assert_eq!(payload.rows[1].opacity, 0.7);
    }

    #[test]
    fn test_render_rejects_inverted_window() {
        let state = session();
        let err = state
            .render(ymd(2025, 12, 31), ymd(2025, 7, 1), ymd(2025, 8, 1))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange { .. }));
    }

    #[test]
    fn test_import_is_undoable() {
        let mut state = session();
        let before = state.history.current();
        let project = Project::new("0", "Imported", ymd(2026, 1, 1), ymd(2026, 3, 31));
        let segments = vec![Segment::primary_for(&project)];
        state.import(ImportResult {
            projects: vec![project],
            segments,
            skipped: 0,
        });
        assert_eq!(state.history.projects().len(), 1);

        assert!(state.undo().is_applied());
        assert_eq!(state.history.current(), before);
        assert_eq!(state.undo().notice(), Some(HistoryNotice::NothingToUndo));
    }

    #[test]
    fn test_undo_clears_vanished_active_segment() {
        let mut state = session();
        let mut segments = state.history.segments().to_vec();
        segments.push(Segment::new("0-roof", "0", "Roof", ymd(2025, 9, 1), ymd(2025, 9, 30)));
        let projects = state.history.projects().to_vec();
        state.history.apply_mutation(projects, segments);
        state.active_segment = Some("0-roof".to_string());

        state.undo();
        assert_eq!(state.active_segment, None);

        state.active_segment = Some("0-main".to_string());
        state.redo();
        assert_eq!(state.active_segment.as_deref(), Some("0-main"));
    }

    #[test]
    fn test_rendered_fallback_bar_can_be_edited() {
        let project = Project::new("0", "Riverside Warehouse", ymd(2025, 7, 1), ymd(2025, 10, 30));
        let mut state = SessionState::new(vec![project], Vec::new());

        let payload = state
            .render(ymd(2025, 7, 1), ymd(2025, 12, 31), ymd(2025, 8, 1))
            .unwrap();
        let bar_id = payload.rows[0].segment_id.clone();
        assert_eq!(bar_id, "0-main");

        let mut edit = SegmentEdit::for_segment(&state.history, &bar_id).unwrap();
        edit.end_date = ymd(2025, 11, 28);
        apply_segment_edit(&mut state.history, &edit).unwrap();

        let payload = state
            .render(ymd(2025, 7, 1), ymd(2025, 12, 31), ymd(2025, 8, 1))
            .unwrap();
        assert_eq!(payload.rows.len(), 1);
        assert_eq!(payload.rows[0].segment_id, "0-main");
        assert_eq!(payload.rows[0].end, ymd(2025, 11, 28));
    }
}
