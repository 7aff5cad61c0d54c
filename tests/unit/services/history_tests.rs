// Unit tests for the bounded undo/redo history
// Exercises the public EditHistoryManager API with multi-step edit sequences

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_case::test_case;

use site_gantt::models::project::Project;
use site_gantt::models::segment::Segment;
use site_gantt::services::history::{
    EditHistoryManager, HistoryNotice, HistoryOutcome, HISTORY_LIMIT,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Tables whose single project is named after `version`.
fn tables(version: usize) -> (Vec<Project>, Vec<Segment>) {
    let project = Project::new(
        "0",
        format!("Warehouse v{}", version),
        ymd(2025, 7, 1),
        ymd(2025, 10, 30),
    );
    let segments = vec![Segment::primary_for(&project)];
    (vec![project], segments)
}

fn manager_after(edits: usize) -> EditHistoryManager {
    let (projects, segments) = tables(0);
    let mut manager = EditHistoryManager::new(projects, segments);
    for version in 1..=edits {
        let (projects, segments) = tables(version);
        manager.apply_mutation(projects, segments);
    }
    manager
}

fn name(manager: &EditHistoryManager) -> &str {
    &manager.projects()[0].name
}

#[test_case(0, 0 ; "no edits")]
#[test_case(1, 1 ; "one edit")]
#[test_case(20, 20 ; "exactly at the limit")]
#[test_case(21, 20 ; "one past the limit")]
#[test_case(50, 20 ; "far past the limit")]
fn test_history_depth_is_bounded(edits: usize, expected: usize) {
    assert_eq!(manager_after(edits).history_len(), expected);
}

#[test]
fn test_undo_all_the_way_back() {
    let mut manager = manager_after(5);
    for version in (0..5).rev() {
        assert_eq!(manager.undo(), HistoryOutcome::Applied);
        assert_eq!(name(&manager), format!("Warehouse v{}", version));
    }
    assert_eq!(
        manager.undo(),
        HistoryOutcome::Unavailable(HistoryNotice::NothingToUndo)
    );
    assert_eq!(name(&manager), "Warehouse v0");
    assert_eq!(manager.future_len(), 5);
}

#[test]
fn test_oldest_state_is_evicted() {
    let mut manager = manager_after(HISTORY_LIMIT + 1);
    while manager.undo().is_applied() {}
    // v0 fell off the bottom of the stack
    assert_eq!(name(&manager), "Warehouse v1");
}

#[test]
fn test_redo_after_partial_undo() {
    let mut manager = manager_after(3);
    manager.undo();
    manager.undo();
    assert_eq!(name(&manager), "Warehouse v1");

    assert!(manager.redo().is_applied());
    assert_eq!(name(&manager), "Warehouse v2");
    assert!(manager.redo().is_applied());
    assert_eq!(name(&manager), "Warehouse v3");
    assert_eq!(manager.redo().notice(), Some(HistoryNotice::NothingToRedo));
}

#[test]
fn test_new_edit_discards_redo_branch() {
    let mut manager = manager_after(3);
    manager.undo();
    manager.undo();
    assert!(manager.can_redo());

    let (projects, segments) = tables(99);
    manager.apply_mutation(projects, segments);
    assert!(!manager.can_redo());
    assert_eq!(manager.redo().notice(), Some(HistoryNotice::NothingToRedo));

    manager.undo();
    assert_eq!(name(&manager), "Warehouse v1");
}

#[test]
fn test_notices_render_as_messages() {
    assert_eq!(HistoryNotice::NothingToUndo.to_string(), "Nothing to undo");
    assert_eq!(HistoryNotice::NothingToRedo.to_string(), "Nothing to redo");
}

#[test]
fn test_clear_history_keeps_current_tables() {
    let mut manager = manager_after(4);
    manager.undo();
    manager.clear_history();

    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(name(&manager), "Warehouse v3");
}

#[test]
fn test_snapshot_is_detached_from_current() {
    let mut manager = manager_after(1);
    let snapshot = manager.current();
    let (projects, segments) = tables(2);
    manager.apply_mutation(projects, segments);

    assert_eq!(snapshot.projects[0].name, "Warehouse v1");
    assert_eq!(name(&manager), "Warehouse v2");
}

#[test]
fn test_twenty_edits_undo_back_to_start() {
    let mut manager = manager_after(HISTORY_LIMIT);
    for _ in 0..HISTORY_LIMIT {
        assert!(manager.undo().is_applied());
    }
    assert_eq!(name(&manager), "Warehouse v0");
    assert_eq!(manager.undo().notice(), Some(HistoryNotice::NothingToUndo));
    assert_eq!(manager.future_len(), HISTORY_LIMIT);
}
