//! Edit history for the projects and segments tables.
//!
//! [`EditHistoryManager`] owns the current tables and two bounded stacks of
//! [`Snapshot`]s. Every change goes through [`EditHistoryManager::apply_mutation`],
//! which snapshots the tables first, so every visible change can be undone.
//! Snapshots are owned copies; nothing hands out mutable access to them.

use std::collections::VecDeque;
use std::fmt;

use crate::models::project::Project;
use crate::models::segment::Segment;

/// Maximum number of snapshots kept on each stack.
pub const HISTORY_LIMIT: usize = 20;

/// A frozen copy of both tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub segments: Vec<Segment>,
}

/// Why an undo or redo did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryNotice {
    NothingToUndo,
    NothingToRedo,
}

impl fmt::Display for HistoryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryNotice::NothingToUndo => f.write_str("Nothing to undo"),
            HistoryNotice::NothingToRedo => f.write_str("Nothing to redo"),
        }
    }
}

/// Result of an undo or redo request. Running out of history is an
/// ordinary outcome of clicking the button twice, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Applied,
    Unavailable(HistoryNotice),
}

impl HistoryOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, HistoryOutcome::Applied)
    }

    /// The message to show the user, if any.
    pub fn notice(&self) -> Option<HistoryNotice> {
        match self {
            HistoryOutcome::Applied => None,
            HistoryOutcome::Unavailable(notice) => Some(*notice),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditHistoryManager {
    projects: Vec<Project>,
    segments: Vec<Segment>,
    /// Oldest at the front, most recent at the back
    history: VecDeque<Snapshot>,
    /// Next redo target at the front
    future: VecDeque<Snapshot>,
}

impl EditHistoryManager {
    pub fn new(projects: Vec<Project>, segments: Vec<Segment>) -> Self {
        Self {
            projects,
            segments,
            history: VecDeque::with_capacity(HISTORY_LIMIT + 1),
            future: VecDeque::with_capacity(HISTORY_LIMIT + 1),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Copy of the current tables.
    pub fn current(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.clone(),
            segments: self.segments.clone(),
        }
    }

    /// Record the current tables as an undo point and drop any redo states.
    pub fn push_snapshot(&mut self) {
        let snapshot = self.current();
        Self::push_back_bounded(&mut self.history, snapshot);
        if !self.future.is_empty() {
            log::debug!("Discarding {} redo state(s) after new edit", self.future.len());
        }
        self.future.clear();
    }

    /// Commit an edit, import or bulk replace as one undoable step.
    pub fn apply_mutation(&mut self, projects: Vec<Project>, segments: Vec<Segment>) {
        self.push_snapshot();
        self.projects = projects;
        self.segments = segments;
        log::debug!(
            "Applied mutation: {} project(s), {} segment(s), history depth {}",
            self.projects.len(),
            self.segments.len(),
            self.history.len()
        );
    }

    pub fn undo(&mut self) -> HistoryOutcome {
        let previous = match self.history.pop_back() {
            Some(snapshot) => snapshot,
            None => {
                log::warn!("{}", HistoryNotice::NothingToUndo);
                return HistoryOutcome::Unavailable(HistoryNotice::NothingToUndo);
            }
        };

        let current = self.take_current();
        Self::push_front_bounded(&mut self.future, current);
        self.restore(previous);
        log::info!(
            "Undo: {} undo / {} redo state(s) remaining",
            self.history.len(),
            self.future.len()
        );
        HistoryOutcome::Applied
    }

    pub fn redo(&mut self) -> HistoryOutcome {
        let next = match self.future.pop_front() {
            Some(snapshot) => snapshot,
            None => {
                log::warn!("{}", HistoryNotice::NothingToRedo);
                return HistoryOutcome::Unavailable(HistoryNotice::NothingToRedo);
            }
        };

        let current = self.take_current();
        Self::push_back_bounded(&mut self.history, current);
        self.restore(next);
        log::info!(
            "Redo: {} undo / {} redo state(s) remaining",
            self.history.len(),
            self.future.len()
        );
        HistoryOutcome::Applied
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Forget all undo and redo states, keeping the current tables.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.future.clear();
    }

    fn take_current(&mut self) -> Snapshot {
        Snapshot {
            projects: std::mem::take(&mut self.projects),
            segments: std::mem::take(&mut self.segments),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.projects = snapshot.projects;
        self.segments = snapshot.segments;
    }

    fn push_back_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot) {
        stack.push_back(snapshot);
        while stack.len() > HISTORY_LIMIT {
            stack.pop_front();
        }
    }

    fn push_front_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot) {
        stack.push_front(snapshot);
        stack.truncate(HISTORY_LIMIT);
    }
}
