// Project filtering
// Keyword and attribute filters applied before the timeline is assembled

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::project::{Progress, Project};
use crate::models::segment::Segment;

/// Filters picked in the sidebar. Empty lists and an empty search mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilter {
    /// Case-insensitive match against name, client, site and owner
    pub search: String,
    pub work_types: Vec<String>,
    pub progresses: Vec<Progress>,
    pub owners: Vec<String>,
}

impl ProjectFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.work_types.is_empty()
            && self.progresses.is_empty()
            && self.owners.is_empty()
    }

    pub fn matches(&self, project: &Project) -> bool {
        let search = self.search.trim();
        if !search.is_empty() && !project.matches_search(search) {
            return false;
        }
        if !self.work_types.is_empty() && !self.work_types.contains(&project.work_type) {
            return false;
        }
        if !self.progresses.is_empty() && !self.progresses.contains(&project.progress) {
            return false;
        }
        if !self.owners.is_empty() && !self.owners.contains(&project.owner) {
            return false;
        }
        true
    }

    /// Filtered copies of both tables; segments follow their project.
    pub fn apply(&self, projects: &[Project], segments: &[Segment]) -> (Vec<Project>, Vec<Segment>) {
        let kept: Vec<Project> = projects
            .iter()
            .filter(|project| self.matches(project))
            .cloned()
            .collect();
        let kept_ids: HashSet<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        let kept_segments = segments
            .iter()
            .filter(|segment| kept_ids.contains(segment.project_id.as_str()))
            .cloned()
            .collect();

        log::debug!("Filter kept {} of {} project(s)", kept.len(), projects.len());
        (kept, kept_segments)
    }
}

/// Distinct work types, sorted, for the filter picker.
pub fn work_type_options(projects: &[Project]) -> Vec<String> {
    distinct(projects.iter().map(|p| p.work_type.as_str()))
}

/// Distinct owners, sorted, for the filter picker.
pub fn owner_options(projects: &[Project]) -> Vec<String> {
    distinct(projects.iter().map(|p| p.owner.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
