//! Project model.
//!
//! A project is one construction contract on the schedule: who it is for,
//! where it happens, who runs it, and its overall calendar span.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress of a project through its contract lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Progress {
    Planned,
    InProgress,
    Done,
}

impl Progress {
    pub const ALL: [Progress; 3] = [Progress::Planned, Progress::InProgress, Progress::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::Planned => "Planned",
            Progress::InProgress => "InProgress",
            Progress::Done => "Done",
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::Planned
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Progress {
    type Err = String;

    /// Accepts the canonical names, common spreadsheet spellings, and the
    /// Japanese status words used on site sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "planned" | "notstarted" | "scheduled" | "予定" => Ok(Progress::Planned),
            "inprogress" | "active" | "started" | "進行" | "進行中" => Ok(Progress::InProgress),
            "done" | "finished" | "complete" | "completed" | "完了" => Ok(Progress::Done),
            _ => Err(format!("Unknown progress value: '{}'", s.trim())),
        }
    }
}

/// A construction project shown as one group of rows on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique for the lifetime of the session
    pub id: String,
    pub name: String,
    pub client: String,
    pub site: String,
    pub work_type: String,
    pub owner: String,
    pub progress: Progress,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    /// Hex bar color; blank or missing falls back to the default at render time
    #[serde(default)]
    pub color: Option<String>,
}

impl Project {
    /// Create a project with empty descriptive fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: String::new(),
            site: String::new(),
            work_type: String::new(),
            owner: String::new(),
            progress: Progress::default(),
            start_date,
            end_date,
            note: None,
            color: None,
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_work_type(mut self, work_type: impl Into<String>) -> Self {
        self.work_type = work_type.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Validate the fields an editor is responsible for.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Project id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Project name cannot be empty".to_string());
        }

        if self.end_date < self.start_date {
            return Err("Project end date must not be before its start date".to_string());
        }

        if let Some(color) = self.color.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// True when `needle` occurs in the name, client, site or owner (case-insensitive).
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.name, &self.client, &self.site, &self.owner]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
