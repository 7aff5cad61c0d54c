// Test fixtures - reusable schedule data
// Provides consistent projects and segments across the test files

#![allow(dead_code)]

use chrono::NaiveDate;
use site_gantt::models::project::{Progress, Project};
use site_gantt::models::segment::Segment;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Sample view windows
pub mod windows {
    use super::*;

    /// The default fiscal-year window, Jul 2025 - Jun 2026
    pub fn fiscal_2025() -> (NaiveDate, NaiveDate) {
        (ymd(2025, 7, 1), ymd(2026, 6, 30))
    }

    /// A single quarter, Jul - Sep 2025
    pub fn q3_2025() -> (NaiveDate, NaiveDate) {
        (ymd(2025, 7, 1), ymd(2025, 9, 30))
    }
}

/// Sample projects
pub mod projects {
    use super::*;

    pub fn warehouse() -> Project {
        Project::new("0", "Riverside Warehouse", ymd(2025, 7, 1), ymd(2025, 10, 30))
            .with_client("Kanda Logistics")
            .with_site("Koto")
            .with_work_type("Building")
            .with_owner("Sato")
            .with_progress(Progress::InProgress)
    }

    pub fn reservoir() -> Project {
        Project::new("1", "Water Reservoir", ymd(2025, 9, 1), ymd(2026, 1, 15))
            .with_client("Tama Water Bureau")
            .with_site("Hachioji")
            .with_work_type("Civil")
            .with_owner("Ito")
            .with_progress(Progress::Planned)
            .with_color("#3b82f6")
    }

    pub fn bridge() -> Project {
        Project::new("2", "North Bridge Repair", ymd(2025, 5, 12), ymd(2025, 8, 29))
            .with_client("City of Tama")
            .with_site("Tama")
            .with_work_type("Civil")
            .with_owner("Sato")
            .with_progress(Progress::Done)
            .with_note("Handed over early")
    }

    pub fn all() -> Vec<Project> {
        vec![warehouse(), reservoir(), bridge()]
    }
}

/// Sample segments: the warehouse is split into phases, the others use
/// their primary segment.
pub mod segments {
    use super::*;

    pub fn all() -> Vec<Segment> {
        vec![
            Segment::new("0-foundation", "0", "Foundation", ymd(2025, 7, 1), ymd(2025, 7, 31)),
            Segment::new("0-frame", "0", "Steel frame", ymd(2025, 8, 1), ymd(2025, 9, 15)),
            Segment::new("0-finish", "0", "Finishing", ymd(2025, 9, 16), ymd(2025, 10, 30)),
            Segment::primary_for(&projects::reservoir()),
            Segment::primary_for(&projects::bridge()),
        ]
    }
}

/// A projects table as it arrives from the office spreadsheet.
pub const SAMPLE_CSV: &str = "\
name,client,site,work_type,owner,progress,start_date,end_date
Riverside Warehouse,Kanda Logistics,Koto,Building,Sato,進行,2025-07-01,2025-10-30
Water Reservoir,Tama Water Bureau,Hachioji,Civil,Ito,予定,2025-09-01,2026-01-15
North Bridge Repair,City of Tama,Tama,Civil,Sato,完了,2025-05-12,2025-08-29
";
