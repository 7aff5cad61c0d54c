// Settings module
// Display options and the persisted application configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zoom level of the timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    Week,
    Month,
    Quarter,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::Month
    }
}

/// Spacing between major axis ticks, handed to the chart as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "every", rename_all = "lowercase")]
pub enum TickSpacing {
    Days(u32),
    Months(u32),
}

impl Zoom {
    pub fn tick_spacing(&self) -> TickSpacing {
        match self {
            Zoom::Week => TickSpacing::Days(7),
            Zoom::Month => TickSpacing::Months(1),
            Zoom::Quarter => TickSpacing::Months(3),
        }
    }
}

/// Which background grid lines the chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    Week,
    Day,
}

impl Default for GridMode {
    fn default() -> Self {
        Self::Week
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub zoom: Zoom,
    pub grid_mode: GridMode,
    /// Whether the caller should overlay a marker on the current date
    pub show_today: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            zoom: Zoom::Month,
            grid_mode: GridMode::Week,
            show_today: true,
        }
    }
}

/// Visible span shown when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap_or_default(),
        }
    }
}

/// Configuration file contents (`config.toml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplaySettings,
    pub view: ViewWindow,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.view.end < self.view.start {
            return Err(format!(
                "View window end {} is before its start {}",
                self.view.end, self.view.start
            ));
        }
        Ok(())
    }
}
