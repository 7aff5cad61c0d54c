// Site Gantt Library
// Timeline layout and edit history for construction project schedules

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::ScheduleError;
pub use services::history::{EditHistoryManager, HistoryNotice, HistoryOutcome};
pub use services::session::SessionState;
pub use services::timeline::{assemble, TimelineRequest};
