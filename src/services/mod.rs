// Service module exports
// Layout calculations, edit history and the session around them

pub mod business_days;
pub mod clip;
pub mod editor;
pub mod filter;
pub mod grid;
pub mod history;
pub mod io;
pub mod session;
pub mod settings;
pub mod timeline;
