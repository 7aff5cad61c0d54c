// Module exports for models

pub mod project;
pub mod segment;
pub mod settings;
pub mod timeline;
