// Configuration persistence

mod service;

pub use service::ConfigService;
