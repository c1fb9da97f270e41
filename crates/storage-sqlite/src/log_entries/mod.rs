//! SQLite storage implementation for log entries.

mod model;
mod repository;

pub use model::LogEntryDB;
pub use repository::LogEntryRepository;
