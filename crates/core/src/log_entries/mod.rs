//! Log entries module - progress history models and repository trait.

mod log_entries_model;
mod log_entries_traits;

pub use log_entries_model::{
    parse_decimal_field, LogEntry, LogProgressInput, ProgressLogged, ValidatedLogInput,
};
pub use log_entries_traits::LogEntryRepositoryTrait;
