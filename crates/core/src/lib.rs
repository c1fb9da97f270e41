//! Goalpost Core - Domain entities, services, and traits.
//!
//! This crate contains the goal tracking business logic: the progress
//! engine, the goal transition function and the services built on them.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod goals;
pub mod log_entries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
