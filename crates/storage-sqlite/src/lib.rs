//! SQLite storage implementation for Goalpost.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `goalpost-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals and log entries
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!   core (domain)
//!        │
//!        ▼
//!   storage-sqlite (this crate)
//!        │
//!        ▼
//!    SQLite DB
//! ```
//!
//! All writes go through a single writer task ([`WriteHandle`]), which runs
//! each job in an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;
pub mod log_entries;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from goalpost-core for convenience
pub use goalpost_core::errors::{DatabaseError, Error, Result};
