//! SQLite storage implementation for RoboAdvisor.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `roboadvisor-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, portfolios, and notifications
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates are database-agnostic and work with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!     storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod notifications;
pub mod portfolios;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from roboadvisor-core for convenience
pub use roboadvisor_core::errors::{DatabaseError, Error, Result};
