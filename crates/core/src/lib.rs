//! RoboAdvisor Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for RoboAdvisor.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod admin;
pub mod allocation;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod notifications;
pub mod portfolios;
pub mod quotes;
pub mod reports;
pub mod users;
pub mod valuation;

// Re-export common types from the portfolio module
pub use portfolios::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
