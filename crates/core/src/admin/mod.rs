//! Admin module - aggregate analytics for administrators.
//!
//! Account management operations (list, promote, deactivate, delete) live on
//! the user service; this module only owns the aggregate counters.

mod admin_model;
mod admin_service;

pub use admin_model::AdminAnalytics;
pub use admin_service::{AdminService, AdminServiceTrait};
