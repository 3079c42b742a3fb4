//! Allocation policy module.
//!
//! Maps a risk/goal profile plus a capital amount to a concrete, priced
//! asset list. This is a leaf component: its only collaborator is the quote
//! service, and it has no side effects beyond read-only quote fetches.

mod allocation_model;
mod allocation_service;

pub use allocation_model::{AllocationError, AllocationRequest};
pub use allocation_service::{AllocationService, AllocationServiceTrait};
