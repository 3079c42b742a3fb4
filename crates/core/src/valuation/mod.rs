//! Portfolio valuation and notification job.
//!
//! A recurring maintenance pass that re-fetches every stored asset's price,
//! recomputes portfolio totals, and raises threshold-based alerts. The
//! scheduler in the server binary invokes it on a fixed interval; it can
//! also be run on demand.

mod valuation_model;
mod valuation_service;

#[cfg(test)]
mod valuation_service_tests;

pub use valuation_model::ValuationCycleSummary;
pub use valuation_service::{ValuationService, ValuationServiceTrait};
