//! Reports module - plain-text portfolio summaries.

mod report_service;

pub use report_service::{ReportService, ReportServiceTrait};
