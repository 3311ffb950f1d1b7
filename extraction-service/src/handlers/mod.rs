//! HTTP handlers for the extraction service.

pub mod extract;
pub mod health;
pub mod metrics;

pub use extract::{extract_document, extract_preflight, FILE_FIELD};
pub use health::{health_check, readiness_check, service_info};
pub use metrics::metrics_endpoint;
