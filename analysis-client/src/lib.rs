pub mod api;
pub mod metrics;


pub use api::{AnalysisApiClient, AnalysisService};
pub use metrics::{ApiMetrics, EndpointMetrics, MetricsCollector};
