use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time: Duration,
    pub last_request_time: Option<SystemTime>,
    pub requests_by_endpoint: HashMap<String, EndpointMetrics>,
}

impl ApiMetrics {
    /// One line per endpoint, sorted by path, after an overall total.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{} requests ({} ok, {} failed), avg {:?}",
            self.total_requests,
            self.successful_requests,
            self.failed_requests,
            self.average_response_time
        )];

        let mut endpoints: Vec<_> = self.requests_by_endpoint.iter().collect();
        endpoints.sort_by(|a, b| a.0.cmp(b.0));
        for (endpoint, metrics) in endpoints {
            lines.push(format!("  {} {}", endpoint, metrics));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointMetrics {
    pub request_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub total_response_time: Duration,
    pub min_response_time: Duration,
    pub max_response_time: Duration,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RequestMetrics {
    pub endpoint: String,
    pub status_code: Option<u16>,
    pub response_time: Duration,
    pub success: bool,
    pub error_type: Option<String>,
}

impl EndpointMetrics {
    fn new() -> Self {
        Self {
            request_count: 0,
            success_count: 0,
            error_count: 0,
            total_response_time: Duration::ZERO,
            min_response_time: Duration::MAX,
            max_response_time: Duration::ZERO,
            last_error: None,
        }
    }

    fn update(&mut self, metrics: &RequestMetrics) {
        self.request_count += 1;
        self.total_response_time += metrics.response_time;
        self.min_response_time = self.min_response_time.min(metrics.response_time);
        self.max_response_time = self.max_response_time.max(metrics.response_time);

        if metrics.success {
            self.success_count += 1;
        } else {
            self.error_count += 1;
            self.last_error = metrics.error_type.clone();
        }
    }

    pub fn average_response_time(&self) -> Duration {
        if self.request_count == 0 {
            Duration::ZERO
        } else {
            self.total_response_time / self.request_count as u32
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.request_count as f64
        }
    }
}

impl fmt::Display for EndpointMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests, {:.0}% ok, avg {:?}, max {:?}",
            self.request_count,
            self.success_rate() * 100.0,
            self.average_response_time(),
            self.max_response_time
        )?;
        if let Some(error) = &self.last_error {
            write!(f, ", last error {}", error)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<ApiMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one request and returns the endpoint's updated totals.
    pub async fn record_request(&self, request_metrics: RequestMetrics) -> EndpointMetrics {
        let mut metrics = self.metrics.write().await;

        metrics.total_requests += 1;
        metrics.last_request_time = Some(SystemTime::now());

        if request_metrics.success {
            metrics.successful_requests += 1;
        } else {
            metrics.failed_requests += 1;
        }

        // Running average over all requests
        let total_time = metrics.average_response_time * (metrics.total_requests - 1) as u32
            + request_metrics.response_time;
        metrics.average_response_time = total_time / metrics.total_requests as u32;

        let endpoint = metrics
            .requests_by_endpoint
            .entry(request_metrics.endpoint.clone())
            .or_insert_with(EndpointMetrics::new);
        endpoint.update(&request_metrics);
        endpoint.clone()
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(endpoint: &str, millis: u64, success: bool) -> RequestMetrics {
        RequestMetrics {
            endpoint: endpoint.to_string(),
            status_code: Some(if success { 200 } else { 500 }),
            response_time: Duration::from_millis(millis),
            success,
            error_type: (!success).then(|| "http_500".to_string()),
        }
    }

    #[tokio::test]
    async fn test_record_request_updates_totals() {
        let collector = MetricsCollector::new();
        collector.record_request(request("/analyze/initial", 100, true)).await;
        collector.record_request(request("/analyze/initial", 300, false)).await;
        collector.record_request(request("/analyze/reddit", 200, true)).await;

        let metrics = collector.get_metrics().await;
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.successful_requests, 2);
        assert_eq!(metrics.failed_requests, 1);
        assert_eq!(metrics.average_response_time, Duration::from_millis(200));
        assert!(metrics.last_request_time.is_some());
    }

    #[tokio::test]
    async fn test_record_request_returns_endpoint_totals() {
        let collector = MetricsCollector::new();
        let first = collector.record_request(request("/analyze/reddit", 100, true)).await;
        assert_eq!(first.request_count, 1);
        assert!(first.last_error.is_none());

        let endpoint = collector.record_request(request("/analyze/reddit", 300, false)).await;
        assert_eq!(endpoint.request_count, 2);
        assert_eq!(endpoint.min_response_time, Duration::from_millis(100));
        assert_eq!(endpoint.max_response_time, Duration::from_millis(300));
        assert_eq!(endpoint.average_response_time(), Duration::from_millis(200));
        assert_eq!(endpoint.success_rate(), 0.5);
        assert_eq!(endpoint.last_error.as_deref(), Some("http_500"));

        let line = endpoint.to_string();
        assert!(line.starts_with("2 requests, 50% ok"));
        assert!(line.ends_with("last error http_500"));
    }

    #[tokio::test]
    async fn test_summary_lists_endpoints_in_order() {
        let collector = MetricsCollector::new();
        collector.record_request(request("/analyze/reddit", 200, true)).await;
        collector.record_request(request("/analyze/initial", 100, false)).await;

        let summary = collector.get_metrics().await.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("2 requests (1 ok, 1 failed)"));
        assert!(lines[1].trim_start().starts_with("/analyze/initial 1 requests, 0% ok"));
        assert!(lines[2].trim_start().starts_with("/analyze/reddit 1 requests, 100% ok"));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            ApiMetrics::default().summary(),
            "0 requests (0 ok, 0 failed), avg 0ns"
        );
    }
}
