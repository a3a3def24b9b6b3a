use crate::metrics::{MetricsCollector, RequestMetrics};
use async_trait::async_trait;
use mentionhub_core::{
    AnalysisApiError, AnalysisOperation, AnalysisResult, AppConfig, CoreError,
    InitialAnalysisRequest, KeywordAnalysis, MatchRequest,
};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// The two operations offered by the external analysis service.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze_initial(
        &self,
        name: &str,
        description: &str,
    ) -> Result<KeywordAnalysis, CoreError>;

    async fn match_posts(&self, request: &MatchRequest) -> Result<AnalysisResult, CoreError>;
}

#[derive(Debug)]
pub struct AnalysisApiClient {
    http_client: Client,
    base_url: String,
    timeout: Option<Duration>,
    metrics: Arc<MetricsCollector>,
}

impl AnalysisApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout,
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, T>(&self, operation: AnalysisOperation, body: &B) -> Result<T, CoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let endpoint = operation.endpoint();
        let url = format!("{}{}", self.base_url, endpoint);
        let start_time = Instant::now();

        info!("Calling analysis service: POST {}", endpoint);
        let result = self.execute(operation, &url, body).await;

        let status_code = match &result {
            Ok((status, _)) => Some(*status),
            Err(AnalysisApiError::RequestFailed { status_code, .. }) => Some(*status_code),
            Err(_) => None,
        };

        let parsed = result.and_then(|(_, bytes)| {
            serde_json::from_slice::<T>(&bytes).map_err(|e| {
                error!("Failed to parse response from {}: {}", endpoint, e);
                AnalysisApiError::InvalidResponse {
                    details: format!("{}: {}", endpoint, e),
                }
            })
        });

        let error_type = match &parsed {
            Ok(_) => None,
            Err(AnalysisApiError::RequestFailed { status_code, .. }) => {
                Some(format!("http_{}", status_code))
            }
            Err(AnalysisApiError::Transport { .. }) => Some("network_error".to_string()),
            Err(AnalysisApiError::Timeout { .. }) => Some("timeout".to_string()),
            Err(AnalysisApiError::InvalidResponse { .. }) => Some("invalid_response".to_string()),
        };

        let totals = self
            .metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                status_code,
                response_time: start_time.elapsed(),
                success: parsed.is_ok(),
                error_type,
            })
            .await;
        debug!("{} {}", endpoint, totals);

        parsed.map_err(CoreError::from)
    }

    async fn execute<B>(
        &self,
        operation: AnalysisOperation,
        url: &str,
        body: &B,
    ) -> Result<(u16, Vec<u8>), AnalysisApiError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;

        let status = response.status();
        debug!("Response status {} for {}", status, operation);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Request failed with status {} for {}: {}",
                status, operation, error_text
            );
            return Err(AnalysisApiError::RequestFailed {
                operation,
                status_code: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        Ok((status.as_u16(), bytes.to_vec()))
    }

    fn transport_error(&self, operation: AnalysisOperation, e: reqwest::Error) -> AnalysisApiError {
        error!("Network error for {}: {}", operation, e);
        match self.timeout {
            Some(timeout) if e.is_timeout() => AnalysisApiError::Timeout {
                operation,
                seconds: timeout.as_secs(),
            },
            _ => AnalysisApiError::Transport {
                operation,
                details: e.to_string(),
            },
        }
    }

    pub async fn get_metrics(&self) -> crate::metrics::ApiMetrics {
        self.metrics.get_metrics().await
    }
}

#[async_trait]
impl AnalysisService for AnalysisApiClient {
    async fn analyze_initial(
        &self,
        name: &str,
        description: &str,
    ) -> Result<KeywordAnalysis, CoreError> {
        let request = InitialAnalysisRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let analysis: KeywordAnalysis = self
            .post_json(AnalysisOperation::InitialAnalysis, &request)
            .await?;

        info!(
            "Initial analysis for '{}' returned {} keywords and {} subreddits",
            name,
            analysis.keywords.len(),
            analysis.subreddits.len()
        );
        Ok(analysis)
    }

    async fn match_posts(&self, request: &MatchRequest) -> Result<AnalysisResult, CoreError> {
        debug!(
            "Fetching mentions for keywords {:?} in subreddits {:?}",
            request.keywords, request.subreddits
        );
        let result: AnalysisResult = self
            .post_json(AnalysisOperation::MatchPosts, request)
            .await?;

        info!("Received {} matching posts", result.matching_posts.len());
        Ok(result)
    }
}
