use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::config::analysis_conf::AnalysisConfig;
use crate::dto::report_dto::ProductionDigest;
use crate::util::error::ServiceError;

/// Payload forwarded to the analysis endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest<'a> {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub instructions: Option<&'a str>,
    pub digest: &'a ProductionDigest,
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Returns the analysis text for `request`.
    async fn summarize(&self, request: &AnalysisRequest<'_>) -> Result<String, ServiceError>;
}

pub struct HttpAnalysisClient {
    client: reqwest::Client,
    config: AnalysisConfig,
}

impl HttpAnalysisClient {
    pub fn new(config: AnalysisConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::InternalError(format!("Failed to build analysis client: {}", e)))?;
        Ok(HttpAnalysisClient { client, config })
    }
}

/// Accepts `{"summary": ..}`, `{"text": ..}`, `{"output": ..}` or plain text.
pub fn extract_summary(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["summary", "text", "output", "result"]
            .iter()
            .find_map(|key| value[*key].as_str())
            .map(str::to_string)
            .or_else(|| value.as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    #[instrument(skip(self, request))]
    async fn summarize(&self, request: &AnalysisRequest<'_>) -> Result<String, ServiceError> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| ServiceError::Unavailable("analysis endpoint is not configured".to_string()))?;

        let mut call = self.client.post(url).json(request);
        if let Some(ref key) = self.config.api_key {
            call = call.bearer_auth(key);
        }
        let response = call.send().await.map_err(|e| {
            error!("Analysis request failed: {}", e);
            ServiceError::InternalError(format!("analysis request failed: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(%status, "Failed to read analysis response: {}", e);
            ServiceError::InternalError(format!("failed to read analysis response: {}", e))
        })?;
        if !status.is_success() {
            error!(%status, "Analysis endpoint returned an error");
            return Err(ServiceError::InternalError(format!("analysis endpoint returned {}: {}", status, body)));
        }
        info!(bytes = body.len(), "Analysis received");
        Ok(extract_summary(&body))
    }
}
