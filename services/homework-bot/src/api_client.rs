//! Homework review API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::PracticumConfig;
use crate::error::FetchError;
use crate::io::HttpClient;
use crate::state::Watermark;

/// Source of homework status updates
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch all status changes since `since`; the body is returned undecoded
    /// into domain types so the validator can check its shape.
    async fn fetch(&self, since: Watermark) -> Result<Value, FetchError>;

    /// Where the statuses come from, for logging
    fn endpoint(&self) -> &str;
}

/// Client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, since: Watermark) -> Result<Value, FetchError> {
        let from_date = since.as_secs().to_string();
        let headers = [("Authorization", self.authorization.as_str())];
        let query = [("from_date", from_date.as_str())];

        let response = self
            .http
            .get(&self.endpoint, &headers, &query)
            .await
            .map_err(|e| {
                tracing::error!("API at {} is not responding: {}", self.endpoint, e);
                FetchError::Transport(e.to_string())
            })?;

        if response.status != 200 {
            tracing::error!(
                "Unexpected status {} when requesting {}",
                response.status,
                self.endpoint
            );
            return Err(FetchError::UnexpectedStatus(response.status));
        }

        serde_json::from_str::<Value>(&response.body).map_err(|e| {
            tracing::error!("Response from {} is not valid JSON: {}", self.endpoint, e);
            FetchError::Malformed(e.to_string())
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
