use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{GeminiSettings, RetrySettings};
use crate::error::{BridgeError, is_retryable_status};
use crate::planner::GenerationRequest;

/// Status and body exactly as the provider returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound side of the bridge: one generation call per `send`.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn send(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, BridgeError>;
}

pub type DynGenerationClient = dyn GenerationClient;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
    user_agent: String,
    retry: RetrySettings,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings, retry: &RetrySettings) -> Result<Self> {
        let base_url = settings.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("Base URL cannot be empty"));
        }

        let timeout = Duration::from_secs(settings.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Gemini HTTP client")?;

        Ok(Self {
            http,
            base_url,
            model: settings.model.trim().to_string(),
            api_key: settings.api_key.trim().to_string(),
            user_agent: settings.user_agent.clone(),
            retry: retry.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn attempt(&self, body: &GenerateContentRequest<'_>) -> Result<RawResponse, BridgeError> {
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("User-Agent", &self.user_agent)
            .json(body)
            .send()
            .await
            .map_err(BridgeError::transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(BridgeError::transport)?;
        Ok(RawResponse { status, body })
    }

    fn backoff(&self, retry_number: u32) -> Duration {
        let exponent = retry_number.saturating_sub(1).min(16);
        let base = self
            .retry
            .initial_backoff_ms
            .saturating_mul(1u64 << exponent);
        let jitter = if self.retry.max_jitter_ms > 0 {
            rand::rng().random_range(0..=self.retry.max_jitter_ms)
        } else {
            0
        };
        Duration::from_millis(base.saturating_add(jitter))
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn send(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, BridgeError> {
        if self.api_key.is_empty() {
            return Err(BridgeError::missing_api_key());
        }

        let body = GenerateContentRequest::from(request);
        let max_attempts = self.retry.max_attempts.max(1);
        debug!(model = %self.model, max_attempts, "send: calling generateContent");

        let mut attempt = 1;
        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => return Err(BridgeError::Cancelled),
                result = self.attempt(&body) => result,
            };

            let retryable = match &result {
                Ok(response) => is_retryable_status(response.status),
                Err(err) => err.is_transient(),
            };
            if !retryable || attempt >= max_attempts {
                if let Ok(response) = &result {
                    debug!(status = response.status, attempt, "send: response received");
                }
                return result;
            }

            let delay = self.backoff(attempt);
            match &result {
                Ok(response) => warn!(
                    attempt,
                    status = response.status,
                    backoff_ms = delay.as_millis() as u64,
                    "send: retrying after retryable status"
                ),
                Err(err) => warn!(
                    attempt,
                    error = %err,
                    backoff_ms = delay.as_millis() as u64,
                    "send: retrying after transport error"
                ),
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(BridgeError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: &request.prompt_text,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }
}
