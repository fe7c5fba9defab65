use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{CompletionRequest, MessagesRequest, MessagesResponse};
use crate::config::{AnthropicConfig, RequestConfig};
use crate::error::{CompletionError, CompletionResult};

/// Anything that can turn a message list into an answer.
///
/// Implementations make exactly one attempt per call; retries are not
/// part of the contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send the request and return the answer text.
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<String>;
}

/// Client for the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    request_config: RequestConfig,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(config: &AnthropicConfig, request_config: RequestConfig) -> CompletionResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = request_config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(CompletionError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            request_config,
        })
    }

    /// Send a single `POST /v1/messages` request
    pub async fn send_messages(
        &self,
        request: &MessagesRequest,
    ) -> CompletionResult<MessagesResponse> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling Anthropic messages endpoint"
        );

        let response = self
            .client
            .post(&url)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_ms: self.request_config.timeout_ms.unwrap_or_default(),
                    }
                } else {
                    CompletionError::Http(e)
                }
            })?;

        let status = response.status();

        // Only 200 carries an answer; any other status, 2xx included, is a rejection.
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let messages_response: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                })?;

        Ok(messages_response)
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<String> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: request.system,
            messages: request.messages,
        };

        let start = Instant::now();
        let result = self.send_messages(&body).await;
        let latency = start.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(
                    error = %e,
                    latency_ms = latency.as_millis(),
                    "Anthropic call failed"
                );
                return Err(e);
            }
        };

        info!(
            model = %self.model,
            latency_ms = latency.as_millis(),
            output_tokens = ?response.usage.as_ref().and_then(|u| u.output_tokens),
            "Anthropic call succeeded"
        );

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(CompletionError::InvalidResponse {
                message: "response contained no text content".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = AnthropicConfig::with_api_key("test_key");
        let client = AnthropicClient::new(&config, RequestConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = AnthropicConfig::with_api_key("k").with_base_url("http://localhost:1234/");
        let client = AnthropicClient::new(&config, RequestConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.model(), "claude-3-sonnet-20240229");
    }

    #[test]
    fn test_client_with_timeout() {
        let config = AnthropicConfig::with_api_key("k");
        let request_config = RequestConfig {
            timeout_ms: Some(500),
        };
        assert!(AnthropicClient::new(&config, request_config).is_ok());
    }
}
