//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{ChatModel, GenerateRequest, GenerateResponse},
};

use super::mapper::{from_chat_response, to_chat_request};
use super::types::{ApiErrorEnvelope, ChatCompletionResponse};

/// Client for a hosted chat completions API (Groq, OpenAI, OpenRouter, ...)
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL, e.g. `https://api.groq.com/openai/v1`
    api_base: String,
    /// Bearer key
    api_key: String,
    /// Model to use
    model: ChatModel,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// No request is made here; a missing or wrong key only shows up on the
    /// first completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_base: String, api_key: String, model: ChatModel) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base,
            api_key,
            model,
        })
    }

    /// Build the endpoint URL for completions
    fn build_endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let chat_request = to_chat_request(request, &self.model);
        let url = self.build_endpoint_url();

        debug!(model = self.model.as_str(), url = %url, "Sending chat completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, retry_after, body));
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        let generated = from_chat_response(completion)?;

        debug!(
            finish_reason = ?generated.finish_reason,
            usage = ?generated.usage,
            "Chat completion finished"
        );
        Ok(generated)
    }
}

/// Classify a non-2xx response
fn error_for_status(status: StatusCode, retry_after: Option<Duration>, body: String) -> LlmError {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(&body).ok();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(
            envelope.map(|e| e.error.message).unwrap_or(body),
        ),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { retry_after },
        StatusCode::BAD_REQUEST => {
            LlmError::BadRequest(envelope.map(|e| e.error.message).unwrap_or(body))
        }
        _ => match envelope {
            Some(envelope) => LlmError::Api {
                code: envelope
                    .error
                    .code
                    .or(envelope.error.kind)
                    .unwrap_or_else(|| status.as_u16().to_string()),
                message: envelope.error.message,
            },
            None => LlmError::Status {
                status: status.as_u16(),
                body,
            },
        },
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_ignores_trailing_slash() {
        let client = OpenAiClient::new(
            "https://api.groq.com/openai/v1/".to_string(),
            "key".to_string(),
            ChatModel::default(),
        )
        .unwrap();

        assert_eq!(
            client.build_endpoint_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_unauthorized_maps_to_authentication_error() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = error_for_status(StatusCode::UNAUTHORIZED, None, body.to_string());
        match err {
            LlmError::Unauthorized(message) => assert_eq!(message, "Invalid API Key"),
            other => panic!("Expected authentication error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let err = error_for_status(
            StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(3)),
            String::new(),
        );
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after: Some(d)
            } if d == Duration::from_secs(3)
        ));
    }

    #[test]
    fn test_server_error_without_envelope() {
        let err = error_for_status(
            StatusCode::BAD_GATEWAY,
            None,
            "<html>bad gateway</html>".to_string(),
        );
        assert!(matches!(err, LlmError::Status { status: 502, .. }));
    }

    #[test]
    fn test_server_error_with_envelope() {
        let body = r#"{"error":{"message":"overloaded","type":"server_error"}}"#;
        let err = error_for_status(StatusCode::SERVICE_UNAVAILABLE, None, body.to_string());
        match err {
            LlmError::Api { code, message } => {
                assert_eq!(code, "server_error");
                assert_eq!(message, "overloaded");
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }
}
