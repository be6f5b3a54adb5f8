//! HTTP client for the Hunyuan ChatCompletions endpoint.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::TencentAuth;
use crate::models::ChatMessage;
use crate::models::ChatRequest;
use crate::models::ChatResponse;

pub const API_ENDPOINT: &str = "https://hunyuan.tencentcloudapi.com";
pub const API_HOST: &str = "hunyuan.tencentcloudapi.com";
pub const SERVICE: &str = "hunyuan";
pub const API_VERSION: &str = "2023-09-01";
pub const REGION: &str = "ap-guangzhou";
pub const ACTION_CHAT_COMPLETIONS: &str = "ChatCompletions";
pub const DEFAULT_MODEL: &str = "hunyuan-standard";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Current Unix time in seconds, the default signing clock.
fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[derive(Debug, Error)]
pub enum HunyuanError {
    /// The provider accepted the request and reported an application error.
    #[error("Hunyuan API error: {code} - {message}")]
    Provider { code: String, message: String },

    /// The request never produced a provider response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse API response: {0}")]
    BadResponse(#[from] serde_json::Error),

    #[error("failed to sign request: {0}")]
    Signing(#[from] anyhow::Error),
}

/// Client for the Hunyuan chat-completion API.
///
/// The signing timestamp comes from an injectable clock so the whole
/// request, signature included, is reproducible under test.
pub struct HunyuanClient {
    client: Client,
    auth: TencentAuth,
    endpoint: String,
    host: String,
    model: String,
    clock: fn() -> i64,
}

impl HunyuanClient {
    pub fn new(secret_id: String, secret_key: String) -> Result<Self, HunyuanError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            auth: TencentAuth::new(secret_id, secret_key),
            endpoint: API_ENDPOINT.to_string(),
            host: API_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            clock: unix_now,
        })
    }

    /// Point the client at a different endpoint (tests, mock servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the wall clock used for signing timestamps.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Send a single user utterance through `ChatCompletions`.
    ///
    /// One best-effort attempt: the caller decides whether to resubmit.
    pub async fn chat(&self, message: &str) -> Result<ChatResponse, HunyuanError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(message)],
        };
        self.call_api(ACTION_CHAT_COMPLETIONS, &request).await
    }

    async fn call_api(
        &self,
        action: &str,
        body: &ChatRequest,
    ) -> Result<ChatResponse, HunyuanError> {
        let timestamp = (self.clock)();
        let payload = serde_json::to_string(body)?;

        let mut headers =
            self.auth
                .sign_request(&self.host, SERVICE, API_VERSION, REGION, &payload, timestamp)?;
        headers.insert("X-TC-Action".to_string(), action.to_string());

        let mut request = self.client.post(&self.endpoint).body(payload);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let text = response.text().await?;

        debug!("API response: {text}");

        let json_response: serde_json::Value = serde_json::from_str(&text)?;
        let envelope = json_response
            .get("Response")
            .unwrap_or(&json_response)
            .clone();

        if let Some(error) = envelope.get("Error") {
            let code = error
                .get("Code")
                .and_then(|c| c.as_str())
                .unwrap_or("Unknown")
                .to_string();
            let message = error
                .get("Message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            warn!("Hunyuan reported an error: {code}");
            return Err(HunyuanError::Provider { code, message });
        }

        Ok(serde_json::from_value(envelope)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::body_string_contains;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path;

    fn fixed_clock() -> i64 {
        1609459200
    }

    fn client(endpoint: &str) -> HunyuanClient {
        HunyuanClient::new("test_id".to_string(), "test_key".to_string())
            .unwrap()
            .with_endpoint(endpoint)
            .with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn chat_unwraps_the_response_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("X-TC-Action", "ChatCompletions"))
            .and(header("X-TC-Timestamp", "1609459200"))
            .and(body_string_contains(r#""Content":"hello""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": {
                    "Choices": [{"Message": {"Role": "assistant", "Content": "hi there"}}],
                    "RequestId": "req-42"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri()).chat("hello").await.unwrap();
        assert_eq!(response.first_content(), Some("hi there"));
    }

    #[tokio::test]
    async fn provider_error_surfaces_distinct_from_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": {
                    "Error": {"Code": "AuthFailure.SignatureFailure", "Message": "bad signature"},
                    "RequestId": "req-43"
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server.uri()).chat("hello").await.unwrap_err();
        match err {
            HunyuanError::Provider { code, message } => {
                assert_eq!(code, "AuthFailure.SignatureFailure");
                assert_eq!(message, "bad signature");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_failure() {
        // Port 1 is reserved and unbound; connection should fail fast.
        let err = client("http://127.0.0.1:1").chat("hello").await.unwrap_err();
        assert!(matches!(err, HunyuanError::Transport(_)));
    }
}
