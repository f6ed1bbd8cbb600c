//! Groq provider implementation.
//!
//! Speaks the OpenAI-compatible `chat/completions` API with bearer auth.
//! Responses are buffered in full; no streaming, no retries.

use super::{ChatMessage, Completion, CompletionParams, CompletionProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq provider configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API root, e.g. `https://api.groq.com/openai/v1`.
    pub api_url: String,
    pub api_key: Secret<String>,
    pub model: String,
    pub timeout: Duration,
}

/// Groq chat-completion provider.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    pub fn new(config: GroqConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Groq API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending request to Groq API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Groq API returned an error");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let usage = envelope.usage.unwrap_or_default();
        let choice = envelope.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let text = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        tracing::debug!(
            model = %self.config.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            finish_reason = finish_reason.as_deref().unwrap_or("-"),
            "Groq completion received"
        );

        Ok(Completion {
            text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            finish_reason,
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ============================================================================
// Groq API wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> GroqProvider {
        GroqProvider::new(GroqConfig {
            api_url: format!("{}/openai/v1/", server.uri()),
            api_key: Secret::new("test-key".to_string()),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("be brief"), ChatMessage::user("hello")]
    }

    #[tokio::test]
    async fn sends_bearer_auth_model_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hello" }
                ],
                "max_tokens": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "[]" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 12, "completion_tokens": 3 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = CompletionParams {
            temperature: Some(0.5),
            max_tokens: Some(2000),
        };
        let completion = provider(&server)
            .complete(&messages(), &params)
            .await
            .unwrap();

        assert_eq!(completion.text, "[]");
        assert_eq!(completion.prompt_tokens, 12);
        assert_eq!(completion.completion_tokens, 3);
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&messages(), &CompletionParams::default())
            .await
            .unwrap_err();

        match err {
            ProviderError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_content_yields_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let completion = provider(&server)
            .complete(&messages(), &CompletionParams::default())
            .await
            .unwrap();

        assert!(completion.text.is_empty());
        assert_eq!(completion.prompt_tokens, 0);
    }

    #[tokio::test]
    async fn undecodable_envelope_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&messages(), &CompletionParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = GroqProvider::new(GroqConfig {
            api_url: "http://localhost".to_string(),
            api_key: Secret::new("  ".to_string()),
            model: "m".to_string(),
            timeout: Duration::from_secs(1),
        });

        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn request_omits_unset_params() {
        let msgs = messages();
        let body = serde_json::to_value(ChatCompletionRequest {
            model: "m",
            messages: &msgs,
            temperature: None,
            max_tokens: None,
        })
        .unwrap();

        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["messages"][1]["role"], "user");
    }
}
