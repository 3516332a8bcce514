// completion.rs - Hosted text-completion service behind a narrow trait
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Completion request failed: {0}")]
    Transport(String),
    #[error("Completion API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to parse completion response: {0}")]
    InvalidResponse(String),
    #[error("Completion response contained no text")]
    EmptyResponse,
}

/// Turns a fully rendered prompt into the model's text reply
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// OpenAI-compatible chat completions client (Groq by default)
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self::from_config(api_key, &LlmConfig::default())
    }

    pub fn from_config(api_key: String, config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        tracing::debug!("Completion request: model={}, prompt_chars={}", self.model, prompt.len());

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.timeout)
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::error!("Completion API error ({}): {}", status, response_text);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            temperature: 0.3,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_response_parsing_ignores_extra_fields() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Total is ₹248,570."}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Total is ₹248,570.");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..LlmConfig::default()
        };
        let client = GroqClient::from_config("key".to_string(), &config);
        assert_eq!(client.base_url, "http://localhost:9999/v1");
        assert_eq!(client.model(), crate::config::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout: Duration::from_secs(2),
            ..LlmConfig::default()
        };
        let client = GroqClient::from_config("key".to_string(), &config);
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Transport(_) | CompletionError::Timeout(_)
        ));
    }
}
