/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::client::{clean_input, LlmClient};
use super::config::LlmConfig;
use super::models::Message;
use crate::errors::{LlmError, LlmResult};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct GroqChatRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    error: Option<GroqError>,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    message: String,
}

/// Chat-completions client for the Groq OpenAI-compatible API.
///
/// Each call is a single request. Failures propagate to the caller
/// untouched; there is no retry loop and no response caching.
pub struct GroqClient {
    config: LlmConfig,
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::Authentication {
                message: "Groq API key is required".to_string(),
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http_client,
            base_url,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        self.config.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat_completion(&self, messages: &[Message]) -> LlmResult<Value> {
        let groq_messages: Vec<GroqMessage> = messages
            .iter()
            .map(|m| GroqMessage {
                role: m.role.clone(),
                content: clean_input(&m.content),
            })
            .collect();

        let request = GroqChatRequest {
            model: self.model().to_string(),
            messages: groq_messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending chat completion request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Http)?;

        if response.status() == 429 {
            return Err(LlmError::RateLimit);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status,
                message: error_text,
            });
        }

        let chat_response: GroqChatResponse =
            response.json().await.map_err(|e| LlmError::EmptyResponse {
                message: format!("Failed to parse JSON response: {}", e),
            })?;

        if let Some(error) = chat_response.error {
            return Err(LlmError::Api {
                status: 200,
                message: error.message,
            });
        }

        let choice =
            chat_response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| LlmError::EmptyResponse {
                    message: "No choices in response".to_string(),
                })?;

        if let Some(refusal) = choice.message.refusal {
            return Err(LlmError::Refusal { message: refusal });
        }

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::EmptyResponse {
                message: "No content in response".to_string(),
            })?;

        // The model is prompted to answer with a JSON dictionary, but may
        // reply with plain text. Hand back whichever shape arrived.
        match serde_json::from_str::<Value>(&content) {
            Ok(json_value) => Ok(json_value),
            Err(_) => Ok(Value::String(content)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = GroqClient::new(LlmConfig::default());
        assert!(matches!(result, Err(LlmError::Authentication { .. })));
    }

    #[test]
    fn test_default_model_and_overrides() {
        let client = GroqClient::new(LlmConfig::default().with_api_key("gsk_test".to_string()))
            .expect("client");
        assert_eq!(client.model(), "llama-3.3-70b-versatile");
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");

        let client = GroqClient::new(
            LlmConfig::default()
                .with_api_key("gsk_test".to_string())
                .with_model("llama-3.1-8b-instant".to_string())
                .with_base_url("http://localhost:9999/v1".to_string()),
        )
        .expect("client");
        assert_eq!(client.model(), "llama-3.1-8b-instant");
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }
}
