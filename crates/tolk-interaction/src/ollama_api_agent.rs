//! OllamaApiAgent - Direct REST API implementation for a local Ollama server.
//!
//! This agent calls the Ollama `/api/chat` endpoint with streaming disabled, so
//! every request yields exactly one complete reply.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tolk_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL_NAME, ModelSettings};
use tolk_core::{ChatModel, ChatRequest, Result, TolkError};

const CHAT_PATH: &str = "/api/chat";

/// Agent implementation that talks to the Ollama HTTP API.
#[derive(Clone)]
pub struct OllamaApiAgent {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaApiAgent {
    /// Creates a new agent for the given server and model, without a request timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            model: model.into(),
        }
    }

    /// Builds an agent from the `[model]` section of the configuration.
    ///
    /// A `request_timeout_secs` value becomes a whole-request timeout on the
    /// HTTP client; without it a request waits for as long as the server takes.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| TolkError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(settings.base_url.clone()),
            model: settings.model_name.clone(),
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }

    fn build_request(&self, request: &ChatRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_text.clone(),
                },
            ],
            stream: false,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                TolkError::model(format!("Ollama API request to {} failed: {err}", self.base_url))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Ollama error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| TolkError::model(format!("Failed to parse Ollama response: {err}")))?;

        extract_text_response(parsed)
    }
}

impl Default for OllamaApiAgent {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL_NAME)
    }
}

#[async_trait]
impl ChatModel for OllamaApiAgent {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = self.build_request(&request);
        tracing::debug!(
            model = %self.model,
            system_chars = request.system_instruction.len(),
            user_chars = request.user_text.len(),
            "Sending chat request to Ollama"
        );

        let reply = self.send_request(&body).await;
        if let Err(err) = &reply {
            tracing::warn!(model = %self.model, "Ollama request failed: {}", err);
        }
        reply
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| TolkError::model("Ollama API returned no content in the response"))
}

fn map_http_error(status: StatusCode, body: String) -> TolkError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error)
        .unwrap_or(body);

    TolkError::model_status(
        status.as_u16(),
        format!("Ollama API error ({status}): {message}"),
    )
}
