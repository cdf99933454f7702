// GROQ provider (OpenAI-compatible chat completions)

use super::{network_error, Provider};
use crate::config::ProviderConfig;
use crate::error::{AskError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqProvider {
    http: Client,
    base_url: String,
}

impl GroqProvider {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL.to_string())
    }

    /// Override the endpoint base, for tests against a local server.
    pub fn with_base_url(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn error_message(status: StatusCode, error: Option<&ApiError>, model: &str) -> String {
        let mut message = match error {
            Some(err) => {
                let base = err
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()));
                if base.contains("has been decommissioned") {
                    // The provider's message points at its model deprecation
                    // notes; surface that pointer rather than the raw text.
                    let recommendation = base
                        .split("refer to ")
                        .nth(1)
                        .unwrap_or("the provider's model documentation");
                    format!(
                        "Model {} is no longer available. Please check {}",
                        model, recommendation
                    )
                } else if err.error_type.as_deref() == Some("invalid_request_error") {
                    "Invalid model name. Please check available models at console.groq.com/docs"
                        .to_string()
                } else {
                    base
                }
            }
            None => format!("HTTP error, status {}", status.as_u16()),
        };

        if status == StatusCode::UNAUTHORIZED {
            message.push_str(". Please check your API key in the settings.");
        }

        message
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn id(&self) -> &'static str {
        "groq"
    }

    async fn fetch_response(&self, text: &str, config: &ProviderConfig) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %config.selected_model, "calling GROQ chat completions");

        let request = ChatCompletionRequest {
            model: config.selected_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            }],
            temperature: 0.7,
            max_tokens: 2048,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&config.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        let parsed: Option<ChatCompletionEnvelope> = serde_json::from_str(&body).ok();

        // GROQ sometimes reports errors in a 200 body, so check both.
        let api_error = parsed.as_ref().and_then(|p| p.error.as_ref());
        if !status.is_success() || api_error.is_some() {
            return Err(AskError::Provider(Self::error_message(
                status,
                api_error,
                &config.selected_model,
            )));
        }

        parsed
            .and_then(|p| p.choices.into_iter().next())
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AskError::Validation("Unexpected API response format".to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}
