// Google Gemini provider

use super::{network_error, Provider};
use crate::config::ProviderConfig;
use crate::error::{AskError, Result};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    http: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL.to_string())
    }

    /// Override the endpoint base, for tests against a local server.
    pub fn with_base_url(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn error_message(status: StatusCode, body: &str) -> String {
        if let Some(mut message) = extract_error_message(body) {
            if message.contains("API key not valid") {
                message.push_str(". Please check your API key in the settings.");
            } else if message.contains("Model not found") {
                message.push_str(". Please verify the configured model name.");
            }
            message
        } else {
            format!("HTTP error, status {}", status.as_u16())
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn fetch_response(&self, text: &str, config: &ProviderConfig) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, config.selected_model
        );
        debug!(url = %sanitize(&url), "calling Gemini generateContent");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
                top_p: 1.0,
                top_k: 32,
            },
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(AskError::Provider(Self::error_message(status, &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|_| AskError::Validation("Unexpected API response format".to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AskError::Validation("Unexpected API response format".to_string()))
    }
}

/// Extract the structured error message from a Gemini error body.
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
    let error = parsed.error?;
    error.message.or(error.status)
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
