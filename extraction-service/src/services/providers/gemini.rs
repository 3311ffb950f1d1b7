//! Gemini provider implementation.
//!
//! Sends the document inline (base64) together with the fixed prompts to the
//! `generateContent` endpoint and returns the model's text.

use super::prompts::{SYSTEM_INSTRUCTION, USER_PROMPT};
use super::{DocumentExtractor, ProviderError};
use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Low temperature keeps the extraction factual.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Ceiling on the length of the generated narrative.
pub const EXTRACTION_MAX_OUTPUT_TOKENS: i32 = 2000;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub model: String,
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini-backed [`DocumentExtractor`].
pub struct GeminiExtractor {
    config: GeminiConfig,
    client: Client,
}

impl GeminiExtractor {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn build_request(bytes: &[u8], mime_type: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![ContentPart::Text {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(bytes),
                    },
                },
                ContentPart::Text {
                    text: USER_PROMPT.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: EXTRACTION_TEMPERATURE,
            max_output_tokens: EXTRACTION_MAX_OUTPUT_TOKENS,
        },
    }
}

/// Pull the reply text out of a `generateContent` response.
fn response_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
        return Err(ProviderError::ContentFiltered);
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if matches!(
        candidate.finish_reason.as_deref(),
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") | Some("SPII")
    ) {
        return Err(ProviderError::ContentFiltered);
    }

    if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") {
        tracing::warn!("Gemini reply truncated at the output token limit");
    }

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text),
            _ => None,
        })
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text.to_string())
}

#[async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        let request = build_request(bytes, mime_type);

        tracing::debug!(
            model = %self.config.model,
            mime_type = %mime_type,
            size_bytes = bytes.len(),
            "Sending document to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini API returned an error");

            return Err(
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    ProviderError::Unauthorized(format!("Gemini API error {}", status))
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    ProviderError::RateLimited
                } else {
                    ProviderError::ApiError(format!("Gemini API error {}: {}", status, error_text))
                },
            );
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        response_text(api_response)
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Function calls and other part kinds this service never asks for.
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}
