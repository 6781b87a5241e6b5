// Google Gemini adapter
// Talks to the REST `generateContent` endpoint directly.
// API Reference: https://ai.google.dev/api/generate-content

use crate::config::DEFAULT_GEMINI_API_BASE;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, ContentPart, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct GoogleAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the Gemini API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    // Set on thinking-model summary parts, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Response types for the Gemini API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GoogleAdapter {
    /// Create an adapter against the public Gemini endpoint
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_GEMINI_API_BASE)
    }

    /// Create an adapter against an explicit base URL (proxies, local mocks)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Convert internal message format to Gemini `contents` format
    fn convert_message(msg: &LLMMessage) -> GeminiContent {
        let parts = msg
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => GeminiPart {
                    text: Some(text.clone()),
                    ..Default::default()
                },
                ContentPart::ImageBase64 { base64, media_type } => GeminiPart {
                    inline_data: Some(GeminiInlineData {
                        mime_type: media_type.clone(),
                        data: base64.clone(),
                    }),
                    ..Default::default()
                },
            })
            .collect();

        GeminiContent {
            role: Some(msg.role.clone()),
            parts,
        }
    }

    fn build_request(request: &LLMRequest) -> GeminiRequest {
        let generation_config = if request.max_tokens.is_some() || request.temperature.is_some() {
            Some(GeminiGenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        GeminiRequest {
            contents: request.messages.iter().map(Self::convert_message).collect(),
            generation_config,
        }
    }

    /// Join the answer text of the first candidate, skipping thought parts.
    /// Returns `None` when the candidate carries no text at all.
    fn extract_text(response: &GeminiResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = self.endpoint(&request.model);
        let gemini_request = Self::build_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "Gemini API error ({}): {} (status: {:?})",
                    status, error_response.error.message, error_response.error.status
                )));
            }

            return Err(AppError::LLMApi(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse Gemini response: {}", e)))?;

        let content = Self::extract_text(&gemini_response)
            .ok_or_else(|| AppError::LLMApi("Gemini returned no text".to_string()))?;

        let finish_reason = gemini_response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "STOP".to_string());
        let usage = gemini_response.usage_metadata.unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
        })
    }
}
