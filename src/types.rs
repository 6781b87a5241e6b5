// Type definitions shared by the LLM layer and the HTTP handlers

use axum::{http::StatusCode, response::IntoResponse, Json};

pub const VALIDATION_ERROR_MESSAGE: &str = "Missing image data or mime type.";
pub const UPSTREAM_ERROR_MESSAGE: &str =
    "Failed to generate instructions from AI. See server logs for details.";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Content part for multimodal messages (text, inline images)
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_base64")]
    ImageBase64 {
        base64: String,
        media_type: String, // e.g., "image/jpeg", "image/png"
    },
}

/// A single turn sent to the model, made of ordered parts
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user" or "model"
    pub parts: Vec<ContentPart>,
}

impl LLMMessage {
    /// Create a user message carrying a base64 image followed by a text prompt.
    /// The image goes first, which is the order Gemini recommends for single-image prompts.
    pub fn user_with_base64_image(
        base64: impl Into<String>,
        media_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![
                ContentPart::ImageBase64 {
                    base64: base64.into(),
                    media_type: media_type.into(),
                },
                ContentPart::Text { text: text.into() },
            ],
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LLMApi(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message a caller is allowed to see. Upstream detail never leaves the server.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => VALIDATION_ERROR_MESSAGE,
            AppError::LLMApi(_) => UPSTREAM_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = crate::models::ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
