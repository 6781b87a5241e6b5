use std::sync::Arc;

use validator::Validate;

use crate::config::Config;
use crate::llm::LLMAdapter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LLMAdapter>,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn LLMAdapter>) -> Self {
        Self { config, llm }
    }
}

/// Body of `POST /api/ai-instructions`.
///
/// Both fields are optional at the serde level so a missing field reaches
/// validation instead of failing inside the JSON extractor.
#[derive(Debug, Clone, serde::Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub base64_image: Option<String>,
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub instructions: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model: String,
}
