//! Safety Agent
//!
//! Turns a photo of an accident or incident into immediate safety
//! instructions for the person standing at the scene.

use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::types::{AppResult, LLMMessage, LLMRequest};
use tracing::{error, info};

/// Fixed instruction sent alongside every image
pub const SAFETY_PROMPT: &str = "Analyze this image of an accident or incident. \
Provide three direct, simple, and immediate safety instructions for the person at the scene. \
Be concise, use action verbs, and focus only on immediate safety action.";

pub struct SafetyAgent;

impl SafetyAgent {
    pub fn build_request(settings: &LLMConfig, base64_image: &str, mime_type: &str) -> LLMRequest {
        LLMRequest {
            model: settings.model.clone(),
            messages: vec![LLMMessage::user_with_base64_image(
                base64_image,
                mime_type,
                SAFETY_PROMPT,
            )],
            max_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        }
    }

    /// Ask the model for instructions. The text comes back untouched: no
    /// trimming, and no check that exactly three instructions were produced.
    pub async fn generate_instructions(
        llm: &dyn LLMAdapter,
        settings: &LLMConfig,
        base64_image: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        let request = Self::build_request(settings, base64_image, mime_type);

        match llm.create_chat_completion(&request).await {
            Ok(response) => {
                info!(
                    response_len = response.content.len(),
                    finish_reason = %response.finish_reason,
                    total_tokens = response.usage.total_tokens,
                    "Generated safety instructions"
                );
                Ok(response.content)
            }
            Err(e) => {
                error!(error = %e, model = %settings.model, "Gemini API error");
                Err(e)
            }
        }
    }
}
