use async_trait::async_trait;
use crate::types::{LLMRequest, LLMResponse, AppResult};

/// A multimodal text-generation backend.
///
/// Handlers only ever see this trait, so tests can swap in a recording mock.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}
