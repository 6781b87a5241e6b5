// Shared fixtures for router tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};

use crate::config::Config;
use crate::llm::LLMAdapter;
use crate::models::AppState;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};

/// Records every request and answers with a canned reply
pub struct MockLLM {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<LLMRequest>>,
}

impl MockLLM {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(detail.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMAdapter for MockLLM {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(LLMResponse {
                content: text.clone(),
                finish_reason: "STOP".to_string(),
                usage: TokenUsage::default(),
            }),
            Err(detail) => Err(AppError::LLMApi(detail.clone())),
        }
    }
}

/// Config with a test key plus the given variable overrides
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key: &str| match key {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        _ => vars.get(key).cloned(),
    })
    .unwrap()
}

pub fn test_app_with(llm: Arc<MockLLM>, overrides: &[(&str, &str)]) -> axum::Router {
    crate::routes::create_router(AppState::new(test_config(overrides), llm))
}

pub fn test_app(llm: Arc<MockLLM>) -> axum::Router {
    test_app_with(llm, &[])
}

pub fn json_post(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
