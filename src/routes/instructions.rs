use axum::{
    Router,
    routing::post,
    Json,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;
use tracing::{info, warn};

use crate::agents::safety::SafetyAgent;
use crate::models::{AnalysisRequest, AnalysisResult, AppState};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ai-instructions", post(post_ai_instructions))
        .with_state(state)
}

/// POST /api/ai-instructions - Relay an incident photo to Gemini
pub async fn post_ai_instructions(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Rejected oversized request body");
            return rejection.into_response();
        }
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "Rejected unreadable request body");
            return AppError::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    match analyze(&state, request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn analyze(state: &AppState, request: AnalysisRequest) -> AppResult<AnalysisResult> {
    request
        .validate()
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let (Some(base64_image), Some(mime_type)) = (request.base64_image, request.mime_type) else {
        return Err(AppError::InvalidRequest("missing field".to_string()));
    };

    info!(
        image_len = base64_image.len(),
        mime_type = %mime_type,
        "Received AI instructions request"
    );

    let instructions = SafetyAgent::generate_instructions(
        state.llm.as_ref(),
        &state.config.llm,
        &base64_image,
        &mime_type,
    )
    .await?;

    Ok(AnalysisResult { instructions })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{body_json, json_post, test_app, test_app_with, MockLLM};
    use crate::agents::safety::SAFETY_PROMPT;
    use crate::types::ContentPart;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    const URI: &str = "/api/ai-instructions";
    const THREE_STEPS: &str =
        "1. Move away from traffic. 2. Check for hazards. 3. Call emergency services.";

    #[tokio::test]
    async fn test_success_returns_instructions() {
        let llm = MockLLM::replying(THREE_STEPS);
        let app = test_app(llm.clone());

        let response = app
            .oneshot(json_post(URI, r#"{"base64Image":"AAAA","mimeType":"image/png"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "instructions": THREE_STEPS }));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_upstream_call_carries_image_mime_and_prompt() {
        let llm = MockLLM::replying("ok");
        let app = test_app(llm.clone());

        app.oneshot(json_post(URI, r#"{"base64Image":"/9j/4AAQ","mimeType":"image/jpeg"}"#))
            .await
            .unwrap();

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gemini-2.5-flash");
        let parts = &calls[0].messages[0].parts;
        assert_eq!(
            parts[0],
            ContentPart::ImageBase64 {
                base64: "/9j/4AAQ".to_string(),
                media_type: "image/jpeg".to_string(),
            }
        );
        assert_eq!(parts[1], ContentPart::Text { text: SAFETY_PROMPT.to_string() });
        assert_eq!(calls[0].max_tokens, None);
        assert_eq!(calls[0].temperature, None);
    }

    #[tokio::test]
    async fn test_generation_settings_reach_upstream() {
        let llm = MockLLM::replying("ok");
        let app = test_app_with(
            llm.clone(),
            &[("GEMINI_MAX_OUTPUT_TOKENS", "300"), ("GEMINI_TEMPERATURE", "0.3")],
        );

        let response = app
            .oneshot(json_post(URI, r#"{"base64Image":"AAAA","mimeType":"image/png"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, Some(300));
        assert_eq!(calls[0].temperature, Some(0.3));
    }

    #[tokio::test]
    async fn test_text_is_passed_through_unmodified() {
        let raw = "  * Step back\n\n* Turn off the engine\n* Call 112  \n";
        let llm = MockLLM::replying(raw);
        let app = test_app(llm);

        let response = app
            .oneshot(json_post(URI, r#"{"base64Image":"AAAA","mimeType":"image/png"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["instructions"], raw);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_without_upstream_call() {
        let bodies = [
            r#"{"mimeType":"image/png"}"#,
            r#"{"base64Image":"AAAA"}"#,
            r#"{}"#,
            r#"{"base64Image":"","mimeType":"image/png"}"#,
            r#"{"base64Image":"AAAA","mimeType":""}"#,
            r#"{"base64Image":null,"mimeType":null}"#,
        ];

        for body in bodies {
            let llm = MockLLM::replying("should not be used");
            let app = test_app(llm.clone());

            let response = app.oneshot(json_post(URI, body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Missing image data or mime type." }),
                "body: {}",
                body
            );
            assert_eq!(llm.call_count(), 0, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_rejected_without_upstream_call() {
        let llm = MockLLM::replying("unused");
        let app = test_app(llm.clone());

        let response = app.oneshot(json_post(URI, "{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Missing image data or mime type.");
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic_500() {
        let llm = MockLLM::failing("Gemini API error (429): Resource has been exhausted");
        let app = test_app(llm.clone());

        let response = app
            .oneshot(json_post(URI, r#"{"base64Image":"AAAA","mimeType":"image/png"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({ "error": "Failed to generate instructions from AI. See server logs for details." })
        );
        assert!(!body.to_string().contains("exhausted"));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let llm = MockLLM::replying("unused");
        let app = test_app_with(llm.clone(), &[("MAX_BODY_BYTES", "64")]);

        let body = json!({ "base64Image": "A".repeat(1024), "mimeType": "image/png" }).to_string();
        let response = app.oneshot(json_post(URI, body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let llm = MockLLM::replying("ok");
        let app = test_app(llm);

        let mut request = json_post(URI, r#"{"base64Image":"AAAA","mimeType":"image/png"}"#);
        request
            .headers_mut()
            .insert("origin", "http://192.168.1.20:8081".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
