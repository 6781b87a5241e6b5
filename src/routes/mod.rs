//! API Routes
//! 
//! - `/api/ai-instructions` - Image in, safety instructions out
//! - `/api/health` - Health check

pub mod health;
pub mod instructions;

use axum::Router;
use tower_http::trace::TraceLayer;
use crate::middleware::{apply_body_limit, apply_cors};
use crate::models::AppState;
use tracing::info;

/// Create the main application router
/// 
/// Every route is wrapped in request tracing, the body size ceiling from
/// configuration, and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_body_bytes = state.config.server.max_body_bytes;

    let api_router = Router::new()
        .merge(instructions::router(state.clone()))
        .merge(health::router(state));

    let router = apply_body_limit(api_router, max_body_bytes);
    apply_cors(router).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod test_support;
