// Quick Report Relay - keeps the Gemini key server-side and turns incident photos into safety instructions

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod llm;
pub mod routes;
pub mod middleware;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
