use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use quick_report_relay::{config::Config, llm::GoogleAdapter, routes::create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quick_report_relay=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing key means we never start listening
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("FATAL ERROR: {}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration loaded: {:?} {:?}", config.server, config.llm);

    let llm = Arc::new(GoogleAdapter::with_base_url(
        &config.llm.gemini_api_key,
        &config.llm.api_base,
    ));

    // Create shared state
    let state = AppState::new(config.clone(), llm);

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;
    info!("Gemini relay listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
