// CORS configuration
// Any origin may call the relay; the credential never leaves the server.

use tower_http::cors::{CorsLayer, Any};
use axum::Router;

pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
