// Request body ceiling
// Oversized bodies fail inside the body extractor with 413 before any handler logic runs.

use axum::{extract::DefaultBodyLimit, Router};

pub fn apply_body_limit(router: Router, max_bytes: usize) -> Router {
    router.layer(DefaultBodyLimit::max(max_bytes))
}
