// Middleware for CORS and request size limits

pub mod body_limit;
pub mod cors;

pub use body_limit::*;
pub use cors::*;
