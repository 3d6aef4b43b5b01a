//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/register, /api/auth/login: public (no auth required)
/// - /api/auth/otp/send, /api/auth/otp/verify: public
/// - /api/auth/admin: protected (auth middleware handled at Router level)
pub fn router() -> Router<ServerState> {
    Router::new()
        // Public routes - no auth middleware applied
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/otp/send", post(handler::send_otp))
        .route("/api/auth/otp/verify", post(handler::verify_otp))
        // Protected route - requires authentication (handled by global require_auth middleware)
        .route("/api/auth/admin", get(handler::check_admin))
}
