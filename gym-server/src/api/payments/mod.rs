//! Payment Routes

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Build payment router. All routes require a logged-in member
/// (auth handled at Router level).
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/order", post(handler::create_checkout))
        .route("/verify", post(handler::verify_payment))
        .route("/receipt", post(handler::send_receipt))
}
