//! Order Routes

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Build order router
/// - /api/orders: current member's orders (auth handled at Router level)
/// - /api/admin/orders: cross-member listing (admin only)
pub fn router() -> Router<ServerState> {
    let member_routes = Router::new().route(
        "/api/orders",
        get(handler::my_orders).post(handler::record_order),
    );

    let admin_routes = Router::new()
        .route("/api/admin/orders", get(handler::admin_orders))
        .layer(middleware::from_fn(require_admin));

    member_routes.merge(admin_routes)
}
