//! Order API Handlers
//!
//! Orders are recorded after payment verification and served raw; status
//! derivation happens client-side at display time.

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::storage::{StorageError, StoredOrder};
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, validate_positive_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::OrderRecord;
use shared::client::{AdminOrderRecord, RecordOrderRequest};

fn to_record(order: StoredOrder) -> OrderRecord {
    OrderRecord {
        order_id: order.order_id,
        amount: order.amount,
        created_at: order.created_at,
    }
}

/// GET /api/orders - current member's orders, in purchase order
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<OrderRecord>>> {
    let orders = state.storage.orders_for_user(&current_user.email)?;
    Ok(Json(orders.into_iter().map(to_record).collect()))
}

/// POST /api/orders - record a completed payment against the current member
///
/// `created_at` comes from the checkout flow so the purchase instant is
/// stable across retries. Recording the same order id twice is a conflict.
pub async fn record_order(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<RecordOrderRequest>,
) -> AppResult<Json<OrderRecord>> {
    validate_required_text(&payload.order_id, "order_id", MAX_SHORT_TEXT_LEN)?;
    validate_positive_amount(payload.amount, "amount")?;

    let order = StoredOrder {
        order_id: payload.order_id,
        email: current_user.email.clone(),
        amount: payload.amount,
        created_at: payload.created_at,
    };

    match state.storage.record_order(&current_user.email, &order) {
        Ok(true) => {}
        Ok(false) => {
            return Err(AppError::conflict(format!(
                "Order {} already recorded",
                order.order_id
            )));
        }
        Err(StorageError::UserNotFound(email)) => {
            // Valid token for an account that no longer exists
            tracing::warn!(email = %email, "Order rejected - account not found");
            return Err(AppError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        order_id = %order.order_id,
        email = %current_user.email,
        amount = %order.amount,
        "Order recorded"
    );

    Ok(Json(to_record(order)))
}

/// GET /api/admin/orders - every order across all members, newest first
pub async fn admin_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<AdminOrderRecord>>> {
    let orders = state.storage.all_orders()?;
    if orders.is_empty() {
        return Err(AppError::not_found("No orders found"));
    }

    let records = orders
        .into_iter()
        .map(|o| AdminOrderRecord {
            order_id: o.order_id,
            email: o.email,
            amount: o.amount,
            created_at: o.created_at,
        })
        .collect();

    Ok(Json(records))
}
