//! Payment API Handlers
//!
//! Checkout and verification against the payment gateway. Verification
//! checks the gateway's HMAC signature; it never trusts client state.

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, MAX_SIGNATURE_LEN, validate_positive_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok_with_message};
use shared::ApiResponse;
use shared::client::{CheckoutRequest, CheckoutResponse, PaymentVerification, ReceiptRequest};

/// POST /api/payments/order - open a gateway order for checkout
pub async fn create_checkout(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    validate_positive_amount(payload.amount, "amount")?;

    let order_id = state.payments.create_order(payload.amount).await?;

    tracing::info!(
        order_id = %order_id,
        email = %current_user.email,
        amount = %payload.amount,
        "Checkout order created"
    );

    Ok(Json(CheckoutResponse { order_id }))
}

/// POST /api/payments/verify - verify a completed payment signature
pub async fn verify_payment(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentVerification>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_required_text(&payload.order_id, "order_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.payment_id, "payment_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.signature, "signature", MAX_SIGNATURE_LEN)?;

    if !state
        .payments
        .verify_signature(&payload.order_id, &payload.payment_id, &payload.signature)
    {
        tracing::warn!(
            order_id = %payload.order_id,
            payment_id = %payload.payment_id,
            "Payment signature verification failed"
        );
        return Err(AppError::validation("Invalid payment signature"));
    }

    tracing::info!(
        order_id = %payload.order_id,
        payment_id = %payload.payment_id,
        "Payment verified"
    );

    Ok(ok_with_message((), "Payment verified successfully"))
}

/// POST /api/payments/receipt - email a receipt to the current member
pub async fn send_receipt(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ReceiptRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_required_text(&payload.order_id, "order_id", MAX_SHORT_TEXT_LEN)?;
    validate_positive_amount(payload.amount, "amount")?;

    state
        .mail
        .send_receipt(&current_user.email, &payload.order_id, payload.amount)
        .await?;

    tracing::info!(
        order_id = %payload.order_id,
        email = %current_user.email,
        "Receipt sent"
    );

    Ok(ok_with_message((), "Receipt sent successfully"))
}
