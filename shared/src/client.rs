//! Request/response DTOs exchanged between the API and its clients.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public user profile. Never carries credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub email: String,
    /// "member" or "admin"
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/otp/send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSendRequest {
    pub email: String,
}

/// POST /api/auth/otp/verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub email: String,
    pub code: String,
}

/// GET /api/auth/admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub authorized: bool,
}

// ============================================================================
// Orders
// ============================================================================

/// POST /api/orders - record a completed payment against the current user.
///
/// All fields are required; `created_at` comes from the checkout flow so
/// the purchase instant survives retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOrderRequest {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Order row in the admin dashboard listing (GET /api/admin/orders):
/// the raw record plus the purchasing member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminOrderRecord {
    pub order_id: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Payments
// ============================================================================

/// POST /api/payments/order - open a gateway order for checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Amount in whole currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Gateway order handle returned to the checkout page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: String,
}

/// POST /api/payments/verify - gateway callback payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    /// The order id issued at checkout
    pub order_id: String,
    /// Gateway payment id
    pub payment_id: String,
    /// Hex HMAC signature over "{order_id}|{payment_id}"
    pub signature: String,
}

/// POST /api/payments/receipt - email a receipt for a recorded payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRequest {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
