//! Authentication Handlers
//!
//! Handles registration, login and one-time code verification

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::storage::UserRecord;
use crate::utils::validation::{validate_email, validate_password};
use crate::utils::{AppError, AppResult, ok_with_message};

// Re-use shared DTOs for API consistency
use shared::ApiResponse;
use shared::client::{
    AdminCheckResponse, LoginRequest, LoginResponse, OtpSendRequest, OtpVerifyRequest,
    RegisterRequest, UserInfo,
};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Role assigned at login time; admin status comes from configuration,
/// not from the stored account.
fn role_for(state: &ServerState, email: &str) -> &'static str {
    if state.config.is_admin(email) {
        "admin"
    } else {
        "member"
    }
}

fn user_info(user: &UserRecord, role: &str) -> UserInfo {
    UserInfo {
        email: user.email.clone(),
        role: role.to_string(),
        created_at: user.created_at,
    }
}

/// Register handler
///
/// Creates a member account. Emails are normalized to lowercase so the
/// same address cannot register twice with different casing.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    let email = req.email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(&req.password)?;

    let user = UserRecord {
        email: email.clone(),
        password_hash: hash_password(&req.password)?,
        created_at: Utc::now(),
        order_ids: Vec::new(),
    };

    if !state.storage.create_user(&user)? {
        return Err(AppError::conflict("Email already registered".to_string()));
    }

    tracing::info!(email = %email, "Member registered");

    Ok(Json(user_info(&user, role_for(&state, &email))))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = state.storage.get_user(&email)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent email enumeration
    let user = match user {
        Some(u) => {
            if !verify_password(&req.password, &u.password_hash) {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            u
        }
        None => {
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Generate JWT token
    let role = role_for(&state, &email);
    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&user.email, role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(email = %user.email, role = %role, "User logged in successfully");

    Ok(Json(LoginResponse {
        token,
        user: user_info(&user, role),
    }))
}

/// Send a one-time verification code to the given email
pub async fn send_otp(
    State(state): State<ServerState>,
    Json(req): Json<OtpSendRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let email = req.email.trim().to_lowercase();
    validate_email(&email)?;

    let code = state.otp_store.issue(&email);
    state.mail.send_otp(&email, &code).await?;

    tracing::info!(email = %email, "Verification code issued");

    Ok(ok_with_message((), "OTP sent"))
}

/// Verify a one-time code; the code is consumed on success
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<OtpVerifyRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let email = req.email.trim().to_lowercase();

    if !state.otp_store.verify(&email, &req.code) {
        tracing::warn!(email = %email, "OTP verification failed");
        return Err(AppError::OtpInvalid);
    }

    Ok(ok_with_message((), "OTP verified"))
}

/// Report whether the current token belongs to an admin
pub async fn check_admin(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<AdminCheckResponse>> {
    Ok(Json(AdminCheckResponse {
        authorized: current_user.is_admin(),
    }))
}
