//! Authentication middleware
//!
//! Axum middleware for JWT authentication and admin authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Authentication middleware - requires a logged-in member
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success a [`CurrentUser`] is inserted into the request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - register / login / OTP endpoints
/// - public catalog reads (`GET` on plans and testimonials)
///
/// # Errors
///
/// | Failure | Response |
/// |---------|----------|
/// | Missing Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Malformed or mis-signed token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip authentication (they 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "token validation failed");

            match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Routes that are reachable without a token.
///
/// Write access to the catalog stays behind [`require_auth`] +
/// [`require_admin`]; only the reads are open.
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    matches!(
        path,
        "/api/auth/register" | "/api/auth/login" | "/api/auth/otp/send" | "/api/auth/otp/verify"
    ) || (method == http::Method::GET
        && (path == "/api/plans"
            || path.starts_with("/api/plans/")
            || path == "/api/testimonials"
            || path.starts_with("/api/testimonials/")))
}

/// Admin middleware - requires the admin role
///
/// Checks `CurrentUser.role == "admin"`; must run after [`require_auth`].
///
/// # Errors
///
/// Non-admins get 403 Forbidden.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    if !user.is_admin() {
        tracing::warn!(target: "security", email = %user.email, "admin access denied");
        return Err(AppError::forbidden("Administrator access required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_route_table() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public_api_route(&post, "/api/auth/login"));
        assert!(is_public_api_route(&post, "/api/auth/otp/verify"));
        assert!(is_public_api_route(&get, "/api/plans"));
        assert!(is_public_api_route(&get, "/api/plans/abc-123"));
        assert!(is_public_api_route(&get, "/api/testimonials"));

        // Catalog writes are not public
        assert!(!is_public_api_route(&post, "/api/plans"));
        // Member and admin data always require a token
        assert!(!is_public_api_route(&get, "/api/orders"));
        assert!(!is_public_api_route(&get, "/api/admin/orders"));
        assert!(!is_public_api_route(&get, "/api/auth/admin"));
    }
}
