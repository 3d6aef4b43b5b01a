//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use shared::client::{
    AdminCheckResponse, AdminOrderRecord, CheckoutRequest, CheckoutResponse, LoginRequest,
    LoginResponse, OtpSendRequest, OtpVerifyRequest, PaymentVerification, ReceiptRequest,
    RecordOrderRequest, RegisterRequest, UserInfo,
};
use shared::{ApiResponse, OrderRecord, Plan, Testimonial};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the gym backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.delete(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Register a new member account
    pub async fn register(&self, email: &str, password: &str) -> ClientResult<UserInfo> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("api/auth/register", &request).await
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("api/auth/login", &request).await
    }

    /// Request a one-time verification code for an email address
    pub async fn send_otp(&self, email: &str) -> ClientResult<()> {
        let request = OtpSendRequest {
            email: email.to_string(),
        };
        let _: ApiResponse<()> = self.post("api/auth/otp/send", &request).await?;
        Ok(())
    }

    /// Verify a one-time code; the code is consumed on success
    pub async fn verify_otp(&self, email: &str, code: &str) -> ClientResult<()> {
        let request = OtpVerifyRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        let _: ApiResponse<()> = self.post("api/auth/otp/verify", &request).await?;
        Ok(())
    }

    /// Check whether the current token belongs to an admin
    pub async fn check_admin(&self) -> ClientResult<AdminCheckResponse> {
        self.get("api/auth/admin").await
    }

    // ========== Catalog API ==========

    /// Fetch all membership plans
    pub async fn list_plans(&self) -> ClientResult<Vec<Plan>> {
        self.get("api/plans").await
    }

    /// Fetch a single plan
    pub async fn get_plan(&self, id: &str) -> ClientResult<Plan> {
        self.get(&format!("api/plans/{}", id)).await
    }

    /// Fetch all testimonials
    pub async fn list_testimonials(&self) -> ClientResult<Vec<Testimonial>> {
        self.get("api/testimonials").await
    }

    // ========== Orders API ==========

    /// Fetch the current user's raw order records, in purchase order.
    ///
    /// Records carry no status; callers classify them at display time.
    pub async fn my_orders(&self) -> ClientResult<Vec<OrderRecord>> {
        self.get("api/orders").await
    }

    /// Record a completed payment against the current user
    pub async fn record_order(&self, request: &RecordOrderRequest) -> ClientResult<OrderRecord> {
        self.post("api/orders", request).await
    }

    /// Fetch every order across all users (admin only), newest first
    pub async fn admin_orders(&self) -> ClientResult<Vec<AdminOrderRecord>> {
        self.get("api/admin/orders").await
    }

    // ========== Payments API ==========

    /// Open a gateway order for the given amount (whole currency units)
    pub async fn create_checkout(&self, amount: Decimal) -> ClientResult<CheckoutResponse> {
        let request = CheckoutRequest { amount };
        self.post("api/payments/order", &request).await
    }

    /// Verify a completed gateway payment signature
    pub async fn verify_payment(&self, verification: &PaymentVerification) -> ClientResult<()> {
        let _: ApiResponse<()> = self.post("api/payments/verify", verification).await?;
        Ok(())
    }

    /// Email a receipt for a recorded payment to the current user
    pub async fn send_receipt(&self, order_id: &str, amount: Decimal) -> ClientResult<()> {
        let request = ReceiptRequest {
            order_id: order_id.to_string(),
            amount,
        };
        let _: ApiResponse<()> = self.post("api/payments/receipt", &request).await?;
        Ok(())
    }
}
