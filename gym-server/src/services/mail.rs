//! Outbound mail delivery
//!
//! Messages go to a configurable HTTP webhook as `{to, subject, html}`.
//! Without `MAIL_WEBHOOK_URL` set, sends are skipped with a warning so
//! local development needs no mail infrastructure.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Mail delivery service
#[derive(Debug, Clone)]
pub struct MailService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl MailService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Deliver one message through the webhook.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let Some(url) = &self.webhook_url else {
            tracing::warn!(to = %to, subject = %subject, "mail webhook not configured, skipping delivery");
            return Ok(());
        };

        let message = MailMessage { to, subject, html };
        let resp = self
            .client
            .post(url)
            .json(&message)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Mail delivery failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AppError::internal(format!(
                "Mail webhook returned {}",
                resp.status()
            )));
        }

        tracing::info!(to = %to, subject = %subject, "mail delivered");
        Ok(())
    }

    /// Send a verification code.
    pub async fn send_otp(&self, to: &str, code: &str) -> AppResult<()> {
        let html = format!(
            "<h1>Email Verification</h1>\
             <p>Your verification code is: <b>{code}</b></p>"
        );
        self.send(to, "Your verification code", &html).await
    }

    /// Send a payment receipt.
    pub async fn send_receipt(&self, to: &str, order_id: &str, amount: Decimal) -> AppResult<()> {
        let html = format!(
            "<h1>Payment Receipt</h1>\
             <p>Order ID: {order_id}</p>\
             <p>Amount: Rs {amount}</p>"
        );
        self.send(to, "Payment Receipt", &html).await
    }
}
