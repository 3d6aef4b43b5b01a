//! Payment gateway integration via REST API (no SDK dependency)
//!
//! Opens gateway orders for checkout and verifies the signature the
//! gateway hands back after a completed payment.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sha2::Sha256;

use crate::utils::{AppError, AppResult};

/// Gateway settlement currency
const CURRENCY: &str = "INR";

/// Payment gateway client
#[derive(Debug, Clone)]
pub struct PaymentService {
    client: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
}

impl PaymentService {
    pub fn new(api_base: String, key_id: String, key_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            key_id,
            key_secret,
        }
    }

    /// Open a gateway order for the given amount.
    ///
    /// `amount` is in whole currency units; the gateway takes subunits
    /// (paise), so it is multiplied by 100 on the wire. Returns the
    /// gateway order id.
    pub async fn create_order(&self, amount: Decimal) -> AppResult<String> {
        let subunits = (amount * Decimal::ONE_HUNDRED)
            .round()
            .to_i64()
            .ok_or_else(|| AppError::validation("amount out of range"))?;

        let receipt = uuid::Uuid::new_v4().to_string();
        let body = serde_json::json!({
            "amount": subunits,
            "currency": CURRENCY,
            "receipt": receipt,
        });

        let resp = self
            .client
            .post(format!("{}/orders", self.api_base.trim_end_matches('/')))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Gateway request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(%status, detail = %detail, "gateway order creation failed");
            return Err(AppError::internal(format!("Gateway returned {}", status)));
        }

        let resp: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Gateway response unreadable: {}", e)))?;

        resp["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AppError::internal(format!("Gateway order missing id: {resp}")))
    }

    /// Verify the gateway signature for a completed payment.
    ///
    /// The gateway signs `"{order_id}|{payment_id}"` with the key secret
    /// (HMAC-SHA256, hex-encoded). Comparison goes through
    /// `Mac::verify_slice`, which is constant-time.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(sig_bytes) = hex::decode(signature) else {
            return false;
        };

        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(self.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        mac.verify_slice(&sig_bytes).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> PaymentService {
        PaymentService::new(
            "https://gateway.test/v1".to_string(),
            "key_test".to_string(),
            "secret_test".to_string(),
        )
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let service = test_service();
        let signature = sign("secret_test", "order_abc", "pay_xyz");
        assert!(service.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn test_tampered_fields_rejected() {
        let service = test_service();
        let signature = sign("secret_test", "order_abc", "pay_xyz");

        assert!(!service.verify_signature("order_other", "pay_xyz", &signature));
        assert!(!service.verify_signature("order_abc", "pay_other", &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let signature = sign("some-other-secret", "order_abc", "pay_xyz");
        assert!(!service.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn test_malformed_hex_rejected() {
        let service = test_service();
        assert!(!service.verify_signature("order_abc", "pay_xyz", "not hex!"));
        assert!(!service.verify_signature("order_abc", "pay_xyz", ""));
    }
}
