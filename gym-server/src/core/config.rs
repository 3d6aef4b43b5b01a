use std::path::{Path, PathBuf};

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | DATA_DIR | ./data | Directory for the embedded database |
/// | ADMIN_EMAILS | (empty) | Comma-separated admin account emails |
/// | OTP_TTL_SECONDS | 600 | Verification code lifetime |
/// | OTP_SWEEP_INTERVAL_SECONDS | 60 | Expired-code sweep interval |
/// | PAYMENT_API_BASE | https://api.razorpay.com/v1 | Payment gateway API base |
/// | PAYMENT_KEY_ID | (empty) | Gateway key id |
/// | PAYMENT_KEY_SECRET | (empty) | Gateway key secret |
/// | MAIL_WEBHOOK_URL | (unset) | Mail delivery webhook |
/// | ENVIRONMENT | development | Runtime environment |
/// | JWT_SECRET | (generated in debug) | Signing secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/data/gym HTTP_PORT=8080 ADMIN_EMAILS=owner@gym.test cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// Directory holding the embedded database
    pub data_dir: String,
    /// Emails granted the admin role at login
    pub admin_emails: Vec<String>,
    /// Verification code lifetime in seconds
    pub otp_ttl_seconds: i64,
    /// How often expired codes are swept, in seconds
    pub otp_sweep_interval_seconds: u64,
    /// Payment gateway API base URL
    pub payment_api_base: String,
    /// Payment gateway key id
    pub payment_key_id: String,
    /// Payment gateway key secret (also signs payment verification)
    pub payment_key_secret: String,
    /// Mail delivery webhook, unset = log-and-skip
    pub mail_webhook_url: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            admin_emails: std::env::var("ADMIN_EMAILS")
                .map(|v| {
                    v.split(',')
                        .map(|e| e.trim().to_lowercase())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            otp_ttl_seconds: std::env::var("OTP_TTL_SECONDS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(600),
            otp_sweep_interval_seconds: std::env::var("OTP_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60),
            payment_api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into()),
            payment_key_id: std::env::var("PAYMENT_KEY_ID").unwrap_or_default(),
            payment_key_secret: std::env::var("PAYMENT_KEY_SECRET").unwrap_or_default(),
            mail_webhook_url: std::env::var("MAIL_WEBHOOK_URL").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
        }
    }

    /// Override the parts tests care about
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("gym.redb")
    }

    /// Create the data directory if missing
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    /// Whether this email belongs to an admin account
    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|a| a.eq_ignore_ascii_case(email))
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config() -> Config {
        Config {
            http_port: 0,
            data_dir: "./data".to_string(),
            admin_emails: vec!["owner@gym.test".to_string()],
            otp_ttl_seconds: 600,
            otp_sweep_interval_seconds: 60,
            payment_api_base: "https://gateway.test/v1".to_string(),
            payment_key_id: String::new(),
            payment_key_secret: String::new(),
            mail_webhook_url: None,
            environment: "test".to_string(),
            jwt: JwtConfig {
                secret: "unit-test-secret-0123456789abcdefghij".to_string(),
                expiration_minutes: 60,
                issuer: "gym-server".to_string(),
                audience: "gym-clients".to_string(),
            },
        }
    }

    #[test]
    fn test_admin_lookup_ignores_case() {
        let config = bare_config();
        assert!(config.is_admin("owner@gym.test"));
        assert!(config.is_admin("Owner@Gym.Test"));
        assert!(!config.is_admin("member@gym.test"));
    }

    #[test]
    fn test_database_path_joins_data_dir() {
        let config = bare_config();
        assert_eq!(config.database_path(), PathBuf::from("./data/gym.redb"));
    }
}
