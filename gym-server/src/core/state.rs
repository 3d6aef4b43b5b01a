use std::sync::Arc;

use crate::auth::{JwtService, OtpStore};
use crate::core::Config;
use crate::services::{MailService, PaymentService};
use crate::storage::GymStorage;

/// Server state - shared handles to every service
///
/// Cloning is shallow; every field is either small or `Arc`-backed.
///
/// # Components
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | storage | GymStorage | Embedded redb database |
/// | jwt_service | Arc<JwtService> | Token issuing and validation |
/// | otp_store | OtpStore | In-memory verification codes |
/// | mail | MailService | Outbound mail delivery |
/// | payments | PaymentService | Payment gateway client |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database
    pub storage: GymStorage,
    /// JWT service (shared ownership)
    pub jwt_service: Arc<JwtService>,
    /// One-time verification codes
    pub otp_store: OtpStore,
    /// Mail delivery
    pub mail: MailService,
    /// Payment gateway
    pub payments: PaymentService,
}

impl ServerState {
    /// Initialize the full server state
    ///
    /// Order:
    /// 1. Data directory
    /// 2. Database
    /// 3. Services (JWT, OTP, mail, payments)
    ///
    /// # Panics
    ///
    /// Panics if the data directory or database cannot be opened.
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_data_dir()
            .expect("Failed to create data directory");

        let storage =
            GymStorage::open(config.database_path()).expect("Failed to open database");

        Self::with_storage(config, storage)
    }

    /// Build state around an already-open database
    ///
    /// Used by tests with an in-memory backend.
    pub fn with_storage(config: &Config, storage: GymStorage) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let otp_store = OtpStore::new(config.otp_ttl_seconds);
        let mail = MailService::new(config.mail_webhook_url.clone());
        let payments = PaymentService::new(
            config.payment_api_base.clone(),
            config.payment_key_id.clone(),
            config.payment_key_secret.clone(),
        );

        Self {
            config: config.clone(),
            storage,
            jwt_service,
            otp_store,
            mail,
            payments,
        }
    }

    /// Start background tasks
    ///
    /// Must be called before `Server::run()`.
    ///
    /// Tasks:
    /// - OTP store sweeper
    pub async fn start_background_tasks(&self) {
        self.otp_store
            .start_sweeper(self.config.otp_sweep_interval_seconds);
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
