//! One-time verification codes
//!
//! In-memory store of 6-digit codes keyed by email. A code is consumed on
//! successful verification; expired entries are purged by a background
//! sweeper. Codes never touch the database.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

/// In-memory OTP store
#[derive(Debug, Clone)]
pub struct OtpStore {
    entries: Arc<DashMap<String, OtpEntry>>,
    ttl_seconds: i64,
}

impl OtpStore {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl_seconds,
        }
    }

    /// Generate a fresh 6-digit code for this email, replacing any
    /// previous one. Returns the code for delivery.
    pub fn issue(&self, email: &str) -> String {
        let code = generate_code();
        let entry = OtpEntry {
            code: code.clone(),
            expires_at: Utc::now() + Duration::seconds(self.ttl_seconds),
        };
        self.entries.insert(email.to_lowercase(), entry);
        code
    }

    /// Check a code. A valid, unexpired code is consumed; anything else
    /// leaves the store unchanged and returns `false`.
    pub fn verify(&self, email: &str, code: &str) -> bool {
        let key = email.to_lowercase();
        let valid = match self.entries.get(&key) {
            Some(entry) => entry.code == code && entry.expires_at > Utc::now(),
            None => false,
        };
        if valid {
            self.entries.remove(&key);
        }
        valid
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawn the periodic sweep task
    pub fn start_sweeper(&self, every_seconds: u64) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(every_seconds));
            loop {
                interval.tick().await;
                let removed = store.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "expired verification codes swept");
                }
            }
        });
    }
}

fn generate_code() -> String {
    use rand::Rng;
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}
