//! Time-based order status derivation.
//!
//! Pure functions only: the classifier takes both timestamps explicitly so
//! it can be exercised in isolation from any registry or clock.

use chrono::{DateTime, Duration, Utc};

use super::OrderStatus;

/// Wall-clock days after which an order's service window counts as elapsed.
pub const SERVICE_WINDOW_DAYS: i64 = 30;

/// Derive the display status for an order created at `created_at`,
/// evaluated at `now`.
///
/// Strictly more than [`SERVICE_WINDOW_DAYS`] wall-clock days elapsed maps
/// to [`OrderStatus::Finished`]; everything else is [`OrderStatus::Running`].
/// Exactly 30 days is still Running. Negative elapsed time (future-dated
/// record, clock skew) is Running as well: the window has not elapsed.
///
/// [`OrderStatus::Canceled`] is never produced here; it is attached by
/// external action only.
pub fn classify(created_at: DateTime<Utc>, now: DateTime<Utc>) -> OrderStatus {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed > Duration::days(SERVICE_WINDOW_DAYS) {
        OrderStatus::Finished
    } else {
        OrderStatus::Running
    }
}
