//! Shared order types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchased membership order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Service window presumed active (30 elapsed days or fewer)
    #[default]
    Running,
    /// Service window presumed elapsed (more than 30 days)
    Finished,
    /// Terminated by external action; never produced by the classifier
    Canceled,
}

/// Raw order record as stored and served by the backend.
///
/// Carries no status: the display status is derived client-side at fetch
/// time (see [`super::status::classify`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// Gateway-assigned order identifier (natural key)
    pub order_id: String,
    /// Amount in whole currency units, a plain number on the wire
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Purchase time
    pub created_at: DateTime<Utc>,
}

/// A classified order as held by the client-side registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Gateway-assigned order identifier (natural key)
    pub order_id: String,
    /// Amount in whole currency units, a plain number on the wire
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Display status, fixed at classification time
    pub status: OrderStatus,
    /// Purchase time
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Classify a raw record against `now`.
    ///
    /// Snapshot semantics: the resulting status reflects this evaluation
    /// instant and is not re-derived later. Re-fetching re-classifies.
    pub fn classified(record: OrderRecord, now: DateTime<Utc>) -> Self {
        let status = super::status::classify(record.created_at, now);
        Self {
            order_id: record.order_id,
            amount: record.amount,
            status,
            created_at: record.created_at,
        }
    }
}
