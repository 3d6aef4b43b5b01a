//! Order feed - the fetch cycle binding the backend to the registry.
//!
//! Pulls the current user's raw order records, classifies them at a single
//! instant, and swaps them into one long-lived [`OrderRegistry`]. Display
//! surfaces subscribe to the registry once; refreshes never invalidate
//! their subscriptions.

use chrono::Utc;
use rust_decimal::Decimal;

use shared::client::RecordOrderRequest;
use shared::{Order, OrderRecord};

use crate::http::HttpClient;
use crate::registry::OrderRegistry;
use crate::{ClientError, ClientResult};

/// Keeps a registry in sync with the backend order feed.
pub struct OrderFeed {
    client: HttpClient,
    registry: OrderRegistry,
}

impl OrderFeed {
    /// Create a feed with an empty registry.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            registry: OrderRegistry::new(),
        }
    }

    /// The long-lived registry. Subscriptions registered here survive
    /// refreshes.
    pub fn registry(&self) -> &OrderRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for subscribing and unsubscribing.
    pub fn registry_mut(&mut self) -> &mut OrderRegistry {
        &mut self.registry
    }

    /// Fetch the current user's orders, classify each against one `now`
    /// instant, and swap the result into the registry.
    ///
    /// On fetch failure nothing is mutated and no notification fires: the
    /// previously displayed orders stay visible while the caller surfaces
    /// the error. Returns the number of orders now held.
    pub async fn refresh(&mut self) -> ClientResult<usize> {
        let records = self.client.my_orders().await?;

        let now = Utc::now();
        let orders: Vec<Order> = records
            .into_iter()
            .map(|record| Order::classified(record, now))
            .collect();

        let count = self.registry.replace_orders(orders)?;
        tracing::debug!(count, "order feed refreshed");
        Ok(count)
    }

    /// Record a verified payment on the backend, then append it locally so
    /// subscribers see it without waiting for the next refresh.
    ///
    /// The backend write happens first; a rejected write leaves the
    /// registry untouched.
    pub async fn record_payment(&mut self, order_id: &str, amount: Decimal) -> ClientResult<()> {
        if order_id.is_empty() {
            return Err(ClientError::Validation(
                "order id must not be empty".to_string(),
            ));
        }

        let created_at = Utc::now();
        let request = RecordOrderRequest {
            order_id: order_id.to_string(),
            amount,
            created_at,
        };
        let stored = self.client.record_order(&request).await?;

        // A freshly recorded payment is by definition inside the window
        let order = Order::classified(
            OrderRecord {
                order_id: stored.order_id,
                amount: stored.amount,
                created_at: stored.created_at,
            },
            created_at,
        );
        self.registry.add_order(order)?;
        Ok(())
    }
}
