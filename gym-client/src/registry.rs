//! In-memory order registry with change notification.
//!
//! Holds the authoritative set of orders for the current display session:
//! insertion-ordered, deduplicated by order id, and observable through a
//! typed listener list. Listeners receive the full ordered snapshot on
//! every actual mutation, synchronously, before the mutating call returns.
//!
//! The registry performs no I/O. It assumes sequential use from one
//! logical flow (one fetch cycle at a time) and is not designed for
//! concurrent mutation; fetching itself happens outside, in
//! [`crate::feed::OrderFeed`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use shared::Order;
use thiserror::Error;

/// Registry validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The order id is the dedup key; records without one are rejected
    /// instead of silently inserted.
    #[error("order id must not be empty")]
    EmptyOrderId,
}

/// Handle returned by [`OrderRegistry::on_order_change`]; pass it to
/// [`OrderRegistry::off_order_change`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type OrderListener = Box<dyn Fn(&[Order])>;

struct ListenerEntry {
    id: ListenerId,
    callback: OrderListener,
}

/// Insertion-ordered, deduplicated collection of orders for one display
/// session.
///
/// One registry instance is meant to live as long as the session: display
/// surfaces subscribe once, and each fetch cycle repopulates the contents
/// via [`replace_orders`](Self::replace_orders) without disturbing the
/// subscriptions.
pub struct OrderRegistry {
    orders: Vec<Order>,
    listeners: Vec<ListenerEntry>,
    next_listener_id: u64,
}

impl OrderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Append an order.
    ///
    /// Returns `Ok(true)` and notifies listeners when the order was
    /// inserted. An order whose id is already present leaves the registry
    /// untouched and fires no notification (`Ok(false)`), so re-running a
    /// fetch with overlapping data can produce neither duplicate entries
    /// nor duplicate notification rounds. The existing entry is kept as-is
    /// even when the incoming one differs in other fields.
    pub fn add_order(&mut self, order: Order) -> Result<bool, RegistryError> {
        if order.order_id.is_empty() {
            return Err(RegistryError::EmptyOrderId);
        }
        if self.contains(&order.order_id) {
            return Ok(false);
        }

        self.orders.push(order);
        self.notify();
        Ok(true)
    }

    /// Remove the order with the given id.
    ///
    /// Returns whether an entry was removed. Listeners are notified only
    /// on an actual removal; removing an absent id is a silent no-op.
    pub fn remove_order(&mut self, order_id: &str) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| o.order_id != order_id);
        let removed = self.orders.len() != before;

        if removed {
            self.notify();
        }
        removed
    }

    /// Remove all orders. Notifies listeners once when the registry was
    /// non-empty.
    pub fn clear(&mut self) {
        if self.orders.is_empty() {
            return;
        }
        self.orders.clear();
        self.notify();
    }

    /// Replace the whole collection in one step.
    ///
    /// This is the fetch-cycle repopulation path. Every incoming id is
    /// validated before anything is touched, so an invalid record leaves
    /// the previous contents fully intact. Duplicate ids within the input
    /// keep their first occurrence. At most one notification round fires,
    /// after the new collection is in place and only if it differs from
    /// the old one - listeners never observe a partially rebuilt
    /// collection, and re-fetching identical data stays silent.
    ///
    /// Returns the number of orders now held.
    pub fn replace_orders(
        &mut self,
        orders: impl IntoIterator<Item = Order>,
    ) -> Result<usize, RegistryError> {
        let incoming: Vec<Order> = orders.into_iter().collect();
        if incoming.iter().any(|o| o.order_id.is_empty()) {
            return Err(RegistryError::EmptyOrderId);
        }

        let mut next: Vec<Order> = Vec::with_capacity(incoming.len());
        for order in incoming {
            if !next.iter().any(|o| o.order_id == order.order_id) {
                next.push(order);
            }
        }

        let changed = self.orders != next;
        self.orders = next;
        if changed {
            self.notify();
        }
        Ok(self.orders.len())
    }

    /// Current orders, in insertion order.
    ///
    /// Returns a defensive copy: mutating the returned vector cannot
    /// affect the registry.
    pub fn get_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Whether an order with this id is present.
    pub fn contains(&self, order_id: &str) -> bool {
        self.orders.iter().any(|o| o.order_id == order_id)
    }

    /// Number of orders held.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the registry holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Subscribe to change notifications.
    ///
    /// The callback receives the full ordered snapshot after every actual
    /// mutation. Listeners fire in registration order, exactly once per
    /// mutating call.
    pub fn on_order_change(&mut self, listener: impl Fn(&[Order]) + 'static) -> ListenerId {
        self.next_listener_id += 1;
        let id = ListenerId(self.next_listener_id);
        self.listeners.push(ListenerEntry {
            id,
            callback: Box::new(listener),
        });
        id
    }

    /// Unsubscribe a listener. Unknown handles are a no-op; returns
    /// whether a listener was removed.
    pub fn off_order_change(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver the current snapshot to every listener, in registration
    /// order. A panicking listener is logged and skipped; it cannot stop
    /// the round or corrupt the collection.
    fn notify(&self) {
        let snapshot = self.orders.clone();
        for listener in &self.listeners {
            let outcome = catch_unwind(AssertUnwindSafe(|| (listener.callback)(&snapshot)));
            if outcome.is_err() {
                tracing::error!(listener_id = listener.id.0, "order change listener panicked");
            }
        }
    }
}

impl Default for OrderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
