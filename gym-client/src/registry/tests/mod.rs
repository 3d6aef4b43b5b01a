use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use rust_decimal::Decimal;
use shared::{Order, OrderRecord, OrderStatus};

mod test_notify;

fn order(id: &str, amount: i64) -> Order {
    Order {
        order_id: id.to_string(),
        amount: Decimal::from(amount),
        status: OrderStatus::Running,
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

fn classified_order(id: &str, amount: i64, created_at: &str, now: &str) -> Order {
    let record = OrderRecord {
        order_id: id.to_string(),
        amount: Decimal::from(amount),
        created_at: created_at.parse().unwrap(),
    };
    Order::classified(record, now.parse().unwrap())
}

// ========================================================================
// Helper: listener that records every snapshot it receives
// ========================================================================

fn recording_listener(registry: &mut OrderRegistry) -> Rc<RefCell<Vec<Vec<Order>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    registry.on_order_change(move |orders| sink.borrow_mut().push(orders.to_vec()));
    log
}
