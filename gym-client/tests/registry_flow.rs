//! End-to-end registry scenarios through the public crate API.

use std::cell::RefCell;
use std::rc::Rc;

use gym_client::{Order, OrderRecord, OrderRegistry, OrderStatus, RegistryError};
use rust_decimal::Decimal;

fn record(id: &str, amount: i64, created_at: &str) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        amount: Decimal::from(amount),
        created_at: created_at.parse().unwrap(),
    }
}

#[test]
fn sidebar_and_modal_observe_the_same_feed() {
    // Two display surfaces subscribe to one registry; both see every
    // mutation, and unsubscribing one leaves the other untouched.
    let mut registry = OrderRegistry::new();

    let sidebar = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sidebar);
    let sidebar_id = registry.on_order_change(move |orders| sink.borrow_mut().push(orders.len()));

    let modal = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&modal);
    registry.on_order_change(move |orders| sink.borrow_mut().push(orders.len()));

    let now = "2024-03-01T00:00:00Z".parse().unwrap();
    registry
        .add_order(Order::classified(record("m1", 499, "2024-02-20T00:00:00Z"), now))
        .unwrap();
    registry
        .add_order(Order::classified(record("m2", 999, "2024-01-01T00:00:00Z"), now))
        .unwrap();

    assert_eq!(*sidebar.borrow(), vec![1, 2]);
    assert_eq!(*modal.borrow(), vec![1, 2]);

    registry.off_order_change(sidebar_id);
    registry.remove_order("m1");

    assert_eq!(*sidebar.borrow(), vec![1, 2]);
    assert_eq!(*modal.borrow(), vec![1, 2, 1]);
}

#[test]
fn refresh_cycle_reclassifies_without_losing_subscribers() {
    let mut registry = OrderRegistry::new();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    registry.on_order_change(move |orders| {
        let statuses: Vec<OrderStatus> = orders.iter().map(|o| o.status).collect();
        sink.borrow_mut().push(statuses);
    });

    let created = "2024-01-10T00:00:00Z";

    // First fetch: the order is 10 days old
    let now = "2024-01-20T00:00:00Z".parse().unwrap();
    registry
        .replace_orders(vec![Order::classified(record("o1", 999, created), now)])
        .unwrap();

    // Second fetch months later: same record, re-classified
    let now = "2024-06-01T00:00:00Z".parse().unwrap();
    registry
        .replace_orders(vec![Order::classified(record("o1", 999, created), now)])
        .unwrap();

    let rounds = seen.borrow();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0], vec![OrderStatus::Running]);
    assert_eq!(rounds[1], vec![OrderStatus::Finished]);
}

#[test]
fn malformed_backend_record_cannot_clobber_display_state() {
    let mut registry = OrderRegistry::new();
    let now = "2024-03-01T00:00:00Z".parse().unwrap();
    registry
        .replace_orders(vec![Order::classified(record("good", 100, "2024-02-01T00:00:00Z"), now)])
        .unwrap();

    let bad_batch = vec![
        Order::classified(record("fresh", 200, "2024-02-15T00:00:00Z"), now),
        Order::classified(record("", 300, "2024-02-16T00:00:00Z"), now),
    ];
    let result = registry.replace_orders(bad_batch);

    assert_eq!(result, Err(RegistryError::EmptyOrderId));
    // The previously displayed order survives intact
    let orders = registry.get_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, "good");
}
