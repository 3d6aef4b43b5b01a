use super::*;

#[test]
fn test_all_listeners_notified_once_per_add() {
    let mut registry = OrderRegistry::new();
    let log_a = recording_listener(&mut registry);
    let log_b = recording_listener(&mut registry);
    let log_c = recording_listener(&mut registry);

    registry.add_order(order("order_1", 999)).unwrap();

    for log in [&log_a, &log_b, &log_c] {
        let rounds = log.borrow();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].len(), 1);
        assert_eq!(rounds[0][0].order_id, "order_1");
    }
}

#[test]
fn test_listeners_fire_in_registration_order() {
    let mut registry = OrderRegistry::new();
    let sequence = Rc::new(RefCell::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let sink = Rc::clone(&sequence);
        registry.on_order_change(move |_| sink.borrow_mut().push(name));
    }

    registry.add_order(order("a", 1)).unwrap();

    assert_eq!(*sequence.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_duplicate_add_fires_no_second_round() {
    let mut registry = OrderRegistry::new();
    let log = recording_listener(&mut registry);

    registry.add_order(order("order_1", 999)).unwrap();
    registry.add_order(order("order_1", 1)).unwrap();

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_absent_remove_fires_no_round() {
    let mut registry = OrderRegistry::new();
    registry.add_order(order("a", 1)).unwrap();
    let log = recording_listener(&mut registry);

    registry.remove_order("missing");
    assert_eq!(log.borrow().len(), 0);

    registry.remove_order("a");
    assert_eq!(log.borrow().len(), 1);
    assert!(log.borrow()[0].is_empty());
}

#[test]
fn test_clear_on_empty_fires_no_round() {
    let mut registry = OrderRegistry::new();
    let log = recording_listener(&mut registry);

    registry.clear();

    assert_eq!(log.borrow().len(), 0);
}

#[test]
fn test_unsubscribed_listener_receives_nothing() {
    let mut registry = OrderRegistry::new();
    let log_a = recording_listener(&mut registry);

    let count = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&count);
    let id = registry.on_order_change(move |_| *sink.borrow_mut() += 1);

    registry.add_order(order("a", 1)).unwrap();
    assert!(registry.off_order_change(id));

    registry.add_order(order("b", 2)).unwrap();

    assert_eq!(*count.borrow(), 1);
    assert_eq!(log_a.borrow().len(), 2);

    // Unknown handle is a no-op
    assert!(!registry.off_order_change(id));
}

#[test]
fn test_panicking_listener_does_not_stop_round() {
    let mut registry = OrderRegistry::new();

    registry.on_order_change(|_| panic!("broken display surface"));
    let log = recording_listener(&mut registry);

    registry.add_order(order("a", 1)).unwrap();

    // The healthy listener still saw the round
    assert_eq!(log.borrow().len(), 1);

    // And the registry stays fully usable afterwards
    registry.add_order(order("b", 2)).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_replace_orders_fires_single_round() {
    let mut registry = OrderRegistry::new();
    registry.add_order(order("stale", 1)).unwrap();
    let log = recording_listener(&mut registry);

    registry
        .replace_orders(vec![order("a", 1), order("b", 2), order("c", 3)])
        .unwrap();

    let rounds = log.borrow();
    assert_eq!(rounds.len(), 1);
    // Listeners observe only the final, fully rebuilt collection
    let ids: Vec<&str> = rounds[0].iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_replace_with_identical_content_stays_silent() {
    let mut registry = OrderRegistry::new();
    registry.add_order(order("a", 1)).unwrap();
    registry.add_order(order("b", 2)).unwrap();
    let log = recording_listener(&mut registry);

    registry
        .replace_orders(vec![order("a", 1), order("b", 2)])
        .unwrap();

    assert_eq!(log.borrow().len(), 0);
}

#[test]
fn test_replace_failure_fires_no_round() {
    let mut registry = OrderRegistry::new();
    registry.add_order(order("a", 1)).unwrap();
    let log = recording_listener(&mut registry);

    let result = registry.replace_orders(vec![order("", 9)]);

    assert!(result.is_err());
    assert_eq!(log.borrow().len(), 0);
}

#[test]
fn test_subscriptions_survive_fetch_cycles() {
    let mut registry = OrderRegistry::new();
    let log = recording_listener(&mut registry);

    // Three fetch cycles against the same long-lived registry
    registry.replace_orders(vec![order("a", 1)]).unwrap();
    registry
        .replace_orders(vec![order("a", 1), order("b", 2)])
        .unwrap();
    registry.replace_orders(Vec::new()).unwrap();

    let rounds = log.borrow();
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0].len(), 1);
    assert_eq!(rounds[1].len(), 2);
    assert!(rounds[2].is_empty());
}
