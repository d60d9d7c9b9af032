use super::*;
use shared::models::{LogisticsUpdate, OrderStatus, PaymentStatus};

fn place_order(manager: &OrdersManager, products: &ProductStore) -> Order {
    let kurta = seed_product(products, "Banarasi Kurta", 1180.0, 18);
    manager
        .place_order(order_create(vec![cart_line(&kurta, 1)], None), 49.0, NOW)
        .unwrap()
}

#[test]
fn test_admin_direct_ship_from_not_processed() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let updated = manager
        .transition(&order.id, OrderStatus::Shipped, Actor::Admin, None)
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert!(updated.is_approved_by_admin);
    assert_eq!(updated.version, 2);
}

#[test]
fn test_customer_cancel_request_stores_reason() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let updated = manager
        .transition(
            &order.id,
            OrderStatus::CancelRequested,
            Actor::Customer,
            Some("Ordered the wrong size".to_string()),
        )
        .unwrap();
    assert_eq!(updated.status, OrderStatus::CancelRequested);
    assert!(!updated.is_approved_by_admin);
    assert_eq!(
        updated.cancel_reason.as_deref(),
        Some("Ordered the wrong size")
    );
}

#[test]
fn test_cancel_request_without_reason_leaves_order_unchanged() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let err = manager
        .transition(&order.id, OrderStatus::CancelRequested, Actor::Customer, None)
        .unwrap_err();
    assert!(matches!(err, OrderError::ReasonRequired(_)));

    // blank reasons count as missing
    let err = manager
        .transition(
            &order.id,
            OrderStatus::CancelRequested,
            Actor::Customer,
            Some("   ".to_string()),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::ReasonRequired(_)));

    let unchanged = manager.get(&order.id).unwrap();
    assert_eq!(unchanged.status, OrderStatus::NotProcessed);
    assert_eq!(unchanged.version, order.version);
    assert_eq!(unchanged.cancel_reason, None);
}

#[test]
fn test_cancel_request_after_shipping_rejected() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(&order.id, OrderStatus::Shipped, Actor::Admin, None)
        .unwrap();

    let err = manager
        .transition(
            &order.id,
            OrderStatus::CancelRequested,
            Actor::Customer,
            Some("Changed my mind".to_string()),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
    assert_eq!(manager.get(&order.id).unwrap().status, OrderStatus::Shipped);
}

#[test]
fn test_return_flow_delivered_to_returned() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(&order.id, OrderStatus::Delivered, Actor::Admin, None)
        .unwrap();

    // customer requests a return
    let requested = manager
        .transition(
            &order.id,
            OrderStatus::ReturnRequested,
            Actor::Customer,
            Some("Color faded after one wash".to_string()),
        )
        .unwrap();
    assert_eq!(requested.status, OrderStatus::ReturnRequested);
    assert!(!requested.is_approved_by_admin);

    // admin approves; the stored reason survives
    let returned = manager
        .transition(&order.id, OrderStatus::Returned, Actor::Admin, None)
        .unwrap();
    assert_eq!(returned.status, OrderStatus::Returned);
    assert!(returned.is_approved_by_admin);
    assert_eq!(
        returned.return_reason.as_deref(),
        Some("Color faded after one wash")
    );
}

#[test]
fn test_cancel_approval_flow() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(
            &order.id,
            OrderStatus::CancelRequested,
            Actor::Customer,
            Some("Found it cheaper elsewhere".to_string()),
        )
        .unwrap();

    let cancelled = manager
        .transition(&order.id, OrderStatus::Cancelled, Actor::Admin, None)
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.is_approved_by_admin);
    assert_eq!(
        cancelled.cancel_reason.as_deref(),
        Some("Found it cheaper elsewhere")
    );
}

#[test]
fn test_admin_direct_cancel_needs_reason() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let err = manager
        .transition(&order.id, OrderStatus::Cancelled, Actor::Admin, None)
        .unwrap_err();
    assert!(matches!(err, OrderError::ReasonRequired(_)));

    let cancelled = manager
        .transition(
            &order.id,
            OrderStatus::Cancelled,
            Actor::Admin,
            Some("Out of stock".to_string()),
        )
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.is_approved_by_admin);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Out of stock"));
}

#[test]
fn test_terminal_states_block_everything() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(
            &order.id,
            OrderStatus::Cancelled,
            Actor::Admin,
            Some("Out of stock".to_string()),
        )
        .unwrap();

    for target in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::CancelRequested,
    ] {
        let err = manager
            .transition(&order.id, target, Actor::Admin, Some("x".to_string()))
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }
}

#[test]
fn test_pending_request_blocks_forward_moves() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(
            &order.id,
            OrderStatus::CancelRequested,
            Actor::Customer,
            Some("Wrong size".to_string()),
        )
        .unwrap();

    let err = manager
        .transition(&order.id, OrderStatus::Shipped, Actor::Admin, None)
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[test]
fn test_unknown_order_not_found() {
    let (manager, _, _, _) = create_test_manager();
    let err = manager
        .transition("ghost", OrderStatus::Processing, Actor::Admin, None)
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[test]
fn test_stale_version_is_a_conflict() {
    let (manager, products, _, orders) = create_test_manager();
    let order = place_order(&manager, &products);
    manager
        .transition(&order.id, OrderStatus::Processing, Actor::Admin, None)
        .unwrap();

    // a writer still holding the placement-time version loses
    let err: OrderError = orders
        .update_if_version(&order.id, order.version, |o| {
            o.status = OrderStatus::Shipped
        })
        .unwrap_err()
        .into();
    assert!(matches!(err, OrderError::Conflict));
    assert_eq!(
        manager.get(&order.id).unwrap().status,
        OrderStatus::Processing
    );
}

#[test]
fn test_set_logistics() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let updated = manager
        .set_logistics(
            &order.id,
            LogisticsUpdate {
                awb_number: Some("AWB123456789".to_string()),
                tracking_link: Some("https://track.example/AWB123456789".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.awb_number.as_deref(), Some("AWB123456789"));
    assert!(updated.tracking_link.is_some());

    // partial update keeps the other field
    let updated = manager
        .set_logistics(
            &order.id,
            LogisticsUpdate {
                awb_number: Some("AWB987".to_string()),
                tracking_link: None,
            },
        )
        .unwrap();
    assert_eq!(updated.awb_number.as_deref(), Some("AWB987"));
    assert!(updated.tracking_link.is_some());
}

#[test]
fn test_mark_invoiced_idempotent() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    assert!(manager.mark_invoiced(&order.id).unwrap().is_invoiced);
    assert!(manager.mark_invoiced(&order.id).unwrap().is_invoiced);
}

#[test]
fn test_set_payment_status() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    let updated = manager
        .set_payment_status(&order.id, PaymentStatus::Paid)
        .unwrap();
    assert_eq!(updated.payment.status, PaymentStatus::Paid);
}

#[test]
fn test_get_by_number_and_list() {
    let (manager, products, _, _) = create_test_manager();
    let order = place_order(&manager, &products);

    assert_eq!(manager.get_by_number(&order.order_number).unwrap().id, order.id);
    assert!(matches!(
        manager.get_by_number("GN-0").unwrap_err(),
        OrderError::NotFound(_)
    ));
    assert_eq!(manager.list(10, 0).len(), 1);
    assert!(manager.list(10, 1).is_empty());
}
