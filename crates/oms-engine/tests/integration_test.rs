use oms_engine::config::EngineConfig;
use oms_engine::error::LifecycleError;
use oms_engine::lifecycle::OrderSystem;
use oms_engine::model::{Metadata, OrderStatus, ProductId, UserId};
use serde_json::json;
use tokio_util::sync::CancellationToken;

async fn system_with_stock(quantity: i64) -> (OrderSystem, ProductId) {
    let product = ProductId::new();
    let mut config = EngineConfig::test();
    config.seed_inventory = vec![(product, quantity)];
    let system = OrderSystem::new(&config);
    system.seed(&config).await.expect("Failed to seed stock");
    (system, product)
}

/// Full end-to-end integration test with all real actors.
#[tokio::test]
async fn test_place_then_cancel_restores_stock() {
    let (system, product) = system_with_stock(100).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let order = service
        .place_order(UserId(1), product, 5, Metadata::new(), &cancel)
        .await
        .expect("Failed to place order");
    assert_eq!(order.status, OrderStatus::Ordered);
    assert_eq!(service.ledger().peek(product, &cancel).await, 95);

    let cancelled = service
        .change_status(order.id, OrderStatus::Cancelled, UserId(1), &cancel)
        .await
        .expect("Failed to cancel");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(service.ledger().peek(product, &cancel).await, 100);

    let history = service.get_history(order.id, &cancel).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_status, OrderStatus::Ordered);
    assert_eq!(history[0].new_status, OrderStatus::Cancelled);
    assert_eq!(history[0].updated_by, UserId(1));
    assert_eq!(history[0].order_id, order.id);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_ship_then_deliver() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let order = service
        .place_order(UserId(1), product, 2, Metadata::new(), &cancel)
        .await
        .unwrap();
    let shipped = service
        .change_status(order.id, OrderStatus::Shipped, UserId(99), &cancel)
        .await
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert!(shipped.updated_at >= order.updated_at);

    let delivered = service
        .change_status(order.id, OrderStatus::Delivered, UserId(99), &cancel)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // Delivery does not touch stock.
    assert_eq!(service.ledger().peek(product, &cancel).await, 8);

    let steps: Vec<_> = service
        .get_history(order.id, &cancel)
        .await
        .unwrap()
        .into_iter()
        .map(|e| (e.previous_status, e.new_status))
        .collect();
    assert_eq!(
        steps,
        vec![
            (OrderStatus::Ordered, OrderStatus::Shipped),
            (OrderStatus::Shipped, OrderStatus::Delivered),
        ]
    );

    // Terminal: nothing further is legal.
    let err = service
        .change_status(order.id, OrderStatus::Cancelled, UserId(1), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    assert_eq!(service.ledger().peek(product, &cancel).await, 8);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_skipping_shipped_is_rejected() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let order = service
        .place_order(UserId(1), product, 1, Metadata::new(), &cancel)
        .await
        .unwrap();
    let err = service
        .change_status(order.id, OrderStatus::Delivered, UserId(99), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            current: OrderStatus::Ordered,
            target: OrderStatus::Delivered
        }
    ));

    let stored = service.get_order(order.id, &cancel).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Ordered);
    assert!(service.get_history(order.id, &cancel).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_same_status_is_a_no_op() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let order = service
        .place_order(UserId(1), product, 4, Metadata::new(), &cancel)
        .await
        .unwrap();
    let same = service
        .change_status(order.id, OrderStatus::Ordered, UserId(1), &cancel)
        .await
        .unwrap();
    assert_eq!(same, order);
    assert!(service.get_history(order.id, &cancel).await.unwrap().is_empty());
    assert_eq!(service.ledger().peek(product, &cancel).await, 6);

    // Same for a terminal status: cancelling twice restores once.
    service
        .change_status(order.id, OrderStatus::Cancelled, UserId(1), &cancel)
        .await
        .unwrap();
    service
        .change_status(order.id, OrderStatus::Cancelled, UserId(1), &cancel)
        .await
        .unwrap();
    assert_eq!(service.ledger().peek(product, &cancel).await, 10);
    assert_eq!(service.get_history(order.id, &cancel).await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_non_positive_quantity_is_invalid() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    for quantity in [0, -1] {
        let err = service
            .place_order(UserId(1), product, quantity, Metadata::new(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidArgument(_)));
    }
    assert_eq!(service.ledger().peek(product, &cancel).await, 10);
    assert!(service.list_all_orders(&cancel).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_zero_user_id_is_invalid() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let err = service
        .place_order(UserId(0), product, 1, Metadata::new(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidArgument(_)));
    assert_eq!(service.ledger().peek(product, &cancel).await, 10);
    assert!(service.list_all_orders(&cancel).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_insufficient_stock_leaves_inventory_unchanged() {
    let (system, product) = system_with_stock(3).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let err = service
        .place_order(UserId(1), product, 4, Metadata::new(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InsufficientInventory {
            requested: 4,
            available: 3,
            ..
        }
    ));
    assert_eq!(service.ledger().peek(product, &cancel).await, 3);

    // An unknown product simply has no stock.
    let err = service
        .place_order(UserId(1), ProductId::new(), 1, Metadata::new(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InsufficientInventory { available: 0, .. }
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reads_and_not_found() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let cancel = CancellationToken::new();

    let mut metadata = Metadata::new();
    metadata.insert("shipping_address".into(), json!({ "city": "Lisbon" }));

    let first = service
        .place_order(UserId(1), product, 1, metadata.clone(), &cancel)
        .await
        .unwrap();
    let second = service
        .place_order(UserId(2), product, 1, Metadata::new(), &cancel)
        .await
        .unwrap();
    let third = service
        .place_order(UserId(1), product, 1, Metadata::new(), &cancel)
        .await
        .unwrap();

    assert_eq!(
        service.get_order(first.id, &cancel).await.unwrap().metadata,
        metadata
    );

    let mine: Vec<_> = service
        .list_orders_for_user(UserId(1), &cancel)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(mine, vec![first.id, third.id]);

    let all = service.list_all_orders(&cancel).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].id, second.id);

    let unknown = oms_engine::model::OrderId::new();
    assert!(matches!(
        service.get_order(unknown, &cancel).await,
        Err(LifecycleError::NotFound { entity: "order", .. })
    ));
    assert!(matches!(
        service.get_history(unknown, &cancel).await,
        Err(LifecycleError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .change_status(unknown, OrderStatus::Shipped, UserId(99), &cancel)
            .await,
        Err(LifecycleError::NotFound { .. })
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancelled_caller_mutates_nothing() {
    let (system, product) = system_with_stock(10).await;
    let service = &system.service;
    let live = CancellationToken::new();

    let order = service
        .place_order(UserId(1), product, 2, Metadata::new(), &live)
        .await
        .unwrap();

    let cancelled = CancellationToken::new();
    cancelled.cancel();

    let err = service
        .place_order(UserId(1), product, 2, Metadata::new(), &cancelled)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());

    let err = service
        .change_status(order.id, OrderStatus::Cancelled, UserId(1), &cancelled)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());

    assert_eq!(service.ledger().peek(product, &live).await, 8);
    assert_eq!(
        service.get_order(order.id, &live).await.unwrap().status,
        OrderStatus::Ordered
    );
    assert_eq!(service.list_all_orders(&live).await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}
