use oms_engine::config::EngineConfig;
use oms_engine::error::LifecycleError;
use oms_engine::lifecycle::OrderSystem;
use oms_engine::model::{Metadata, OrderStatus, ProductId, UserId};
use proptest::prelude::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

async fn system_with_stock(stock: &[(ProductId, i64)]) -> Arc<OrderSystem> {
    let mut config = EngineConfig::test();
    config.seed_inventory = stock.to_vec();
    let system = OrderSystem::new(&config);
    system.seed(&config).await.expect("Failed to seed stock");
    Arc::new(system)
}

/// Places one order per quantity concurrently; returns what each call reported.
async fn place_concurrently(
    system: &Arc<OrderSystem>,
    product: ProductId,
    quantities: &[i64],
) -> Vec<(i64, Result<(), LifecycleError>)> {
    let handles: Vec<_> = quantities
        .iter()
        .enumerate()
        .map(|(n, &quantity)| {
            let system = Arc::clone(system);
            tokio::spawn(async move {
                let result = system
                    .service
                    .place_order(
                        UserId(n as u64 + 1),
                        product,
                        quantity,
                        Metadata::new(),
                        &CancellationToken::new(),
                    )
                    .await
                    .map(|_| ());
                (quantity, result)
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("place_order task panicked"));
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_orders_for_sixty_out_of_a_hundred() {
    let product = ProductId::new();
    let system = system_with_stock(&[(product, 100)]).await;

    let results = place_concurrently(&system, product, &[60, 60]).await;

    let succeeded = results.iter().filter(|(_, r)| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    assert!(results.iter().any(|(_, r)| matches!(
        r,
        Err(LifecycleError::InsufficientInventory {
            requested: 60,
            available: 40,
            ..
        })
    )));
    let cancel = CancellationToken::new();
    assert_eq!(system.service.ledger().peek(product, &cancel).await, 40);
    assert_eq!(system.service.list_all_orders(&cancel).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cancellations_restore_once() {
    let product = ProductId::new();
    let system = system_with_stock(&[(product, 10)]).await;
    let cancel = CancellationToken::new();

    let order = system
        .service
        .place_order(UserId(1), product, 4, Metadata::new(), &cancel)
        .await
        .unwrap();
    let order_id = order.id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let system = Arc::clone(&system);
            tokio::spawn(async move {
                system
                    .service
                    .change_status(
                        order_id,
                        OrderStatus::Cancelled,
                        UserId(1),
                        &CancellationToken::new(),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        let order = handle.await.unwrap().expect("cancel should succeed or be a no-op");
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    assert_eq!(system.service.ledger().peek(product, &cancel).await, 10);
    assert_eq!(
        system.service.get_history(order.id, &cancel).await.unwrap().len(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ship_and_cancel_race_has_one_winner() {
    let product = ProductId::new();
    let system = system_with_stock(&[(product, 10)]).await;
    let cancel = CancellationToken::new();
    let order = system
        .service
        .place_order(UserId(1), product, 3, Metadata::new(), &cancel)
        .await
        .unwrap();
    let order_id = order.id;

    let race = |target: OrderStatus| {
        let system = Arc::clone(&system);
        tokio::spawn(async move {
            system
                .service
                .change_status(order_id, target, UserId(1), &CancellationToken::new())
                .await
        })
    };
    let ship = race(OrderStatus::Shipped);
    let cancel_order = race(OrderStatus::Cancelled);
    let shipped = ship.await.unwrap();
    let cancelled = cancel_order.await.unwrap();

    // Whichever ran second saw a status it cannot leave that way.
    assert!(shipped.is_ok() != cancelled.is_ok());
    let final_status = system.service.get_order(order_id, &cancel).await.unwrap().status;
    let stock = system.service.ledger().peek(product, &cancel).await;
    match final_status {
        OrderStatus::Shipped => assert_eq!(stock, 7),
        OrderStatus::Cancelled => assert_eq!(stock, 10),
        other => panic!("unexpected final status {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_products_do_not_interfere() {
    let a = ProductId::new();
    let b = ProductId::new();
    let system = system_with_stock(&[(a, 50), (b, 50)]).await;

    let (left, right) = tokio::join!(
        place_concurrently(&system, a, &[5; 10]),
        place_concurrently(&system, b, &[7; 10]),
    );
    assert_eq!(left.iter().filter(|(_, r)| r.is_ok()).count(), 10);
    assert_eq!(right.iter().filter(|(_, r)| r.is_ok()).count(), 7);

    let cancel = CancellationToken::new();
    assert_eq!(system.service.ledger().peek(a, &cancel).await, 0);
    assert_eq!(system.service.ledger().peek(b, &cancel).await, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_concurrent_orders_never_oversell(
        stock in 0i64..200,
        quantities in prop::collection::vec(1i64..50, 1..24),
    ) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        let (reserved, remaining, orders) = runtime.block_on(async {
            let product = ProductId::new();
            let system = system_with_stock(&[(product, stock)]).await;
            let results = place_concurrently(&system, product, &quantities).await;

            for (_, result) in &results {
                if let Err(e) = result {
                    assert!(
                        matches!(e, LifecycleError::InsufficientInventory { .. }),
                        "unexpected failure: {e}"
                    );
                }
            }
            let reserved: i64 = results
                .iter()
                .filter(|(_, r)| r.is_ok())
                .map(|(q, _)| q)
                .sum();
            let cancel = CancellationToken::new();
            let remaining = system.service.ledger().peek(product, &cancel).await;
            let orders = system.service.list_all_orders(&cancel).await.unwrap();
            let ordered: i64 = orders.iter().map(|o| o.quantity).sum();
            (reserved, remaining, ordered)
        });

        prop_assert!(reserved <= stock);
        prop_assert_eq!(remaining, stock - reserved);
        prop_assert_eq!(orders, reserved);
    }
}
