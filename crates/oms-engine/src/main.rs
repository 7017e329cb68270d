//! # Order Management Demo
//!
//! Walks the engine through its main paths against the in-memory stores:
//! 1.  Seeding stock from [`EngineConfig`] (a demo product is added when
//!     `OMS_SEED_INVENTORY` is empty).
//! 2.  Placing an order and cancelling it, which gives the stock back.
//! 3.  Placing an order and shipping then delivering it.
//! 4.  A rejected ORDERED -> DELIVERED skip, and a policy rejection.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin oms-demo
//! ```

use oms_engine::config::EngineConfig;
use oms_engine::error::LifecycleError;
use oms_engine::lifecycle::OrderSystem;
use oms_engine::model::{Metadata, OrderStatus, Principal, ProductId};
use oms_engine::policy::{RolePolicy, StatusPolicy};
use oms_framework::setup_tracing;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);

    if config.seed_inventory.is_empty() {
        config.seed_inventory.push((ProductId::new(), 100));
    }
    let (product, _) = config.seed_inventory[0];

    let system = OrderSystem::new(&config);
    system.seed(&config).await?;

    let policy = RolePolicy;
    let customer = Principal::customer(1);
    let admin = Principal::admin(99);
    let cancel = CancellationToken::new();
    let service = &system.service;

    let mut metadata = Metadata::new();
    metadata.insert(
        "shipping_address".to_string(),
        json!({ "street": "1 Main St", "city": "Springfield" }),
    );

    // Place then cancel: stock goes down and comes back.
    let span = tracing::info_span!("place_and_cancel");
    let cancelled = async {
        policy.authorize_placement(&customer)?;
        let order = service
            .place_order(customer.user_id, product, 5, metadata.clone(), &cancel)
            .await?;
        let stock = service.ledger().peek(product, &cancel).await;
        info!(order_id = %order.id, stock, "Placed");

        policy.authorize_status_change(&customer, &order, OrderStatus::Cancelled)?;
        let order = service
            .change_status(order.id, OrderStatus::Cancelled, customer.user_id, &cancel)
            .await?;
        let stock = service.ledger().peek(product, &cancel).await;
        info!(order_id = %order.id, stock, "Cancelled");
        Ok::<_, LifecycleError>(order)
    }
    .instrument(span)
    .await?;

    // Place, ship, deliver.
    let span = tracing::info_span!("place_ship_deliver");
    let delivered = async {
        let order = service
            .place_order(customer.user_id, product, 2, metadata, &cancel)
            .await?;

        match service
            .change_status(order.id, OrderStatus::Delivered, admin.user_id, &cancel)
            .await
        {
            Err(e @ LifecycleError::InvalidTransition { .. }) => warn!(error = %e, "Rejected as expected"),
            other => error!(?other, "Skipping SHIPPED should have been rejected"),
        }

        for target in [OrderStatus::Shipped, OrderStatus::Delivered] {
            let current = service.get_order(order.id, &cancel).await?;
            policy.authorize_status_change(&admin, &current, target)?;
            service
                .change_status(order.id, target, admin.user_id, &cancel)
                .await?;
        }
        Ok::<_, LifecycleError>(order.id)
    }
    .instrument(span)
    .await?;

    // Admins do not place orders.
    if let Err(e) = policy.authorize_placement(&admin) {
        warn!(error = %e, "Policy rejected admin order");
    }

    for order_id in [cancelled.id, delivered] {
        for entry in service.get_history(order_id, &cancel).await? {
            info!(
                %order_id,
                from = %entry.previous_status,
                to = %entry.new_status,
                by = %entry.updated_by,
                at = %entry.updated_at,
                "History"
            );
        }
    }
    let orders = service.list_all_orders(&cancel).await?.len();
    let stock = service.ledger().peek(product, &cancel).await;
    info!(orders, stock, "Final state");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
