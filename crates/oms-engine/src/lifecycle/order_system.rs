use crate::clients::{AuditClient, InventoryClient, OrderClient};
use crate::config::EngineConfig;
use crate::error::LifecycleError;
use crate::service::OrderLifecycleService;
use crate::{audit_actor, inventory_actor, order_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("store actor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The running engine: three store actors and the service wired to them.
pub struct OrderSystem {
    pub service: OrderLifecycleService,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the store actors. Must be called inside a Tokio runtime.
    pub fn new(config: &EngineConfig) -> Self {
        let capacity = config.mailbox_capacity;

        let (order_actor, order_client) = order_actor::new(capacity);
        let (inventory_actor, inventory_client) = inventory_actor::new(capacity);
        let (audit_actor, audit_client) = audit_actor::new(capacity);

        let handles = vec![
            tokio::spawn(order_actor.run(())),
            tokio::spawn(inventory_actor.run(())),
            tokio::spawn(audit_actor.run(())),
        ];

        let service = OrderLifecycleService::new(
            Arc::new(OrderClient::new(order_client)),
            Arc::new(InventoryClient::new(inventory_client)),
            Arc::new(AuditClient::new(audit_client)),
        );

        info!(capacity, "Order system started");
        Self { service, handles }
    }

    /// Applies the configured initial stock.
    pub async fn seed(&self, config: &EngineConfig) -> Result<(), LifecycleError> {
        let cancel = CancellationToken::new();
        for (product_id, quantity) in &config.seed_inventory {
            self.service
                .ledger()
                .set_quantity(*product_id, *quantity, &cancel)
                .await?;
        }
        info!(products = config.seed_inventory.len(), "Inventory seeded");
        Ok(())
    }

    /// Stops every actor and waits for them to finish.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down order system");

        // Dropping the service drops the clients, which closes the mailboxes.
        drop(self.service);

        for handle in self.handles {
            handle.await?;
        }

        info!("Order system shut down");
        Ok(())
    }
}
