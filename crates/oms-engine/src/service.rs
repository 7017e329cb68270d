//! # Order Lifecycle Service
//!
//! Coordinates the ledger, the order store, the state machine and the audit log.
//!
//! ## Placing an order
//!
//! 1. Reserve stock through the [`InventoryLedger`] (product lock held only for
//!    the check and the decrement).
//! 2. Insert the order as `ORDERED`.
//! 3. If the insert fails, give the stock back. A failed give-back is folded into
//!    [`LifecycleError::CreateFailed`], never dropped.
//!
//! The two steps are not one transaction. Between them, inventory is short by the
//! order's quantity; if the process dies there, an operator has to fix the count.
//!
//! ## Changing status
//!
//! Runs inside the order's critical section (an [`EntityLocks`] table keyed by
//! order id), so concurrent requests for the same order are applied one after the
//! other and a cancellation restores stock exactly once.
//!
//! 1. Fetch; same status is a no-op.
//! 2. Validate with [`crate::fsm`].
//! 3. Persist the new status.
//! 4. Append to the audit log. A failure is logged and otherwise ignored.
//! 5. On `CANCELLED`, return the quantity to inventory. A failure is logged and
//!    otherwise ignored.
//!
//! ## Cancellation
//!
//! The caller's token is honoured until the first write. Everything after a
//! committed write (order insert after a reservation, compensation, audit
//! append, restock) runs to completion with a fresh token.
//!
//! ## Authorization
//!
//! Not checked here. Callers consult a [`StatusPolicy`](crate::policy::StatusPolicy)
//! first.

use crate::audit::AuditLog;
use crate::error::LifecycleError;
use crate::fsm;
use crate::ledger::InventoryLedger;
use crate::model::{
    Metadata, Order, OrderCreate, OrderId, OrderStateLogEntry, OrderStatus, ProductId, UserId,
};
use crate::store::{AuditStore, InventoryStore, OrderStore};
use chrono::Utc;
use oms_framework::EntityLocks;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

pub struct OrderLifecycleService {
    orders: Arc<dyn OrderStore>,
    ledger: InventoryLedger,
    audit: AuditLog,
    /// One slot per order that has ever changed status.
    order_locks: EntityLocks<OrderId>,
}

impl OrderLifecycleService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryStore>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            orders,
            ledger: InventoryLedger::new(inventory),
            audit: AuditLog::new(audit),
            order_locks: EntityLocks::new(),
        }
    }

    /// The ledger backing this service, for stock reads and administrative sets.
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    #[instrument(skip(self, metadata, cancel))]
    pub async fn place_order(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
        metadata: Metadata,
        cancel: &CancellationToken,
    ) -> Result<Order, LifecycleError> {
        if user_id.0 == 0 {
            return Err(LifecycleError::InvalidArgument(format!(
                "{user_id} is not a valid user"
            )));
        }
        if quantity <= 0 {
            return Err(LifecycleError::InvalidArgument(format!(
                "quantity must be positive, got {quantity}"
            )));
        }

        self.ledger
            .reserve_and_decrement(product_id, quantity, cancel)
            .await?;

        // Stock is gone now; the rest must finish regardless of the caller.
        let committed = CancellationToken::new();
        let params = OrderCreate {
            user_id,
            product_id,
            quantity,
            metadata,
        };
        match self.orders.insert_order(params, &committed).await {
            Ok(order) => {
                info!(order_id = %order.id, quantity, "Order placed");
                Ok(order)
            }
            Err(source) => {
                warn!(error = %source, quantity, "Order insert failed, restoring stock");
                let compensation = match self
                    .ledger
                    .increment(product_id, quantity, &committed)
                    .await
                {
                    Ok(_) => None,
                    Err(e) => {
                        error!(error = %e, quantity, "Stock restore failed, inventory is short");
                        Some(Box::new(e))
                    }
                };
                Err(LifecycleError::CreateFailed {
                    source,
                    compensation,
                })
            }
        }
    }

    #[instrument(skip(self, cancel))]
    pub async fn change_status(
        &self,
        order_id: OrderId,
        target: OrderStatus,
        updated_by: UserId,
        cancel: &CancellationToken,
    ) -> Result<Order, LifecycleError> {
        let _guard = self.order_locks.acquire(&order_id, cancel).await?;

        let order = self.require_order(order_id, cancel).await?;
        let previous = order.status;
        if previous == target {
            return Ok(order);
        }
        fsm::validate_transition(previous, target)?;

        if cancel.is_cancelled() {
            return Err(LifecycleError::Cancelled);
        }
        let updated = self.orders.update_status(order_id, target, cancel).await?;
        info!(%previous, "Status changed");

        let committed = CancellationToken::new();
        if let Err(e) = self
            .audit
            .append(order_id, previous, target, updated_by, Utc::now(), &committed)
            .await
        {
            warn!(error = %e, %previous, "Audit append failed, status change kept");
        }

        if fsm::requires_inventory_restore(target) {
            if let Err(e) = self
                .ledger
                .increment(order.product_id, order.quantity, &committed)
                .await
            {
                error!(
                    error = %e,
                    product_id = %order.product_id,
                    quantity = order.quantity,
                    "Stock restore after cancellation failed"
                );
            }
        }

        Ok(updated)
    }

    pub async fn get_order(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Order, LifecycleError> {
        self.require_order(order_id, cancel).await
    }

    pub async fn list_orders_for_user(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, LifecycleError> {
        Ok(self.orders.list_by_user(user_id, cancel).await?)
    }

    pub async fn list_all_orders(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, LifecycleError> {
        Ok(self.orders.list_all(cancel).await?)
    }

    /// Status changes of `order_id`, oldest first.
    pub async fn get_history(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Vec<OrderStateLogEntry>, LifecycleError> {
        self.require_order(order_id, cancel).await?;
        Ok(self.audit.query(order_id, cancel).await?)
    }

    async fn require_order(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Order, LifecycleError> {
        self.orders
            .fetch_order(order_id, cancel)
            .await?
            .ok_or_else(|| LifecycleError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }
}
