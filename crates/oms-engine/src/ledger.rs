//! # Inventory Ledger
//!
//! Owns the stock counters' consistency. Every write to a product's quantity goes
//! through that product's critical section in an [`EntityLocks`] table owned by
//! the ledger, so concurrent reservations against one product behave as if they
//! ran one after another, while different products never wait for each other.
//!
//! | Operation | Locks | Fails with |
//! |-----------|-------|------------|
//! | [`peek`](InventoryLedger::peek) | no | never (0 on error) |
//! | [`reserve_and_decrement`](InventoryLedger::reserve_and_decrement) | product | `InvalidArgument`, `InsufficientInventory` |
//! | [`increment`](InventoryLedger::increment) | product | `InvalidArgument` |
//! | [`set_quantity`](InventoryLedger::set_quantity) | product | `InvalidArgument` |
//!
//! Storage failures and cancellation can surface from every locking operation.

use crate::error::LifecycleError;
use crate::model::ProductId;
use crate::store::InventoryStore;
use oms_framework::EntityLocks;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

pub struct InventoryLedger {
    store: Arc<dyn InventoryStore>,
    locks: EntityLocks<ProductId>,
}

impl InventoryLedger {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            locks: EntityLocks::new(),
        }
    }

    /// Snapshot of a product's stock without taking its lock. Unknown products
    /// and unreadable storage both report zero.
    pub async fn peek(&self, product_id: ProductId, cancel: &CancellationToken) -> i64 {
        match self.store.get_quantity(product_id, cancel).await {
            Ok(quantity) => quantity,
            Err(e) => {
                warn!(%product_id, error = %e, "Stock read failed, reporting zero");
                0
            }
        }
    }

    /// Takes `quantity` units if that many are available, atomically with respect
    /// to every other locking operation on the same product. Returns the stock
    /// left afterwards.
    ///
    /// Nothing is written when the check fails or `cancel` fires before the write.
    #[instrument(skip(self, cancel))]
    pub async fn reserve_and_decrement(
        &self,
        product_id: ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, LifecycleError> {
        if quantity <= 0 {
            return Err(LifecycleError::InvalidArgument(format!(
                "quantity must be positive, got {quantity}"
            )));
        }

        let guard = self.locks.acquire(&product_id, cancel).await?;
        let available = self.store.lock_and_fetch(&guard, cancel).await?;
        if available < quantity {
            debug!(available, "Not enough stock");
            return Err(LifecycleError::InsufficientInventory {
                product_id,
                requested: quantity,
                available,
            });
        }
        if cancel.is_cancelled() {
            return Err(LifecycleError::Cancelled);
        }

        let remaining = self
            .store
            .adjust_quantity(&guard, -quantity, cancel)
            .await?;
        info!(remaining, "Stock reserved");
        Ok(remaining)
    }

    /// Gives `quantity` units back (cancellation, compensation or restock),
    /// creating the record if the product was unknown. Returns the new stock.
    #[instrument(skip(self, cancel))]
    pub async fn increment(
        &self,
        product_id: ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, LifecycleError> {
        if quantity < 0 {
            return Err(LifecycleError::InvalidArgument(format!(
                "cannot increment by a negative quantity, got {quantity}"
            )));
        }

        let guard = self.locks.acquire(&product_id, cancel).await?;
        let stock = self.store.adjust_quantity(&guard, quantity, cancel).await?;
        info!(stock, "Stock restored");
        Ok(stock)
    }

    /// Administrative absolute set.
    #[instrument(skip(self, cancel))]
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, LifecycleError> {
        if quantity < 0 {
            return Err(LifecycleError::InvalidArgument(format!(
                "quantity cannot be negative, got {quantity}"
            )));
        }

        let guard = self.locks.acquire(&product_id, cancel).await?;
        let stock = self.store.set_quantity(&guard, quantity, cancel).await?;
        info!(stock, "Stock set");
        Ok(stock)
    }
}
