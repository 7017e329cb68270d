//! # Inventory Client
//!
//! Provides the [`InventoryStore`] contract on top of the `InventoryRecord` actor.
//! An unknown product reads as zero; writes create the record on first use.
use crate::inventory_actor::{InventoryAction, InventoryActionResult};
use crate::model::{InventoryRecord, ProductId};
use crate::store::{InventoryStore, StorageError};
use async_trait::async_trait;
use oms_framework::{ActorClient, EntityGuard, FrameworkError, ResourceClient};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryRecord>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<InventoryRecord>) -> Self {
        Self { inner }
    }

    async fn quantity_of(
        &self,
        product_id: ProductId,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        let record = self.fetch(product_id, cancel).await?;
        Ok(record.map_or(0, |r| r.quantity))
    }

    async fn act(
        &self,
        product_id: ProductId,
        action: InventoryAction,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        match self
            .inner
            .perform_action(product_id, action, cancel)
            .await
            .map_err(Self::map_error)?
        {
            InventoryActionResult::Adjust(quantity)
                if matches!(action, InventoryAction::Adjust(_)) =>
            {
                Ok(quantity)
            }
            InventoryActionResult::Set(quantity) if matches!(action, InventoryAction::Set(_)) => {
                Ok(quantity)
            }
            other => Err(StorageError::Rejected(format!(
                "{action:?} answered with {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<InventoryRecord> for InventoryClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<InventoryRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StorageError::from(e)
    }
}

#[async_trait]
impl InventoryStore for InventoryClient {
    async fn get_quantity(
        &self,
        product_id: ProductId,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        self.quantity_of(product_id, cancel).await
    }

    #[instrument(skip_all, fields(product_id = %guard.key()))]
    async fn lock_and_fetch(
        &self,
        guard: &EntityGuard<ProductId>,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        debug!("Reading stock inside critical section");
        self.quantity_of(*guard.key(), cancel).await
    }

    #[instrument(skip(self, guard, cancel), fields(product_id = %guard.key()))]
    async fn adjust_quantity(
        &self,
        guard: &EntityGuard<ProductId>,
        delta: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        debug!("Sending request");
        self.act(*guard.key(), InventoryAction::Adjust(delta), cancel)
            .await
    }

    #[instrument(skip(self, guard, cancel), fields(product_id = %guard.key()))]
    async fn set_quantity(
        &self,
        guard: &EntityGuard<ProductId>,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError> {
        debug!("Sending request");
        self.act(*guard.key(), InventoryAction::Set(quantity), cancel)
            .await
    }
}
