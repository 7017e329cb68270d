//! # Order Client
//!
//! Provides the [`OrderStore`] contract on top of the `Order` actor.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, UserId};
use crate::store::{OrderStore, StorageError};
use async_trait::async_trait;
use oms_framework::{ActorClient, FrameworkError, ResourceClient};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StorageError::from(e)
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, order, cancel), fields(user_id = %order.user_id, product_id = %order.product_id))]
    async fn insert_order(
        &self,
        order: OrderCreate,
        cancel: &CancellationToken,
    ) -> Result<Order, StorageError> {
        debug!("Sending request");
        self.inner
            .create(order, cancel)
            .await
            .map_err(Self::map_error)
    }

    async fn fetch_order(
        &self,
        id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Option<Order>, StorageError> {
        self.fetch(id, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn list_by_user(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, StorageError> {
        self.fetch_all_where(move |order: &Order| order.user_id == user_id, cancel)
            .await
    }

    async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Order>, StorageError> {
        self.fetch_all_where(|_: &Order| true, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        cancel: &CancellationToken,
    ) -> Result<Order, StorageError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate::Status(status), cancel)
            .await
            .map_err(Self::map_error)
    }
}
