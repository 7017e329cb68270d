use crate::model::{NewStateLogEntry, OrderId, OrderStateLogEntry};
use crate::store::{AuditStore, StorageError};
use async_trait::async_trait;
use oms_framework::{ActorClient, FrameworkError, ResourceClient};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Client for interacting with the Audit actor.
#[derive(Clone)]
pub struct AuditClient {
    inner: ResourceClient<OrderStateLogEntry>,
}

impl AuditClient {
    pub fn new(inner: ResourceClient<OrderStateLogEntry>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<OrderStateLogEntry> for AuditClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<OrderStateLogEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StorageError::from(e)
    }
}

#[async_trait]
impl AuditStore for AuditClient {
    #[instrument(skip(self, entry, cancel), fields(order_id = %entry.order_id))]
    async fn insert_entry(
        &self,
        entry: NewStateLogEntry,
        cancel: &CancellationToken,
    ) -> Result<OrderStateLogEntry, StorageError> {
        debug!("Sending request");
        self.inner
            .create(entry, cancel)
            .await
            .map_err(Self::map_error)
    }

    async fn fetch_entries_for_order(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Vec<OrderStateLogEntry>, StorageError> {
        self.fetch_all_where(
            move |entry: &OrderStateLogEntry| entry.order_id == order_id,
            cancel,
        )
        .await
    }
}
