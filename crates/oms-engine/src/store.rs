//! # Persistence Collaborators
//!
//! The narrow storage contracts the lifecycle engine depends on. The engine only
//! ever talks to these traits, so the in-memory actor stores in
//! [`crate::clients`] can be swapped for a database-backed implementation
//! without touching [`crate::service`] or [`crate::ledger`].
//!
//! Every call takes the caller's [`CancellationToken`]. An implementation must not
//! start a write once the token has fired.
//!
//! ## Inventory and the critical section
//!
//! [`InventoryStore::lock_and_fetch`] and the writes take an
//! [`EntityGuard<ProductId>`] instead of a bare product id: they may only be called
//! by someone currently holding that product's critical section. A relational
//! backend would map `lock_and_fetch` to `SELECT ... FOR UPDATE` inside the
//! transaction the guard stands for.

use crate::model::{
    NewStateLogEntry, Order, OrderCreate, OrderId, OrderStateLogEntry, OrderStatus, ProductId,
    UserId,
};
use async_trait::async_trait;
use oms_framework::{EntityGuard, FrameworkError};
use tokio_util::sync::CancellationToken;

/// Failure reported by a storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record already exists: {0}")]
    AlreadyExists(String),
    #[error("storage request cancelled")]
    Cancelled,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

impl From<FrameworkError> for StorageError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => StorageError::NotFound(id),
            FrameworkError::AlreadyExists(id) => StorageError::AlreadyExists(id),
            FrameworkError::Cancelled => StorageError::Cancelled,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                StorageError::Unavailable(e.to_string())
            }
            FrameworkError::EntityError(inner) => StorageError::Rejected(inner.to_string()),
        }
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order with status `ORDERED` and returns it.
    async fn insert_order(
        &self,
        order: OrderCreate,
        cancel: &CancellationToken,
    ) -> Result<Order, StorageError>;

    async fn fetch_order(
        &self,
        id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Option<Order>, StorageError>;

    /// Orders owned by `user_id`, oldest first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, StorageError>;

    /// Every order, oldest first.
    async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Order>, StorageError>;

    /// Writes the new status and returns the order as persisted.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        cancel: &CancellationToken,
    ) -> Result<Order, StorageError>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Unlocked snapshot read. Unknown products have quantity zero.
    async fn get_quantity(
        &self,
        product_id: ProductId,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError>;

    /// Reads the quantity inside the product's critical section.
    async fn lock_and_fetch(
        &self,
        guard: &EntityGuard<ProductId>,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError>;

    /// Adds `delta` (possibly negative), creating the record if absent.
    /// Returns the new quantity.
    async fn adjust_quantity(
        &self,
        guard: &EntityGuard<ProductId>,
        delta: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError>;

    /// Overwrites the quantity, creating the record if absent.
    async fn set_quantity(
        &self,
        guard: &EntityGuard<ProductId>,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<i64, StorageError>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert_entry(
        &self,
        entry: NewStateLogEntry,
        cancel: &CancellationToken,
    ) -> Result<OrderStateLogEntry, StorageError>;

    /// Entries for one order, oldest first.
    async fn fetch_entries_for_order(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Vec<OrderStateLogEntry>, StorageError>;
}
