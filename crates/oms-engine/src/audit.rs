//! # Audit Log
//!
//! Append-only history of status transitions. Appending is best effort from the
//! lifecycle service's point of view: a failed append is reported to the caller
//! of [`AuditLog::append`], which decides whether it matters.

use crate::model::{NewStateLogEntry, OrderId, OrderStateLogEntry, OrderStatus, UserId};
use crate::store::{AuditStore, StorageError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct AuditLog {
    store: Arc<dyn AuditStore>,
}

impl AuditLog {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    pub async fn append(
        &self,
        order_id: OrderId,
        previous_status: OrderStatus,
        new_status: OrderStatus,
        updated_by: UserId,
        updated_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<OrderStateLogEntry, StorageError> {
        let entry = NewStateLogEntry {
            order_id,
            previous_status,
            new_status,
            updated_by,
            updated_at,
        };
        self.store.insert_entry(entry, cancel).await
    }

    /// Entries for `order_id`, oldest first. Entries with equal timestamps keep
    /// the order they were written in.
    pub async fn query(
        &self,
        order_id: OrderId,
        cancel: &CancellationToken,
    ) -> Result<Vec<OrderStateLogEntry>, StorageError> {
        let mut entries = self.store.fetch_entries_for_order(order_id, cancel).await?;
        entries.sort_by_key(|entry| entry.updated_at);
        Ok(entries)
    }
}
