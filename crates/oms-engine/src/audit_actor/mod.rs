//! # Audit Actor
//!
//! Append-only store of [`OrderStateLogEntry`] records. The entity has no update
//! and no actions (both are `Infallible`), so once an entry is written there is
//! no request that could change it.

pub mod entity;

use crate::model::{EntryId, NewStateLogEntry, OrderStateLogEntry};
use oms_framework::{ResourceActor, ResourceClient};

/// Creates a new Audit actor and its client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<OrderStateLogEntry>, ResourceClient<OrderStateLogEntry>) {
    ResourceActor::new(buffer_size, |_: &NewStateLogEntry| EntryId::new())
}
