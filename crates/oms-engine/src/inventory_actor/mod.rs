//! # Inventory Actor
//!
//! In-memory stock counters, one [`InventoryRecord`] per product.
//!
//! ## Overview
//!
//! Beyond the generic vocabulary, inventory is changed through custom actions:
//! a relative [`InventoryAction::Adjust`] (decrement on reservation, increment on
//! cancellation or restock) and an absolute [`InventoryAction::Set`] for
//! administrative corrections.
//!
//! A product nobody has mentioned yet behaves as a record with quantity zero: `Get`
//! answers `None` (the clients read that as zero), and the first action against it
//! creates the record.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](oms_framework::ActorEntity) implementation for [`InventoryRecord`]
//! - [`error`] - [`InventoryError`] for the never-negative guard
//! - [`actions`] - [`InventoryAction`] and [`InventoryActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Not a critical section
//!
//! Each action is atomic inside the actor, but "read, compare, then decrement" is
//! three requests. The check-then-act sequence is serialised by
//! [`InventoryLedger`](crate::ledger::InventoryLedger), which holds the product's
//! lock across it. The `Underflow` guard here is the last line, not the mechanism.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::InventoryRecord;
use oms_framework::{ResourceActor, ResourceClient};
use std::convert::Infallible;

/// Creates a new Inventory actor and its client. Records are keyed by product id
/// and only ever come into being through [`ActorEntity::materialize`](oms_framework::ActorEntity::materialize),
/// so there is no create payload.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<InventoryRecord>, ResourceClient<InventoryRecord>) {
    ResourceActor::new(buffer_size, |never: &Infallible| match *never {})
}
