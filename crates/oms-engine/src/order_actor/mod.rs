//! # Order Actor
//!
//! In-memory order store. Orders get a random [`OrderId`](crate::model::OrderId)
//! on insertion and are never deleted.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](oms_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`], the record-level guards
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Guards
//!
//! The record refuses to be created with a non-positive quantity and refuses any
//! status change once its status is terminal. Whether a transition is *legal*
//! is the state machine's call ([`crate::fsm`]); these guards only make sure a
//! buggy caller cannot corrupt a finished order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Order, OrderCreate, OrderId};
use oms_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size, |_: &OrderCreate| OrderId::new())
}
