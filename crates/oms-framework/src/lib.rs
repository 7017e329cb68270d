//! # Store Framework
//!
//! Building blocks for the order management engine's in-memory stores: a generic
//! actor that owns one kind of record, a typed client to talk to it, and an
//! entity-keyed lock table for business-level critical sections.
//!
//! ## Two kinds of serialisation
//!
//! The engine needs two different guarantees and this crate keeps them apart:
//!
//! - **Storage consistency** ([`ResourceActor`]): every store is a Tokio task that
//!   owns its records and processes one request at a time. A single request is
//!   atomic; nobody ever observes a half-applied record.
//! - **Business atomicity** ([`EntityLocks`]): a read-check-write sequence spanning
//!   several requests (read stock, compare, decrement) needs the entity to stay
//!   put in between. Callers take an [`EntityGuard`] for the entity's key for the
//!   duration of the sequence. Guards for different keys never contend.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - record type, create payload, updates,
//!    actions, and the domain error type.
//! 2. **Runtime Layer** ([`ResourceActor`]) - mailbox processing and storage.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!    with cancellation.
//!
//! ```rust
//! use oms_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, label: String }
//!
//! #[derive(Debug)] struct ShelfCreate { label: String }
//! #[derive(Debug)] struct Relabel(String);
//! #[derive(Debug, thiserror::Error)] #[error("empty label")] struct EmptyLabel;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32;
//!     type Create = ShelfCreate;
//!     type Update = Relabel;
//!     type Action = std::convert::Infallible;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = EmptyLabel;
//!
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!
//!     async fn on_update(&mut self, update: Relabel, _ctx: &()) -> Result<(), Self::Error> {
//!         if update.0.is_empty() {
//!             return Err(EmptyLabel);
//!         }
//!         self.label = update.0;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: Self::Action, _: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Shelf>::new(10, |_| 1);
//!     tokio::spawn(actor.run(()));
//!
//!     let cancel = CancellationToken::new();
//!     let shelf = client.create(ShelfCreate { label: "A".into() }, &cancel).await.unwrap();
//!
//!     // A rejected update leaves the stored record untouched.
//!     assert!(client.update(shelf.id, Relabel(String::new()), &cancel).await.is_err());
//!     let stored = client.get(shelf.id, &cancel).await.unwrap().unwrap();
//!     assert_eq!(stored.label, "A");
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run()`, not `new()`. Every hook receives the
//! context by reference, so an entity can consult other stores while it is being
//! created or updated without the stores having to know about each other up front.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`ResourceClient`] from scripted
//! expectations, which is how failure paths such as a store rejecting an insert
//! are exercised. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod locks;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use locks::{EntityGuard, EntityLocks};
pub use message::{Filter, FilterBox, ResourceRequest, Response};
pub use crate::tracing::setup_tracing;
