//! # Entity Contract
//!
//! The [`ActorEntity`] trait is what a record type implements to be stored and
//! served by a [`ResourceActor`](crate::ResourceActor).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored entity must implement to be managed by `ResourceActor`.
///
/// # Architecture Note
/// By defining one contract that orders, inventory records and audit entries all
/// satisfy, the message loop in `ResourceActor` is written once and reused for each
/// of them.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they may await other services. The `Context`
/// associated type is injected into every hook when the actor starts running
/// ("late binding": dependencies go to `run()`, not `new()`).
///
/// # Copy-on-write hooks
/// `on_update` and `handle_action` are invoked on a clone of the stored entity.
/// The clone replaces the stored value only when the hook returns `Ok`, so a hook
/// that rejects a request half way through never leaves a partial mutation behind.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g. a UUID newtype).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug + 'static;

    /// The data required to update an existing instance.
    /// Use `std::convert::Infallible` for entities that are never updated.
    type Update: Send + Sync + Debug + 'static;

    /// Enum representing entity-specific operations (e.g. `Adjust(delta)`).
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// The error type for this entity.
    ///
    /// One error enum per entity rather than one per action: callers match on a
    /// single type, at the cost of some precision about which action raises what.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the id and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Builds a default entity for an id that has never been stored.
    ///
    /// Returning `Some` makes `Action` requests against unknown ids create the
    /// entity on first reference instead of failing with `NotFound`. `Get` and
    /// `Update` never materialize.
    fn materialize(_id: &Self::Id) -> Option<Self> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    // --- Action Handler (Async) ---

    /// Handle a custom entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
