//! # Framework Errors
//!
//! Errors raised by the plumbing itself (closed mailboxes, cancelled requests,
//! missing ids), as opposed to the domain errors raised by entity hooks. Entity
//! errors travel boxed inside [`FrameworkError::EntityError`] so that callers can
//! downcast them back to the concrete type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Request cancelled before it was applied")]
    Cancelled,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns the entity error as `E` when this is an [`FrameworkError::EntityError`]
    /// carrying that type.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
