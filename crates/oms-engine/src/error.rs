//! # Lifecycle Errors
//!
//! [`LifecycleError`] is what callers of the engine see. Storage and framework
//! errors are folded into it; cancellation stays distinguishable wherever it came
//! from.

use crate::fsm::TransitionError;
use crate::model::{OrderStatus, ProductId};
use crate::policy::PolicyError;
use crate::store::StorageError;
use oms_framework::FrameworkError;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("insufficient inventory for {product_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("invalid status transition from {current} to {target}")]
    InvalidTransition {
        current: OrderStatus,
        target: OrderStatus,
    },

    #[error("forbidden: {0}")]
    Forbidden(#[from] PolicyError),

    #[error("storage error: {0}")]
    Storage(StorageError),

    /// The order could not be stored after its stock was reserved. `compensation`
    /// is set when giving the stock back failed too, leaving inventory short by
    /// the order's quantity until someone corrects it.
    #[error("failed to create order: {source}{}", compensation_suffix(.compensation))]
    CreateFailed {
        source: StorageError,
        compensation: Option<Box<LifecycleError>>,
    },

    #[error("operation cancelled")]
    Cancelled,
}

fn compensation_suffix(compensation: &Option<Box<LifecycleError>>) -> String {
    match compensation {
        Some(e) => format!(" (inventory restore also failed: {e})"),
        None => String::new(),
    }
}

impl LifecycleError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LifecycleError::Cancelled)
    }
}

impl From<StorageError> for LifecycleError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Cancelled => LifecycleError::Cancelled,
            other => LifecycleError::Storage(other),
        }
    }
}

impl From<FrameworkError> for LifecycleError {
    fn from(e: FrameworkError) -> Self {
        StorageError::from(e).into()
    }
}

impl From<TransitionError> for LifecycleError {
    fn from(e: TransitionError) -> Self {
        LifecycleError::InvalidTransition {
            current: e.current,
            target: e.target,
        }
    }
}
