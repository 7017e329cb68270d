//! # Order State Machine
//!
//! Which status changes are legal, and nothing else. The table knows nothing about
//! who is asking; role rules live in [`crate::policy`].
//!
//! | Current   | Allowed targets       |
//! |-----------|-----------------------|
//! | ORDERED   | SHIPPED, CANCELLED    |
//! | SHIPPED   | DELIVERED             |
//! | DELIVERED | (terminal)            |
//! | CANCELLED | (terminal)            |
//!
//! Requesting the current status is always legal. ORDERED to DELIVERED is not
//! in the table: an order has to be shipped first, whoever asks.

use crate::model::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid status transition from {current} to {target}")]
pub struct TransitionError {
    pub current: OrderStatus,
    pub target: OrderStatus,
}

/// Statuses reachable in one step from `current`, identity excluded.
pub fn allowed_targets(current: OrderStatus) -> &'static [OrderStatus] {
    match current {
        OrderStatus::Ordered => &[OrderStatus::Shipped, OrderStatus::Cancelled],
        OrderStatus::Shipped => &[OrderStatus::Delivered],
        OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
}

pub fn can_transition(current: OrderStatus, target: OrderStatus) -> bool {
    current == target || allowed_targets(current).contains(&target)
}

pub fn validate_transition(
    current: OrderStatus,
    target: OrderStatus,
) -> Result<(), TransitionError> {
    if can_transition(current, target) {
        Ok(())
    } else {
        Err(TransitionError { current, target })
    }
}

/// Whether entering `target` gives the order's quantity back to inventory.
pub fn requires_inventory_restore(target: OrderStatus) -> bool {
    target == OrderStatus::Cancelled
}
