//! # Authorization Policy
//!
//! Decides whether a [`Principal`] may ask for something, before the request
//! reaches [`OrderLifecycleService`](crate::service::OrderLifecycleService). The
//! service itself only enforces lifecycle legality; callers consult a
//! [`StatusPolicy`] first and turn its rejection into
//! [`LifecycleError::Forbidden`](crate::error::LifecycleError::Forbidden) with `?`.
//!
//! ```rust
//! use oms_engine::model::{OrderStatus, Principal};
//! use oms_engine::policy::{RolePolicy, StatusPolicy};
//!
//! let policy = RolePolicy;
//! assert!(policy.authorize_placement(&Principal::admin(1)).is_err());
//! assert!(policy.authorize_placement(&Principal::customer(2)).is_ok());
//! ```

use crate::model::{Order, OrderId, OrderStatus, Principal, Role};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("administrators cannot place orders")]
    AdminCannotOrder,
    #[error("role {role} may not move an order to {target}")]
    TargetNotAllowed { role: Role, target: OrderStatus },
    #[error("order can only be cancelled while ORDERED, it is {current}")]
    NotCancellable { current: OrderStatus },
    #[error("order {order_id} belongs to another user")]
    NotOwner { order_id: OrderId },
}

/// Role rules layered on top of the state machine.
pub trait StatusPolicy: Send + Sync {
    fn authorize_placement(&self, principal: &Principal) -> Result<(), PolicyError>;

    fn authorize_status_change(
        &self,
        principal: &Principal,
        order: &Order,
        target: OrderStatus,
    ) -> Result<(), PolicyError>;
}

/// The default rule set:
/// - admins do not place orders, and only ship or deliver;
/// - customers only cancel their own orders, and only while still `ORDERED`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl StatusPolicy for RolePolicy {
    fn authorize_placement(&self, principal: &Principal) -> Result<(), PolicyError> {
        if principal.is_admin() {
            return Err(PolicyError::AdminCannotOrder);
        }
        Ok(())
    }

    fn authorize_status_change(
        &self,
        principal: &Principal,
        order: &Order,
        target: OrderStatus,
    ) -> Result<(), PolicyError> {
        if principal.is_admin() {
            return match target {
                OrderStatus::Shipped | OrderStatus::Delivered => Ok(()),
                _ => Err(PolicyError::TargetNotAllowed {
                    role: principal.role,
                    target,
                }),
            };
        }

        if target != OrderStatus::Cancelled {
            return Err(PolicyError::TargetNotAllowed {
                role: principal.role,
                target,
            });
        }
        if order.user_id != principal.user_id {
            return Err(PolicyError::NotOwner { order_id: order.id });
        }
        if order.status != OrderStatus::Ordered {
            return Err(PolicyError::NotCancellable {
                current: order.status,
            });
        }
        Ok(())
    }
}
