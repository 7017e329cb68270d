use crate::model::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("order is {current} and can no longer change to {target}")]
    Finalized {
        current: OrderStatus,
        target: OrderStatus,
    },
}
