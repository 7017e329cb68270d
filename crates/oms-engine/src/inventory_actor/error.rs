use crate::model::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("adjusting {product_id} by {delta} would leave {available} below zero")]
    Underflow {
        product_id: ProductId,
        available: i64,
        delta: i64,
    },
    #[error("adjusting {product_id} by {delta} would overflow {available}")]
    Overflow {
        product_id: ProductId,
        available: i64,
        delta: i64,
    },
    #[error("inventory quantity cannot be negative, got {0}")]
    NegativeQuantity(i64),
}
