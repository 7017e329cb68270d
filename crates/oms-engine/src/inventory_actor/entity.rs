use super::{InventoryAction, InventoryActionResult, InventoryError};
use crate::model::{InventoryRecord, ProductId};
use async_trait::async_trait;
use oms_framework::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for InventoryRecord {
    type Id = ProductId;
    type Create = Infallible;
    type Update = Infallible;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(_id: ProductId, params: Infallible) -> Result<Self, Self::Error> {
        match params {}
    }

    fn materialize(id: &ProductId) -> Option<Self> {
        Some(Self::empty(*id))
    }

    async fn on_update(&mut self, update: Self::Update, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &(),
    ) -> Result<InventoryActionResult, Self::Error> {
        match action {
            InventoryAction::Adjust(delta) => {
                let next = self
                    .quantity
                    .checked_add(delta)
                    .ok_or(InventoryError::Overflow {
                        product_id: self.product_id,
                        available: self.quantity,
                        delta,
                    })?;
                if next < 0 {
                    return Err(InventoryError::Underflow {
                        product_id: self.product_id,
                        available: self.quantity,
                        delta,
                    });
                }
                self.quantity = next;
                Ok(InventoryActionResult::Adjust(next))
            }
            InventoryAction::Set(quantity) => {
                if quantity < 0 {
                    return Err(InventoryError::NegativeQuantity(quantity));
                }
                self.quantity = quantity;
                Ok(InventoryActionResult::Set(quantity))
            }
        }
    }
}
