use super::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;
use oms_framework::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = std::convert::Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.quantity <= 0 {
            return Err(OrderError::InvalidQuantity(params.quantity));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            status: OrderStatus::Ordered,
            metadata: params.metadata,
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {
            OrderUpdate::Status(target) => {
                if self.status == target {
                    return Ok(());
                }
                if self.status.is_terminal() {
                    return Err(OrderError::Finalized {
                        current: self.status,
                        target,
                    });
                }
                self.status = target;
                self.updated_at = Utc::now();
                Ok(())
            }
        }
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
