use crate::model::{EntryId, NewStateLogEntry, OrderStateLogEntry};
use async_trait::async_trait;
use oms_framework::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for OrderStateLogEntry {
    type Id = EntryId;
    type Create = NewStateLogEntry;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = Infallible;

    fn from_create_params(id: EntryId, params: NewStateLogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            order_id: params.order_id,
            previous_status: params.previous_status,
            new_status: params.new_status,
            updated_by: params.updated_by,
            updated_at: params.updated_at,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
