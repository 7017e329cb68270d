//! # Domain Model
//!
//! Plain data: records, typed ids and the payloads used to create them. Behaviour
//! lives in the store actors (`*_actor::entity`), the state machine ([`crate::fsm`])
//! and the lifecycle service ([`crate::service`]).

pub mod audit;
pub mod inventory;
pub mod order;
pub mod user;

pub use audit::{EntryId, NewStateLogEntry, OrderStateLogEntry};
pub use inventory::{InventoryRecord, ProductId};
pub use order::{Metadata, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, ParseStatusError};
pub use user::{Principal, Role, UserId};
