//! # Store Clients
//!
//! Typed wrappers around the generic [`ResourceClient`](oms_framework::ResourceClient)s.
//! Each implements [`ActorClient`](oms_framework::ActorClient) for the shared
//! reads and the matching storage trait from [`crate::store`], which is what the
//! rest of the engine sees.

pub mod audit_client;
pub mod inventory_client;
pub mod order_client;

pub use audit_client::AuditClient;
pub use inventory_client::InventoryClient;
pub use order_client::OrderClient;
