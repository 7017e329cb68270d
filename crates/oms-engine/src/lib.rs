//! # Order Management Engine
//!
//! Orders against a finite, shared inventory: stock is reserved atomically when
//! an order is placed, orders move through a small state machine, cancellations
//! give stock back, and every status change is recorded.
//!
//! - [`service`] - [`OrderLifecycleService`](service::OrderLifecycleService), the entry point
//! - [`ledger`] - per-product, lock-scoped stock operations
//! - [`fsm`] - which status changes are legal
//! - [`policy`] - which roles may ask for them
//! - [`audit`] - append-only transition history
//! - [`store`] - the storage contracts, implemented in memory by [`clients`] over
//!   the `*_actor` stores
//! - [`lifecycle`] - wiring, seeding, shutdown
//! - [`config`] - environment configuration

pub mod audit;
pub mod audit_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod fsm;
pub mod inventory_actor;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod policy;
pub mod service;
pub mod store;
