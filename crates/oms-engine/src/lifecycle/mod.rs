//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the store actors behind an
//! [`OrderLifecycleService`](crate::service::OrderLifecycleService).
//!
//! ## The OrderSystem Pattern
//!
//! 1. **Actor Creation** - one actor per store (orders, inventory, audit), each
//!    with the mailbox capacity from [`EngineConfig`](crate::config::EngineConfig).
//! 2. **Wiring** - the typed clients become the storage collaborators of the
//!    service.
//! 3. **Seeding** - configured stock is applied through the ledger.
//! 4. **Graceful Shutdown** - dropping the service drops the last clients; each
//!    actor sees its mailbox close, logs its final size and exits. The join
//!    handles are then awaited.
//!
//! ```rust
//! use oms_engine::config::EngineConfig;
//! use oms_engine::lifecycle::OrderSystem;
//! use oms_engine::model::{Metadata, ProductId, UserId};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let product = ProductId::new();
//!     let mut config = EngineConfig::test();
//!     config.seed_inventory = vec![(product, 10)];
//!
//!     let system = OrderSystem::new(&config);
//!     system.seed(&config).await?;
//!
//!     let cancel = CancellationToken::new();
//!     let order = system
//!         .service
//!         .place_order(UserId(1), product, 3, Metadata::new(), &cancel)
//!         .await?;
//!     assert_eq!(order.quantity, 3);
//!     assert_eq!(system.service.ledger().peek(product, &cancel).await, 7);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! The actors have no context (`()`): stores do not call each other, all
//! coordination happens in the service. That keeps the dependency graph acyclic,
//! so channel closure alone is enough to stop everything.

pub mod order_system;

pub use order_system::*;
