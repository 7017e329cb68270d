//! # Observability & Tracing
//!
//! [`setup_tracing`] initialises structured logging for the whole process with
//! the `tracing` crate.
//!
//! The subscriber uses a compact format without the module prefix
//! (`with_target(false)`): stores log an `entity_type` field instead, which keeps
//! lines short while staying filterable.
//!
//! ## Levels
//!
//! `RUST_LOG` wins when set; otherwise the level passed by the caller (usually
//! from configuration) is used.
//!
//! ```bash
//! RUST_LOG=info cargo run                         # one line per committed change
//! RUST_LOG=debug cargo run                        # request payloads as well
//! RUST_LOG=oms_framework::locks=trace cargo run   # lock waits
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store actors**: startup, shutdown, every Create / Update / Action outcome.
//! - **Clients**: one span per call (`#[instrument]`), carrying the ids involved.
//! - **Lifecycle**: reservations, status transitions, compensations, and the
//!   audit/restock failures that are tolerated rather than surfaced.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `default_level` is an `EnvFilter` directive
/// used when `RUST_LOG` is unset or invalid.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type field replaces the module path
        .compact()
        .try_init();
}
