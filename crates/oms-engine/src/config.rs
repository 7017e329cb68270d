//! Engine configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `OMS_MAILBOX_CAPACITY` | `32` | Mailbox size of each store actor |
//! | `OMS_LOG_LEVEL` | `info` | Log filter used when `RUST_LOG` is unset |
//! | `OMS_SEED_INVENTORY` | empty | `product-uuid=quantity,...` stock applied at startup |

use crate::model::ProductId;
use std::env;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key}: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Mailbox capacity of the order, inventory and audit actors
    pub mailbox_capacity: usize,
    /// Default tracing filter directive
    pub log_level: String,
    /// Initial stock per product
    pub seed_inventory: Vec<(ProductId, i64)>,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mailbox_capacity = match lookup("OMS_MAILBOX_CAPACITY") {
            Some(raw) => parse_capacity(&raw)?,
            None => defaults.mailbox_capacity,
        };
        let log_level = lookup("OMS_LOG_LEVEL")
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty())
            .unwrap_or(defaults.log_level);
        let seed_inventory = match lookup("OMS_SEED_INVENTORY") {
            Some(raw) => parse_seed(&raw)?,
            None => defaults.seed_inventory,
        };

        Ok(Self {
            mailbox_capacity,
            log_level,
            seed_inventory,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            mailbox_capacity: 8,
            log_level: "warn".to_string(),
            seed_inventory: Vec::new(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            log_level: "info".to_string(),
            seed_inventory: Vec::new(),
        }
    }
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "OMS_MAILBOX_CAPACITY",
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

fn parse_seed(raw: &str) -> Result<Vec<(ProductId, i64)>, ConfigError> {
    let invalid = |entry: &str, reason: String| ConfigError::Invalid {
        key: "OMS_SEED_INVENTORY",
        value: entry.to_string(),
        reason,
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (product, quantity) = entry
                .split_once('=')
                .ok_or_else(|| invalid(entry, "expected product=quantity".to_string()))?;
            let product_id = product
                .trim()
                .parse::<ProductId>()
                .map_err(|e| invalid(entry, e.to_string()))?;
            let quantity = quantity
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid(entry, e.to_string()))?;
            if quantity < 0 {
                return Err(invalid(entry, "quantity cannot be negative".to_string()));
            }
            Ok((product_id, quantity))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.mailbox_capacity, 32);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_test_config() {
        let config = EngineConfig::test();
        assert_eq!(config.log_level, "warn");
        assert!(config.seed_inventory.is_empty());
    }

    #[test]
    fn test_reads_all_keys() {
        let product = "0b7c3f7e-8d0e-4c6a-9f59-6a8e8f0f2c11";
        let seed = format!("{product}=100, ");
        let config = EngineConfig::from_lookup(lookup(&[
            ("OMS_MAILBOX_CAPACITY", "64"),
            ("OMS_LOG_LEVEL", "debug"),
            ("OMS_SEED_INVENTORY", seed.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.mailbox_capacity, 64);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.seed_inventory,
            vec![(product.parse::<ProductId>().unwrap(), 100)]
        );
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = EngineConfig::from_lookup(lookup(&[("OMS_MAILBOX_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "OMS_MAILBOX_CAPACITY",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_seed() {
        for bad in ["not-a-uuid=5", "0b7c3f7e-8d0e-4c6a-9f59-6a8e8f0f2c11", "0b7c3f7e-8d0e-4c6a-9f59-6a8e8f0f2c11=-3"] {
            let err = EngineConfig::from_lookup(lookup(&[("OMS_SEED_INVENTORY", bad)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "OMS_SEED_INVENTORY", .. }),
                "{bad} should be rejected"
            );
        }
    }
}
