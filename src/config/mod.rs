//! # Configuration
//!
//! Frozen, read-once simulation parameters: shelf capacities and the timing
//! knobs for the customer and the couriers.
//!
//! Configuration is loaded from a JSON file once at startup and never
//! mutated afterwards. Loading has two phases: parsing (missing keys and bad
//! types surface as [`ConfigError::Parse`]) and validation (domain rules such
//! as non-negative capacities and ordered courier wait bounds). Both are
//! fatal; nothing downstream ever sees an invalid `Config`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating configuration.
///
/// All variants are fatal at startup; the process must not start the
/// pipeline with a broken configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("shelf capacity for {shelf} is negative ({value})")]
    NegativeCapacity { shelf: &'static str, value: i64 },

    #[error("courier wait bounds are inverted (min {min} ms > max {max} ms)")]
    InvalidCourierWait { min: u64, max: u64 },
}

/// Per-shelf capacities.
///
/// Declared as signed integers so that a negative value in the file is
/// reported as [`ConfigError::NegativeCapacity`] instead of a type error.
#[derive(Debug, Clone, Deserialize)]
pub struct ShelfCapacities {
    pub hot: i64,
    pub cold: i64,
    pub frozen: i64,
    pub overflow: i64,
}

impl ShelfCapacities {
    fn validate(&self) -> Result<(), ConfigError> {
        for (shelf, value) in [
            ("hot", self.hot),
            ("cold", self.cold),
            ("frozen", self.frozen),
            ("overflow", self.overflow),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeCapacity { shelf, value });
            }
        }
        Ok(())
    }

    pub fn total(&self) -> usize {
        (self.hot + self.cold + self.frozen + self.overflow) as usize
    }
}

/// The simulation configuration.
///
/// Field names map one-to-one to the kebab-case keys of the configuration
/// file:
///
/// ```json
/// {
///   "orders-source": "orders.json",
///   "customer-wait-between-orders": 500,
///   "courier-minimum-wait-time": 2000,
///   "courier-maximum-wait-time": 6000,
///   "shelf-capacity": { "hot": 10, "cold": 10, "frozen": 10, "overflow": 15 }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Location of the order records to preload.
    pub orders_source: PathBuf,

    /// Inter-order delay used by the customer driver, in milliseconds.
    pub customer_wait_between_orders: u64,

    /// Lower bound of courier wait sampling, in milliseconds.
    pub courier_minimum_wait_time: u64,

    /// Upper bound of courier wait sampling, in milliseconds.
    pub courier_maximum_wait_time: u64,

    /// Per-shelf capacities for the pick-up area.
    pub shelf_capacity: ShelfCapacities,
}

impl Config {
    /// Reads and validates a configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.shelf_capacity.validate()?;
        if self.courier_minimum_wait_time > self.courier_maximum_wait_time {
            return Err(ConfigError::InvalidCourierWait {
                min: self.courier_minimum_wait_time,
                max: self.courier_maximum_wait_time,
            });
        }
        Ok(())
    }

    /// A configuration suitable for tests: capacities and waits supplied
    /// directly, no file involved.
    pub fn for_test(
        capacities: ShelfCapacities,
        courier_wait_ms: (u64, u64),
    ) -> Self {
        Self {
            orders_source: PathBuf::from("orders.json"),
            customer_wait_between_orders: 0,
            courier_minimum_wait_time: courier_wait_ms.0,
            courier_maximum_wait_time: courier_wait_ms.1,
            shelf_capacity: capacities,
        }
    }
}
