//! # Customer Driver
//!
//! The traffic generator at the front of the pipeline: an [`OrderSource`]
//! yields orders, and the [`Customer`] paces them into the kitchen before
//! signalling end-of-orders.
//!
//! The driver knows nothing about shelves or couriers; it only writes to
//! the orders endpoint and then says it is done.

use crate::kitchen::{KitchenClient, KitchenError};
use crate::model::Order;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading an order source.
///
/// Fatal at startup; a malformed *individual* record is not an error (it is
/// skipped with a warning), but an unreadable or non-JSON file is.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("failed to read order source {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse order source {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Something that yields orders, one at a time, until exhausted.
#[async_trait]
pub trait OrderSource: Send {
    async fn next_order(&mut self) -> Option<Order>;
}

/// Orders preloaded from a JSON file.
///
/// The file is a JSON array of order records. Records missing `id` or
/// `temp`, or with a temperature outside hot/cold/frozen, are skipped with a
/// warning at load time; everything else about a record travels opaquely.
#[derive(Debug)]
pub struct JsonOrderSource {
    orders: VecDeque<Order>,
}

impl JsonOrderSource {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CustomerError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CustomerError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let records: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|source| CustomerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let total = records.len();
        let orders: VecDeque<Order> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed order record");
                    None
                }
            })
            .collect();

        info!(
            path = %path.display(),
            loaded = orders.len(),
            skipped = total - orders.len(),
            "Order source loaded"
        );
        Ok(Self { orders })
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderSource for JsonOrderSource {
    async fn next_order(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }
}

/// An in-memory order source for tests and demos.
pub struct ScriptedOrders {
    orders: VecDeque<Order>,
}

impl ScriptedOrders {
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }
}

#[async_trait]
impl OrderSource for ScriptedOrders {
    async fn next_order(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }
}

/// Submits orders to the kitchen at a fixed pace, then signals end-of-orders.
pub struct Customer<S: OrderSource> {
    source: S,
    pace: Duration,
}

impl<S: OrderSource> Customer<S> {
    pub fn new(source: S, pace: Duration) -> Self {
        Self { source, pace }
    }

    /// Drains the source into the kitchen and signals end-of-orders.
    /// Returns how many orders were submitted.
    pub async fn run(mut self, kitchen: &KitchenClient) -> Result<u64, KitchenError> {
        let mut submitted = 0u64;
        while let Some(order) = self.source.next_order().await {
            kitchen.submit(order).await?;
            submitted += 1;
            if !self.pace.is_zero() {
                tokio::time::sleep(self.pace).await;
            }
        }
        kitchen.end_orders().await?;
        info!(submitted, "Customer finished");
        Ok(submitted)
    }
}
