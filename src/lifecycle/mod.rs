//! # Lifecycle
//!
//! Orchestration for the kitchen task: wiring the channels, spawning the
//! event loop, and shutting the whole thing down cleanly.

use crate::config::Config;
use crate::kitchen::{self, KitchenClient, KitchenError, KitchenStats};
use crate::model::Order;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A running kitchen plus the endpoints to drive it.
///
/// # Example
///
/// ```ignore
/// let mut system = KitchenSystem::new(&config);
/// let delivery = system.take_delivery().expect("delivery already taken");
///
/// system.client.submit(order).await?;
/// system.client.end_orders().await?;
///
/// let stats = system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Endpoints into the running kitchen.
    pub client: KitchenClient,

    delivery: Option<mpsc::UnboundedReceiver<Order>>,
    handle: tokio::task::JoinHandle<KitchenStats>,
}

impl KitchenSystem {
    /// Wires the channels and spawns the kitchen task.
    pub fn new(config: &Config) -> Self {
        let (kitchen, client, delivery) = kitchen::new(config);
        let handle = tokio::spawn(kitchen.run());
        Self {
            client,
            delivery: Some(delivery),
            handle,
        }
    }

    /// Hands the delivery stream to the consumer. The stream closes exactly
    /// once, when the kitchen terminates gracefully.
    pub fn take_delivery(&mut self) -> Option<mpsc::UnboundedReceiver<Order>> {
        self.delivery.take()
    }

    /// Gracefully shuts the system down.
    ///
    /// Dropping the client closes the orders stream, which the kitchen
    /// treats as end-of-orders; the kitchen then drains its outstanding
    /// couriers and terminates. Returns the kitchen's final counters, or
    /// [`KitchenError::TaskFailed`] if the task panicked.
    pub async fn shutdown(self) -> Result<KitchenStats, KitchenError> {
        info!("Shutting down kitchen system");
        drop(self.client);
        drop(self.delivery);

        match self.handle.await {
            Ok(stats) => {
                info!("Kitchen system shutdown complete");
                Ok(stats)
            }
            Err(e) => {
                error!(error = %e, "Kitchen task failed");
                Err(KitchenError::TaskFailed(e.to_string()))
            }
        }
    }
}
