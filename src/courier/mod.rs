//! # Courier Scheduler
//!
//! Dispatches one courier per accepted order. A courier is a short-lived
//! tokio task that sleeps for a randomized wait and then emits a pickup
//! event into the kitchen's pickup stream. Couriers share nothing mutable
//! with the kitchen beyond that channel.
//!
//! There is no cancellation: couriers still in flight when the kitchen stops
//! simply find the pickup channel closed and drop their message.

use crate::model::Order;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Spawns per-order delayed pickup tasks.
///
/// The wait for each courier is sampled uniformly from the closed interval
/// `[wait_min, wait_max]` milliseconds, independently per order.
pub struct CourierScheduler {
    pickup: mpsc::Sender<Order>,
    wait_min_ms: u64,
    wait_max_ms: u64,
}

impl CourierScheduler {
    pub fn new(pickup: mpsc::Sender<Order>, wait_min_ms: u64, wait_max_ms: u64) -> Self {
        Self {
            pickup,
            wait_min_ms,
            wait_max_ms,
        }
    }

    /// Dispatches a courier for `order`.
    ///
    /// The wait is sampled here, before the spawn: the thread-local rng is
    /// not `Send`, and sampling up front keeps the courier task trivial.
    pub fn schedule(&self, order: Order) {
        let wait = self.sample_wait();
        let pickup = self.pickup.clone();
        debug!(order_id = %order.id, wait_ms = wait.as_millis() as u64, "Courier dispatched");

        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if pickup.send(order).await.is_err() {
                // Kitchen already stopped; the pickup is dropped on the floor.
                debug!("Pickup stream closed, courier leaving");
            }
        });
    }

    fn sample_wait(&self) -> Duration {
        let mut rng = rand::rng();
        Duration::from_millis(rng.random_range(self.wait_min_ms..=self.wait_max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, Temperature};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn courier_arrives_within_the_sampled_bounds() {
        let (tx, mut rx) = mpsc::channel(8);
        let scheduler = CourierScheduler::new(tx, 2_000, 6_000);
        let started = Instant::now();

        scheduler.schedule(Order::new("a", Temperature::Hot));

        let order = rx.recv().await.expect("courier never arrived");
        let elapsed = started.elapsed();
        assert_eq!(order.id, "a");
        assert!(elapsed >= Duration::from_millis(2_000), "arrived early: {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(6_000), "arrived late: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_wait_is_immediate() {
        let (tx, mut rx) = mpsc::channel(8);
        let scheduler = CourierScheduler::new(tx, 0, 0);
        let started = Instant::now();

        scheduler.schedule(Order::new("a", Temperature::Cold));

        rx.recv().await.expect("courier never arrived");
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic_the_courier() {
        let (tx, rx) = mpsc::channel(1);
        let scheduler = CourierScheduler::new(tx, 0, 0);
        drop(rx);
        scheduler.schedule(Order::new("a", Temperature::Hot));
        tokio::task::yield_now().await;
    }
}
