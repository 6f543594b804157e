//! # Kitchen Machine
//!
//! The core of the pipeline: a single-writer state machine that cooks
//! incoming orders, manages the pick-up area, dispatches couriers, and emits
//! delivered orders.
//!
//! ## Structure
//!
//! - [`machine`] — the [`Kitchen`] event loop and its observation types
//! - [`client`] — [`KitchenClient`], the type-safe endpoints
//! - [`error`] — [`KitchenError`]
//! - [`new()`] — factory that wires the channels and returns the machine,
//!   its client, and the delivery stream
//!
//! ## Channel discipline
//!
//! | Stream | Shape | Why |
//! |---|---|---|
//! | orders | bounded (32) | may apply backpressure to producers |
//! | pickup | bounded (32) | a full buffer blocks courier tasks, never the kitchen |
//! | end-orders, stop | bounded (1) | one-shot signals |
//! | report | bounded (8) | request/reply via `oneshot` |
//! | delivery | unbounded | the kitchen must never block on a slow consumer |
//!
//! ## Example
//!
//! ```ignore
//! let (kitchen, client, mut delivery) = kitchen::new(&config);
//! let handle = tokio::spawn(kitchen.run());
//!
//! client.submit(order).await?;
//! client.end_orders().await?;
//!
//! while let Some(delivered) = delivery.recv().await {
//!     println!("{delivered}");
//! }
//! let stats = handle.await?;
//! ```

pub mod client;
pub mod error;
pub mod machine;

pub use client::KitchenClient;
pub use error::KitchenError;
pub use machine::{Kitchen, KitchenReport, KitchenStats};

use crate::config::Config;
use crate::courier::CourierScheduler;
use crate::model::Order;
use crate::shelf::PickUpArea;
use tokio::sync::mpsc;

const ORDERS_BUFFER: usize = 32;
const PICKUP_BUFFER: usize = 32;
const REPORT_BUFFER: usize = 8;

/// Creates a kitchen and its endpoints.
///
/// Returns the machine itself (spawn [`Kitchen::run`] on a task), the
/// cloneable client, and the delivery stream. The delivery stream closes
/// exactly once, when the kitchen terminates.
pub fn new(config: &Config) -> (Kitchen, KitchenClient, mpsc::UnboundedReceiver<Order>) {
    let (orders_tx, orders_rx) = mpsc::channel(ORDERS_BUFFER);
    let (pickup_tx, pickup_rx) = mpsc::channel(PICKUP_BUFFER);
    let (end_orders_tx, end_orders_rx) = mpsc::channel(1);
    let (stop_tx, stop_rx) = mpsc::channel(1);
    let (report_tx, report_rx) = mpsc::channel(REPORT_BUFFER);
    let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();

    let scheduler = CourierScheduler::new(
        pickup_tx,
        config.courier_minimum_wait_time,
        config.courier_maximum_wait_time,
    );
    let area = PickUpArea::new(&config.shelf_capacity);

    let kitchen = Kitchen::new(
        orders_rx,
        pickup_rx,
        end_orders_rx,
        stop_rx,
        report_rx,
        delivery_tx,
        scheduler,
        area,
    );
    let client = KitchenClient::new(orders_tx, end_orders_tx, stop_tx, report_tx);

    (kitchen, client, delivery_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShelfCapacities;
    use crate::model::{Order, Temperature};

    fn test_config() -> Config {
        Config::for_test(
            ShelfCapacities {
                hot: 10,
                cold: 10,
                frozen: 10,
                overflow: 15,
            },
            (0, 0),
        )
    }

    /// Reports race freely with order processing, so tests poll until the
    /// submitted counter catches up.
    async fn report_when_submitted(client: &KitchenClient, submitted: u64) -> KitchenReport {
        loop {
            let report = client.report().await.expect("kitchen gone");
            if report.stats.submitted >= submitted {
                return report;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn report_reflects_placements_without_mutating() {
        let mut config = test_config();
        // Long courier wait keeps orders on the shelves while we look.
        config.courier_minimum_wait_time = 60_000;
        config.courier_maximum_wait_time = 60_000;

        let (kitchen, client, _delivery) = new(&config);
        let handle = tokio::spawn(kitchen.run());

        client.submit(Order::new("a", Temperature::Hot)).await.unwrap();
        client.submit(Order::new("b", Temperature::Cold)).await.unwrap();

        let first = report_when_submitted(&client, 2).await;
        assert_eq!(first.hot, 1);
        assert_eq!(first.cold, 1);
        assert_eq!(first.outstanding_couriers, 2);
        assert!(!first.orders_ended);

        let second = client.report().await.unwrap();
        assert_eq!(first, second);

        client.stop().await.unwrap();
        let stats = handle.await.unwrap();
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.delivered, 0);
    }

    #[tokio::test]
    async fn duplicate_in_flight_ids_are_rejected() {
        let mut config = test_config();
        config.courier_minimum_wait_time = 60_000;
        config.courier_maximum_wait_time = 60_000;

        let (kitchen, client, _delivery) = new(&config);
        let handle = tokio::spawn(kitchen.run());

        // Orders from one producer are processed in submission order, so once
        // "b" is counted the duplicate "a" must have been seen and rejected.
        client.submit(Order::new("a", Temperature::Hot)).await.unwrap();
        client.submit(Order::new("a", Temperature::Hot)).await.unwrap();
        client.submit(Order::new("b", Temperature::Hot)).await.unwrap();

        let report = report_when_submitted(&client, 2).await;
        assert_eq!(report.stats.submitted, 2);
        assert_eq!(report.hot, 2);

        client.stop().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn end_orders_with_no_outstanding_couriers_terminates() {
        let (kitchen, client, mut delivery) = new(&test_config());
        let handle = tokio::spawn(kitchen.run());

        client.end_orders().await.unwrap();

        assert!(delivery.recv().await.is_none(), "delivery should close");
        let stats = handle.await.unwrap();
        assert_eq!(stats, KitchenStats::default());
        assert_eq!(client.submit(Order::new("late", Temperature::Hot)).await, Err(KitchenError::Closed));
    }
}
