//! Concrete load scenarios against the standard configuration
//! (hot/cold/frozen = 10, overflow = 15).

use kitchen_sim::config::{Config, ShelfCapacities};
use kitchen_sim::customer::{Customer, ScriptedOrders};
use kitchen_sim::kitchen::KitchenReport;
use kitchen_sim::lifecycle::KitchenSystem;
use kitchen_sim::model::{Order, Temperature};
use std::time::Duration;

fn standard_capacities() -> ShelfCapacities {
    ShelfCapacities {
        hot: 10,
        cold: 10,
        frozen: 10,
        overflow: 15,
    }
}

async fn report_when_submitted(system: &KitchenSystem, submitted: u64) -> KitchenReport {
    loop {
        let report = system.client.report().await.expect("kitchen gone");
        if report.stats.submitted >= submitted {
            return report;
        }
        tokio::task::yield_now().await;
    }
}

/// 35 hot orders against 10 hot + 15 overflow slots, with couriers held far
/// in the future: the shelves fill exactly and ten orders are forced out.
#[tokio::test]
async fn capacity_exact_burst_fills_shelves_and_discards_the_rest() {
    let config = Config::for_test(standard_capacities(), (60_000, 60_000));
    let mut system = KitchenSystem::new(&config);
    let _delivery = system.take_delivery().unwrap();

    for i in 1..=35 {
        system
            .client
            .submit(Order::new(format!("{i}"), Temperature::Hot))
            .await
            .unwrap();
    }

    let report = report_when_submitted(&system, 35).await;
    assert_eq!(report.hot, 10);
    assert_eq!(report.overflow, 15);
    assert_eq!(report.cold, 0);
    assert_eq!(report.frozen, 0);
    assert_eq!(report.stats.discarded, 10);
    // Discarded orders still have couriers en route; their tickets stay
    // outstanding until the pickup event arrives.
    assert_eq!(report.outstanding_couriers, 35);
    assert!(!report.orders_ended);

    system.client.stop().await.unwrap();
    let stats = system.shutdown().await.unwrap();
    assert_eq!(stats.delivered, 0);
    assert_eq!(stats.discarded, 10);
}

/// 25 hot orders fit in hot + overflow; a graceful end delivers every one
/// and empties the pipeline.
#[tokio::test]
async fn under_capacity_run_delivers_every_order() {
    let config = Config::for_test(standard_capacities(), (0, 0));
    let mut system = KitchenSystem::new(&config);
    let mut delivery = system.take_delivery().unwrap();

    let orders: Vec<Order> = (0..25)
        .map(|i| Order::new(format!("o-{i}"), Temperature::Hot))
        .collect();

    let collector = tokio::spawn(async move {
        let mut ids = Vec::new();
        while let Some(order) = delivery.recv().await {
            assert!(order.cooked);
            assert!(order.pickup_successful);
            ids.push(order.id);
        }
        ids
    });

    let customer = Customer::new(ScriptedOrders::new(orders), Duration::ZERO);
    let submitted = customer.run(&system.client).await.unwrap();
    assert_eq!(submitted, 25);

    let mut delivered = collector.await.unwrap();
    let stats = system.shutdown().await.unwrap();

    delivered.sort();
    let mut expected: Vec<String> = (0..25).map(|i| format!("o-{i}")).collect();
    expected.sort();
    assert_eq!(delivered, expected);
    assert_eq!(stats.delivered, 25);
    assert_eq!(stats.discarded, 0);
    assert_eq!(stats.missed, 0);
}
