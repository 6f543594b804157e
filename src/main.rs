//! Command-line entry point: run the customer driver against a fresh
//! kitchen and log the collected deliveries.

use anyhow::Context;
use clap::Parser;
use kitchen_sim::config::Config;
use kitchen_sim::customer::{Customer, JsonOrderSource};
use kitchen_sim::lifecycle::KitchenSystem;
use kitchen_sim::runtime::setup_tracing;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Simulate a concurrent order-fulfillment pipeline.
#[derive(Parser)]
#[command(name = "kitchen-sim", version, about)]
struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "PATH", default_value = "config.json")]
    config: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = Config::load(&cli.config).await.with_context(|| {
        format!("cannot start without configuration ({})", cli.config.display())
    })?;
    let source = JsonOrderSource::load(&config.orders_source)
        .await
        .context("cannot start without an order source")?;

    info!(orders = source.len(), "Starting simulation");

    let mut system = KitchenSystem::new(&config);
    let mut delivery = system
        .take_delivery()
        .context("delivery stream already taken")?;

    // An interrupt becomes a forced stop: the kitchen halts immediately and
    // in-flight couriers are abandoned.
    let interrupt_client = system.client.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping the kitchen");
            let _ = interrupt_client.stop().await;
        }
    });

    let collector = tokio::spawn(async move {
        let mut delivered = Vec::new();
        while let Some(order) = delivery.recv().await {
            info!(order_id = %order.id, temp = %order.temp, "Delivered");
            delivered.push(order);
        }
        delivered
    });

    let customer = Customer::new(
        source,
        Duration::from_millis(config.customer_wait_between_orders),
    );
    let submitted = customer.run(&system.client).await?;

    let delivered = collector.await.context("delivery collector failed")?;
    let stats = system.shutdown().await?;

    info!(
        submitted,
        delivered = delivered.len(),
        discarded = stats.discarded,
        missed = stats.missed,
        "Simulation complete"
    );
    Ok(())
}
