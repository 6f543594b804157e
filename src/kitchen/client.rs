use crate::kitchen::machine::{KitchenReport, ReportRequest};
use crate::kitchen::KitchenError;
use crate::model::Order;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Endpoints for talking to a running [`Kitchen`](crate::kitchen::Kitchen).
///
/// The client is cheap to clone; all clones feed the same kitchen. Four of
/// the five endpoints live here (`submit`, `end_orders`, `stop`, `report`);
/// the fifth, the delivery stream, is a receiver handed out by
/// [`kitchen::new`](crate::kitchen::new).
///
/// Submitting an order after `end_orders` is a programmer error; the kitchen
/// stops reading the orders stream at that point, so the write is silently
/// never consumed.
#[derive(Clone)]
pub struct KitchenClient {
    orders: mpsc::Sender<Order>,
    end_orders: mpsc::Sender<()>,
    stop: mpsc::Sender<()>,
    report: mpsc::Sender<ReportRequest>,
}

impl KitchenClient {
    pub(crate) fn new(
        orders: mpsc::Sender<Order>,
        end_orders: mpsc::Sender<()>,
        stop: mpsc::Sender<()>,
        report: mpsc::Sender<ReportRequest>,
    ) -> Self {
        Self {
            orders,
            end_orders,
            stop,
            report,
        }
    }

    /// Submits an order for cooking and placement.
    pub async fn submit(&self, order: Order) -> Result<(), KitchenError> {
        debug!(order_id = %order.id, "Submitting order");
        self.orders
            .send(order)
            .await
            .map_err(|_| KitchenError::Closed)
    }

    /// Signals that no further orders will be submitted.
    ///
    /// Once all outstanding couriers have reported back, the kitchen closes
    /// the delivery stream and terminates.
    pub async fn end_orders(&self) -> Result<(), KitchenError> {
        self.end_orders
            .send(())
            .await
            .map_err(|_| KitchenError::Closed)
    }

    /// Halts the kitchen immediately, abandoning in-flight couriers.
    pub async fn stop(&self) -> Result<(), KitchenError> {
        self.stop.send(()).await.map_err(|_| KitchenError::Closed)
    }

    /// Fetches a snapshot of the kitchen's state without mutating it.
    pub async fn report(&self) -> Result<KitchenReport, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.report
            .send(respond_to)
            .await
            .map_err(|_| KitchenError::Closed)?;
        response.await.map_err(|_| KitchenError::Dropped)
    }
}
