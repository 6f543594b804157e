use crate::courier::CourierScheduler;
use crate::model::Order;
use crate::shelf::{PickUpArea, ShelfAction, ShelfKind};
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Reply channel for a report request.
pub(crate) type ReportRequest = oneshot::Sender<KitchenReport>;

/// Outcome counters owned by the kitchen.
///
/// After graceful termination the counters partition the submitted orders:
/// `delivered + discarded + missed == submitted`. A forced-discard victim's
/// courier still shows up and finds nothing, but that pickup is accounted to
/// `discarded`, not `missed`; `missed` counts only pickups that fail for an
/// order the kitchen never dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KitchenStats {
    pub submitted: u64,
    pub delivered: u64,
    pub discarded: u64,
    pub missed: u64,
}

/// A snapshot of the kitchen's observable state, answered on the report
/// stream without mutating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenReport {
    pub hot: usize,
    pub cold: usize,
    pub frozen: usize,
    pub overflow: usize,
    /// Couriers dispatched but not yet heard from.
    pub outstanding_couriers: usize,
    pub orders_ended: bool,
    pub stats: KitchenStats,
}

/// The kitchen machine: the single task that owns all mutable pipeline
/// state.
///
/// The event loop multiplexes five input streams (orders, pickups,
/// end-orders, stop, report) with fair non-deterministic selection and
/// reacts to exactly one event per iteration. Nothing else ever touches the
/// pick-up area, the ticket set, or the counters, so no locks are involved —
/// safety comes from exclusive ownership inside the task.
///
/// Two termination paths exist:
///
/// - **Graceful**: end-orders has been signalled (explicitly, or by every
///   orders sender being dropped) and every dispatched courier has reported
///   back. The delivery stream closes and [`run`](Kitchen::run) returns the
///   final stats.
/// - **Forced**: a stop signal breaks the loop immediately. Couriers still
///   in flight find the pickup channel closed and drop their messages.
pub struct Kitchen {
    orders_rx: mpsc::Receiver<Order>,
    pickup_rx: mpsc::Receiver<Order>,
    end_orders_rx: mpsc::Receiver<()>,
    stop_rx: mpsc::Receiver<()>,
    report_rx: mpsc::Receiver<ReportRequest>,
    delivery_tx: mpsc::UnboundedSender<Order>,
    scheduler: CourierScheduler,
    area: PickUpArea,
    /// Order ids with a dispatched courier whose pickup event has not yet
    /// been consumed.
    tickets: HashSet<String>,
    /// Ids of forced-discard victims whose courier has not yet arrived.
    discarded_ids: HashSet<String>,
    orders_ended: bool,
    stats: KitchenStats,
}

impl Kitchen {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        orders_rx: mpsc::Receiver<Order>,
        pickup_rx: mpsc::Receiver<Order>,
        end_orders_rx: mpsc::Receiver<()>,
        stop_rx: mpsc::Receiver<()>,
        report_rx: mpsc::Receiver<ReportRequest>,
        delivery_tx: mpsc::UnboundedSender<Order>,
        scheduler: CourierScheduler,
        area: PickUpArea,
    ) -> Self {
        Self {
            orders_rx,
            pickup_rx,
            end_orders_rx,
            stop_rx,
            report_rx,
            delivery_tx,
            scheduler,
            area,
            tickets: HashSet::new(),
            discarded_ids: HashSet::new(),
            orders_ended: false,
            stats: KitchenStats::default(),
        }
    }

    /// Runs the event loop until the kitchen quiesces or is stopped,
    /// returning the final counters.
    ///
    /// The kitchen owns a pickup sender through its scheduler, so the pickup
    /// branch can never shut off underneath the loop; every other stream may
    /// close when its senders are dropped.
    pub async fn run(mut self) -> KitchenStats {
        info!("Kitchen open");

        loop {
            tokio::select! {
                Some(()) = self.stop_rx.recv() => {
                    info!("Stop received, halting immediately");
                    break;
                }
                Some(respond_to) = self.report_rx.recv() => {
                    let _ = respond_to.send(self.snapshot());
                }
                Some(order) = self.pickup_rx.recv() => {
                    self.handle_pickup(order);
                    if self.quiesced() {
                        info!("All couriers accounted for, closing delivery stream");
                        break;
                    }
                }
                maybe_order = self.orders_rx.recv(), if !self.orders_ended => {
                    match maybe_order {
                        Some(order) => self.handle_order(order),
                        None => {
                            self.note_orders_ended();
                            if self.quiesced() {
                                info!("No orders were outstanding, closing delivery stream");
                                break;
                            }
                        }
                    }
                }
                Some(()) = self.end_orders_rx.recv() => {
                    self.note_orders_ended();
                    if self.quiesced() {
                        info!("No orders were outstanding, closing delivery stream");
                        break;
                    }
                }
            }
        }

        info!(
            submitted = self.stats.submitted,
            delivered = self.stats.delivered,
            discarded = self.stats.discarded,
            missed = self.stats.missed,
            "Kitchen closed"
        );
        self.stats
    }

    /// Cook, place, dispatch a courier, record the ticket. No await points:
    /// the whole sequence is atomic with respect to the kitchen's state.
    fn handle_order(&mut self, order: Order) {
        if order.id.is_empty() {
            warn!("Rejecting order with empty id");
            return;
        }
        if self.tickets.contains(&order.id) {
            warn!(order_id = %order.id, "Rejecting order: id already in flight");
            return;
        }

        let order = order.cook();
        let id = order.id.clone();
        self.stats.submitted += 1;

        let placement = self.area.place(order.clone());
        match &placement.action {
            None => {
                info!(order_id = %id, shelf = %placement.shelf, "Order placed");
            }
            Some(ShelfAction::Moved(moved)) => {
                info!(
                    order_id = %id,
                    relocated_id = %moved.id,
                    to = %ShelfKind::from(moved.temp),
                    "Order placed on overflow, oldest relocatable order moved home"
                );
            }
            Some(ShelfAction::Discarded(victim)) => {
                warn!(
                    order_id = %id,
                    victim_id = %victim.id,
                    "Overflow full with nothing relocatable, order discarded"
                );
                self.stats.discarded += 1;
                self.discarded_ids.insert(victim.id.clone());
            }
        }

        self.scheduler.schedule(order);
        self.tickets.insert(id);
    }

    fn handle_pickup(&mut self, courier_order: Order) {
        let id = courier_order.id.clone();
        if !self.tickets.remove(&id) {
            warn!(order_id = %id, "Pickup without an outstanding ticket");
        }

        let picked = self.area.pick_up(courier_order);
        if picked.pickup_successful {
            self.stats.delivered += 1;
            info!(order_id = %id, "Order picked up, emitting to delivery");
            if self.delivery_tx.send(picked).is_err() {
                debug!(order_id = %id, "Delivery consumer gone, dropping order");
            }
        } else if self.discarded_ids.remove(&id) {
            debug!(order_id = %id, "Courier arrived for a discarded order");
        } else {
            self.stats.missed += 1;
            warn!(order_id = %id, "Pickup miss");
        }
    }

    fn note_orders_ended(&mut self) {
        if !self.orders_ended {
            self.orders_ended = true;
            info!(
                outstanding = self.tickets.len(),
                "End of orders, waiting for couriers"
            );
        }
    }

    fn quiesced(&self) -> bool {
        self.orders_ended && self.tickets.is_empty()
    }

    fn snapshot(&self) -> KitchenReport {
        KitchenReport {
            hot: self.area.shelf(ShelfKind::Hot).len(),
            cold: self.area.shelf(ShelfKind::Cold).len(),
            frozen: self.area.shelf(ShelfKind::Frozen).len(),
            overflow: self.area.shelf(ShelfKind::Overflow).len(),
            outstanding_couriers: self.tickets.len(),
            orders_ended: self.orders_ended,
            stats: self.stats,
        }
    }
}
