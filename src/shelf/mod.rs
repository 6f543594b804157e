//! # Pick-Up Area
//!
//! The temperature-zoned buffer between the kitchen and the couriers: three
//! temperature shelves (hot, cold, frozen) plus a shared overflow shelf, each
//! with a bounded capacity.
//!
//! The two operations here are pure state transitions on [`PickUpArea`]:
//! [`PickUpArea::place`] admits a cooked order (possibly relocating or
//! discarding an overflow item to make room) and [`PickUpArea::pick_up`]
//! removes an order for a courier. Only the kitchen task ever touches the
//! area, so a plain `HashMap` store needs no locking — the same exclusive
//! ownership the actor loop gives its entity store.
//!
//! ## Invariants
//!
//! - Every shelf holds at most `capacity` orders.
//! - Every order id appears on at most one shelf.
//! - Temperature shelves hold only orders of their own temperature; the
//!   overflow shelf holds any temperature.
//!
//! `place` preserves all three: the relocate and discard steps each remove
//! exactly one overflow item before inserting one, and relocation returns an
//! item to its own temperature shelf.

use crate::model::{Order, Temperature};
use rand::Rng;
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::config::ShelfCapacities;

/// Identifies one of the four shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShelfKind {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl From<Temperature> for ShelfKind {
    fn from(temp: Temperature) -> Self {
        match temp {
            Temperature::Hot => ShelfKind::Hot,
            Temperature::Cold => ShelfKind::Cold,
            Temperature::Frozen => ShelfKind::Frozen,
        }
    }
}

impl Display for ShelfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelfKind::Hot => write!(f, "hot"),
            ShelfKind::Cold => write!(f, "cold"),
            ShelfKind::Frozen => write!(f, "frozen"),
            ShelfKind::Overflow => write!(f, "overflow"),
        }
    }
}

/// An order on a shelf, tagged with its placement sequence number.
///
/// The sequence number makes the relocate-from-overflow choice deterministic:
/// among qualifying overflow orders, the oldest-placed one moves first.
#[derive(Debug)]
struct Slot {
    order: Order,
    seq: u64,
}

/// A bounded id-keyed container of orders for one temperature zone.
#[derive(Debug)]
pub struct Shelf {
    capacity: usize,
    slots: HashMap<String, Slot>,
}

impl Shelf {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_room(&self) -> bool {
        self.slots.len() < self.capacity
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Iterates the shelf's orders in no particular order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.slots.values().map(|slot| &slot.order)
    }

    fn insert(&mut self, order: Order, seq: u64) {
        self.slots.insert(order.id.clone(), Slot { order, seq });
    }

    fn remove(&mut self, id: &str) -> Option<Order> {
        self.slots.remove(id).map(|slot| slot.order)
    }

    /// Picks an id uniformly at random, or `None` if the shelf is empty.
    fn random_id(&self) -> Option<String> {
        if self.slots.is_empty() {
            return None;
        }
        let ids: Vec<&String> = self.slots.keys().collect();
        let mut rng = rand::rng();
        Some(ids[rng.random_range(0..ids.len())].clone())
    }
}

/// What `place` did beyond storing the new order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfAction {
    /// An overflow order was relocated to its own temperature shelf.
    Moved(Order),
    /// An overflow order was dropped from the system permanently.
    Discarded(Order),
}

/// The outcome of a placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The shelf the new order landed on.
    pub shelf: ShelfKind,
    /// The secondary mutation, if one was required to make room.
    pub action: Option<ShelfAction>,
}

/// The four shelves plus the placement sequence counter.
pub struct PickUpArea {
    hot: Shelf,
    cold: Shelf,
    frozen: Shelf,
    overflow: Shelf,
    next_seq: u64,
}

impl PickUpArea {
    pub fn new(capacities: &ShelfCapacities) -> Self {
        Self {
            hot: Shelf::new(capacities.hot as usize),
            cold: Shelf::new(capacities.cold as usize),
            frozen: Shelf::new(capacities.frozen as usize),
            overflow: Shelf::new(capacities.overflow as usize),
            next_seq: 0,
        }
    }

    pub fn shelf(&self, kind: ShelfKind) -> &Shelf {
        match kind {
            ShelfKind::Hot => &self.hot,
            ShelfKind::Cold => &self.cold,
            ShelfKind::Frozen => &self.frozen,
            ShelfKind::Overflow => &self.overflow,
        }
    }

    fn shelf_mut(&mut self, kind: ShelfKind) -> &mut Shelf {
        match kind {
            ShelfKind::Hot => &mut self.hot,
            ShelfKind::Cold => &mut self.cold,
            ShelfKind::Frozen => &mut self.frozen,
            ShelfKind::Overflow => &mut self.overflow,
        }
    }

    /// Total number of orders across all four shelves.
    pub fn len(&self) -> usize {
        self.hot.len() + self.cold.len() + self.frozen.len() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, kind: ShelfKind, order: Order) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.shelf_mut(kind).insert(order, seq);
    }

    /// Admits an order, deciding where it lands and what (if anything) must
    /// give way. Evaluated in order:
    ///
    /// 1. Room on the order's own temperature shelf: place it there.
    /// 2. Room on overflow: place it there.
    /// 3. Some overflow order's temperature shelf has room: relocate the
    ///    oldest-placed such order home, put the new order on overflow.
    /// 4. Otherwise evict a uniformly random overflow order and put the new
    ///    order on overflow.
    ///
    /// Placement always succeeds; the only question is what is ejected.
    pub fn place(&mut self, order: Order) -> Placement {
        let home = ShelfKind::from(order.temp);

        if self.shelf(home).has_room() {
            self.insert(home, order);
            return Placement { shelf: home, action: None };
        }

        if self.overflow.has_room() {
            self.insert(ShelfKind::Overflow, order);
            return Placement {
                shelf: ShelfKind::Overflow,
                action: None,
            };
        }

        // Oldest overflow order whose own temperature shelf has room.
        let relocatable = self
            .overflow
            .slots
            .values()
            .filter(|slot| self.shelf(ShelfKind::from(slot.order.temp)).has_room())
            .min_by_key(|slot| slot.seq)
            .map(|slot| slot.order.id.clone());

        if let Some(id) = relocatable {
            if let Some(moved) = self.overflow.remove(&id) {
                let record = moved.clone();
                let moved_home = ShelfKind::from(moved.temp);
                self.insert(moved_home, moved);
                self.insert(ShelfKind::Overflow, order);
                return Placement {
                    shelf: ShelfKind::Overflow,
                    action: Some(ShelfAction::Moved(record)),
                };
            }
        }

        let victim = match self.overflow.random_id() {
            Some(id) => self.overflow.remove(&id),
            None => None,
        };

        match victim {
            Some(victim) => {
                self.insert(ShelfKind::Overflow, order);
                Placement {
                    shelf: ShelfKind::Overflow,
                    action: Some(ShelfAction::Discarded(victim)),
                }
            }
            // A zero-capacity overflow shelf leaves nothing to evict; the
            // incoming order itself is the casualty and never lands.
            None => Placement {
                shelf: ShelfKind::Overflow,
                action: Some(ShelfAction::Discarded(order)),
            },
        }
    }

    /// Removes an order for a courier.
    ///
    /// Probes the order's temperature shelf, then overflow. On a hit the
    /// stored order is returned with `pickup_successful` set; on a miss the
    /// request order comes back with the flag clear and the area untouched.
    pub fn pick_up(&mut self, order: Order) -> Order {
        let home = ShelfKind::from(order.temp);
        let mut found = self.shelf_mut(home).remove(&order.id);
        if found.is_none() {
            found = self.overflow.remove(&order.id);
        }

        match found {
            Some(mut stored) => {
                stored.pickup_successful = true;
                stored
            }
            None => {
                let mut order = order;
                order.pickup_successful = false;
                order
            }
        }
    }
}
