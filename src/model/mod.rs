//! # Order Models
//!
//! Pure data structures shared across the pipeline. These types carry no
//! business logic and no dependency on the kitchen machinery, so they can be
//! used from any layer (order sources, the event loop, delivery consumers,
//! tests).
//!
//! The placement policy, courier bookkeeping, and all mutation of these
//! values live in the [`kitchen`](crate::kitchen) and
//! [`shelf`](crate::shelf) modules.

pub mod order;

pub use order::{Order, Temperature};
