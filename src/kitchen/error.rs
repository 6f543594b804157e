//! Error types for the kitchen machine.

use thiserror::Error;

/// Errors surfaced by [`KitchenClient`](crate::kitchen::KitchenClient)
/// endpoints and by system shutdown.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// The kitchen's event loop has terminated and no longer accepts input.
    #[error("kitchen closed")]
    Closed,

    /// The kitchen dropped a response channel before answering.
    #[error("kitchen dropped the response channel")]
    Dropped,

    /// The kitchen task panicked or was aborted.
    #[error("kitchen task failed: {0}")]
    TaskFailed(String),
}
