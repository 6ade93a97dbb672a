use thiserror::Error;

use crate::item::ItemId;
use crate::resources::ResourceId;

/// Failures surfaced by the wheel core. Input anomalies never produce one of
/// these; they are silent no-ops.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("wheel needs an even, non-zero item count per wheel (got {0})")]
    InvalidLayout(usize),
    #[error("expected {expected} projects, got {actual}")]
    ProjectCountMismatch { expected: usize, actual: usize },
    #[error("no item with id {0:?}")]
    UnknownItem(ItemId),
    #[error("resource {0:?} was already disposed")]
    AlreadyDisposed(ResourceId),
    #[error("failed to load asset `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },
}
