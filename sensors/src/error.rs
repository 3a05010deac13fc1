use thiserror::Error;

use crate::surface::SurfaceId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    #[error("invalid probe group configuration for {surface}: {reason}")]
    InvalidConfiguration { surface: SurfaceId, reason: String },
    #[error("no probe group registered for {0}")]
    NotFound(SurfaceId),
    #[error("{count} probe groups are registered for {surface}, expected exactly one")]
    AmbiguousLookup { surface: SurfaceId, count: usize },
    #[error("collision aggregator used before it was initialized")]
    UninitializedAccess,
    #[error("collision aggregator is already initialized")]
    AlreadyInitialized,
}
