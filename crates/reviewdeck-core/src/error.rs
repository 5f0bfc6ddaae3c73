use reviewdeck_models::Platform;
use reviewdeck_sources::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested platform has no registered store (no connection exists
    /// for the tenant). Propagated to the caller, never retried.
    #[error("no {0} connection found for this profile")]
    NotFound(Platform),

    /// A single-platform store query failed. Unified-inbox calls never
    /// surface this variant; they degrade to partial results instead.
    #[error(transparent)]
    Store(#[from] StoreError),
}
