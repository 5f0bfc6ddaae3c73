use reviewdeck_models::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No business profile / platform connection exists for the tenant.
    /// Propagated to the caller as-is; never retried.
    #[error("no {platform} connection found for this profile")]
    NotFound { platform: Platform },

    /// The underlying store failed to run the query. In unified-inbox calls
    /// this is recovered as an empty result for the platform.
    #[error("{platform} query failed: {message}")]
    Query { platform: Platform, message: String },
}

impl StoreError {
    pub fn query(platform: Platform, message: impl Into<String>) -> Self {
        StoreError::Query {
            platform,
            message: message.into(),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            StoreError::NotFound { platform } | StoreError::Query { platform, .. } => *platform,
        }
    }
}
