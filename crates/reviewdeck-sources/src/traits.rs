use async_trait::async_trait;
use reviewdeck_models::Platform;

use crate::error::StoreError;
use crate::query::{RawReviewRow, StoreQuery};

/// Abstract per-platform review storage.
///
/// The engine never talks to a database or network directly; each platform
/// contributes one store that turns an already-translated [`StoreQuery`] into
/// raw rows. Stores are expected to apply the query natively (the 1-5 to
/// 1-10 rating conversion for Booking has already happened at the adapter
/// boundary). Cancellation and timeouts live behind this trait too; the
/// engine itself has no long-running work to cancel.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// The platform this store serves.
    fn platform(&self) -> Platform;

    /// Fetch raw rows matching the translated query.
    async fn query(&self, query: &StoreQuery) -> Result<Vec<RawReviewRow>, StoreError>;
}
