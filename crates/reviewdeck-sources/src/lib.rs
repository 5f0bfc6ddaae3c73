pub mod adapter;
pub mod booking;
pub mod error;
pub mod facebook;
pub mod google;
pub mod query;
pub mod registry;
pub mod traits;
pub mod tripadvisor;

pub use adapter::{filter_satisfiable, normalize_row, translate_filter};
pub use error::StoreError;
pub use query::{RawReviewRow, StoreQuery};
pub use registry::StoreRegistry;
pub use traits::ReviewStore;
