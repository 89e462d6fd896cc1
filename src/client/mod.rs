// Client side of the catalog API.
// The `ItemSource` seam, its HTTP implementation, and the retry policy.

pub mod http;
pub mod retry;

use std::future::Future;

use crate::error::Result;
use crate::model::{Item, Query, Stats};

pub use http::{CatalogClient, DEFAULT_BASE_URL};
pub use retry::{RetryOutcome, RetryPolicy};

/// Where the front-end controllers read catalog data from.
pub trait ItemSource: Send + Sync {
    /// One page of items matching the query's search text.
    fn list_items(&self, query: &Query) -> impl Future<Output = Result<Vec<Item>>> + Send;

    /// Number of items matching `search`, across all pages.
    fn count_items(&self, search: &str) -> impl Future<Output = Result<u64>> + Send;

    fn get_item(&self, id: u64) -> impl Future<Output = Result<Item>> + Send;

    fn stats(&self) -> impl Future<Output = Result<Stats>> + Send;
}
