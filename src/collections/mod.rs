//! Collection readers
//!
//! A reader fetches one bounded slice of a table for a typed page request.
//! It knows the query shape for its pagination style and nothing else: links,
//! validation and status codes live with the endpoint.

mod books;
mod cars;

pub use books::BookReader;
pub use cars::CarReader;

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Bounded fetch of records for a page request of type `P`
#[async_trait]
pub trait CollectionReader<P>: Send + Sync
where
    P: Send + 'static,
{
    /// Record type returned by this reader
    type Record: Serialize + Send + 'static;

    /// Fetch the records selected by `page`, ordered by primary key
    ///
    /// An empty page is not an error.
    async fn fetch(&self, page: P) -> Result<Vec<Self::Record>>;
}

/// Run blocking storage work off the async executor
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::storage(format!("storage task failed: {e}")))?
}

#[cfg(test)]
mod tests;
