//! Pagination endpoint
//!
//! One endpoint serves one collection: method check, parameter parsing,
//! bounded fetch, link building and serialization, stopping at the first
//! failure.

use crate::collections::CollectionReader;
use crate::error::{Error, Result};
use crate::pagination::{PageStrategy, PaginatedResponse};
use crate::types::QueryParams;
use async_trait::async_trait;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A routable request handler, independent of its record type
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Produce the full HTTP response for a request
    async fn respond(&self, method: &Method, path: &str, query: &QueryParams) -> Response;
}

/// Endpoint serving one collection with one pagination strategy
pub struct PaginationEndpoint<S, R> {
    /// Collection name (for logging)
    name: String,
    strategy: S,
    reader: R,
}

impl<S, R> PaginationEndpoint<S, R>
where
    S: PageStrategy,
    R: CollectionReader<S::Request>,
{
    /// Create a new endpoint
    pub fn new(name: impl Into<String>, strategy: S, reader: R) -> Self {
        Self {
            name: name.into(),
            strategy,
            reader,
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the request through parse, fetch and link building
    ///
    /// Links are derived from the parsed request alone, so they are identical
    /// whether the page is full, short or empty.
    pub async fn handle(
        &self,
        method: &Method,
        path: &str,
        query: &QueryParams,
    ) -> Result<PaginatedResponse<R::Record>> {
        if *method != Method::GET {
            return Err(Error::method_not_allowed(method.as_str()));
        }

        let page = self.strategy.parse(query)?;
        tracing::debug!(
            collection = %self.name,
            style = self.strategy.name(),
            ?page,
            "Received page request"
        );

        let data = self.reader.fetch(page).await?;
        let links = self.strategy.build_links(path, &page);

        Ok(PaginatedResponse::new(data, links))
    }
}

#[async_trait]
impl<S, R> Endpoint for PaginationEndpoint<S, R>
where
    S: PageStrategy + 'static,
    R: CollectionReader<S::Request> + 'static,
{
    async fn respond(&self, method: &Method, path: &str, query: &QueryParams) -> Response {
        match self.handle(method, path, query).await {
            Ok(page) => (StatusCode::OK, Json(page)).into_response(),
            Err(err) => error_response(&self.name, &err),
        }
    }
}

/// Map an error to a bodiless response with its status code
///
/// Storage details are logged, never returned to the client.
pub fn error_response(collection: &str, err: &Error) -> Response {
    let status = err.status_code();

    if status.is_server_error() {
        tracing::error!(collection, error = %err, "Request failed");
    } else {
        tracing::warn!(collection, error = %err, "Request rejected");
    }

    if status == StatusCode::METHOD_NOT_ALLOWED {
        return (status, [(header::ALLOW, "GET")]).into_response();
    }
    status.into_response()
}
