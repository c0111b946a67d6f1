//! Path-based dispatch to endpoints

use super::endpoint::Endpoint;
use crate::pagination::parse_query;
use axum::http::{Method, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Routes collection paths to their endpoints
///
/// Endpoints only share what they were constructed with; the dispatcher
/// holds no state of its own.
#[derive(Clone, Default)]
pub struct Dispatcher {
    routes: Vec<(String, Arc<dyn Endpoint>)>,
}

impl Dispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `endpoint` at `path` for every method
    #[must_use]
    pub fn mount(mut self, path: impl Into<String>, endpoint: Arc<dyn Endpoint>) -> Self {
        self.routes.push((path.into(), endpoint));
        self
    }

    /// Mounted paths in registration order
    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(|(path, _)| path.as_str()).collect()
    }

    /// Build the axum router, including `/health`
    pub fn into_router(self) -> Router {
        let mut router = Router::new().route("/health", get(health));

        for (path, endpoint) in self.routes {
            router = router.route(
                &path,
                any(move |method: Method, uri: Uri| {
                    let endpoint = Arc::clone(&endpoint);
                    async move {
                        let query = parse_query(uri.query());
                        endpoint.respond(&method, uri.path(), &query).await
                    }
                }),
            );
        }

        router.layer(TraceLayer::new_for_http())
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
