//! HTTP server
//!
//! # Routes
//!
//! - `GET /books?limit={int}&offset={int}` - offset-paginated books
//! - `GET /cars?cursor={int}&limit={int}` - cursor-paginated cars
//! - `GET /health` - liveness probe

mod dispatcher;
mod endpoint;

pub use dispatcher::Dispatcher;
pub use endpoint::{error_response, Endpoint, PaginationEndpoint};

use crate::collections::{BookReader, CarReader};
use crate::config::{AppConfig, ServerSettings};
use crate::database::DatabaseEngine;
use crate::error::{Error, Result};
use crate::pagination::{CursorStrategy, OffsetStrategy};
use std::sync::Arc;
use tokio::signal;

/// Wire `/books` and `/cars` to readers over the shared storage handle
pub fn build_dispatcher(engine: Arc<DatabaseEngine>, config: &AppConfig) -> Dispatcher {
    let policy = config.pagination.limit_policy();

    let books = PaginationEndpoint::new(
        "books",
        OffsetStrategy::new(policy),
        BookReader::new(Arc::clone(&engine), &config.database.books_table),
    );
    let cars = PaginationEndpoint::new(
        "cars",
        CursorStrategy::new(policy),
        CarReader::new(engine, &config.database.cars_table),
    );

    Dispatcher::new()
        .mount("/books", Arc::new(books))
        .mount("/cars", Arc::new(cars))
}

/// Start the HTTP server and run until SIGINT/SIGTERM
pub async fn serve(settings: &ServerSettings, dispatcher: Dispatcher) -> Result<()> {
    let paths = dispatcher.paths().join(", ");
    let app = dispatcher.into_router();

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting HTTP server on http://{} (serving {})", addr, paths);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
