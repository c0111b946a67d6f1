// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Pagination Service
//!
//! A read-only JSON API serving two collections with two pagination styles:
//!
//! - `GET /books?limit=L&offset=O` - offset pagination over `books`
//! - `GET /cars?cursor=C&limit=L` - cursor (keyset) pagination over `cars`
//!
//! Every page carries `prev`, `next` and `first` links computed from the
//! request parameters alone.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagination_service::{config::AppConfig, database::DatabaseEngine, server};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pagination_service::Result<()> {
//!     let config = AppConfig::default().with_env_overrides()?;
//!     let engine = Arc::new(DatabaseEngine::open(&config.database)?);
//!     let dispatcher = server::build_dispatcher(engine, &config);
//!     server::serve(&config.server, dispatcher).await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Dispatcher (axum Router)                │
//! │        /books            /cars             /health       │
//! └──────────────────────────────────────────────────────────┘
//!                  │                  │
//! ┌────────────────┴──────┬───────────┴───────────────────────┐
//! │  PaginationEndpoint   │  PaginationEndpoint               │
//! │  OffsetStrategy       │  CursorStrategy                   │
//! │  BookReader           │  CarReader                        │
//! └───────────────────────┴───────────────────────────────────┘
//!                  │                  │
//! ┌────────────────┴──────────────────┴───────────────────────┐
//! │       DatabaseEngine (DuckDB, optionally attached to      │
//! │              Postgres / MySQL / SQLite)                   │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the service
pub mod error;

/// Record types and type aliases
pub mod types;

/// Service configuration
pub mod config;

/// Pagination strategies and link building
pub mod pagination;

/// Storage handle via DuckDB
pub mod database;

/// Collection readers
pub mod collections;

/// HTTP endpoints and dispatch
pub mod server;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, AppConfig};
pub use pagination::{CursorPage, NavigationLinks, OffsetPage, PaginatedResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
