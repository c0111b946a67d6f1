//! Storage support via DuckDB
//!
//! This module provides the storage handle the collection readers query.
//! DuckDB can serve its own files or attach PostgreSQL, MySQL and SQLite.

mod engine;

pub use engine::{read_timestamp, timestamp_to_string, DatabaseEngine};
