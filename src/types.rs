//! Record types served by the API
//!
//! Records are read-only snapshots of table rows. They are created per request
//! by the collection readers and dropped once the response is written.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Decoded query string parameters (first occurrence of a key wins)
pub type QueryParams = HashMap<String, String>;

// ============================================================================
// Records
// ============================================================================

/// A row of the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Primary key (`book_id`)
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Creation timestamp rendered as an ISO-8601 string
    pub created_at: String,
}

/// A row of the `cars` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Primary key (`car_id`), also the pagination cursor
    pub id: i64,
    pub brand: String,
    pub model: String,
    /// Creation timestamp rendered as an ISO-8601 string
    pub created_at: String,
}
