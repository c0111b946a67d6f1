//! Pagination module
//!
//! Supports: Offset (`limit`/`offset`), Cursor (`cursor`/`limit`)
//!
//! # Overview
//!
//! The pagination module provides a unified interface for the two paging
//! styles served by the API. Each strategy validates the raw query parameters
//! into a typed page request and derives the prev/next/first links from it.

mod strategies;
mod types;

pub use strategies::{CursorStrategy, OffsetStrategy};
pub use types::{
    parse_query, CursorPage, LimitPolicy, NavigationLinks, OffsetPage, PageStrategy,
    PaginatedResponse,
};
