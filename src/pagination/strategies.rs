//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{
    format_link, required_int, CursorPage, LimitPolicy, NavigationLinks, OffsetPage, PageStrategy,
};
use crate::error::Result;
use crate::types::QueryParams;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (SQL `LIMIT`/`OFFSET`)
///
/// Links keep `limit` before `offset`:
/// - `/books?limit=10&offset=20`
///
/// `prev` is clamped at offset 0.
#[derive(Debug, Clone, Default)]
pub struct OffsetStrategy {
    /// Bounds applied to the parsed limit
    pub limit_policy: LimitPolicy,
}

impl OffsetStrategy {
    /// Lowest offset a link may point at
    pub const FLOOR: i64 = 0;

    /// Create a new offset strategy
    pub fn new(limit_policy: LimitPolicy) -> Self {
        Self { limit_policy }
    }
}

impl PageStrategy for OffsetStrategy {
    type Request = OffsetPage;

    fn name(&self) -> &'static str {
        "offset"
    }

    fn parse(&self, query: &QueryParams) -> Result<OffsetPage> {
        let limit = required_int(query, "limit")?;
        let offset = required_int(query, "offset")?;
        Ok(OffsetPage::new(self.limit_policy.apply(limit), offset))
    }

    fn build_links(&self, path: &str, request: &OffsetPage) -> NavigationLinks {
        let OffsetPage { limit, offset } = *request;
        let link = |offset: i64| format_link(path, ("limit", limit), ("offset", offset));

        NavigationLinks {
            prev: link(offset.saturating_sub(limit).max(Self::FLOOR)),
            next: link(offset.saturating_add(limit)),
            first: link(Self::FLOOR),
        }
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination over a monotonic primary key
///
/// The cursor is an inclusive lower bound on the key. Links keep `cursor`
/// before `limit`:
/// - `/cars?cursor=11&limit=10`
///
/// The key space starts at 1, so `prev` and `first` never go below 1.
#[derive(Debug, Clone, Default)]
pub struct CursorStrategy {
    /// Bounds applied to the parsed limit
    pub limit_policy: LimitPolicy,
}

impl CursorStrategy {
    /// Lowest cursor a link may point at
    pub const FLOOR: i64 = 1;

    /// Create a new cursor strategy
    pub fn new(limit_policy: LimitPolicy) -> Self {
        Self { limit_policy }
    }
}

impl PageStrategy for CursorStrategy {
    type Request = CursorPage;

    fn name(&self) -> &'static str {
        "cursor"
    }

    fn parse(&self, query: &QueryParams) -> Result<CursorPage> {
        let cursor = required_int(query, "cursor")?;
        let limit = required_int(query, "limit")?;
        Ok(CursorPage::new(cursor, self.limit_policy.apply(limit)))
    }

    fn build_links(&self, path: &str, request: &CursorPage) -> NavigationLinks {
        let CursorPage { cursor, limit } = *request;
        let link = |cursor: i64| format_link(path, ("cursor", cursor), ("limit", limit));

        NavigationLinks {
            prev: link(cursor.saturating_sub(limit).max(Self::FLOOR)),
            next: link(cursor.saturating_add(limit)),
            first: link(Self::FLOOR),
        }
    }
}
