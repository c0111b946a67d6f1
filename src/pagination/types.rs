//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::{Error, Result};
use crate::types::QueryParams;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Offset-style page request (`?limit=L&offset=O`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPage {
    /// Maximum number of records to return
    pub limit: i64,
    /// Number of records to skip from the collection start
    pub offset: i64,
}

impl OffsetPage {
    /// Create an offset page request
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// Cursor-style page request (`?cursor=C&limit=L`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPage {
    /// Inclusive lower bound on the primary key
    pub cursor: i64,
    /// Maximum number of records to return
    pub limit: i64,
}

impl CursorPage {
    /// Create a cursor page request
    pub fn new(cursor: i64, limit: i64) -> Self {
        Self { cursor, limit }
    }
}

/// Navigation links for the current page
///
/// Each link is a relative URL (path plus query string) for the same endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLinks {
    pub prev: String,
    pub next: String,
    pub first: String,
}

/// A page of records with its navigation links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub links: NavigationLinks,
}

impl<T> PaginatedResponse<T> {
    /// Create a response from fetched records and computed links
    pub fn new(data: Vec<T>, links: NavigationLinks) -> Self {
        Self { data, links }
    }
}

/// How requested limits are bounded before they reach storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitPolicy {
    /// Forward any integer limit unchanged
    #[default]
    PassThrough,
    /// Clamp the limit into `[0, max]`
    Clamp {
        /// Largest page size served
        max: i64,
    },
}

impl LimitPolicy {
    /// Build a policy from an optional configured maximum
    pub fn from_max(max_limit: Option<i64>) -> Self {
        max_limit.map_or(Self::PassThrough, |max| Self::Clamp { max })
    }

    /// Apply the policy to a parsed limit
    pub fn apply(&self, limit: i64) -> i64 {
        match *self {
            Self::PassThrough => limit,
            Self::Clamp { max } => limit.clamp(0, max.max(0)),
        }
    }
}

/// Core trait for pagination strategies
///
/// A strategy owns both halves of the pagination contract: turning raw query
/// parameters into a typed request, and turning that request back into links.
/// Links depend on the request only, never on the records that were fetched.
pub trait PageStrategy: Send + Sync {
    /// Typed page request produced by [`PageStrategy::parse`]
    type Request: Copy + Debug + Send + Sync + 'static;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Parse and validate query parameters
    fn parse(&self, query: &QueryParams) -> Result<Self::Request>;

    /// Compute prev/next/first links for `path`
    fn build_links(&self, path: &str, request: &Self::Request) -> NavigationLinks;
}

/// Decode a raw query string into parameters
///
/// Keys are percent-decoded; when a key repeats, its first value is kept.
pub fn parse_query(raw: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(raw) = raw {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }
    params
}

/// Read a mandatory base-10 integer parameter
pub(crate) fn required_int(query: &QueryParams, name: &str) -> Result<i64> {
    let raw = query.get(name).ok_or_else(|| Error::missing_param(name))?;
    raw.parse::<i64>()
        .map_err(|_| Error::invalid_param(name, raw.as_str()))
}

/// Render `{path}?{k1}={v1}&{k2}={v2}` with the parameters in the given order
pub(crate) fn format_link(path: &str, first: (&str, i64), second: (&str, i64)) -> String {
    format!("{path}?{}={}&{}={}", first.0, first.1, second.0, second.1)
}
