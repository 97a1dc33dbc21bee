//! Pagination parameters
//!
//! List endpoints accept JSON:API style `page[number]` and `page[size]`
//! query parameters. Both are optional; defaults come from configuration.
//! The resulting slice is `(number-1)*size .. number*size-1` over the
//! collection's stable order, and an out-of-range page yields an empty
//! sequence rather than an error.

use serde::{Deserialize, Serialize};

/// Default page size when the request does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hard ceiling for the page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw pagination query parameters as they appear in the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// 1-indexed page number
    #[serde(rename = "page[number]")]
    pub number: Option<u32>,
    /// Items per page
    #[serde(rename = "page[size]")]
    pub size: Option<u32>,
}

/// Validated pagination parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Page number (1-indexed)
    pub number: u32,
    /// Number of items per page
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Create new pagination parameters, flooring the page number at 1 and
    /// clamping the size to `1..=MAX_PAGE_SIZE`.
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Resolve raw query parameters against a configured default size.
    pub fn from_query(query: &PageQuery, default_size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            number: query.number.unwrap_or(1).max(1),
            size: query.size.unwrap_or(default_size).clamp(1, max_size),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        ((self.number as i64).saturating_sub(1)) * self.size as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}
