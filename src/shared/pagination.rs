//! Page request normalization and the page envelope returned by listings.
//!
//! Listing endpoints never reject pagination input: anything missing,
//! non-numeric or non-positive falls back to the endpoint default, and the
//! page size is clamped to [`MAX_PAGE_SIZE`].

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Raw query-string parameters of a listing request.
pub type QueryParams = HashMap<String, String>;

/// Upper bound for `limit` on every listing endpoint.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default page number when the request carries none.
pub const DEFAULT_PAGE: u64 = 1;

/// Effective page coordinates of a listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Page size, always in `1..=MAX_PAGE_SIZE`
    pub limit: u64,
}

impl PageRequest {
    /// Build a page request from raw query-string values.
    ///
    /// `default_limit` is itself clamped, so a misconfigured endpoint still
    /// yields a size inside `1..=MAX_PAGE_SIZE`.
    pub fn normalize(raw_page: Option<&str>, raw_limit: Option<&str>, default_limit: u64) -> Self {
        let page = parse_positive(raw_page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(raw_limit)
            .unwrap_or(default_limit)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// First page with the given size.
    pub fn first(limit: u64) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parse a strictly positive integer from the leading digits of `raw`.
///
/// Returns `None` for absent, blank, non-numeric or non-positive values.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    parse_leading_integer(raw?)
        .and_then(|n| u64::try_from(n).ok())
        .filter(|n| *n > 0)
}

/// Integer prefix of `raw`: leading whitespace, an optional sign, then
/// the run of decimal digits. Anything after the digits is ignored, so
/// `"2.7"` is 2, `"12abc"` is 12 and `"1e3"` is 1. Saturates at the `i64`
/// bounds.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = unsigned[..len].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Pagination metadata attached to every page envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Page that was returned (1-based)
    pub current_page: u64,
    /// `ceil(total_items / items_per_page)`, zero when nothing matched
    pub total_pages: u64,
    /// Rows matching the filters across all pages
    pub total_items: u64,
    /// Effective page size
    pub items_per_page: u64,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        Self {
            current_page: request.page,
            total_pages: total_items.div_ceil(request.limit),
            total_items,
            items_per_page: request.limit,
        }
    }
}

/// One page of rows plus its metadata.
///
/// Serialized as `{"<collection>": [...], "pagination": {...}}` where the
/// collection key is the plural entity name of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub collection: &'static str,
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PageEnvelope<T> {
    pub fn new(collection: &'static str, items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            collection,
            items,
            pagination: PaginationMeta::new(request, total_items),
        }
    }

    pub fn map<U, F>(self, f: F) -> PageEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        PageEnvelope {
            collection: self.collection,
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T: Serialize> Serialize for PageEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.collection, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(raw: Option<&str>) -> u64 {
        PageRequest::normalize(raw, None, 20).page
    }

    fn limit(raw: Option<&str>) -> u64 {
        PageRequest::normalize(None, raw, 20).limit
    }

    #[test]
    fn page_falls_back_to_one() {
        assert_eq!(page(None), 1);
        assert_eq!(page(Some("")), 1);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("-3")), 1);
        assert_eq!(page(Some("abc")), 1);
        assert_eq!(page(Some("NaN")), 1);
        assert_eq!(page(Some("0.5")), 1);
    }

    #[test]
    fn page_is_floored() {
        assert_eq!(page(Some("1")), 1);
        assert_eq!(page(Some("7")), 7);
        assert_eq!(page(Some(" 3 ")), 3);
        assert_eq!(page(Some("2.7")), 2);
        assert_eq!(page(Some("12abc")), 12);
        assert_eq!(page(Some("+4")), 4);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(limit(None), 20);
        assert_eq!(limit(Some("5")), 5);
        assert_eq!(limit(Some("100")), 100);
        assert_eq!(limit(Some("500")), 100);
        assert_eq!(limit(Some("1e3")), 1);
        assert_eq!(limit(Some("250rows")), 100);
    }

    #[test]
    fn non_positive_limit_uses_default() {
        assert_eq!(limit(Some("0")), 20);
        assert_eq!(limit(Some("-5")), 20);
        assert_eq!(limit(Some("ten")), 20);
    }

    #[test]
    fn default_limit_is_clamped_too() {
        assert_eq!(PageRequest::normalize(None, None, 0).limit, 1);
        assert_eq!(PageRequest::normalize(None, None, 1000).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_from_page_and_limit() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 2, limit: 5 }.offset(), 5);
        assert_eq!(PageRequest { page: 4, limit: 25 }.offset(), 75);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let request = PageRequest::normalize(Some("99999999999999999999999"), Some("100"), 20);
        assert_eq!(request.page, i64::MAX as u64);
        assert_eq!(request.offset(), u64::MAX);
    }

    #[test]
    fn leading_integer_prefix() {
        assert_eq!(parse_leading_integer("42"), Some(42));
        assert_eq!(parse_leading_integer("  7 pages"), Some(7));
        assert_eq!(parse_leading_integer("1e3"), Some(1));
        assert_eq!(parse_leading_integer("-3.9"), Some(-3));
        assert_eq!(parse_leading_integer("x12"), None);
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer(""), None);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest { page: 2, limit: 5 };
        assert_eq!(PaginationMeta::new(request, 12).total_pages, 3);
        assert_eq!(PaginationMeta::new(request, 10).total_pages, 2);
        assert_eq!(PaginationMeta::new(request, 1).total_pages, 1);
        assert_eq!(PaginationMeta::new(request, 0).total_pages, 0);
    }

    #[test]
    fn envelope_uses_collection_key() {
        let envelope = PageEnvelope::new("courses", vec![1, 2], PageRequest { page: 1, limit: 2 }, 5);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "courses": [1, 2],
                "pagination": {
                    "current_page": 1,
                    "total_pages": 3,
                    "total_items": 5,
                    "items_per_page": 2
                }
            })
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let envelope = PageEnvelope::new("comments", vec![1, 2, 3], PageRequest::first(3), 9);
        let mapped = envelope.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.collection, "comments");
        assert_eq!(mapped.pagination.total_pages, 3);
    }
}
