//! Offset/limit pagination.

use super::Post;

/// Page size used when the caller gives none, or an unusable one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound on the page size unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// A validated page window. `page` is 1-based and `limit` is within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a window from raw query values.
    ///
    /// Missing, non-numeric or non-positive values fall back to page 1 and
    /// `default_limit`. `limit` is clamped to `max_limit`.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));

        Self { page, limit }
    }

    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of records to skip. Capped at `i64::MAX`, the largest OFFSET
    /// PostgreSQL accepts.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

/// One page of posts.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    /// Number of posts in this page, not the total across pages.
    pub results: usize,
    pub page: u64,
    pub limit: u64,
}

impl PostPage {
    pub fn new(posts: Vec<Post>, request: PageRequest) -> Self {
        Self {
            results: posts.len(),
            posts,
            page: request.page,
            limit: request.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(page: Option<&str>, limit: Option<&str>) -> PageRequest {
        PageRequest::from_query(page, limit, DEFAULT_LIMIT, DEFAULT_MAX_LIMIT)
    }

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(parse(None, None), PageRequest::default());
    }

    #[test]
    fn test_non_numeric_falls_back_to_defaults() {
        assert_eq!(parse(Some("abc"), Some("ten")), PageRequest::default());
    }

    #[test]
    fn test_non_positive_page_clamped_to_first() {
        assert_eq!(parse(Some("0"), Some("5")).page, 1);
        assert_eq!(parse(Some("-3"), Some("5")).page, 1);
        assert_eq!(parse(Some("-3"), Some("5")).offset(), 0);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        assert_eq!(parse(None, Some("5000")).limit, DEFAULT_MAX_LIMIT);
        assert_eq!(parse(None, Some("0")).limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(parse(Some("1"), Some("10")).offset(), 0);
        assert_eq!(parse(Some("2"), Some("10")).offset(), 10);
        assert_eq!(parse(Some("4"), Some("25")).offset(), 75);
    }

    #[test]
    fn test_offset_saturates() {
        let request = PageRequest::new(u64::MAX, 100);
        assert_eq!(request.offset(), i64::MAX as u64);
    }
}
