//! Page token -> LIMIT/OFFSET.

/// Fixed page size; the token never changes it.
pub const PAGE_SIZE: i64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Resolve a raw `page` token. The token is parsed strictly as an integer with no
    /// trimming; anything that fails to parse counts as page 1. Pages below 1
    /// (zero and negatives) are clamped to page 1 so the offset is never negative.
    pub fn from_page_token(token: &str) -> Self {
        let page = page_number(token);
        Pagination {
            limit: PAGE_SIZE,
            offset: (page - 1).saturating_mul(PAGE_SIZE),
        }
    }
}

/// 1-based page number resolved from a token (always >= 1).
pub fn page_number(token: &str) -> i64 {
    match token.parse::<i64>() {
        Ok(p) if p > 1 => p,
        _ => 1,
    }
}
