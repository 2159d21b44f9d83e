//! Paging query parameters shared by every list endpoint.

use serde::Deserialize;

use precinct_core::types::pagination::PageRequest;

/// `?page=2&per_page=50`. Missing values take the store defaults and
/// out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    #[serde(alias = "page_size")]
    pub per_page: Option<u64>,
}

impl PaginationParams {
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let page = PaginationParams::default().into_page_request();
        assert_eq!((page.page, page.page_size), (1, 25));

        let page = PaginationParams {
            page: Some(0),
            per_page: Some(10_000),
        }
        .into_page_request();
        assert_eq!((page.page, page.page_size), (1, 100));
    }
}
