//! Pagination response headers
//!
//! `X-Total-Count` carries the total number of elements and `Link` carries
//! `next`, `prev`, `last` and `first` URIs built from the request URI with
//! `page` and `size` replaced.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use khreact_common::pagination::Page;

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Headers for one page of a list response
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(page.total_elements));

    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(uri, page.page + 1, page.size, "next"));
    }
    if page.has_previous() {
        links.push(link(uri, page.page - 1, page.size, "prev"));
    }
    let last = page.total_pages().saturating_sub(1);
    links.push(link(uri, last, page.size, "last"));
    links.push(link(uri, 0, page.size, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(axum::http::header::LINK, value);
    }

    headers
}

fn link(uri: &Uri, page: u64, size: u64, rel: &str) -> String {
    format!("<{}>; rel=\"{}\"", page_uri(uri, page, size), rel)
}

/// Request path and query with `page` and `size` set to the given values
fn page_uri(uri: &Uri, page: u64, size: u64) -> String {
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            key != "page" && key != "size"
        })
        .collect();

    let page_param = format!("page={}", page);
    let size_param = format!("size={}", size);
    pairs.push(&page_param);
    pairs.push(&size_param);

    format!("{}?{}", uri.path(), pairs.join("&"))
}
