//! Alert headers
//!
//! Successful mutations and entity-level rejections carry a short message key
//! and a parameter in `X-khreactApp-*` headers, so a client can show a
//! notification without parsing the body.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::APPLICATION_NAME;

/// `X-khreactApp-alert` / `X-khreactApp-params`
pub fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, "alert", message);
    insert(&mut headers, "params", param);
    headers
}

pub fn entity_created(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{}.{}.created", APPLICATION_NAME, entity_name), param)
}

pub fn entity_updated(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{}.{}.updated", APPLICATION_NAME, entity_name), param)
}

pub fn entity_deleted(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{}.{}.deleted", APPLICATION_NAME, entity_name), param)
}

/// `X-khreactApp-error: error.{key}` / `X-khreactApp-params: {entity}`
pub fn failure(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, "error", &format!("error.{}", error_key));
    insert(&mut headers, "params", entity_name);
    headers
}

fn insert(headers: &mut HeaderMap, suffix: &str, value: &str) {
    let name = format!("x-{}-{}", APPLICATION_NAME, suffix).to_ascii_lowercase();
    // Values that are not visible ASCII are dropped rather than failing the response
    if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::from_str(value)) {
        headers.insert(name, value);
    }
}
