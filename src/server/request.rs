use crate::dispatcher::{ParamVec, RawRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and decodes it with
/// [`parse_query_string`]. A path without `?` has no parameters.
///
/// # Arguments
///
/// * `path` - The full URL path (e.g., `/users?limit=10&tag=a&tag=b`)
pub fn parse_query_params(path: &str) -> ParamVec {
    match path.find('?') {
        Some(pos) => parse_query_string(&path[pos + 1..]),
        None => ParamVec::new(),
    }
}

/// Decode a bare query string with `application/x-www-form-urlencoded` rules.
///
/// Repeated names are kept in arrival order.
pub fn parse_query_string(query: &str) -> ParamVec {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (Arc::<str>::from(&*k), v.into_owned()))
        .collect()
}

/// Build a [`RawRequest`] from an `http::Request` whose body has already been
/// parsed, plus the route parameters extracted by the router.
pub fn raw_request_from_http(req: http::Request<Option<Value>>, path_params: ParamVec) -> RawRequest {
    let query_params = req
        .uri()
        .query()
        .map(parse_query_string)
        .unwrap_or_default();

    debug!(
        method = %req.method(),
        path = %req.uri().path(),
        path_params = path_params.len(),
        query_params = query_params.len(),
        "Raw request extracted"
    );

    RawRequest {
        path_params,
        query_params,
        body: req.into_body(),
    }
}
