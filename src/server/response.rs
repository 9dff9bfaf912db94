use crate::dispatcher::DispatchResponse;
use http::header::CONTENT_TYPE;

/// Canonical reason phrase for the statuses an endpoint can produce.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown"),
    }
}

/// Convert a dispatch result into an `http::Response` with a byte body.
///
/// Empty bodies carry no `Content-Type`.
///
/// # Errors
///
/// Returns an error if the status code is not a valid HTTP status.
pub fn into_http_response(resp: DispatchResponse) -> http::Result<http::Response<Vec<u8>>> {
    let mut builder = http::Response::builder().status(resp.status);
    if let Some(content_type) = resp.content_type() {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(resp.body_bytes())
}
