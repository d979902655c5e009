use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Reads a non-blank request id from headers.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn generate_request_id() -> HeaderValue {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    HeaderValue::from_str(&format!("req-{nanos}")).unwrap_or(HeaderValue::from_static("req-0"))
}

/// Makes sure every request carries `X-Request-Id` (keeping the caller's one
/// if present) and echoes it on the response.
pub async fn request_id_layer(mut req: Request<Body>, next: Next) -> Response {
    let id = match request_id(req.headers()).map(HeaderValue::from_str) {
        Some(Ok(value)) => value,
        _ => generate_request_id(),
    };
    req.headers_mut().insert(REQUEST_ID_HEADER, id.clone());

    let mut res = next.run(req).await;
    res.headers_mut().insert(REQUEST_ID_HEADER, id);
    res
}
