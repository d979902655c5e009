use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::core::app_state::AppState;

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "content-type, x-request-id";

/// Answers preflight requests and tags responses with
/// `Access-Control-Allow-Origin` according to the configured [`CorsPolicy`].
///
/// [`CorsPolicy`]: crate::core::app_state::CorsPolicy
pub async fn cors_layer(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let allow = state.cors.allow_origin(req.headers().get(header::ORIGIN));
    let preflight = req.method() == Method::OPTIONS;

    let mut res = if preflight {
        debug!(allowed = allow.is_some(), "cors: preflight");
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = res.headers_mut();
    if let Some(origin) = allow {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    if preflight {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
    res
}
