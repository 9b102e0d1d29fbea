//! Request handlers.
//!
//! - `/healthz`: liveness probe, constant body
//! - `/hello`: reflects request headers back, adds `Version`, optionally
//!   sleeps for a random duration and times itself

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use rand::Rng;

use crate::config::EchoConfig;
use crate::http::server::AppState;
use crate::observability::ExecutionTimer;

/// Body of a successful health check.
pub const HEALTH_BODY: &str = "ok\n";

/// Response header carrying the configured version tag.
pub const VERSION_HEADER: HeaderName = HeaderName::from_static("version");

/// Request headers that describe the request's own framing and must not be
/// copied onto the response.
const FRAMING_HEADERS: [HeaderName; 7] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::UPGRADE,
    header::TE,
    header::TRAILER,
];

/// Liveness probe.
pub async fn healthz() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(HEALTH_BODY))
        // Bare 500 if the response cannot be assembled; socket write errors
        // happen after the handler returns and are not visible here.
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build health response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

/// Header echo handler.
pub async fn hello(State(state): State<AppState>, headers: HeaderMap) -> Response {
    tracing::debug!("Entering hello handler");
    let _timer = ExecutionTimer::start(state.latency.clone());

    if let Some(delay) = artificial_delay(&state.echo) {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Delaying hello response");
        tokio::time::sleep(delay).await;
    }

    let mut response = StatusCode::OK.into_response();
    mirror_headers(&headers, response.headers_mut());

    if let Some(version) = &state.version {
        response.headers_mut().append(VERSION_HEADER, version.clone());
    }

    response
}

/// Copy every request header value onto `target`, keeping repeated values.
pub fn mirror_headers(source: &HeaderMap, target: &mut HeaderMap) {
    for (name, value) in source {
        if FRAMING_HEADERS.contains(name) {
            continue;
        }
        target.append(name.clone(), value.clone());
    }
}

/// Pick the sleep for one request, if the delay is enabled.
pub fn artificial_delay(config: &EchoConfig) -> Option<Duration> {
    if !config.artificial_delay {
        return None;
    }
    let max = config.delay_max_ms.max(config.delay_min_ms);
    let millis = rand::thread_rng().gen_range(config.delay_min_ms..=max);
    Some(Duration::from_millis(millis))
}
