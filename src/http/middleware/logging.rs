//! Request logging middleware.
//!
//! Resolves the client IP, runs the inner handler and logs the status code
//! that is actually written. The inner handler's response is passed through
//! untouched.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::client_ip::resolve_client_ip;
use crate::http::response::CapturedResponse;

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match resolve_client_ip(req.headers(), &remote_addr) {
        Ok(ip) => tracing::info!(client_ip = %ip, method = %method, path = %path, "Request received"),
        Err(e) => tracing::info!(error = %e, method = %method, path = %path, "Request received, client ip unknown"),
    }

    let captured = CapturedResponse::from(next.run(req).await);

    tracing::info!(
        method = %method,
        path = %path,
        status = captured.status().as_u16(),
        "Response sent"
    );

    captured.into_inner()
}
