use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

/// Request logging middleware. Health probes are skipped; everything else is
/// logged once on completion, at a level matching the response status class.
/// Note that 403s here cover both bad keys and exhausted credit.
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    if req.uri().path() == "/health" {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis();

    match status {
        500.. => error!(method, path, status, latency_ms, "request failed"),
        400..=499 => warn!(method, path, status, latency_ms, "request rejected"),
        _ => info!(method, path, status, latency_ms, "request served"),
    }

    response
}
