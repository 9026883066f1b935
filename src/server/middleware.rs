use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{ApiKey, CreditLedger};
use crate::protocol::AuthErrorResponse;

/// Authorized key stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthKey(pub ApiKey);

/// Auth middleware: reads `x-api-key`, checks the ledger, injects [`AuthKey`].
///
/// The check is read-only; the credit is only spent by the generate handler.
pub async fn auth_middleware(
    ledger: Arc<CreditLedger>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let key = req
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    match ledger.authorize(key) {
        Ok(api_key) => {
            req.extensions_mut().insert(AuthKey(api_key));
            next.run(req).await
        }
        Err(err) => auth_error(&err.to_string()),
    }
}

fn auth_error(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(AuthErrorResponse {
            detail: message.to_string(),
        }),
    )
        .into_response()
}
