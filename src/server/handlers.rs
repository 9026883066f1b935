use std::sync::Arc;

use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::auth::CreditLedger;
use crate::backend::Engine;
use crate::protocol::{
    AuthErrorResponse, ErrorResponse, GenerateParams, GenerateResponse, HealthResponse,
};
use crate::server::middleware::AuthKey;

/// Shared application state.
pub struct AppState {
    pub ledger: Arc<CreditLedger>,
    pub engine: Arc<dyn Engine>,
}

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        engine: Some(state.engine.name().to_string()),
    })
}

/// Generation endpoint: spend one credit, forward the prompt, return the text.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthKey>,
    Query(params): Query<GenerateParams>,
) -> Response {
    // Charge before attempt. A request that lost the race for the last
    // credit gets the same 403 as a failed authorization.
    if let Err(err) = state.ledger.debit(&auth.0) {
        return (
            StatusCode::FORBIDDEN,
            Json(AuthErrorResponse {
                detail: err.to_string(),
            }),
        )
            .into_response();
    }

    match state.engine.chat(&params.promt).await {
        Ok(text) => Json(GenerateResponse { response: text }).into_response(),
        Err(err) => {
            // The spent credit is not refunded.
            error!(engine = state.engine.name(), error = %err, "inference call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "inference failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
