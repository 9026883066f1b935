pub mod handlers;
pub mod logging;
pub mod middleware;

use std::sync::Arc;

use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::CreditLedger;
use crate::backend::Engine;

use self::handlers::AppState;

/// Build the axum router with public and protected route split.
pub fn build_router(ledger: Arc<CreditLedger>, engine: Arc<dyn Engine>) -> Router {
    let state = Arc::new(AppState {
        ledger: ledger.clone(),
        engine,
    });

    // Public routes (no auth)
    let public_routes = Router::new().route("/health", get(handlers::health));

    // Protected routes (with auth middleware)
    let protected_routes = Router::new()
        .route("/generate", post(handlers::generate))
        .layer(axum_middleware::from_fn_with_state(
            ledger,
            |state: axum::extract::State<Arc<CreditLedger>>,
             req: axum::extract::Request,
             next: axum_middleware::Next| {
                middleware::auth_middleware(state.0, req, next)
            },
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
