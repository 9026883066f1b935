use serde::{Deserialize, Serialize};

/// Query parameters for `POST /generate`.
///
/// The parameter is spelled `promt` — the misspelling is the wire contract
/// this gateway exposes and renaming it would break existing callers.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub promt: String,
}

/// Successful generation response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Authorization failure body.
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub detail: String,
}

/// Error response returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}
