use thiserror::Error;

/// Authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A missing key, an unknown key, and an exhausted key all produce this
    /// same error — callers are deliberately unable to tell them apart.
    #[error("Invalid or missing API Key")]
    InvalidKey,
}
