pub mod ollama;

pub use ollama::{Ollama, OllamaConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Engine trait for LLM inference backends.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Human-readable name for this engine.
    fn name(&self) -> &str;

    /// Base URL for API requests.
    fn base_url(&self) -> &str;

    /// Send a single user-role prompt and return the generated text verbatim.
    /// Blocks until the engine replies or errors.
    async fn chat(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Inference engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("malformed engine reply: {0}")]
    MalformedReply(String),
}
