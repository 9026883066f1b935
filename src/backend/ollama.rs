use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Engine, EngineError};

/// Ollama engine configuration.
pub struct OllamaConfig {
    pub base_url: Option<String>,
    pub model: String,
    pub http_client: reqwest::Client,
}

/// Ollama engine: local chat API at `/api/chat`.
pub struct Ollama {
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl Ollama {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            base_url: config
                .base_url
                .unwrap_or_else(|| "http://127.0.0.1:11434".into())
                .trim_end_matches('/')
                .to_string(),
            model: config.model,
            http_client: config.http_client,
        }
    }
}

#[async_trait]
impl Engine for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat(&self, prompt: &str) -> Result<String, EngineError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        // No request timeout: a generation runs as long as the engine takes.
        let resp = self.http_client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EngineError::UpstreamStatus(status));
        }

        let reply: ChatReply = resp
            .json()
            .await
            .map_err(|e| EngineError::MalformedReply(e.to_string()))?;

        Ok(reply.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn engine(base_url: &str) -> Ollama {
        Ollama::new(OllamaConfig {
            base_url: Some(base_url.to_string()),
            model: "llama2".into(),
            http_client: reqwest::Client::new(),
        })
    }

    #[tokio::test]
    async fn test_chat_sends_single_user_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "model": "llama2",
                "messages": [{"role": "user", "content": "Hello"}],
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "Hi there"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let got = engine(&server.uri()).chat("Hello").await.unwrap();
        assert_eq!(got, "Hi there");
    }

    #[tokio::test]
    async fn test_chat_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = engine(&server.uri()).chat("Hello").await.unwrap_err();
        assert!(matches!(err, EngineError::UpstreamStatus(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_chat_malformed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
            .mount(&server)
            .await;

        let err = engine(&server.uri()).chat("Hello").await.unwrap_err();
        assert!(matches!(err, EngineError::MalformedReply(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let e = Ollama::new(OllamaConfig {
            base_url: Some("http://localhost:11434/".into()),
            model: "llama2".into(),
            http_client: reqwest::Client::new(),
        });
        assert_eq!(e.base_url(), "http://localhost:11434");
    }
}
