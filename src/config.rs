use clap::Parser;

/// Credit Gateway — API-key metered proxy for local LLM inference.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Listen address (e.g. ":8080" or "0.0.0.0:8080")
    #[arg(long, default_value = ":8080", env = "ADDR")]
    pub addr: String,

    /// Log format: "text" or "json"
    #[arg(long, default_value = "text", env = "LOG_FORMAT")]
    pub log_format: String,

    /// Single API key, granted one credit
    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,

    /// Comma-separated key=credits entries (e.g. "alice=10,bob=3")
    #[arg(long, env = "API_KEYS")]
    pub api_keys: Option<String>,

    /// Ollama API base URL
    #[arg(
        long,
        default_value = "http://127.0.0.1:11434",
        env = "OLLAMA_BASE_URL"
    )]
    pub ollama_base_url: String,

    /// Model identifier sent with every inference call
    #[arg(long, default_value = "llama2", env = "MODEL")]
    pub model: String,
}

/// Parse a comma-separated list of `key=credits` entries, trimming whitespace
/// and filtering empties.
pub fn parse_key_entries(raw: &str) -> Result<Vec<(String, i64)>, String> {
    let mut entries = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, credits) = part
            .split_once('=')
            .ok_or_else(|| format!("malformed entry {part:?}: expected key=credits"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("malformed entry {part:?}: empty key"));
        }
        let credits: i64 = credits
            .trim()
            .parse()
            .map_err(|_| format!("malformed entry {part:?}: credits must be an integer"))?;
        entries.push((key.to_string(), credits));
    }
    Ok(entries)
}
