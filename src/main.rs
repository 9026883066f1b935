mod auth;
mod backend;
mod config;
mod protocol;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use auth::CreditLedger;
use backend::{Engine, Ollama, OllamaConfig};
use config::{parse_key_entries, Config};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Configure logging
    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().init();
        }
        _ => {
            tracing_subscriber::fmt().init();
        }
    }

    // Assemble the credit ledger from configuration
    let mut entries: Vec<(String, i64)> = Vec::new();

    if let Some(key) = &config.api_key {
        entries.push((key.clone(), 1));
    }

    if let Some(raw) = &config.api_keys {
        match parse_key_entries(raw) {
            Ok(parsed) => entries.extend(parsed),
            Err(e) => {
                error!(error = %e, "invalid API_KEYS value");
                std::process::exit(1);
            }
        }
    }

    if entries.is_empty() {
        error!("at least one API key is required (set API_KEY or API_KEYS)");
        std::process::exit(1);
    }

    let key_count = entries.len();
    let ledger = Arc::new(CreditLedger::new(entries));
    info!(keys = key_count, "credit ledger initialized");

    // HTTP client for the inference engine. Connection setup is bounded but
    // requests themselves are not: a generation runs as long as the engine takes.
    let http_client = match reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let engine: Arc<dyn Engine> = Arc::new(Ollama::new(OllamaConfig {
        base_url: Some(config.ollama_base_url.clone()),
        model: config.model.clone(),
        http_client,
    }));

    info!(
        engine = engine.name(),
        base_url = engine.base_url(),
        model = config.model,
        "using inference engine"
    );

    let app = server::build_router(ledger, engine);

    let addr = normalize_addr(&config.addr);
    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        error!(addr = addr, error = %e, "failed to bind");
        std::process::exit(1);
    });

    info!(addr = addr, "server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "server error");
            std::process::exit(1);
        });

    info!("server stopped");
}

/// Convert Go-style ":8080" to "0.0.0.0:8080".
fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
