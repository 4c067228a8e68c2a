use anyhow::{Context, Result};
use clap::Parser;
use speech_gateway::{create_router, AppState, AttemptStore, Config, SpeechClient};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "speech-gateway")]
#[command(about = "Cloud speech-to-text gateway with attempt persistence")]
struct Args {
    /// Config file name, without extension
    #[arg(long, default_value = "config/speech-gateway")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("Speech endpoint: {}", cfg.speech.endpoint);

    let store = Arc::new(AttemptStore::open(&cfg.store.path).context("Failed to open attempt store")?);
    info!(
        "Attempt store at {} ({} attempts on disk)",
        cfg.store.path,
        store.len().await
    );

    let client = Arc::new(SpeechClient::new(cfg.speech.to_speech_config())?);
    let state = AppState::new(store, client, cfg.speech.language.clone());

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
