//! Sentiment analysis HTTP server.
//!
//! # Usage
//!
//! ```bash
//! sentiment-service --model-path model.safetensors --port 8080
//! ```
//!
//! Every flag can also be set through its `SENTIMENT_*` environment variable.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sentiment_service::config::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_INPUT_SIZE, DEFAULT_MODEL_PATH, DEFAULT_SERVICE_NAME,
};
use sentiment_service::sentiment::SentimentAnalyzerBuilder;
use sentiment_service::server::{create_router, AppState};
use sentiment_service::{DeviceRequest, ServiceConfig};

const DEFAULT_LOG_DIRECTIVES: &str = "sentiment_service=info,tower_http=info";

#[derive(Debug, Parser)]
#[command(name = "sentiment-service", version, about = "Sentiment classification over HTTP")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "SENTIMENT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, env = "SENTIMENT_PORT", default_value_t = 8080)]
    port: u16,

    /// Path of the safetensors classifier weights
    #[arg(long, env = "SENTIMENT_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    model_path: String,

    /// Feature vector length expected by the model
    #[arg(long, env = "SENTIMENT_INPUT_SIZE", default_value_t = DEFAULT_INPUT_SIZE)]
    input_size: usize,

    /// Prediction cache bound (0 disables caching)
    #[arg(long, env = "SENTIMENT_CACHE_CAPACITY", default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Inference device: `cpu` or `cuda:N`
    #[arg(long, env = "SENTIMENT_DEVICE", default_value = "cpu")]
    device: DeviceRequest,

    /// Name reported by the health endpoint
    #[arg(long, env = "SENTIMENT_SERVICE_NAME", default_value = DEFAULT_SERVICE_NAME)]
    service_name: String,
}

impl From<Args> for ServiceConfig {
    fn from(args: Args) -> Self {
        ServiceConfig {
            host: args.host,
            port: args.port,
            model_path: args.model_path,
            input_size: args.input_size,
            cache_capacity: args.cache_capacity,
            device: args.device,
            service_name: args.service_name,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from(Args::parse());
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.bind_addr(),
        model_path = %config.model_path,
        device = %config.device,
        cache_capacity = config.cache_capacity,
        "starting sentiment service"
    );

    let analyzer = SentimentAnalyzerBuilder::from_config(&config).build();
    let state = Arc::new(AppState::new(analyzer, config.service_name.clone()));
    let app = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.analyzer.shutdown();
    let metrics = state.metrics.snapshot();
    tracing::info!(
        total_requests = metrics.total_requests,
        successful_requests = metrics.successful_requests,
        avg_analysis_ms = metrics.avg_analysis_ms(),
        "shutdown complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
