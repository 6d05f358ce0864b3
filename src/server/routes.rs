//! HTTP routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::pipelines::sentiment::SentimentAnalyzer;
use crate::pipelines::stats::ServiceMetrics;

/// Application state shared across handlers.
pub struct AppState {
    /// The process-wide analyzer.
    pub analyzer: SentimentAnalyzer,
    /// Request counters.
    pub metrics: ServiceMetrics,
    /// Name reported by the health endpoint.
    pub service_name: String,
}

impl AppState {
    /// Wrap an analyzer with fresh metrics.
    pub fn new(analyzer: SentimentAnalyzer, service_name: impl Into<String>) -> Self {
        Self {
            analyzer,
            metrics: ServiceMetrics::new(),
            service_name: service_name.into(),
        }
    }
}

/// Create the application router.
///
/// # Routes
///
/// - `GET /api/sentiment?text=..&method=..` - Analyze one text
/// - `POST /api/sentiment/batch` - Analyze `{"texts": [...]}`, returns text → label
/// - `GET /api/model/info` - Active strategy description
/// - `GET /api/health` - Liveness with model status (`LOADED` or `MOCK`)
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/sentiment", get(handlers::analyze_sentiment))
        .route("/api/sentiment/batch", post(handlers::analyze_batch))
        .route("/api/model/info", get(handlers::model_info))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
