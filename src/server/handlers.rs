//! Request handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::routes::AppState;
use crate::error::Result;
use crate::pipelines::sentiment::{AnalysisMethod, AnalysisResult, ModelInfo, Sentiment};

// ============ Request / response bodies ============

/// Query string of `GET /api/sentiment`.
#[derive(Debug, Deserialize)]
pub struct SentimentQuery {
    /// Text to analyze.
    pub text: String,
    /// Optional method hint: `auto`, `model`, `heuristic` or `contextual`.
    #[serde(default)]
    pub method: Option<String>,
}

/// Body of `POST /api/sentiment/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    /// Texts to analyze.
    pub texts: Vec<String>,
}

/// Response of `POST /api/sentiment/batch`. Duplicate texts collapse into one entry.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    /// Text → label.
    pub results: BTreeMap<String, Sentiment>,
    /// Always `SUCCESS`.
    pub status: &'static str,
}

/// Response of `GET /api/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `UP` while the process serves.
    pub status: &'static str,
    /// Configured service name.
    pub service: String,
    /// `LOADED` when a model runtime is active, `MOCK` otherwise.
    pub model_status: &'static str,
}

// ============ Handlers ============

/// `GET /api/sentiment`
pub async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SentimentQuery>,
) -> Result<Json<AnalysisResult>> {
    let timer = state.metrics.start_analysis();
    let method: AnalysisMethod = query.method.as_deref().unwrap_or_default().parse()?;

    let worker = Arc::clone(&state);
    let result =
        tokio::task::spawn_blocking(move || worker.analyzer.analyze(&query.text, method)).await?;

    let elapsed = timer.finish();
    tracing::debug!(
        sentiment = %result.sentiment,
        model_used = result.model_used,
        elapsed_ms = elapsed.as_millis() as u64,
        "analyzed text"
    );
    Ok(Json(result))
}

/// `POST /api/sentiment/batch`
pub async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>> {
    let timer = state.metrics.start_analysis();

    let worker = Arc::clone(&state);
    let analyzed = tokio::task::spawn_blocking(move || {
        worker.analyzer.analyze_batch(request.texts.as_slice())
    })
    .await?;

    let count = analyzed.len();
    let results = analyzed
        .into_iter()
        .map(|r| (r.text, r.sentiment))
        .collect();

    let elapsed = timer.finish();
    tracing::debug!(count, elapsed_ms = elapsed.as_millis() as u64, "analyzed batch");
    Ok(Json(BatchResponse {
        results,
        status: "SUCCESS",
    }))
}

/// `GET /api/model/info`
pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfo> {
    state.metrics.record_request();
    Json(state.analyzer.info())
}

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    state.metrics.record_request();
    Json(HealthResponse {
        status: "UP",
        service: state.service_name.clone(),
        model_status: if state.analyzer.is_ready() {
            "LOADED"
        } else {
            "MOCK"
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::pipelines::sentiment::SentimentAnalyzerBuilder;

    fn heuristic_state() -> Arc<AppState> {
        let analyzer = SentimentAnalyzerBuilder::new().heuristic_only().build();
        Arc::new(AppState::new(analyzer, "test service"))
    }

    #[tokio::test]
    async fn health_reports_mock_without_model() {
        let state = heuristic_state();
        let Json(body) = health(State(Arc::clone(&state))).await;
        assert_eq!(body.status, "UP");
        assert_eq!(body.service, "test service");
        assert_eq!(body.model_status, "MOCK");
        assert_eq!(state.metrics.snapshot().total_requests, 1);
    }

    #[tokio::test]
    async fn sentiment_records_success() -> Result<()> {
        let state = heuristic_state();
        let query = SentimentQuery {
            text: "This is excellent".into(),
            method: None,
        };
        let Json(result) = analyze_sentiment(State(Arc::clone(&state)), Query(query)).await?;
        assert_eq!(result.sentiment, Sentiment::Positive);

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.total_requests, 1);
        assert_eq!(snapshot.successful_requests, 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_method_counts_request_without_success() {
        let state = heuristic_state();
        let query = SentimentQuery {
            text: "fine".into(),
            method: Some("fast".into()),
        };
        let err = analyze_sentiment(State(Arc::clone(&state)), Query(query))
            .await
            .err();
        assert!(matches!(err, Some(ServiceError::InvalidInput(_))));

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.total_requests, 1);
        assert_eq!(snapshot.successful_requests, 0);
    }

    #[tokio::test]
    async fn batch_maps_text_to_label() -> Result<()> {
        let state = heuristic_state();
        let request = BatchRequest {
            texts: vec!["I love it".into(), "I hate it".into()],
        };
        let Json(body) = analyze_batch(State(state), Json(request)).await?;
        assert_eq!(body.status, "SUCCESS");
        assert_eq!(body.results.get("I love it"), Some(&Sentiment::Positive));
        assert_eq!(body.results.get("I hate it"), Some(&Sentiment::Negative));
        Ok(())
    }
}
