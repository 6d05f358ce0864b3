//! HTTP server for the sentiment analyzer.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sentiment_service::sentiment::SentimentAnalyzerBuilder;
//! use sentiment_service::server::{create_router, AppState};
//!
//! # async fn run() -> std::io::Result<()> {
//! let analyzer = SentimentAnalyzerBuilder::new().build();
//! let state = Arc::new(AppState::new(analyzer, "Sentiment Analysis API"));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, create_router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod handlers;
pub mod routes;

pub use routes::{create_router, AppState};
