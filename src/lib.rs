//! # Sentiment Service
//!
//! Sentiment classification over HTTP. A candle linear classifier scores hashed bag-of-words
//! features; when no model is available a keyword heuristic answers instead.

pub mod config;
pub mod error;
pub mod loaders;
pub mod models;
pub mod pipelines;
pub mod server;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use models::{InferenceRuntime, LinearClassifier};
pub use pipelines::sentiment;
pub use pipelines::stats::{MetricsSnapshot, ServiceMetrics};
pub use pipelines::utils::DeviceRequest;
