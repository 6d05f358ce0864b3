use std::path::{Path, PathBuf};

use super::features::{FeatureExtractor, DEFAULT_INPUT_SIZE};
use super::model::{HeuristicOnly, ModelBacked, SentimentModel};
use super::pipeline::SentimentAnalyzer;
use crate::config::{ServiceConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_MODEL_PATH};
use crate::error::Result;
use crate::models::{InferenceRuntime, LinearClassifier};
use crate::pipelines::cache::ResultCache;
use crate::pipelines::utils::DeviceRequest;

/// Builder for constructing [`SentimentAnalyzer`] instances.
///
/// [`build`](Self::build) selects the analysis strategy once: it loads the model when it can
/// and otherwise logs why and falls back to the keyword heuristic for the process lifetime.
///
/// # Example
///
/// ```rust,no_run
/// use sentiment_service::sentiment::SentimentAnalyzerBuilder;
///
/// let analyzer = SentimentAnalyzerBuilder::new()
///     .model_path("models/sentiment.safetensors")
///     .input_size(128)
///     .cache_capacity(4096)
///     .cpu()
///     .build();
///
/// println!("model loaded: {}", analyzer.is_ready());
/// ```
pub struct SentimentAnalyzerBuilder {
    model_path: PathBuf,
    input_size: usize,
    cache_capacity: usize,
    device_request: DeviceRequest,
    runtime: Option<Box<dyn InferenceRuntime>>,
    heuristic_only: bool,
}

impl SentimentAnalyzerBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input_size: DEFAULT_INPUT_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            device_request: DeviceRequest::Cpu,
            runtime: None,
            heuristic_only: false,
        }
    }

    /// Create a builder from service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new()
            .model_path(&config.model_path)
            .input_size(config.input_size)
            .cache_capacity(config.cache_capacity)
            .device(config.device)
    }

    /// Path of the safetensors weights file.
    pub fn model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    /// Feature vector length. Must match the model's input width.
    pub fn input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Maximum cached predictions. Zero disables the cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Use the given device request.
    pub fn device(mut self, device_request: DeviceRequest) -> Self {
        self.device_request = device_request;
        self
    }

    /// Use an already-initialized runtime instead of loading one from disk.
    pub fn runtime<R: InferenceRuntime + 'static>(mut self, runtime: R) -> Self {
        self.runtime = Some(Box::new(runtime));
        self
    }

    /// Skip model loading entirely.
    pub fn heuristic_only(mut self) -> Self {
        self.heuristic_only = true;
        self
    }

    fn load_runtime(&self) -> Result<LinearClassifier> {
        let device = self.device_request.resolve()?;
        LinearClassifier::load(&self.model_path, self.input_size, device)
    }

    /// Build the analyzer. Never fails: a model that cannot be loaded degrades to the heuristic.
    pub fn build(self) -> SentimentAnalyzer {
        let extractor = FeatureExtractor::new(self.input_size);
        let model_path = self.model_path.display().to_string();

        let model: Box<dyn SentimentModel> = if self.heuristic_only {
            Box::new(HeuristicOnly::new(model_path, self.input_size))
        } else if let Some(runtime) = self.runtime {
            Box::new(ModelBacked::new(runtime, extractor, model_path))
        } else {
            match self.load_runtime() {
                Ok(runtime) => {
                    tracing::info!(
                        model_path = %model_path,
                        device = %self.device_request,
                        input_size = self.input_size,
                        "sentiment model loaded"
                    );
                    Box::new(ModelBacked::new(runtime, extractor, model_path))
                }
                Err(e) => {
                    tracing::warn!(
                        model_path = %model_path,
                        error = %e,
                        "sentiment model unavailable, using keyword heuristic"
                    );
                    Box::new(HeuristicOnly::new(model_path, self.input_size))
                }
            }
        };

        SentimentAnalyzer {
            model,
            cache: ResultCache::new(self.cache_capacity),
        }
    }
}

impl Default for SentimentAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
