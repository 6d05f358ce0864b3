//! Service configuration.

use crate::pipelines::utils::DeviceRequest;

pub use crate::pipelines::sentiment::features::DEFAULT_INPUT_SIZE;

/// Default bound of the prediction cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Default location of the classifier weights.
pub const DEFAULT_MODEL_PATH: &str = "model.safetensors";

/// Default name reported by the health endpoint.
pub const DEFAULT_SERVICE_NAME: &str = "Sentiment Analysis API";

/// Runtime settings for the analyzer and the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Path of the safetensors weights file.
    pub model_path: String,
    /// Feature vector length expected by the model.
    pub input_size: usize,
    /// Prediction cache bound. Zero disables caching.
    pub cache_capacity: usize,
    /// Device used for inference.
    pub device: DeviceRequest,
    /// Name reported by `/api/health`.
    pub service_name: String,
}

impl ServiceConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            input_size: DEFAULT_INPUT_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            device: DeviceRequest::Cpu,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}
