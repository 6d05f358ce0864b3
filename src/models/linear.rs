//! Linear softmax classifier over hashed bag-of-words features.
//!
//! Weights are read from a safetensors file holding `classifier.weight` (`[3, input_size]`)
//! and `classifier.bias` (`[3]`). Output rows are ordered `[negative, neutral, positive]`.

use candle_core::{Device, Tensor, D};
use candle_nn::{ops::softmax, Linear, Module};
use std::path::Path;

use super::InferenceRuntime;
use crate::error::{Result, ServiceError};
use crate::loaders::WeightsLoader;

/// Number of output classes: negative, neutral, positive.
pub const NUM_LABELS: usize = 3;

/// Candle-backed [`InferenceRuntime`].
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classifier: Linear,
    input_size: usize,
    device: Device,
}

impl LinearClassifier {
    /// Load weights from `path` onto `device`.
    pub fn load(path: impl AsRef<Path>, input_size: usize, device: Device) -> Result<Self> {
        let vb = WeightsLoader::new(path.as_ref()).load(&device)?;
        let classifier = candle_nn::linear(input_size, NUM_LABELS, vb.pp("classifier"))
            .map_err(|e| {
                ServiceError::ModelFormat(format!(
                    "'{}' has no usable classifier for {input_size} inputs: {e}",
                    path.as_ref().display()
                ))
            })?;

        Ok(Self::from_linear(classifier, input_size, device))
    }

    /// Wrap an already-built layer.
    pub fn from_linear(classifier: Linear, input_size: usize, device: Device) -> Self {
        Self {
            classifier,
            input_size,
            device,
        }
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Expected feature vector length.
    pub fn input_size(&self) -> usize {
        self.input_size
    }
}

impl InferenceRuntime for LinearClassifier {
    fn run(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.input_size {
            return Err(ServiceError::Inference(format!(
                "expected {} features, got {}",
                self.input_size,
                input.len()
            )));
        }

        let features = Tensor::from_slice(input, (1, self.input_size), &self.device)?;
        let logits = self.classifier.forward(&features)?;
        let probs = softmax(&logits, D::Minus1)?;
        Ok(probs.squeeze(0)?.to_vec1::<f32>()?)
    }
}
