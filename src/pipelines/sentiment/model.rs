use serde::Serialize;
use std::sync::{PoisonError, RwLock};

use super::features::FeatureExtractor;
use super::pipeline::{Prediction, Sentiment};
use crate::error::{Result, ServiceError};
use crate::models::{InferenceRuntime, NUM_LABELS};

/// Describes the active analysis strategy. Computed once when the strategy is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Configured path of the weights file.
    pub model_path: String,
    /// Whether a runtime was loaded at startup.
    #[serde(rename = "modelLoaded")]
    pub loaded: bool,
    /// Feature vector length fed to the runtime.
    pub input_size: usize,
    /// Runtime graph inputs (0 without a model).
    pub num_inputs: usize,
    /// Runtime graph outputs (0 without a model).
    pub num_outputs: usize,
}

/// Analysis strategy selected at startup.
pub trait SentimentModel: Send + Sync {
    /// Predict with the model. Fails when no runtime is available or inference fails.
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Describe the strategy.
    fn info(&self) -> ModelInfo;

    /// Whether [`predict`](Self::predict) can currently reach a runtime.
    fn is_ready(&self) -> bool;

    /// Release the runtime. Idempotent.
    fn shutdown(&self) {}
}

/// Map `[negative, neutral, positive]` scores to a prediction.
///
/// Scores are used as-is for confidence, so each must be a probability in `[0, 1]`.
/// Ties go to `neutral`.
pub fn interpret_scores(scores: &[f32]) -> Result<Prediction> {
    let [negative, neutral, positive] = match scores {
        [negative, neutral, positive, ..] => [*negative, *neutral, *positive],
        _ => {
            return Err(ServiceError::Inference(format!(
                "expected {NUM_LABELS} scores, got {}",
                scores.len()
            )))
        }
    };
    if ![negative, neutral, positive]
        .iter()
        .all(|s| (0.0..=1.0).contains(s))
    {
        return Err(ServiceError::Inference(format!(
            "scores {:?} are not probabilities",
            &scores[..NUM_LABELS]
        )));
    }

    let (sentiment, confidence) = if positive > negative && positive > neutral {
        (Sentiment::Positive, positive)
    } else if negative > positive && negative > neutral {
        (Sentiment::Negative, negative)
    } else {
        (Sentiment::Neutral, neutral)
    };

    Ok(Prediction {
        sentiment,
        confidence,
        model_used: true,
    })
}

/// Strategy backed by an [`InferenceRuntime`].
pub struct ModelBacked<R: InferenceRuntime> {
    runtime: RwLock<Option<R>>,
    extractor: FeatureExtractor,
    info: ModelInfo,
}

impl<R: InferenceRuntime> ModelBacked<R> {
    /// Wrap an initialized runtime.
    pub fn new(runtime: R, extractor: FeatureExtractor, model_path: impl Into<String>) -> Self {
        let info = ModelInfo {
            model_path: model_path.into(),
            loaded: true,
            input_size: extractor.input_size(),
            num_inputs: runtime.num_inputs(),
            num_outputs: runtime.num_outputs(),
        };
        Self {
            runtime: RwLock::new(Some(runtime)),
            extractor,
            info,
        }
    }
}

impl<R: InferenceRuntime> SentimentModel for ModelBacked<R> {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let runtime = self.runtime.read().unwrap_or_else(PoisonError::into_inner);
        let runtime = runtime
            .as_ref()
            .ok_or_else(|| ServiceError::Inference("runtime has been shut down".into()))?;

        let features = self.extractor.extract(text);
        let scores = runtime.run(&features)?;
        interpret_scores(&scores)
    }

    fn info(&self) -> ModelInfo {
        self.info.clone()
    }

    fn is_ready(&self) -> bool {
        self.runtime
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn shutdown(&self) {
        let released = self
            .runtime
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if released.is_some() {
            tracing::info!(model_path = %self.info.model_path, "inference runtime released");
        }
    }
}

/// Strategy used when no runtime could be loaded.
pub struct HeuristicOnly {
    info: ModelInfo,
}

impl HeuristicOnly {
    /// Create the model-less strategy.
    pub fn new(model_path: impl Into<String>, input_size: usize) -> Self {
        Self {
            info: ModelInfo {
                model_path: model_path.into(),
                loaded: false,
                input_size,
                num_inputs: 0,
                num_outputs: 0,
            },
        }
    }
}

impl SentimentModel for HeuristicOnly {
    fn predict(&self, _text: &str) -> Result<Prediction> {
        Err(ServiceError::Inference("no model loaded".into()))
    }

    fn info(&self) -> ModelInfo {
        self.info.clone()
    }

    fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedScores(Vec<f32>);

    impl InferenceRuntime for FixedScores {
        fn run(&self, _input: &[f32]) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    struct CountingDrop(Arc<AtomicUsize>);

    impl InferenceRuntime for CountingDrop {
        fn run(&self, _input: &[f32]) -> Result<Vec<f32>> {
            Ok(vec![0.1, 0.1, 0.8])
        }
    }

    impl Drop for CountingDrop {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn interprets_argmax_with_raw_confidence() -> Result<()> {
        let p = interpret_scores(&[0.1, 0.2, 0.7])?;
        assert_eq!(p.sentiment, Sentiment::Positive);
        assert_eq!(p.confidence, 0.7);
        assert!(p.model_used);

        let p = interpret_scores(&[0.6, 0.3, 0.1])?;
        assert_eq!(p.sentiment, Sentiment::Negative);
        assert_eq!(p.confidence, 0.6);
        Ok(())
    }

    #[test]
    fn ties_resolve_to_neutral() -> Result<()> {
        let p = interpret_scores(&[0.4, 0.2, 0.4])?;
        assert_eq!(p.sentiment, Sentiment::Neutral);
        assert_eq!(p.confidence, 0.2);
        Ok(())
    }

    #[test]
    fn short_or_non_finite_output_is_an_error() {
        assert!(interpret_scores(&[0.5, 0.5]).is_err());
        assert!(interpret_scores(&[]).is_err());
        assert!(interpret_scores(&[f32::NAN, 0.1, 0.2]).is_err());
    }

    #[test]
    fn raw_logits_are_rejected() {
        assert!(matches!(
            interpret_scores(&[0.0, 0.0, 5.0]),
            Err(ServiceError::Inference(_))
        ));
        assert!(interpret_scores(&[-0.1, 0.5, 0.6]).is_err());
    }

    #[test]
    fn boundary_probabilities_are_accepted() -> Result<()> {
        let p = interpret_scores(&[0.0, 0.0, 1.0])?;
        assert_eq!(p.sentiment, Sentiment::Positive);
        assert_eq!(p.confidence, 1.0);
        Ok(())
    }

    #[test]
    fn model_backed_reports_runtime_shape() {
        let model = ModelBacked::new(
            FixedScores(vec![0.0, 0.0, 1.0]),
            FeatureExtractor::new(64),
            "weights.safetensors",
        );
        let info = model.info();
        assert!(info.loaded);
        assert_eq!(info.input_size, 64);
        assert_eq!((info.num_inputs, info.num_outputs), (1, 1));
        assert!(model.is_ready());
    }

    #[test]
    fn shutdown_releases_runtime_exactly_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let model = ModelBacked::new(
            CountingDrop(Arc::clone(&drops)),
            FeatureExtractor::default(),
            "weights.safetensors",
        );

        model.shutdown();
        model.shutdown();

        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(!model.is_ready());
        assert!(model.predict("great").is_err());
    }

    #[test]
    fn heuristic_only_never_predicts() {
        let model = HeuristicOnly::new("missing.safetensors", 128);
        assert!(!model.is_ready());
        assert!(model.predict("great").is_err());
        model.shutdown();

        let info = model.info();
        assert!(!info.loaded);
        assert_eq!((info.num_inputs, info.num_outputs), (0, 0));
    }
}
