use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lexicon;
use super::model::{ModelInfo, SentimentModel};
use crate::error::{Result, ServiceError};
use crate::pipelines::cache::{cache_key, ResultCache};

// ============ Output types ============

/// Sentiment label. Serialized lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable polarity.
    Positive,
    /// Unfavourable polarity.
    Negative,
    /// No clear polarity.
    Neutral,
    /// Both `!` and `?` without keyword signal.
    Surprised,
    /// `!` without keyword signal.
    Excited,
    /// `?` without keyword signal.
    Curious,
    /// Hash-picked label for longer text without any cue.
    Mixed,
    /// Hash-picked label for longer text without any cue.
    Thoughtful,
}

impl Sentiment {
    /// Lower-case label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Surprised => "surprised",
            Sentiment::Excited => "excited",
            Sentiment::Curious => "curious",
            Sentiment::Mixed => "mixed",
            Sentiment::Thoughtful => "thoughtful",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label with its confidence, as stored in the cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted label.
    pub sentiment: Sentiment,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    /// Whether the inference runtime produced this prediction.
    pub model_used: bool,
}

/// Result of analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Input text, as given by the caller.
    pub text: String,
    /// Predicted label.
    pub sentiment: Sentiment,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    /// Whether the inference runtime produced this result.
    pub model_used: bool,
}

impl AnalysisResult {
    fn new(text: &str, prediction: Prediction) -> Self {
        Self {
            text: text.to_string(),
            sentiment: prediction.sentiment,
            confidence: prediction.confidence,
            model_used: prediction.model_used,
        }
    }
}

/// How a request wants its text analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisMethod {
    /// Model when loaded, keyword heuristic otherwise.
    #[default]
    Auto,
    /// Prefer the model. Same fallback as `Auto`.
    Model,
    /// Whole-word keyword heuristic only.
    Heuristic,
    /// Substring scoring with intensifiers and negation.
    Contextual,
}

impl FromStr for AnalysisMethod {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(AnalysisMethod::Auto),
            "model" | "onnx" => Ok(AnalysisMethod::Model),
            "heuristic" | "keyword" | "mock" => Ok(AnalysisMethod::Heuristic),
            "contextual" => Ok(AnalysisMethod::Contextual),
            other => Err(ServiceError::InvalidInput(format!(
                "unknown analysis method '{other}' (expected auto, model, heuristic or contextual)"
            ))),
        }
    }
}

// ============ Analyzer ============

/// Classifies text sentiment with an optional model and a keyword fallback.
///
/// Construct with [`SentimentAnalyzerBuilder`](super::SentimentAnalyzerBuilder).
///
/// # Examples
///
/// ```rust
/// use sentiment_service::sentiment::{AnalysisMethod, Sentiment, SentimentAnalyzerBuilder};
///
/// let analyzer = SentimentAnalyzerBuilder::new().heuristic_only().build();
/// let result = analyzer.analyze("I love this, it is amazing!", AnalysisMethod::Auto);
/// assert_eq!(result.sentiment, Sentiment::Positive);
/// assert!(!result.model_used);
/// ```
pub struct SentimentAnalyzer {
    pub(crate) model: Box<dyn SentimentModel>,
    pub(crate) cache: ResultCache,
}

impl SentimentAnalyzer {
    /// Analyze one text. Never fails: model errors fall back to the keyword heuristic.
    ///
    /// Only `Auto` and `Model` requests go through the cache. Explicit `Heuristic` and
    /// `Contextual` requests are always computed so they never see another path's result.
    pub fn analyze(&self, text: &str, method: AnalysisMethod) -> AnalysisResult {
        if matches!(method, AnalysisMethod::Heuristic | AnalysisMethod::Contextual) {
            return AnalysisResult::new(text, self.predict(text, method));
        }

        let key = cache_key(text);
        if let Some(prediction) = self.cache.get(&key) {
            tracing::debug!(key = %key, "sentiment cache hit");
            return AnalysisResult::new(text, prediction);
        }

        let prediction = self.predict(text, method);
        self.cache.insert(key, prediction);
        AnalysisResult::new(text, prediction)
    }

    /// Analyze several texts with [`AnalysisMethod::Auto`], preserving input order.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<AnalysisResult> {
        texts
            .iter()
            .map(|text| self.analyze(text.as_ref(), AnalysisMethod::Auto))
            .collect()
    }

    fn predict(&self, text: &str, method: AnalysisMethod) -> Prediction {
        match method {
            AnalysisMethod::Contextual => lexicon::analyze_contextual(text),
            AnalysisMethod::Heuristic => lexicon::analyze_keywords(text),
            AnalysisMethod::Auto | AnalysisMethod::Model if self.model.is_ready() => {
                self.model.predict(text).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "model inference failed, using keyword fallback");
                    lexicon::analyze_keywords(text)
                })
            }
            AnalysisMethod::Auto | AnalysisMethod::Model => lexicon::analyze_keywords(text),
        }
    }

    /// Describe the active strategy.
    pub fn info(&self) -> ModelInfo {
        self.model.info()
    }

    /// Whether a model runtime is loaded and usable.
    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Release the model runtime. Later calls, and analysis afterwards, are still safe.
    pub fn shutdown(&self) {
        self.model.shutdown();
    }

    /// Number of cached predictions.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached predictions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
