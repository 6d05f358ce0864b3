//! Sentiment analysis pipeline.
//!
//! Classify text as `positive`, `negative`, `neutral` or one of the punctuation-driven
//! labels. Returns the predicted label, a confidence score and whether a model produced it.
//!
//! # Quick Start
//!
//! ```rust
//! use sentiment_service::sentiment::{AnalysisMethod, SentimentAnalyzerBuilder};
//!
//! // Falls back to the keyword heuristic when `model.safetensors` is absent.
//! let analyzer = SentimentAnalyzerBuilder::new().build();
//!
//! let result = analyzer.analyze("I absolutely love this product!", AnalysisMethod::Auto);
//! println!("sentiment: {} (confidence: {:.2})", result.sentiment, result.confidence);
//! ```
//!
//! # Batch Inference
//!
//! ```rust
//! # use sentiment_service::sentiment::SentimentAnalyzerBuilder;
//! # let analyzer = SentimentAnalyzerBuilder::new().heuristic_only().build();
//! let reviews = [
//!     "Best purchase I've ever made!",
//!     "Terrible quality, very disappointing.",
//!     "It's okay, nothing special.",
//! ];
//!
//! for r in analyzer.analyze_batch(&reviews) {
//!     println!("{}: {} ({:.2})", r.text, r.sentiment, r.confidence);
//! }
//! ```
//!
//! # Strategies
//!
//! | Strategy | Selected when | `modelUsed` |
//! |----------|---------------|-------------|
//! | [`ModelBacked`] | weights load at startup | `true` unless inference fails |
//! | [`HeuristicOnly`] | weights missing or invalid | always `false` |

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod features;
pub(crate) mod lexicon;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use builder::SentimentAnalyzerBuilder;
pub use features::{string_hash, FeatureExtractor};
pub use lexicon::{analyze_contextual, analyze_keywords, contains_word};
pub use model::{interpret_scores, HeuristicOnly, ModelBacked, ModelInfo, SentimentModel};
pub use pipeline::{AnalysisMethod, AnalysisResult, Prediction, Sentiment, SentimentAnalyzer};
