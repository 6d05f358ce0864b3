//! Hashed bag-of-words features for the inference runtime.
//!
//! Each token's feature is `(string_hash(token) % buckets) / buckets`, so values lie in
//! `(-1, 1)`. Position matters: the first token fills slot 0, the second slot 1 and so on.
//! This is a crude positional hash embedding, not a learned one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default feature vector length.
pub const DEFAULT_INPUT_SIZE: usize = 128;

/// Default number of hash buckets per token.
pub const DEFAULT_BUCKETS: i32 = 1000;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("static pattern is valid"));

/// Base-31 polynomial hash over UTF-16 code units with wrapping `i32` arithmetic.
///
/// Fixed so that feature values and hash-picked labels are reproducible bit-for-bit
/// across platforms and releases.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Lower-case, strip everything but letters, digits and whitespace, then tokenize.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    DISALLOWED
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Stateless text → fixed-length vector transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureExtractor {
    input_size: usize,
    buckets: i32,
}

impl FeatureExtractor {
    /// Create an extractor producing `input_size` features with the default bucket count.
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            buckets: DEFAULT_BUCKETS,
        }
    }

    /// Override the number of hash buckets. Values below 1 are raised to 1.
    pub fn with_buckets(mut self, buckets: i32) -> Self {
        self.buckets = buckets.max(1);
        self
    }

    /// Length of every vector this extractor returns.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Compute the feature vector. Empty or punctuation-only text yields all zeros.
    pub fn extract(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.input_size];
        for (slot, token) in features.iter_mut().zip(tokenize(text)) {
            *slot = (string_hash(&token) % self.buckets) as f32 / self.buckets as f32;
        }
        features
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        assert_eq!(string_hash("good"), 3_178_685);
        // Long inputs wrap instead of overflowing.
        assert_eq!(string_hash("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn tokenize_strips_punctuation_and_keeps_unicode_letters() {
        assert_eq!(
            tokenize("  Hello, WORLD!! Привет  42 "),
            vec!["hello", "world", "привет", "42"]
        );
        assert!(tokenize("?!...").is_empty());
    }

    #[test]
    fn empty_text_is_all_zeros() {
        let features = FeatureExtractor::default().extract("");
        assert_eq!(features.len(), DEFAULT_INPUT_SIZE);
        assert!(features.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn fixed_input_gives_fixed_output() {
        let extractor = FeatureExtractor::new(4);
        let features = extractor.extract("Good good!");
        // 3178685 % 1000 = 685
        assert_eq!(features, vec![0.685, 0.685, 0.0, 0.0]);
    }

    #[test]
    fn truncates_to_input_size() {
        let extractor = FeatureExtractor::new(3);
        let features = extractor.extract("one two three four five");
        assert_eq!(features.len(), 3);
        assert!(features.iter().all(|&f| f != 0.0));
    }

    #[test]
    fn features_stay_within_unit_interval() {
        let extractor = FeatureExtractor::new(16).with_buckets(100);
        let features = extractor.extract("polygenelubricants zebra über naïve 12345");
        assert!(features.iter().all(|f| f.abs() < 1.0));
        // i32::MIN % 100 is negative under truncated remainder.
        assert!(features[0] < 0.0);
    }
}
