//! Keyword-based sentiment scoring used when no model is available or inference fails.
//!
//! Two scorers live here:
//!
//! - [`analyze_keywords`]: weighted whole-word matches against positive, negative and
//!   neutral tables, with a punctuation/hash rule when there is no clear signal.
//! - [`analyze_contextual`]: positive minus negative weights adjusted for intensifiers,
//!   negation and exclamation marks. It matches by plain substring containment, so
//!   "unhappy" also counts "happy" and "hateful" also counts "hate".

use super::features::string_hash;
use super::pipeline::{Prediction, Sentiment};

/// Weighted positive keywords.
pub const POSITIVE_WORDS: &[(&str, u32)] = &[
    ("good", 2),
    ("great", 3),
    ("excellent", 4),
    ("amazing", 3),
    ("happy", 2),
    ("love", 3),
    ("awesome", 3),
    ("fantastic", 3),
    ("perfect", 4),
    ("wonderful", 3),
    ("best", 3),
    ("beautiful", 2),
    ("brilliant", 3),
    ("outstanding", 4),
    ("superb", 4),
    ("nice", 2),
    ("enjoy", 2),
    ("recommend", 2),
];

/// Weighted negative keywords.
pub const NEGATIVE_WORDS: &[(&str, u32)] = &[
    ("bad", 2),
    ("terrible", 4),
    ("horrible", 4),
    ("awful", 3),
    ("hate", 3),
    ("sad", 2),
    ("worst", 4),
    ("disappointing", 3),
    ("poor", 2),
    ("unhappy", 2),
    ("angry", 2),
    ("hateful", 3),
    ("disgusting", 4),
    ("annoying", 2),
    ("frustrating", 3),
    ("useless", 3),
];

/// Weighted neutral keywords and phrases.
pub const NEUTRAL_WORDS: &[(&str, u32)] = &[
    ("okay", 1),
    ("ok", 1),
    ("fine", 1),
    ("average", 2),
    ("normal", 1),
    ("ordinary", 2),
    ("mediocre", 2),
    ("acceptable", 1),
    ("alright", 1),
    ("so so", 2),
    ("nothing special", 3),
    ("as expected", 2),
];

const INTENSIFIERS: &[&str] = &["very", "really", "extremely"];
const NEGATIONS: &[&str] = &["not ", "no ", "never "];

const INTENSIFIER_FACTOR: f32 = 1.5;
const NEGATION_FACTOR: f32 = -0.7;
const EXCLAMATION_BONUS: f32 = 0.3;
const CONTEXTUAL_THRESHOLD: f32 = 1.5;

const MAX_KEYWORD_CONFIDENCE: f32 = 0.95;
const FALLBACK_CONFIDENCE: f32 = 0.3;
const CONTEXTUAL_NEUTRAL_CONFIDENCE: f32 = 0.5;

/// Texts shorter than this (in chars) have their confidence halved.
pub const SHORT_TEXT_CHARS: usize = 5;
/// Texts longer than this (in chars) have their confidence raised by 10%.
pub const LONG_TEXT_CHARS: usize = 100;
/// Below this length, text without keywords or punctuation cues is `neutral`.
pub const VERY_SHORT_TEXT_CHARS: usize = 10;

/// Labels the hash rule picks from when nothing else applies.
pub const HASH_FALLBACK_LABELS: [Sentiment; 3] =
    [Sentiment::Neutral, Sentiment::Mixed, Sentiment::Thoughtful];

/// Summed weights of matched keywords per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordScores {
    /// Sum over matched positive keywords.
    pub positive: u32,
    /// Sum over matched negative keywords.
    pub negative: u32,
    /// Sum over matched neutral keywords.
    pub neutral: u32,
}

impl KeywordScores {
    /// Score lower-cased `text` with whole-word matching.
    pub fn whole_word(text: &str) -> Self {
        Self {
            positive: sum_weights(text, POSITIVE_WORDS, contains_word),
            negative: sum_weights(text, NEGATIVE_WORDS, contains_word),
            neutral: sum_weights(text, NEUTRAL_WORDS, contains_word),
        }
    }

    /// Pick the winning category and its weight, if any wins outright.
    fn winner(&self) -> Option<(Sentiment, u32)> {
        let Self {
            positive,
            negative,
            neutral,
        } = *self;
        if positive > negative && positive > neutral {
            Some((Sentiment::Positive, positive))
        } else if negative > positive && negative > neutral {
            Some((Sentiment::Negative, negative))
        } else if neutral > 0 && neutral >= positive && neutral >= negative {
            Some((Sentiment::Neutral, neutral))
        } else {
            None
        }
    }
}

fn sum_weights(text: &str, table: &[(&str, u32)], matches: fn(&str, &str) -> bool) -> u32 {
    table
        .iter()
        .filter(|(word, _)| matches(text, word))
        .map(|(_, weight)| weight)
        .sum()
}

/// Whether `word` occurs in `text` with no letter or digit directly on either side.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());
        is_boundary(before) && is_boundary(after)
    })
}

fn contains_substring(text: &str, word: &str) -> bool {
    text.contains(word)
}

/// `min(weight / (len / 10 + 1), 0.95)`.
fn weight_confidence(weight: f32, len: usize) -> f32 {
    (weight / (len as f32 / 10.0 + 1.0)).min(MAX_KEYWORD_CONFIDENCE)
}

/// Halve confidence for very short text, raise it 10% for long text, then clamp to `[0, 1]`.
pub fn scale_for_length(confidence: f32, len: usize) -> f32 {
    let scaled = if len < SHORT_TEXT_CHARS {
        confidence * 0.5
    } else if len > LONG_TEXT_CHARS {
        confidence * 1.1
    } else {
        confidence
    };
    scaled.clamp(0.0, 1.0)
}

/// Label for text that carries no keyword signal.
fn punctuation_fallback(text: &str, len: usize) -> Sentiment {
    let exclaims = text.contains('!');
    let asks = text.contains('?');
    match (exclaims, asks) {
        (true, true) => Sentiment::Surprised,
        (true, false) => Sentiment::Excited,
        (false, true) => Sentiment::Curious,
        (false, false) if len < VERY_SHORT_TEXT_CHARS => Sentiment::Neutral,
        (false, false) => {
            let idx = string_hash(text).rem_euclid(HASH_FALLBACK_LABELS.len() as i32);
            HASH_FALLBACK_LABELS[idx as usize]
        }
    }
}

fn heuristic(sentiment: Sentiment, confidence: f32, len: usize) -> Prediction {
    Prediction {
        sentiment,
        confidence: scale_for_length(confidence, len),
        model_used: false,
    }
}

/// Whole-word keyword analysis with the punctuation/hash rule as the last resort.
pub fn analyze_keywords(text: &str) -> Prediction {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    let lowered = trimmed.to_lowercase();

    match KeywordScores::whole_word(&lowered).winner() {
        Some((sentiment, weight)) => heuristic(sentiment, weight_confidence(weight as f32, len), len),
        None => heuristic(punctuation_fallback(&lowered, len), FALLBACK_CONFIDENCE, len),
    }
}

/// Net positive-minus-negative score after intensifier, negation and exclamation adjustments.
pub fn contextual_score(lowered: &str) -> f32 {
    let positive = sum_weights(lowered, POSITIVE_WORDS, contains_substring) as f32;
    let negative = sum_weights(lowered, NEGATIVE_WORDS, contains_substring) as f32;
    let mut score = positive - negative;

    if INTENSIFIERS.iter().any(|w| lowered.contains(*w)) {
        score *= INTENSIFIER_FACTOR;
    }
    if NEGATIONS.iter().any(|w| lowered.contains(*w)) {
        score *= NEGATION_FACTOR;
    }
    let exclamations = lowered.chars().filter(|&c| c == '!').count();
    score + exclamations as f32 * EXCLAMATION_BONUS
}

/// Substring-based analysis with intensifiers and negation.
pub fn analyze_contextual(text: &str) -> Prediction {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    let score = contextual_score(&trimmed.to_lowercase());

    if score > CONTEXTUAL_THRESHOLD {
        heuristic(Sentiment::Positive, weight_confidence(score, len), len)
    } else if score < -CONTEXTUAL_THRESHOLD {
        heuristic(Sentiment::Negative, weight_confidence(-score, len), len)
    } else {
        heuristic(Sentiment::Neutral, CONTEXTUAL_NEUTRAL_CONFIDENCE, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_matching() {
        assert!(contains_word("it was good today", "good"));
        assert!(contains_word("good", "good"));
        assert!(contains_word("so good!", "good"));
        assert!(!contains_word("goodness", "good"));
        assert!(!contains_word("feelgood", "good"));
        // A later occurrence can still match after an embedded one.
        assert!(contains_word("goodness, good grief", "good"));
        assert!(contains_word("it was so so at best", "so so"));
    }

    #[test]
    fn substring_does_not_match_under_keyword_rules() {
        let prediction = analyze_keywords("goodness");
        assert_eq!(prediction.sentiment, Sentiment::Neutral);
        assert_eq!(prediction.confidence, 0.3);
    }

    #[test]
    fn positive_scenario() {
        let prediction = analyze_keywords("I love this, it is amazing!");
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert!(prediction.confidence > 0.0);
        assert!(!prediction.model_used);
    }

    #[test]
    fn weighted_confidence_uses_length() {
        // "good" weighs 2, text is 17 chars: 2 / (1.7 + 1)
        let prediction = analyze_keywords("it was good today");
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert!((prediction.confidence - 2.0 / 2.7).abs() < 1e-6);
    }

    #[test]
    fn negative_wins_outright() {
        let prediction = analyze_keywords("The worst, most useless purchase");
        assert_eq!(prediction.sentiment, Sentiment::Negative);
    }

    #[test]
    fn neutral_wins_ties_when_it_has_signal() {
        // positive 2 ("good"), neutral 2 ("average")
        let prediction = analyze_keywords("good but average");
        assert_eq!(prediction.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn positive_negative_tie_goes_to_punctuation_rule() {
        assert_eq!(
            KeywordScores::whole_word("good but bad!"),
            KeywordScores {
                positive: 2,
                negative: 2,
                neutral: 0
            }
        );
        let prediction = analyze_keywords("good but bad!");
        assert_eq!(prediction.sentiment, Sentiment::Excited);
        assert_eq!(prediction.confidence, 0.3);
    }

    #[test]
    fn punctuation_rules() {
        assert_eq!(analyze_keywords("what is this?!").sentiment, Sentiment::Surprised);
        assert_eq!(analyze_keywords("here we go!").sentiment, Sentiment::Excited);
        assert_eq!(analyze_keywords("is it open?").sentiment, Sentiment::Curious);
        assert_eq!(analyze_keywords("a table").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn hash_rule_is_deterministic() {
        let text = "the train leaves at nine tomorrow morning";
        let first = analyze_keywords(text);
        let second = analyze_keywords(text);
        assert_eq!(first, second);
        assert!(HASH_FALLBACK_LABELS.contains(&first.sentiment));
    }

    #[test]
    fn empty_text_is_low_confidence_neutral() {
        let prediction = analyze_keywords("");
        assert_eq!(prediction.sentiment, Sentiment::Neutral);
        assert!((prediction.confidence - 0.15).abs() < 1e-6);
    }

    #[test]
    fn length_scaling_is_clamped() {
        assert_eq!(scale_for_length(0.4, 3), 0.2);
        assert_eq!(scale_for_length(0.4, 50), 0.4);
        assert!((scale_for_length(0.5, 150) - 0.55).abs() < 1e-6);
        assert_eq!(scale_for_length(0.95, 150), 1.0);
        assert!(scale_for_length(0.95, 500) <= 1.0);
    }

    #[test]
    fn long_text_confidence_never_exceeds_one() {
        let text = format!("{} excellent outstanding superb", "perfect ".repeat(20));
        let prediction = analyze_keywords(&text);
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert!(prediction.confidence <= 1.0);
    }

    #[test]
    fn contextual_intensifier_and_negation() {
        assert_eq!(analyze_contextual("really great").sentiment, Sentiment::Positive);
        // (3 - 2) * 1.5 * -0.7 = -1.05
        assert!((contextual_score("not great, really bad") + 1.05).abs() < 1e-6);
        assert_eq!(
            analyze_contextual("not great, really bad").sentiment,
            Sentiment::Neutral
        );
        assert_eq!(
            analyze_contextual("this is not good at all").sentiment,
            Sentiment::Neutral
        );
    }

    #[test]
    fn contextual_counts_overlapping_substrings() {
        // "hateful" also contains "hate": 3 + 3
        assert!((contextual_score("hateful") + 6.0).abs() < 1e-6);
        // "unhappy" contains "happy": 2 - 2
        assert_eq!(contextual_score("unhappy"), 0.0);
        assert_eq!(analyze_contextual("unhappy").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn contextual_exclamation_bonus() {
        assert!((contextual_score("wow!!!") - 0.9).abs() < 1e-6);
        assert_eq!(
            analyze_contextual("I love this, it is amazing!").sentiment,
            Sentiment::Positive
        );
    }
}
