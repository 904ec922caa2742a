//! Text-quality scoring capability.
//!
//! One production implementation (cheap readability heuristics) and one
//! no-op implementation, selected when the engine is constructed — never
//! at call time.

use indexmap::IndexMap;
use unicode_segmentation::UnicodeSegmentation;

use chunkmill_core::QualityReport;

/// Scores chunk text quality. Implementations must be deterministic.
pub trait QualityScorer: Send + Sync {
    /// Return a quality report for `text`, or None when scoring is disabled.
    fn score(&self, text: &str) -> Option<QualityReport>;
}

/// Production scorer: readability heuristics over word and sentence shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

/// Disabled scoring; chunks carry no quality fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScorer;

impl QualityScorer for NoopScorer {
    fn score(&self, _text: &str) -> Option<QualityReport> {
        None
    }
}

impl QualityScorer for HeuristicScorer {
    fn score(&self, text: &str) -> Option<QualityReport> {
        let words: Vec<&str> = text.unicode_words().collect();
        if words.is_empty() {
            return None;
        }

        let word_count = words.len() as f64;
        let sentence_count = text
            .chars()
            .filter(|c| matches!(c, '.' | '!' | '?'))
            .count()
            .max(1) as f64;

        let avg_sentence_len = word_count / sentence_count;
        let avg_word_len =
            words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;
        let alpha_ratio = {
            let total = text.chars().filter(|c| !c.is_whitespace()).count().max(1);
            let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
            alnum as f64 / total as f64
        };
        // Flesch-style ease approximation with word length standing in for
        // syllable count.
        let flesch_approx =
            (206.835 - 1.015 * avg_sentence_len - 28.0 * avg_word_len).clamp(0.0, 100.0);

        // Penalize degenerate text: very low alphanumeric density or
        // implausible average word length (OCR noise, binary spill).
        let mut score = alpha_ratio;
        if !(2.0..=12.0).contains(&avg_word_len) {
            score *= 0.5;
        }
        if avg_sentence_len > 80.0 {
            score *= 0.8;
        }
        let score = score.clamp(0.0, 1.0);

        let mut metrics = IndexMap::new();
        metrics.insert("avg_sentence_len".to_string(), avg_sentence_len);
        metrics.insert("avg_word_len".to_string(), avg_word_len);
        metrics.insert("alpha_ratio".to_string(), alpha_ratio);
        metrics.insert("flesch_approx".to_string(), flesch_approx);

        Some(QualityReport { score, metrics })
    }
}
