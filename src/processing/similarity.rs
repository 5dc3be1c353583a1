//! TF-IDF cosine similarity between two texts
//!
//! The canonical score is cosine similarity over smoothed TF-IDF vectors
//! built from the joint vocabulary of the two texts. Raw token overlap is
//! exposed as a separate metric and never mixed into the score.

use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Cosine similarity scaled to [0, 100], rounded to two decimals
    pub score: f64,
    /// Significant words shared by both texts
    pub matched_terms: BTreeSet<String>,
    /// Union of both texts' significant-word sets
    pub considered_vocabulary: BTreeSet<String>,
}

impl SimilarityResult {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched_terms: BTreeSet::new(),
            considered_vocabulary: BTreeSet::new(),
        }
    }

    /// Significant JD terms absent from the resume; useful for gap reports.
    pub fn missing_terms(&self) -> BTreeSet<String> {
        self.considered_vocabulary
            .difference(&self.matched_terms)
            .cloned()
            .collect()
    }
}

pub struct SimilarityEngine {
    processor: TextProcessor,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityEngine {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Score two texts. Symmetric; identical texts score 100.00; an empty
    /// text scores 0 rather than erroring.
    pub fn score(&self, text_a: &str, text_b: &str) -> SimilarityResult {
        let tokens_a = self.processor.tokenize(text_a);
        let tokens_b = self.processor.tokenize(text_b);

        if tokens_a.is_empty() || tokens_b.is_empty() {
            return SimilarityResult::empty();
        }

        let raw = tfidf_cosine(&tokens_a, &tokens_b);
        let score = (raw * 100.0 * 100.0).round() / 100.0;

        let set_a = self.processor.significant_tokens(text_a);
        let set_b = self.processor.significant_tokens(text_b);
        let matched_terms = set_a.intersection(&set_b).cloned().collect();
        let considered_vocabulary = set_a.union(&set_b).cloned().collect();

        SimilarityResult {
            score,
            matched_terms,
            considered_vocabulary,
        }
    }

    /// Secondary metric: Jaccard overlap of significant-word sets, in [0, 1].
    pub fn token_overlap(&self, text_a: &str, text_b: &str) -> f64 {
        let set_a = self.processor.significant_tokens(text_a);
        let set_b = self.processor.significant_tokens(text_b);

        let union = set_a.union(&set_b).count();
        if union == 0 {
            return 0.0;
        }
        set_a.intersection(&set_b).count() as f64 / union as f64
    }
}

/// Cosine similarity of smoothed TF-IDF vectors over the joint vocabulary.
fn tfidf_cosine(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    let counts_a = term_counts(tokens_a);
    let counts_b = term_counts(tokens_b);

    let vocabulary: BTreeSet<&String> = counts_a.keys().chain(counts_b.keys()).copied().collect();

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for term in vocabulary {
        let tf_a = counts_a.get(term).copied().unwrap_or(0) as f64;
        let tf_b = counts_b.get(term).copied().unwrap_or(0) as f64;

        // Smoothed IDF over the two-document corpus, sklearn style:
        // ln((1 + n) / (1 + df)) + 1
        let df = (tf_a > 0.0) as u32 + (tf_b > 0.0) as u32;
        let idf = ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0;

        let weight_a = tf_a * idf;
        let weight_b = tf_b * idf;

        dot += weight_a * weight_b;
        norm_a += weight_a * weight_a;
        norm_b += weight_b * weight_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn term_counts(tokens: &[String]) -> HashMap<&String, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_100() {
        let engine = SimilarityEngine::new();
        let text = "Python developer with SQL and 3 years experience";
        let result = engine.score(text, text);
        assert_eq!(result.score, 100.00);
    }

    #[test]
    fn test_score_is_symmetric() {
        let engine = SimilarityEngine::new();
        let a = "Rust systems programming and distributed services";
        let b = "Backend developer experienced in Rust and Go";
        assert_eq!(engine.score(a, b).score, engine.score(b, a).score);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let engine = SimilarityEngine::new();
        let result = engine.score("Python developer", "");
        assert_eq!(result.score, 0.0);
        assert!(result.matched_terms.is_empty());
        assert!(result.considered_vocabulary.is_empty());

        assert_eq!(engine.score("", "").score, 0.0);
    }

    #[test]
    fn test_punctuation_only_text_scores_zero() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.score("!!! ???", "Python developer").score, 0.0);
    }

    #[test]
    fn test_disjoint_texts_score_low() {
        let engine = SimilarityEngine::new();
        let result = engine.score("alpha beta gamma", "delta epsilon zeta");
        assert!(result.score < 10.0);
        assert!(result.matched_terms.is_empty());
    }

    #[test]
    fn test_matched_terms_scenario() {
        let engine = SimilarityEngine::new();
        let resume = "Name: Jane Doe\nSkills: Python, SQL\nExperience: 3 years at Acme";
        let jd = "Looking for Python SQL developer with 2+ years experience";

        let result = engine.score(resume, jd);
        assert!(result.score > 0.0);
        assert!(result.matched_terms.contains("python"));
        assert!(result.matched_terms.contains("sql"));
        assert!(result.considered_vocabulary.contains("developer"));
    }

    #[test]
    fn test_score_bounded() {
        let engine = SimilarityEngine::new();
        let result = engine.score("shared words here", "shared words there");
        assert!(result.score >= 0.0 && result.score <= 100.0);
    }

    #[test]
    fn test_token_overlap() {
        let engine = SimilarityEngine::new();
        let overlap = engine.token_overlap("python sql", "python rust");
        assert!((overlap - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(engine.token_overlap("", ""), 0.0);
    }

    #[test]
    fn test_missing_terms() {
        let engine = SimilarityEngine::new();
        let result = engine.score("python", "python kubernetes");
        assert!(result.missing_terms().contains("kubernetes"));
        assert!(!result.missing_terms().contains("python"));
    }
}
