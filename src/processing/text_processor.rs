//! Text normalization and tokenization

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            stop_words: Self::create_stop_words(),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    /// Normalize text for vectorization: lowercase, strip non-alphanumeric
    /// characters (preserving whitespace), collapse whitespace runs.
    pub fn normalize(&self, text: &str) -> String {
        let lowered: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        self.whitespace_regex
            .replace_all(&lowered, " ")
            .trim()
            .to_string()
    }

    /// All tokens of the normalized text, in order, duplicates kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(|w| w.to_string())
            .collect()
    }

    /// Significant words: Unicode word segmentation, lowercased, stop words
    /// and single characters removed.
    pub fn significant_tokens(&self, text: &str) -> BTreeSet<String> {
        text.unicode_words()
            .map(|w| w.to_lowercase())
            .filter(|w| w.len() > 1 && !self.stop_words.contains(w))
            .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
            .collect()
    }

    /// Whitespace-delimited word count of the raw text.
    pub fn word_count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has",
            "have", "he", "her", "his", "how", "if", "in", "into", "is", "it", "its", "me", "my",
            "no", "not", "of", "on", "or", "our", "she", "so", "than", "that", "the", "their",
            "them", "then", "there", "these", "they", "this", "to", "too", "up", "was", "we",
            "were", "what", "when", "where", "which", "who", "why", "will", "with", "would",
            "you", "your",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("Python,   SQL! (3+ years)");
        assert_eq!(normalized, "python sql 3 years");
    }

    #[test]
    fn test_normalize_empty_text() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize("  !!!  "), "");
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust rust RUST");
        assert_eq!(tokens, vec!["rust", "rust", "rust"]);
    }

    #[test]
    fn test_significant_tokens_filter_stop_words() {
        let processor = TextProcessor::new();
        let tokens = processor.significant_tokens("Looking for a Python developer with SQL");
        assert!(tokens.contains("python"));
        assert!(tokens.contains("sql"));
        assert!(tokens.contains("developer"));
        assert!(!tokens.contains("for"));
        assert!(!tokens.contains("with"));
        assert!(!tokens.contains("a"));
    }

    #[test]
    fn test_word_count() {
        let processor = TextProcessor::new();
        assert_eq!(processor.word_count("one two  three\nfour"), 4);
        assert_eq!(processor.word_count(""), 0);
    }
}
