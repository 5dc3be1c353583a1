//! Heuristic resume-quality rules
//!
//! A fixed, ordered predicate list evaluated over the lowercased resume
//! text. Rules are independent; output order follows declaration order.

use crate::processing::text_processor::TextProcessor;
use aho_corasick::AhoCorasick;
use log::debug;

const MIN_WORD_COUNT: usize = 150;
const MAX_WORD_COUNT: usize = 1200;

const BUZZWORDS: [&str; 8] = [
    "hardworking",
    "hard worker",
    "synergy",
    "self-starter",
    "go-getter",
    "team player",
    "results-driven",
    "think outside the box",
];

pub struct InsightEngine {
    processor: TextProcessor,
    buzzword_matcher: AhoCorasick,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        let buzzword_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(BUZZWORDS)
            .expect("Invalid buzzword patterns");

        Self {
            processor: TextProcessor::new(),
            buzzword_matcher,
        }
    }

    /// Evaluate all rules against the resume text, in declared order.
    pub fn evaluate(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let word_count = self.processor.word_count(text);
        let mut tips = Vec::new();

        if !lowered.contains("summary") && !lowered.contains("objective") {
            tips.push("Add a summary or objective section to introduce your profile.".to_string());
        }
        if !lowered.contains("certification") {
            tips.push("Consider listing certifications relevant to the role.".to_string());
        }
        if !lowered.contains("project") {
            tips.push("Add project experience to showcase applied skills.".to_string());
        }
        if !lowered.contains("achievement") {
            tips.push("Quantify achievements to demonstrate measurable impact.".to_string());
        }
        if word_count < MIN_WORD_COUNT {
            tips.push(format!(
                "Resume looks short ({} words); aim for at least {} to cover your background.",
                word_count, MIN_WORD_COUNT
            ));
        }
        if word_count > MAX_WORD_COUNT {
            tips.push(format!(
                "Resume looks long ({} words); consider trimming below {}.",
                word_count, MAX_WORD_COUNT
            ));
        }

        let found = self.find_buzzwords(&lowered);
        if !found.is_empty() {
            tips.push(format!(
                "Replace generic buzzwords with concrete accomplishments: {}.",
                found.join(", ")
            ));
        }

        debug!("Insight rules produced {} tips", tips.len());
        tips
    }

    /// Distinct buzzwords present, in declaration order.
    fn find_buzzwords(&self, lowered: &str) -> Vec<&'static str> {
        let mut seen = [false; BUZZWORDS.len()];
        for mat in self.buzzword_matcher.find_iter(lowered) {
            seen[mat.pattern().as_usize()] = true;
        }
        BUZZWORDS
            .iter()
            .zip(seen)
            .filter_map(|(word, hit)| hit.then_some(*word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_short_text_fires_five_tips_in_order() {
        let engine = InsightEngine::new();
        let tips = engine.evaluate("Just a few plain words");

        assert!(tips.len() >= 5);
        assert!(tips[0].contains("summary"));
        assert!(tips[1].contains("certification"));
        assert!(tips[2].contains("project"));
        assert!(tips[3].contains("achievement"));
        assert!(tips[4].contains("short"));
    }

    #[test]
    fn test_sections_present_suppress_tips() {
        let filler = "word ".repeat(200);
        let text = format!(
            "Summary: engineer\nCertifications: AWS\nProjects: CLI tool\nAchievements: shipped v1\n{}",
            filler
        );
        let tips = InsightEngine::new().evaluate(&text);
        assert!(tips.is_empty());
    }

    #[test]
    fn test_long_resume_tip() {
        let text = "word ".repeat(1300);
        let tips = InsightEngine::new().evaluate(&format!(
            "Summary Certification Project Achievement {}",
            text
        ));
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("long"));
    }

    #[test]
    fn test_buzzword_detection_lists_found_words() {
        let filler = "word ".repeat(200);
        let text = format!(
            "Summary Certification Project Achievement\nA hardworking team player with synergy\n{}",
            filler
        );
        let tips = InsightEngine::new().evaluate(&text);
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("hardworking"));
        assert!(tips[0].contains("team player"));
        assert!(tips[0].contains("synergy"));
        assert!(!tips[0].contains("go-getter"));
    }

    #[test]
    fn test_empty_text_degrades_to_tips_not_errors() {
        let tips = InsightEngine::new().evaluate("");
        assert!(tips.len() >= 5);
    }

    #[test]
    fn test_rules_are_independent_and_deterministic() {
        let engine = InsightEngine::new();
        let text = "A self-starter resume";
        assert_eq!(engine.evaluate(text), engine.evaluate(text));
    }
}
