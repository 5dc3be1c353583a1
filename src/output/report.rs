//! Match report assembly

use crate::enrichment::JobPosting;
use crate::processing::{CandidateProfile, SimilarityResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a single resume-vs-JD comparison produced, ready for
/// rendering or JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub resume_path: String,
    pub jd_path: String,
    pub similarity: SimilarityResult,
    pub token_overlap: f64,
    pub profile: CandidateProfile,
    pub tips: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub job_postings: Vec<JobPosting>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ai_summary: Option<String>,
}

impl MatchReport {
    pub fn new(
        resume_path: String,
        jd_path: String,
        similarity: SimilarityResult,
        token_overlap: f64,
        profile: CandidateProfile,
        tips: Vec<String>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_path,
            jd_path,
            similarity,
            token_overlap,
            profile,
            tips,
            job_postings: Vec::new(),
            ai_summary: None,
        }
    }

    pub fn with_job_postings(mut self, postings: Vec<JobPosting>) -> Self {
        self.job_postings = postings;
        self
    }

    pub fn with_ai_summary(mut self, summary: String) -> Self {
        self.ai_summary = Some(summary);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{extract_profile, InsightEngine, SimilarityEngine};

    fn sample_report() -> MatchReport {
        let engine = SimilarityEngine::new();
        let resume = "Name: Jane Doe\nSkills: Python, SQL";
        let jd = "Python SQL developer";
        MatchReport::new(
            "resume.txt".to_string(),
            "jd.txt".to_string(),
            engine.score(resume, jd),
            engine.token_overlap(resume, jd),
            extract_profile(resume),
            InsightEngine::new().evaluate(resume),
        )
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"score\""));
        assert!(json.contains("Jane Doe"));
        // Empty enrichment fields are omitted
        assert!(!json.contains("job_postings"));
        assert!(!json.contains("ai_summary"));
    }

    #[test]
    fn test_report_enrichment_builders() {
        let report = sample_report()
            .with_job_postings(vec![JobPosting {
                title: "Data Engineer".to_string(),
                company_name: "Acme".to_string(),
                link: "https://example.com".to_string(),
            }])
            .with_ai_summary("Strong fit.".to_string());

        assert_eq!(report.job_postings.len(), 1);
        assert_eq!(report.ai_summary.as_deref(), Some("Strong fit."));
    }
}
