//! Rendering of match reports to console, JSON, and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::MatchReport;
use crate::processing::{CandidateProfile, NOT_FOUND};
use colored::Colorize;
use std::fmt::Write;

/// Render a report in the requested format.
pub fn render(report: &MatchReport, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Console => render_console(report, color),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string())),
        OutputFormat::Markdown => render_markdown(report),
    }
}

fn render_console(report: &MatchReport, color: bool) -> Result<String> {
    colored::control::set_override(color);

    let mut out = String::new();
    let score_line = format!("{:.2}%", report.similarity.score);
    let score_colored = if report.similarity.score >= 70.0 {
        score_line.green().bold()
    } else if report.similarity.score >= 40.0 {
        score_line.yellow().bold()
    } else {
        score_line.red().bold()
    };

    writeln!(out, "{}", "Match Score".bold().underline()).ok();
    writeln!(out, "  {}", score_colored).ok();
    writeln!(
        out,
        "  Token overlap: {:.1}%",
        report.token_overlap * 100.0
    )
    .ok();

    writeln!(out, "\n{}", "Candidate Profile".bold().underline()).ok();
    writeln!(
        out,
        "  Name:       {}",
        report.profile.name.as_deref().unwrap_or("N/A")
    )
    .ok();
    writeln!(
        out,
        "  Role:       {}",
        report.profile.applied_role.as_deref().unwrap_or("N/A")
    )
    .ok();
    writeln!(
        out,
        "  Experience: {}",
        report.profile.experience.as_deref().unwrap_or("N/A")
    )
    .ok();
    for (section, body) in sorted_sections(&report.profile) {
        if body != NOT_FOUND {
            writeln!(out, "  {}: {}", capitalize(section), first_line(body)).ok();
        }
    }

    if !report.similarity.matched_terms.is_empty() {
        writeln!(out, "\n{}", "Matched Keywords".bold().underline()).ok();
        let terms: Vec<&str> = report
            .similarity
            .matched_terms
            .iter()
            .map(|s| s.as_str())
            .collect();
        writeln!(out, "  {}", terms.join(", ")).ok();
    }

    if !report.tips.is_empty() {
        writeln!(out, "\n{}", "Resume Tips".bold().underline()).ok();
        for tip in &report.tips {
            writeln!(out, "  - {}", tip).ok();
        }
    }

    if !report.job_postings.is_empty() {
        writeln!(out, "\n{}", "Related Job Postings".bold().underline()).ok();
        for posting in &report.job_postings {
            writeln!(
                out,
                "  - {} at {} ({})",
                posting.title, posting.company_name, posting.link
            )
            .ok();
        }
    }

    if let Some(summary) = &report.ai_summary {
        writeln!(out, "\n{}", "AI Fit Summary".bold().underline()).ok();
        writeln!(out, "{}", summary).ok();
    }

    colored::control::unset_override();
    Ok(out)
}

fn render_markdown(report: &MatchReport) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "# Resume Match Report\n").ok();
    writeln!(out, "- **Resume**: {}", report.resume_path).ok();
    writeln!(out, "- **Job description**: {}", report.jd_path).ok();
    writeln!(out, "- **Generated**: {}\n", report.generated_at.to_rfc3339()).ok();

    writeln!(out, "## Match Score\n").ok();
    writeln!(out, "**{:.2}%** (token overlap {:.1}%)\n", report.similarity.score, report.token_overlap * 100.0).ok();

    writeln!(out, "## Candidate Profile\n").ok();
    writeln!(out, "| Field | Value |").ok();
    writeln!(out, "|-------|-------|").ok();
    writeln!(out, "| Name | {} |", report.profile.name.as_deref().unwrap_or("N/A")).ok();
    writeln!(out, "| Role | {} |", report.profile.applied_role.as_deref().unwrap_or("N/A")).ok();
    writeln!(out, "| Experience | {} |", report.profile.experience.as_deref().unwrap_or("N/A")).ok();
    for (section, body) in sorted_sections(&report.profile) {
        writeln!(out, "| {} | {} |", capitalize(section), first_line(body)).ok();
    }
    out.push('\n');

    if !report.similarity.matched_terms.is_empty() {
        writeln!(out, "## Matched Keywords\n").ok();
        let terms: Vec<&str> = report
            .similarity
            .matched_terms
            .iter()
            .map(|s| s.as_str())
            .collect();
        writeln!(out, "{}\n", terms.join(", ")).ok();
    }

    if !report.tips.is_empty() {
        writeln!(out, "## Resume Tips\n").ok();
        for tip in &report.tips {
            writeln!(out, "- {}", tip).ok();
        }
        out.push('\n');
    }

    if !report.job_postings.is_empty() {
        writeln!(out, "## Related Job Postings\n").ok();
        for posting in &report.job_postings {
            writeln!(out, "- [{} at {}]({})", posting.title, posting.company_name, posting.link).ok();
        }
        out.push('\n');
    }

    if let Some(summary) = &report.ai_summary {
        writeln!(out, "## AI Fit Summary\n").ok();
        writeln!(out, "{}", summary).ok();
    }

    Ok(out)
}

/// Render a standalone candidate profile in the requested format.
pub fn render_profile(profile: &CandidateProfile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(profile)
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string())),
        OutputFormat::Console => {
            let mut out = String::new();
            writeln!(out, "Name:       {}", profile.name.as_deref().unwrap_or("N/A")).ok();
            writeln!(
                out,
                "Role:       {}",
                profile.applied_role.as_deref().unwrap_or("N/A")
            )
            .ok();
            writeln!(
                out,
                "Experience: {}",
                profile.experience.as_deref().unwrap_or("N/A")
            )
            .ok();
            for (section, body) in sorted_sections(profile) {
                writeln!(out, "{}: {}", capitalize(section), first_line(body)).ok();
            }
            Ok(out)
        }
        OutputFormat::Markdown => {
            let mut out = String::new();
            writeln!(out, "# Candidate Profile\n").ok();
            writeln!(out, "| Field | Value |").ok();
            writeln!(out, "|-------|-------|").ok();
            writeln!(out, "| Name | {} |", profile.name.as_deref().unwrap_or("N/A")).ok();
            writeln!(
                out,
                "| Role | {} |",
                profile.applied_role.as_deref().unwrap_or("N/A")
            )
            .ok();
            writeln!(
                out,
                "| Experience | {} |",
                profile.experience.as_deref().unwrap_or("N/A")
            )
            .ok();
            for (section, body) in sorted_sections(profile) {
                writeln!(out, "| {} | {} |", capitalize(section), first_line(body)).ok();
            }
            Ok(out)
        }
    }
}

/// Render a standalone tip list in the requested format.
pub fn render_tips(tips: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tips)
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string())),
        OutputFormat::Console => {
            if tips.is_empty() {
                return Ok("No tips: the resume covers all checked areas.\n".to_string());
            }
            let mut out = String::new();
            for tip in tips {
                writeln!(out, "- {}", tip).ok();
            }
            Ok(out)
        }
        OutputFormat::Markdown => {
            let mut out = String::new();
            writeln!(out, "# Resume Tips\n").ok();
            if tips.is_empty() {
                writeln!(out, "No tips: the resume covers all checked areas.").ok();
            }
            for tip in tips {
                writeln!(out, "- {}", tip).ok();
            }
            Ok(out)
        }
    }
}

fn sorted_sections(profile: &CandidateProfile) -> Vec<(&str, &str)> {
    let mut sections: Vec<(&str, &str)> = profile
        .sections
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    sections.sort_by(|a, b| a.0.cmp(b.0));
    sections
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::MatchReport;
    use crate::processing::{extract_profile, InsightEngine, SimilarityEngine};

    fn sample_report() -> MatchReport {
        let engine = SimilarityEngine::new();
        let resume = "Name: Jane Doe\nSkills: Python, SQL\nExperience: 3 years at Acme";
        let jd = "Looking for Python SQL developer with 2+ years experience";
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
    fn test_console_rendering() {
        let rendered = render(&sample_report(), OutputFormat::Console, false).unwrap();
        assert!(rendered.contains("Match Score"));
        assert!(rendered.contains("Jane Doe"));
        assert!(rendered.contains("python"));
    }

    #[test]
    fn test_json_rendering_is_valid() {
        let rendered = render(&sample_report(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["similarity"]["score"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_markdown_rendering() {
        let rendered = render(&sample_report(), OutputFormat::Markdown, false).unwrap();
        assert!(rendered.contains("# Resume Match Report"));
        assert!(rendered.contains("| Name | Jane Doe |"));
    }

    #[test]
    fn test_profile_markdown_rendering() {
        let profile = extract_profile("Name: Jane Doe\nSkills: Python, SQL");
        let rendered = render_profile(&profile, OutputFormat::Markdown).unwrap();
        assert!(rendered.contains("# Candidate Profile"));
        assert!(rendered.contains("| Name | Jane Doe |"));
        assert!(rendered.contains("| Skills | Python, SQL |"));

        let console = render_profile(&profile, OutputFormat::Console).unwrap();
        assert!(console.contains("Name:       Jane Doe"));
        assert!(!console.contains('|'));
    }

    #[test]
    fn test_profile_json_rendering() {
        let profile = extract_profile("Name: Jane Doe");
        let rendered = render_profile(&profile, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["name"], "Jane Doe");
    }

    #[test]
    fn test_tips_rendering_per_format() {
        let tips = vec!["Add a summary section.".to_string()];

        let markdown = render_tips(&tips, OutputFormat::Markdown).unwrap();
        assert!(markdown.contains("# Resume Tips"));
        assert!(markdown.contains("- Add a summary section."));

        let console = render_tips(&tips, OutputFormat::Console).unwrap();
        assert!(console.contains("- Add a summary section."));
        assert!(!console.contains('#'));

        let json = render_tips(&[], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_tips_empty_message() {
        let console = render_tips(&[], OutputFormat::Console).unwrap();
        assert!(console.contains("No tips"));
    }
}
