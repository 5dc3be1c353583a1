//! Structured field extraction from resume text
//!
//! Every lookup is case-insensitive and best-effort: absence of a field
//! yields `None` (or the `"not found"` sentinel for sections), never an
//! error, and re-running extraction on the same text yields the same
//! profile.

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Sentinel stored for a section whose header never appears in the text.
pub const NOT_FOUND: &str = "not found";

/// Canonical section names, in the order they are searched.
const SECTION_NAMES: [&str; 6] = [
    "summary",
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub applied_role: Option<String>,
    pub experience: Option<String>,
    pub sections: HashMap<String, String>,
}

/// Derive a [`CandidateProfile`] from extracted resume text.
pub fn extract_profile(text: &str) -> CandidateProfile {
    let name = extract_name(text);
    let applied_role = extract_applied_role(text);
    let experience = extract_experience(text);
    let sections = extract_sections(text);

    debug!(
        "Profile extracted: name={:?}, role={:?}, experience={:?}",
        name, applied_role, experience
    );

    CandidateProfile {
        name,
        applied_role,
        experience,
        sections,
    }
}

/// Name precedence is fixed: explicit `Name:` label, then a plausible first
/// line, then the first run of capitalized words anywhere in the text.
fn extract_name(text: &str) -> Option<String> {
    name_from_label(text)
        .or_else(|| name_from_first_line(text))
        .or_else(|| name_from_capitalized_run(text))
}

fn name_from_label(text: &str) -> Option<String> {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    let re = LABEL_RE
        .get_or_init(|| Regex::new(r"(?im)^\s*name\s*[:\-]\s*(.+)$").expect("Invalid name regex"));

    re.captures(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// A first line qualifies as a name when it is short, contains no digits,
/// and is not a contact line.
fn name_from_first_line(text: &str) -> Option<String> {
    let first_line = text.lines().map(str::trim).find(|line| !line.is_empty())?;

    let word_count = first_line.split_whitespace().count();
    let plausible = word_count >= 1
        && word_count <= 5
        && !first_line.contains('@')
        && !first_line.contains(':')
        && !first_line.chars().any(|c| c.is_ascii_digit());

    plausible.then(|| first_line.to_string())
}

/// Named-entity fallback in the absence of a linguistic pipeline: the first
/// line made up of two to four capitalized alphabetic words.
fn name_from_capitalized_run(text: &str) -> Option<String> {
    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 || words.len() > 4 {
            continue;
        }
        let all_capitalized = words.iter().all(|w| {
            let mut chars = w.chars();
            chars.next().map(|c| c.is_uppercase()).unwrap_or(false)
                && chars.all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        });
        if all_capitalized {
            return Some(words.join(" "));
        }
    }
    None
}

/// First line carrying a role indicator; the role is the remainder after
/// the first colon or dash.
fn extract_applied_role(text: &str) -> Option<String> {
    const ROLE_INDICATORS: [&str; 4] = ["applying for", "position", "role", "title"];

    for line in text.lines() {
        let lowered = line.to_lowercase();
        if !ROLE_INDICATORS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }
        if let Some(idx) = line.find([':', '-']) {
            let role = line[idx + 1..].trim();
            if !role.is_empty() {
                return Some(role.to_string());
            }
        }
    }
    None
}

/// `<N> years` / `<N>+ yrs`, normalized to `"<N> years"`.
fn extract_experience(text: &str) -> Option<String> {
    static EXPERIENCE_RE: OnceLock<Regex> = OnceLock::new();
    let re = EXPERIENCE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+)\s*(\+)?\s*(?:years|yrs)\b").expect("Invalid experience regex")
    });

    re.captures(text).map(|cap| {
        let plus = if cap.get(2).is_some() { "+" } else { "" };
        format!("{}{} years", &cap[1], plus)
    })
}

/// Collect each canonical section: from its header line until the next
/// blank line or the next header-looking line.
fn extract_sections(text: &str) -> HashMap<String, String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = HashMap::new();

    for name in SECTION_NAMES {
        let body = find_section_body(&lines, name).unwrap_or_else(|| NOT_FOUND.to_string());
        sections.insert(name.to_string(), body);
    }

    sections
}

fn find_section_body(lines: &[&str], section: &str) -> Option<String> {
    let header_idx = lines
        .iter()
        .position(|line| is_section_header(line, section))?;

    let mut body = Vec::new();

    // Text on the header line itself, after the separator
    let header = lines[header_idx];
    if let Some(idx) = header.find([':', '-']) {
        let inline = header[idx + 1..].trim();
        if !inline.is_empty() {
            body.push(inline.to_string());
        }
    }

    for line in &lines[header_idx + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_any_section_header(trimmed) || is_all_caps_header(trimmed) {
            break;
        }
        body.push(trimmed.to_string());
    }

    let body = body.join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

fn is_section_header(line: &str, section: &str) -> bool {
    let trimmed = line.trim().to_lowercase();
    trimmed.starts_with(section) && (trimmed.len() <= section.len() + 2 || line.contains(':'))
}

fn is_any_section_header(line: &str) -> bool {
    SECTION_NAMES
        .iter()
        .any(|section| is_section_header(line, section))
}

/// An all-caps line is treated as a header boundary. The five-letter
/// minimum keeps short acronyms like SQL inside section bodies.
fn is_all_caps_header(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 5 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Name: Jane Doe\nSkills: Python, SQL\nExperience: 3 years at Acme";

    #[test]
    fn test_name_from_label_takes_precedence() {
        let profile = extract_profile("John Smith\nName: Jane Doe");
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_from_first_line() {
        let profile = extract_profile("Jane Doe\nSoftware Engineer\njane@example.com");
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_capitalized_run_fallback() {
        let text = "resume for 2024 application\ncontact: jane@example.com\nJane Doe";
        let profile = extract_profile(text);
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_applied_role() {
        let profile = extract_profile("Position: Senior Backend Engineer\nSkills: Rust");
        assert_eq!(profile.applied_role.as_deref(), Some("Senior Backend Engineer"));
    }

    #[test]
    fn test_experience_normalization() {
        assert_eq!(
            extract_profile("I have 3 years of Python").experience.as_deref(),
            Some("3 years")
        );
        assert_eq!(
            extract_profile("5+ yrs in data engineering").experience.as_deref(),
            Some("5+ years")
        );
    }

    #[test]
    fn test_section_extraction() {
        let profile = extract_profile(SAMPLE);
        assert_eq!(profile.sections["skills"], "Python, SQL");
        assert_eq!(profile.sections["experience"], "3 years at Acme");
        assert_eq!(profile.sections["education"], NOT_FOUND);
    }

    #[test]
    fn test_section_stops_at_blank_line() {
        let text = "Skills:\nPython\nSQL\n\nUnrelated trailing paragraph";
        let profile = extract_profile(text);
        assert_eq!(profile.sections["skills"], "Python\nSQL");
    }

    #[test]
    fn test_section_stops_at_all_caps_header() {
        let text = "EDUCATION\nBSc Computer Science\nWORK HISTORY\nAcme Corp";
        let profile = extract_profile(text);
        assert_eq!(profile.sections["education"], "BSc Computer Science");
    }

    #[test]
    fn test_empty_text_yields_absent_fields() {
        let profile = extract_profile("");
        assert!(profile.name.is_none());
        assert!(profile.applied_role.is_none());
        assert!(profile.experience.is_none());
        for name in SECTION_NAMES {
            assert_eq!(profile.sections[name], NOT_FOUND);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(extract_profile(SAMPLE), extract_profile(SAMPLE));
    }

    #[test]
    fn test_scenario_jane_doe() {
        let profile = extract_profile(SAMPLE);
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.experience.as_deref(), Some("3 years"));
    }
}
