//! Resume matcher: resume and job description matching tool

use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::Config;
use resume_matcher::enrichment::{JSearchClient, JobSearchProvider, OpenAiClient, SummaryProvider};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::InputManager;
use resume_matcher::output::{render, render_profile, render_tips, MatchReport};
use resume_matcher::processing::{
    extract_profile, CandidateProfile, InsightEngine, SimilarityEngine, NOT_FOUND,
};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            jd,
            jobs,
            summary,
            location,
            output,
            save,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)?;

            info!("Matching {} against {}", resume.display(), jd.display());

            let mut input_manager = InputManager::new();
            let resume_content = input_manager.extract_content(&resume).await?;
            let jd_content = input_manager.extract_content(&jd).await?;

            if resume_content.is_empty() {
                warn!("No text extracted from resume; results will be degraded");
            }
            if jd_content.is_empty() {
                warn!("No text extracted from job description; results will be degraded");
            }

            let engine = SimilarityEngine::new();
            let similarity = engine.score(&resume_content.text, &jd_content.text);
            let token_overlap = engine.token_overlap(&resume_content.text, &jd_content.text);
            let profile = extract_profile(&resume_content.text);
            let tips = InsightEngine::new().evaluate(&resume_content.text);

            let mut report = MatchReport::new(
                resume.to_string_lossy().to_string(),
                jd.to_string_lossy().to_string(),
                similarity,
                token_overlap,
                profile,
                tips,
            );

            if jobs {
                let query = job_search_query(&report.profile, &report);
                match query {
                    Some(query) => {
                        let location = location
                            .unwrap_or_else(|| config.enrichment.default_location.clone());
                        let client = JSearchClient::from_config(&config.enrichment);
                        let postings = client.search(&query, &location).await;
                        report = report.with_job_postings(postings);
                    }
                    None => warn!("No role or keywords to search jobs for, skipping lookup"),
                }
            }

            if summary {
                let client = OpenAiClient::from_config(&config.enrichment);
                let narrative = client
                    .summarize(
                        &resume_content.text,
                        &jd_content.text,
                        report.similarity.score,
                    )
                    .await;
                report = report.with_ai_summary(narrative);
            }

            let rendered = render(&report, output_format, config.output.color_output)?;
            emit(rendered, save)?;
        }

        Commands::Profile { file, output } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)?;

            let mut input_manager = InputManager::new();
            let content = input_manager.extract_content(&file).await?;
            let profile = extract_profile(&content.text);

            print!("{}", render_profile(&profile, output_format)?);
        }

        Commands::Tips { file, output } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)?;

            let mut input_manager = InputManager::new();
            let content = input_manager.extract_content(&file).await?;
            let tips = InsightEngine::new().evaluate(&content.text);

            print!("{}", render_tips(&tips, output_format)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeMatcherError::Configuration(e.to_string()))?;
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}

/// Derive the job-search query from the profile: applied role first, then
/// the strongest matched keywords.
fn job_search_query(profile: &CandidateProfile, report: &MatchReport) -> Option<String> {
    if let Some(role) = &profile.applied_role {
        return Some(role.clone());
    }
    if profile.sections.get("skills").map(String::as_str) != Some(NOT_FOUND) {
        if let Some(skills) = profile.sections.get("skills") {
            return Some(skills.lines().next().unwrap_or(skills).to_string());
        }
    }
    let terms: Vec<&str> = report
        .similarity
        .matched_terms
        .iter()
        .take(3)
        .map(|s| s.as_str())
        .collect();
    (!terms.is_empty()).then(|| terms.join(" "))
}

fn emit(rendered: String, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Report saved to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
