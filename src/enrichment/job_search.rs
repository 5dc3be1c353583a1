//! Job posting lookup via the RapidAPI JSearch endpoint

use crate::config::EnrichmentConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company_name: String,
    pub link: String,
}

pub trait JobSearchProvider {
    /// Look up job postings for a role or keyword query. Provider errors
    /// are tolerated by returning an empty sequence.
    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl std::future::Future<Output = Vec<JobPosting>> + Send;
}

pub struct JSearchClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Vec<JSearchHit>,
}

#[derive(Debug, Deserialize)]
struct JSearchHit {
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    employer_name: String,
    #[serde(default)]
    job_apply_link: String,
}

impl JSearchClient {
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        let api_key = std::env::var(&config.rapidapi_key_env).unwrap_or_default();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { client, api_key }
    }

    pub fn available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn request(&self, query: &str, location: &str) -> anyhow::Result<Vec<JobPosting>> {
        let full_query = if location.is_empty() {
            query.to_string()
        } else {
            format!("{} in {}", query, location)
        };

        let response = self
            .client
            .get(JSEARCH_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&[("query", full_query.as_str()), ("num_pages", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: JSearchResponse = response.json().await?;

        Ok(body
            .data
            .into_iter()
            .filter(|hit| !hit.job_title.is_empty())
            .map(|hit| JobPosting {
                title: hit.job_title,
                company_name: hit.employer_name,
                link: hit.job_apply_link,
            })
            .collect())
    }
}

impl JobSearchProvider for JSearchClient {
    async fn search(&self, query: &str, location: &str) -> Vec<JobPosting> {
        if !self.available() {
            warn!("Job search skipped: API key not configured");
            return Vec::new();
        }
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.request(query, location).await {
            Ok(postings) => {
                info!("Job search returned {} postings", postings.len());
                postings
            }
            Err(e) => {
                warn!("Job search failed, returning no postings: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> JSearchClient {
        JSearchClient {
            client: reqwest::Client::new(),
            api_key: String::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_key_yields_empty_results() {
        let client = offline_client();
        assert!(!client.available());
        assert!(client.search("rust developer", "remote").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_yields_empty_results() {
        let client = JSearchClient {
            client: reqwest::Client::new(),
            api_key: "test-key".to_string(),
        };
        assert!(client.search("  ", "").await.is_empty());
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let body: JSearchResponse =
            serde_json::from_str(r#"{"data": [{"job_title": "Rust Engineer"}]}"#).unwrap();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].job_title, "Rust Engineer");
        assert!(body.data[0].employer_name.is_empty());
    }

    #[test]
    fn test_response_parsing_tolerates_missing_data() {
        let body: JSearchResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(body.data.is_empty());
    }
}
