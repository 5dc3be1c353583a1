//! AI-generated narrative fit summary via the OpenAI chat completions API

use crate::config::EnrichmentConfig;
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MAX_TOKENS: u32 = 400;

pub trait SummaryProvider {
    /// Produce a narrative summary of how well the resume fits the job.
    /// Stateless single-turn request; failures return a user-visible
    /// message rather than propagating an error.
    fn summarize(
        &self,
        resume_text: &str,
        jd_text: &str,
        score: f64,
    ) -> impl std::future::Future<Output = String> + Send;
}

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

impl OpenAiClient {
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        let api_key = std::env::var(&config.openai_key_env).unwrap_or_default();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            model: config.summary_model.clone(),
        }
    }

    pub fn available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn build_prompt(resume_text: &str, jd_text: &str, score: f64) -> String {
        format!(
            "You are an expert resume and job match reviewer.\n\
             Given the resume below:\n\"\"\"{}\"\"\"\n\n\
             And the job description below:\n\"\"\"{}\"\"\"\n\n\
             Write two paragraphs:\n\n\
             1. A summary of how well this resume matches the job, considering skills, \
             background, experience, and strengths.\n\
             2. A paragraph about potential weaknesses or gaps the candidate may need to \
             improve for this job.\n\n\
             Mention if the resume strongly aligns or needs improvement based on the \
             score: {:.2}%.",
            resume_text, jd_text, score
        )
    }

    async fn request(&self, prompt: String) -> anyhow::Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatCompletionResponse = response.json().await?;
        body.choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("empty completion response"))
    }
}

impl SummaryProvider for OpenAiClient {
    async fn summarize(&self, resume_text: &str, jd_text: &str, score: f64) -> String {
        if !self.available() {
            return "AI summary unavailable: API key not configured.".to_string();
        }

        let prompt = Self::build_prompt(resume_text, jd_text, score);
        match self.request(prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                format!("AI summary unavailable: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_returns_message_not_error() {
        let client = OpenAiClient {
            client: reqwest::Client::new(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
        };
        let summary = client.summarize("resume", "jd", 42.0).await;
        assert!(summary.contains("unavailable"));
    }

    #[test]
    fn test_prompt_includes_inputs_and_score() {
        let prompt = OpenAiClient::build_prompt("Jane's resume", "Python JD", 73.25);
        assert!(prompt.contains("Jane's resume"));
        assert!(prompt.contains("Python JD"));
        assert!(prompt.contains("73.25%"));
        assert!(prompt.contains("two paragraphs"));
    }

    #[test]
    fn test_completion_response_parsing() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Good fit."}}]}"#,
        )
        .unwrap();
        assert_eq!(body.choices[0].message.content, "Good fit.");
    }
}
