//! AI-backed schedule generation via the OpenAI chat-completions API.
//!
//! One outbound request per generation, no retry, no cancellation. The
//! user-supplied API key arrives at request time and is never stored.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::AreaStatement;
use crate::services::generator::{
    build_prompt, parse_generated, GenerateError, ScheduleGenerator, ScheduleResult,
};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for schedule generation.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Chat-completions client implementing [`ScheduleGenerator`].
#[derive(Clone)]
pub struct OpenAiGenerator {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: String, model: &str) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn call_api(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": "You are an expert construction scheduler."},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.2,
            "max_tokens": 2048
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;
        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenerateError::Request("model returned no choices".to_string()))
    }
}

#[async_trait]
impl ScheduleGenerator for OpenAiGenerator {
    async fn generate(&self, statement: &AreaStatement) -> Result<ScheduleResult, GenerateError> {
        let prompt = build_prompt(statement);
        log::info!("requesting schedule generation from model {}", self.model);
        let content = self.call_api(&prompt).await?;
        parse_generated(&content)
    }
}
