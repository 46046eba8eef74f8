use crate::pipeline::{AnalysisGenerator, CollaboratorError, QuoteSnapshot};
use crate::reports::Symbol;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Returned when the completion carries no text.
pub const NO_ANALYSIS: &str = "No analysis available.";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Analysis generator calling an OpenAI-compatible chat completions endpoint.
pub struct OpenAiAnalysisClient {
    http_client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiAnalysisClient {
    pub fn new(http_client: reqwest::Client, config: OpenAiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

/// The single user message sent to the model.
pub fn build_prompt(symbol: &Symbol, context: &QuoteSnapshot) -> String {
    format!(
        "Provide an equity research summary for {}. Use the following JSON data as context: {}",
        symbol, context.0
    )
}

#[async_trait]
impl AnalysisGenerator for OpenAiAnalysisClient {
    async fn generate(
        &self,
        symbol: &Symbol,
        context: &QuoteSnapshot,
    ) -> Result<String, CollaboratorError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(symbol, context),
            }],
            temperature: self.config.temperature,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Status(response.status().as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Decode(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_ANALYSIS.to_string());

        tracing::debug!("Generated {} bytes of analysis for {}", content.len(), symbol);
        Ok(content)
    }
}
