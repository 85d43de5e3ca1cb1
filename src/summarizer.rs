//! Summarization oracle backed by an OpenAI chat-completion call

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::SummarizerConfig;
use crate::error::{DigestError, Result};

/// Fixed system instruction for every summarization call
pub const SYSTEM_PROMPT: &str =
    "You are a language model that summarizes emails in 3-5 bullet points.";

fn user_prompt(email_text: &str) -> String {
    format!(
        "Summarize the following in less than 100 words and only using 3-5 bullet points: {}",
        email_text
    )
}

/// Trait for the summarization oracle
///
/// Reduces arbitrary email text to a short bullet-point summary. The length
/// contract (3-5 bullets, <100 words) is enforced only through prompting;
/// callers must not rely on it being verified.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, email_text: &str) -> Result<String>;
}

/// Production summarizer over the OpenAI chat completions API
///
/// Input text is passed through untruncated; an oversized body that the
/// provider rejects surfaces as a fatal run error. With the default
/// temperature of 1.0 two calls on identical input are not guaranteed to
/// produce identical summaries.
pub struct OpenAiSummarizer {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u16,
    temperature: f32,
}

impl OpenAiSummarizer {
    pub fn new(api_key: impl Into<String>, config: &SummarizerConfig) -> Self {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_summary_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl Summarize for OpenAiSummarizer {
    async fn summarize(&self, email_text: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt(email_text))
                    .build()?
                    .into(),
            ])
            .build()?;

        debug!(model = %self.model, chars = email_text.len(), "Requesting summary");
        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(DigestError::EmptySummary)
    }
}
