use async_trait::async_trait;
use greenbook_types::{ChatMessage, ChatRole};
use rig::client::ProviderClient;
use rig::completion::Message;
use rig::providers::groq;
use std::sync::Arc;
use tracing::warn;

use super::EngineError;
use super::config::CallPolicy;

/// Env var holding the Groq credential.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Returned when the provider answers with no usable text.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not generate a response.";

/// One chat-completion call against an external model.
///
/// `messages` is the whole conversation; the last entry is the turn being answered.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u64,
    ) -> Result<String, EngineError>;
}

/// Groq chat completions through rig.
pub struct GroqModel {
    client: groq::Client,
    model: String,
}

impl GroqModel {
    /// Create client from GROQ_API_KEY env var
    pub fn from_env(model: impl Into<String>) -> Result<Self, EngineError> {
        let key_present = std::env::var(GROQ_API_KEY_ENV)
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false);
        if !key_present {
            return Err(EngineError::MissingCredential(GROQ_API_KEY_ENV));
        }

        Ok(Self {
            client: groq::Client::from_env(),
            model: model.into(),
        })
    }
}

fn to_rig_message(message: &ChatMessage) -> Message {
    match message.role {
        ChatRole::User => Message::user(message.content.clone()),
        ChatRole::Assistant => Message::assistant(message.content.clone()),
    }
}

#[async_trait]
impl CompletionModel for GroqModel {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u64,
    ) -> Result<String, EngineError> {
        use rig::client::CompletionClient;
        use rig::completion::Chat;

        let Some((last, history)) = messages.split_last() else {
            return Err(EngineError::InvalidRequest("no messages to send".into()));
        };

        let agent = self
            .client
            .agent(&self.model)
            .preamble(system)
            .temperature(temperature)
            .max_tokens(max_tokens)
            .build();

        let history: Vec<Message> = history.iter().map(to_rig_message).collect();

        agent
            .chat(to_rig_message(last), history)
            .await
            .map_err(|e| EngineError::Generation(e.to_string()))
    }
}

/// Stand-in used when no credential is configured: every call fails.
pub struct UnconfiguredModel;

#[async_trait]
impl CompletionModel for UnconfiguredModel {
    async fn complete(
        &self,
        _system: &str,
        _messages: &[ChatMessage],
        _temperature: f64,
        _max_tokens: u64,
    ) -> Result<String, EngineError> {
        Err(EngineError::MissingCredential(GROQ_API_KEY_ENV))
    }
}

/// Wrapper around the completion model that enforces the call policy
#[derive(Clone)]
pub struct LlmClient {
    model: Arc<dyn CompletionModel>,
    policy: CallPolicy,
}

impl LlmClient {
    pub fn new(model: Arc<dyn CompletionModel>, policy: CallPolicy) -> Self {
        Self { model, policy }
    }

    /// Groq from the environment, or a model that reports the missing key on use.
    pub fn from_env(model: &str, policy: CallPolicy) -> Self {
        let model: Arc<dyn CompletionModel> = match GroqModel::from_env(model) {
            Ok(groq) => Arc::new(groq),
            Err(e) => {
                warn!(error = %e, "AI endpoints will fail until the credential is set");
                Arc::new(UnconfiguredModel)
            }
        };
        Self::new(model, policy)
    }

    /// Generate a reply, applying timeout and bounded retry.
    pub async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u64,
    ) -> Result<String, EngineError> {
        let mut attempt: u32 = 0;

        loop {
            let call = self
                .model
                .complete(system, messages, temperature, max_tokens);
            let result = match tokio::time::timeout(self.policy.timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(EngineError::Timeout(self.policy.timeout)),
            };

            match result {
                Ok(text) if text.trim().is_empty() => return Ok(FALLBACK_ANSWER.into()),
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    let delay = self.policy.backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(error = %e, attempt, delay_ms = delay.as_millis() as u64, "retrying model call");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
