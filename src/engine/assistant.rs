//! Request-level control flow for AI search and chat.
//!
//! Search: cache check → scoring (or fallback) → prompt → model → response → cache write.
//! Chat: same retrieval driven by the latest user turn, full history to the model, no cache.

use greenbook_store::{BusinessCatalog, ResponseCache, cache_key};
use greenbook_types::{Business, BusinessSummary, ChatMessage, ChatResponse, ChatRole, SearchResponse};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::config::EngineConfig;
use super::generator::LlmClient;
use super::{EngineError, context, retriever};

/// Orchestrates scoring, prompting, generation and caching.
///
/// All collaborators are injected; the assistant holds no per-request state
/// and can serve concurrent requests.
#[derive(Clone)]
pub struct DirectoryAssistant {
    catalog: Arc<dyn BusinessCatalog>,
    cache: Arc<dyn ResponseCache>,
    llm: LlmClient,
    config: EngineConfig,
}

impl DirectoryAssistant {
    pub fn new(
        catalog: Arc<dyn BusinessCatalog>,
        cache: Arc<dyn ResponseCache>,
        llm: LlmClient,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            cache,
            llm,
            config,
        }
    }

    /// One-shot search. Responses are cached by normalized query.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, EngineError> {
        if query.trim().is_empty() {
            return Err(EngineError::InvalidRequest("Query is required".into()));
        }

        let key = cache_key(query);
        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_str::<SearchResponse>(&cached) {
                Ok(response) => {
                    info!(query, "cache hit");
                    return Ok(response);
                }
                Err(e) => warn!(key, error = %e, "unreadable cache entry, recomputing"),
            }
        }
        info!(query, "cache miss");

        let started = Instant::now();
        let candidates = retriever::retrieve(query, self.catalog.as_ref(), &self.config).await?;

        let user_prompt = context::build_user_prompt(query, &candidates);
        let answer = self
            .llm
            .complete(
                context::build_system_prompt(),
                &[ChatMessage::user(user_prompt)],
                self.config.temperature,
                self.config.max_tokens,
            )
            .await?;

        let response = SearchResponse {
            query: query.to_string(),
            answer,
            businesses: project(&candidates),
        };

        match serde_json::to_string(&response) {
            Ok(payload) => self.cache.set(&key, &payload, self.config.cache_ttl).await,
            Err(e) => warn!(error = %e, "failed to serialize response for cache"),
        }

        info!(
            query,
            candidates = candidates.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search answered"
        );
        Ok(response)
    }

    /// Multi-turn chat. Retrieval follows the latest user message; the model
    /// sees the whole history.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, EngineError> {
        if messages.is_empty() {
            return Err(EngineError::InvalidRequest(
                "Messages array is required".into(),
            ));
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .ok_or_else(|| EngineError::InvalidRequest("No user message found".into()))?;

        if last_user.content.trim().is_empty() {
            return Err(EngineError::InvalidRequest(
                "User message cannot be empty".into(),
            ));
        }

        let started = Instant::now();
        let candidates =
            retriever::retrieve(&last_user.content, self.catalog.as_ref(), &self.config).await?;

        let system_prompt = context::build_chat_system_prompt(&candidates);
        let message = self
            .llm
            .complete(
                &system_prompt,
                messages,
                self.config.temperature,
                self.config.max_tokens,
            )
            .await?;

        info!(
            turns = messages.len(),
            candidates = candidates.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat answered"
        );
        Ok(ChatResponse {
            message,
            businesses: project(&candidates),
        })
    }
}

fn project(businesses: &[Business]) -> Vec<BusinessSummary> {
    businesses.iter().map(BusinessSummary::from).collect()
}
