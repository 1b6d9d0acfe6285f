use std::time::Duration;

/// Groq chat model used for both search and chat.
pub const CHAT_MODEL: &str = "llama-3.3-70b-versatile";

/// AI pipeline parameters. Fixed per deployment.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u64,
    /// Maximum businesses returned by the scorer
    pub top_k: usize,
    /// Businesses taken in store order when nothing scores
    pub fallback_limit: usize,
    pub cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: CHAT_MODEL.into(),
            temperature: 0.7,
            max_tokens: 500,
            top_k: 5,
            fallback_limit: 5,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

/// Timeout and retry bounds for a single model call.
#[derive(Clone, Debug)]
pub struct CallPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first failure (0 = no retry)
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub backoff: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}
