mod config;
pub mod assistant;
pub mod context;
pub mod generator;
pub mod retriever;

pub use assistant::DirectoryAssistant;
pub use config::{CHAT_MODEL, CallPolicy, EngineConfig};
pub use generator::{CompletionModel, LlmClient};

use greenbook_store::CatalogError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0} is not set")]
    MissingCredential(&'static str),
}

impl EngineError {
    /// Model-call failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Generation(_) | EngineError::Timeout(_))
    }

    /// Failures caused by the language-model provider rather than the request or our data.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            EngineError::Generation(_) | EngineError::Timeout(_) | EngineError::MissingCredential(_)
        )
    }
}
