//! Runtime configuration, from command-line flags with environment fallbacks.
//!
//! Model parameters (model id, temperature, token limit, top-K, cache TTL)
//! are not configurable here; see `engine::EngineConfig`.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::engine::CallPolicy;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("set either DATABASE_URL or CATALOG_FILE")]
    NoCatalog,

    #[error("DATABASE_URL and CATALOG_FILE are mutually exclusive")]
    AmbiguousCatalog,
}

/// Ногоон дэвтэр directory API
#[derive(Parser, Debug, Clone)]
#[command(name = "green-book")]
#[command(about = "Business directory API with AI-assisted search and chat")]
#[command(version)]
pub struct AppConfig {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Postgres connection string for the business catalog
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// JSON file with the business catalog (instead of a database)
    #[arg(long, env = "CATALOG_FILE")]
    pub catalog_file: Option<PathBuf>,

    /// Redis connection string for the AI response cache
    #[arg(long, env = "REDIS_URL", default_value = "redis://localhost:6379")]
    pub redis_url: String,

    /// Keep AI responses in process memory instead of Redis
    #[arg(long, env = "AI_CACHE_MEMORY")]
    pub memory_cache: bool,

    /// Disable the AI response cache entirely
    #[arg(long, env = "AI_CACHE_DISABLED", conflicts_with = "memory_cache")]
    pub no_cache: bool,

    /// Timeout for one language-model call, in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 30)]
    pub llm_timeout_secs: u64,

    /// Retries after a failed language-model call (0 = none)
    #[arg(long, env = "LLM_MAX_RETRIES", default_value_t = 0)]
    pub llm_retries: u32,
}

/// Where the business corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Database(String),
    File(PathBuf),
}

impl AppConfig {
    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn catalog_source(&self) -> Result<CatalogSource, ConfigError> {
        match (&self.database_url, &self.catalog_file) {
            (Some(url), None) => Ok(CatalogSource::Database(url.clone())),
            (None, Some(path)) => Ok(CatalogSource::File(path.clone())),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousCatalog),
            (None, None) => Err(ConfigError::NoCatalog),
        }
    }

    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: Duration::from_secs(self.llm_timeout_secs),
            max_retries: self.llm_retries,
            ..CallPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        let mut argv = vec!["green-book"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_bind_addr() {
        let config = parse(&["--host", "127.0.0.1", "--port", "8080"]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_catalog_source_file() {
        let config = AppConfig {
            database_url: None,
            catalog_file: Some("data/businesses.json".into()),
            ..parse(&[])
        };
        assert_eq!(
            config.catalog_source(),
            Ok(CatalogSource::File("data/businesses.json".into()))
        );
    }

    #[test]
    fn test_catalog_source_database() {
        let config = AppConfig {
            database_url: Some("postgres://localhost/greenbook".into()),
            catalog_file: None,
            ..parse(&[])
        };
        assert_eq!(
            config.catalog_source(),
            Ok(CatalogSource::Database("postgres://localhost/greenbook".into()))
        );
    }

    #[test]
    fn test_catalog_source_requires_exactly_one() {
        let neither = AppConfig {
            database_url: None,
            catalog_file: None,
            ..parse(&[])
        };
        assert_eq!(neither.catalog_source(), Err(ConfigError::NoCatalog));

        let both = AppConfig {
            database_url: Some("postgres://localhost/greenbook".into()),
            catalog_file: Some("businesses.json".into()),
            ..parse(&[])
        };
        assert_eq!(both.catalog_source(), Err(ConfigError::AmbiguousCatalog));
    }

    #[test]
    fn test_call_policy_from_flags() {
        let config = parse(&["--llm-timeout-secs", "5", "--llm-retries", "2"]);
        let policy = config.call_policy();
        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.max_retries, 2);
    }

    #[test]
    fn test_cache_flags_conflict() {
        let result =
            AppConfig::try_parse_from(["green-book", "--memory-cache", "--no-cache"]);
        assert!(result.is_err());
    }
}
