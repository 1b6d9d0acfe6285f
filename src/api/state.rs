use greenbook_store::{
    BusinessCatalog, MemoryCache, NoopCache, PgCatalog, RedisCache, ResponseCache, StaticCatalog,
};
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, CatalogSource};
use crate::engine::{DirectoryAssistant, EngineConfig, LlmClient};

/// Shared state for all handlers
pub struct AppState {
    pub assistant: DirectoryAssistant,
    pub catalog: Arc<dyn BusinessCatalog>,

    // Kept to close the pool on shutdown
    pg: Option<Arc<PgCatalog>>,
}

impl AppState {
    pub fn new(assistant: DirectoryAssistant, catalog: Arc<dyn BusinessCatalog>) -> Arc<Self> {
        Arc::new(Self {
            assistant,
            catalog,
            pg: None,
        })
    }

    /// Build every client from configuration. Only catalog and cache-URL
    /// problems are fatal; a missing model credential is reported on use.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Arc<Self>> {
        let engine_config = EngineConfig::default();

        let (catalog, pg): (Arc<dyn BusinessCatalog>, Option<Arc<PgCatalog>>) =
            match config.catalog_source()? {
                CatalogSource::Database(url) => {
                    let pg = Arc::new(PgCatalog::connect(&url).await?);
                    info!("connected to business database");
                    let catalog: Arc<dyn BusinessCatalog> = pg.clone();
                    (catalog, Some(pg))
                }
                CatalogSource::File(path) => {
                    let catalog = StaticCatalog::from_json_file(&path)?;
                    info!(path = %path.display(), businesses = catalog.len(), "loaded catalog file");
                    let catalog: Arc<dyn BusinessCatalog> = Arc::new(catalog);
                    (catalog, None)
                }
            };

        let cache: Arc<dyn ResponseCache> = if config.no_cache {
            info!("response cache disabled");
            Arc::new(NoopCache)
        } else if config.memory_cache {
            info!("using in-process response cache");
            Arc::new(MemoryCache::new())
        } else {
            info!(url = %config.redis_url, "using redis response cache");
            Arc::new(RedisCache::open(&config.redis_url)?)
        };

        let llm = LlmClient::from_env(&engine_config.model, config.call_policy());
        let assistant = DirectoryAssistant::new(catalog.clone(), cache, llm, engine_config);

        Ok(Arc::new(Self {
            assistant,
            catalog,
            pg,
        }))
    }

    /// Release external resources.
    pub async fn shutdown(&self) {
        if let Some(pg) = &self.pg {
            pg.close().await;
            info!("database pool closed");
        }
    }
}
