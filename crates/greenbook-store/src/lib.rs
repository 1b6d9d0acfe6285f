//! greenbook-store: the directory service's external collaborators.
//!
//! - [`cache`]: best-effort response cache (Redis or in-process) and the
//!   query normalisation that derives its keys.
//! - [`catalog`]: read access to businesses and categories (Postgres or a
//!   fixed in-memory corpus).

pub mod cache;
pub mod catalog;

pub use cache::{
    CACHE_NAMESPACE, CacheError, MemoryCache, NoopCache, RedisCache, ResponseCache, cache_key,
    normalize_query,
};
pub use catalog::{BusinessCatalog, CatalogCounts, CatalogError, PgCatalog, StaticCatalog};
