use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Prefix shared by every AI search entry in the backing store.
pub const CACHE_NAMESPACE: &str = "ai:search:";

/// Upper bound on a single connect or command round-trip.
const REDIS_OP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Lower-case, trim, and collapse whitespace runs to one space.
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `ai:search:<base64(normalized query)>`
pub fn cache_key(query: &str) -> String {
    format!("{}{}", CACHE_NAMESPACE, STANDARD.encode(normalize_query(query)))
}

/// Best-effort key/value store for serialized AI responses.
///
/// Neither method can fail from the caller's point of view: backend
/// errors are logged and surface as a miss (`get`) or a no-op (`set`).
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl: Duration);
}

/// Redis-backed cache. One multiplexed connection is opened on first use
/// and shared by every later call.
pub struct RedisCache {
    client: redis::Client,
    conn: OnceCell<MultiplexedConnection>,
    op_timeout: Duration,
}

impl RedisCache {
    /// Parse the connection URL. Does not touch the network.
    pub fn open(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            op_timeout: REDIS_OP_TIMEOUT,
        })
    }

    /// Shared connection handle. A failed connect is not remembered, so the
    /// next call tries again.
    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                debug!("opening redis connection");
                tokio::time::timeout(
                    self.op_timeout,
                    self.client.get_multiplexed_async_connection(),
                )
                .await
                .map_err(|_| CacheError::Timeout(self.op_timeout))?
                .map_err(CacheError::from)
            })
            .await?;
        Ok(conn.clone())
    }

    async fn try_get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let fetch = async {
            let value: Option<String> = conn.get(key).await?;
            Ok::<_, redis::RedisError>(value)
        };

        tokio::time::timeout(self.op_timeout, fetch)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
            .map_err(CacheError::from)
    }

    async fn try_set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let store = async {
            let _: () = conn.set_ex(key, value, ttl.as_secs()).await?;
            Ok::<_, redis::RedisError>(())
        };

        tokio::time::timeout(self.op_timeout, store)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
            .map_err(CacheError::from)
    }
}

#[async_trait]
impl ResponseCache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "cache get failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        if let Err(e) = self.try_set(key, value, ttl).await {
            warn!(key, error = %e, "cache set failed, skipping");
        }
    }
}

/// Process-local cache with per-entry expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|(_, exp)| *exp > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                debug!(key, "evicting expired entry");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value.to_string(), now + ttl));
    }
}

/// Cache that never stores anything. Used when caching is switched off.
pub struct NoopCache;

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) {}
}
