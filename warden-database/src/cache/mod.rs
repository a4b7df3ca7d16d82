mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

pub use redis_store::RedisCacheStore;

/// How long group configuration (rules) stays cached.
pub const CONFIG_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled,
    Redis(RedisCacheStore),
}

/// Namespaced Redis access. With Redis disabled every read misses and every
/// write is dropped, so callers fall through to Postgres.
#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    /// The underlying Redis store, when one is configured.
    pub fn redis_store(&self) -> Option<&RedisCacheStore> {
        match &self.backend {
            CacheBackend::Disabled => None,
            CacheBackend::Redis(store) => Some(store),
        }
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled => None,
            CacheBackend::Redis(store) => store.get(key).await?,
        };

        value
            .map(|bytes| {
                serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })
            })
            .transpose()
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let CacheBackend::Redis(store) = &self.backend else {
            return Ok(());
        };

        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;
        store.set(key, payload, ttl.as_secs().max(1)).await
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.del(key).await.map(|_| ()),
        }
    }

    /// Read-through helper: cache errors are logged and never fail the load.
    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(
                ?e,
                cache_key = key,
                "cache get failed; falling back to database"
            ),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(
                ?e,
                cache_key = key,
                "cache set failed; returning database value"
            );
        }

        Ok(loaded)
    }
}

pub fn rules_key(cache: &CacheService, guild_id: u64) -> String {
    cache.key(format!("rules:{guild_id}"))
}

pub fn warnings_key(cache: &CacheService, guild_id: u64, user_id: u64) -> String {
    cache.key(format!("warns:{guild_id}:{user_id}"))
}

pub async fn invalidate_rules(cache: &CacheService, guild_id: u64) -> anyhow::Result<()> {
    cache.del(&rules_key(cache, guild_id)).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{CacheService, rules_key, warnings_key};

    #[test]
    fn keys_are_prefixed() {
        let cache = CacheService::disabled("warden:test");
        assert_eq!(rules_key(&cache, 42), "warden:test:rules:42");
        assert_eq!(warnings_key(&cache, 1, 2), "warden:test:warns:1:2");
        assert!(!cache.is_redis_enabled());
        assert!(cache.redis_store().is_none());
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = CacheService::disabled("warden:test");
        cache
            .set_json("k", &"stale".to_owned(), Duration::from_secs(5))
            .await
            .unwrap();

        let value = cache
            .get_or_load_json("k", Duration::from_secs(5), || async {
                Ok::<_, anyhow::Error>("fresh".to_owned())
            })
            .await
            .unwrap();
        assert_eq!(value, "fresh");
    }
}
