//! Redis-backed warning history: one JSON list per pair.

use async_trait::async_trait;

use warden_engine::{Pair, WarningRecord, WarningStore};

use crate::cache::{CacheService, RedisCacheStore, warnings_key};

#[derive(Clone, Debug)]
pub struct RedisWarningStore {
    cache: CacheService,
    redis: RedisCacheStore,
}

impl RedisWarningStore {
    /// Returns `None` when the cache has no Redis backend.
    pub fn from_cache(cache: &CacheService) -> Option<Self> {
        let redis = cache.redis_store()?.clone();
        Some(Self {
            cache: cache.clone(),
            redis,
        })
    }

    fn key(&self, pair: Pair) -> String {
        warnings_key(&self.cache, pair.group_id, pair.user_id)
    }
}

#[async_trait]
impl WarningStore for RedisWarningStore {
    async fn append_warning(&self, pair: Pair, record: &WarningRecord) -> anyhow::Result<u64> {
        let payload = serde_json::to_vec(record)
            .map_err(|e| anyhow::anyhow!("failed to serialize warning record: {e}"))?;
        // RPUSH reports the new length atomically.
        self.redis.rpush(&self.key(pair), payload).await
    }

    async fn count(&self, pair: Pair) -> anyhow::Result<u64> {
        self.redis.llen(&self.key(pair)).await
    }

    async fn clear_warnings(&self, pair: Pair) -> anyhow::Result<u64> {
        self.redis.clear_list(&self.key(pair)).await
    }

    async fn list_warnings(&self, pair: Pair) -> anyhow::Result<Vec<WarningRecord>> {
        let key = self.key(pair);
        self.redis
            .lrange_all(&key)
            .await?
            .iter()
            .map(|bytes| {
                serde_json::from_slice(bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize warning record in `{key}`: {e}")
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RedisWarningStore;
    use crate::cache::CacheService;

    #[test]
    fn requires_a_redis_backend() {
        assert!(RedisWarningStore::from_cache(&CacheService::disabled("warden:test")).is_none());
    }

    #[tokio::test]
    async fn redis_backend_builds_store() {
        // Pool creation is lazy; no server is contacted here.
        let cache = CacheService::redis("redis://127.0.0.1:6379/0", "warden:test").unwrap();
        assert!(RedisWarningStore::from_cache(&cache).is_some());
    }
}
