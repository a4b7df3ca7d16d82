use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;

#[derive(Clone, Debug)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    pub fn from_url(redis_url: &str) -> anyhow::Result<Self> {
        let config = Config::from_url(redis_url);
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| anyhow::anyhow!("failed to create redis pool: {e}"))?;

        Ok(Self { pool })
    }

    async fn conn(&self) -> anyhow::Result<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow::anyhow!("failed to get redis connection: {e}"))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("redis PING failed: {e}"))?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| anyhow::anyhow!("redis GET failed for key `{key}`: {e}"))
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> anyhow::Result<()> {
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| anyhow::anyhow!("redis SETEX failed for key `{key}`: {e}"))
    }

    /// Returns the number of keys removed.
    pub async fn del(&self, key: &str) -> anyhow::Result<u64> {
        let mut conn = self.conn().await?;
        conn.del::<_, u64>(key)
            .await
            .map_err(|e| anyhow::anyhow!("redis DEL failed for key `{key}`: {e}"))
    }

    /// Append to a list and return its new length in one round trip.
    pub async fn rpush(&self, key: &str, value: Vec<u8>) -> anyhow::Result<u64> {
        let mut conn = self.conn().await?;
        conn.rpush::<_, _, u64>(key, value)
            .await
            .map_err(|e| anyhow::anyhow!("redis RPUSH failed for key `{key}`: {e}"))
    }

    pub async fn llen(&self, key: &str) -> anyhow::Result<u64> {
        let mut conn = self.conn().await?;
        conn.llen::<_, u64>(key)
            .await
            .map_err(|e| anyhow::anyhow!("redis LLEN failed for key `{key}`: {e}"))
    }

    pub async fn lrange_all(&self, key: &str) -> anyhow::Result<Vec<Vec<u8>>> {
        let mut conn = self.conn().await?;
        conn.lrange::<_, Vec<Vec<u8>>>(key, 0, -1)
            .await
            .map_err(|e| anyhow::anyhow!("redis LRANGE failed for key `{key}`: {e}"))
    }

    /// Delete a list atomically and return how many items it held.
    pub async fn clear_list(&self, key: &str) -> anyhow::Result<u64> {
        let mut conn = self.conn().await?;
        let (len, _deleted) = redis::pipe()
            .atomic()
            .llen(key)
            .del(key)
            .query_async::<(u64, u64)>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("redis LLEN+DEL failed for key `{key}`: {e}"))?;
        Ok(len)
    }
}
