use sqlx::{PgPool, migrate::Migrator};

use crate::cache::CacheService;

/// `warnings` and `group_rules` schema, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres pool plus the (possibly disabled) Redis cache in front of it.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    cache: CacheService,
}

impl Database {
    pub fn new(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
