//! Postgres-backed warning history.

use anyhow::Context as _;
use async_trait::async_trait;

use warden_engine::{Pair, WarningRecord, WarningStore};

use crate::database::Database;

#[derive(sqlx::FromRow)]
struct WarningRow {
    moderator_id: i64,
    reason: String,
    warned_at: i64,
}

/// Appends and counts inside one transaction holding a per-pair advisory
/// lock, so several bot processes sharing the database still observe a
/// linear history per pair.
#[derive(Clone, Debug)]
pub struct PgWarningStore {
    db: Database,
}

impl PgWarningStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn pair_ids(pair: Pair) -> anyhow::Result<(i64, i64)> {
    let guild_id = i64::try_from(pair.group_id).context("guild_id out of i64 range")?;
    let user_id = i64::try_from(pair.user_id).context("user_id out of i64 range")?;
    Ok((guild_id, user_id))
}

fn advisory_key(pair: Pair) -> String {
    format!("warns:{}:{}", pair.group_id, pair.user_id)
}

#[async_trait]
impl WarningStore for PgWarningStore {
    async fn append_warning(&self, pair: Pair, record: &WarningRecord) -> anyhow::Result<u64> {
        let (guild_id, user_id) = pair_ids(pair)?;
        let moderator_id =
            i64::try_from(record.issuer_id).context("moderator_id out of i64 range")?;
        let warned_at = i64::try_from(record.timestamp).context("warned_at out of i64 range")?;

        let mut tx = self.db.pool().begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(advisory_key(pair))
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO warnings (guild_id, user_id, moderator_id, reason, warned_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(guild_id)
        .bind(user_id)
        .bind(moderator_id)
        .bind(&record.reason)
        .bind(warned_at)
        .execute(&mut *tx)
        .await?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM warnings WHERE guild_id = $1 AND user_id = $2")
                .bind(guild_id)
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        u64::try_from(count).context("warn count out of u64 range")
    }

    async fn count(&self, pair: Pair) -> anyhow::Result<u64> {
        let (guild_id, user_id) = pair_ids(pair)?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM warnings WHERE guild_id = $1 AND user_id = $2")
                .bind(guild_id)
                .bind(user_id)
                .fetch_one(self.db.pool())
                .await?;

        u64::try_from(count).context("warn count out of u64 range")
    }

    async fn clear_warnings(&self, pair: Pair) -> anyhow::Result<u64> {
        let (guild_id, user_id) = pair_ids(pair)?;

        let mut tx = self.db.pool().begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(advisory_key(pair))
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM warnings WHERE guild_id = $1 AND user_id = $2")
            .bind(guild_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted)
    }

    async fn list_warnings(&self, pair: Pair) -> anyhow::Result<Vec<WarningRecord>> {
        let (guild_id, user_id) = pair_ids(pair)?;

        let rows: Vec<WarningRow> = sqlx::query_as(
            "SELECT moderator_id, reason, warned_at
             FROM warnings
             WHERE guild_id = $1 AND user_id = $2
             ORDER BY warned_at ASC, id ASC",
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter()
            .map(|row| -> anyhow::Result<WarningRecord> {
                Ok(WarningRecord {
                    group_id: pair.group_id,
                    user_id: pair.user_id,
                    issuer_id: u64::try_from(row.moderator_id)
                        .context("moderator_id row out of u64 range")?,
                    reason: row.reason,
                    timestamp: u64::try_from(row.warned_at)
                        .context("warned_at row out of u64 range")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use warden_engine::Pair;

    use super::{advisory_key, pair_ids};

    #[test]
    fn ids_outside_i64_are_rejected() {
        assert!(pair_ids(Pair::new(u64::MAX, 1)).is_err());
        assert_eq!(pair_ids(Pair::new(5, 6)).unwrap(), (5, 6));
    }

    #[test]
    fn advisory_key_is_per_pair() {
        assert_eq!(advisory_key(Pair::new(1, 2)), "warns:1:2");
        assert_ne!(advisory_key(Pair::new(1, 2)), advisory_key(Pair::new(2, 1)));
    }
}
