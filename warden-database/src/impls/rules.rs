use anyhow::Context as _;

use crate::cache::{CONFIG_CACHE_TTL, invalidate_rules, rules_key};
use crate::database::Database;
use crate::model::rules::GroupRules;

#[derive(sqlx::FromRow)]
struct RulesRow {
    guild_id: i64,
    rules: String,
    updated_by: i64,
    updated_at: i64,
}

pub async fn get_rules(db: &Database, guild_id: u64) -> anyhow::Result<Option<GroupRules>> {
    let cache_key = rules_key(db.cache(), guild_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

            let row: Option<RulesRow> = sqlx::query_as(
                "SELECT guild_id, rules, updated_by, updated_at FROM group_rules WHERE guild_id = $1",
            )
            .bind(guild_id_i64)
            .fetch_optional(db.pool())
            .await?;

            row.map(|row| -> anyhow::Result<GroupRules> {
                Ok(GroupRules {
                    guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
                    rules: row.rules,
                    updated_by: u64::try_from(row.updated_by)
                        .context("updated_by row out of u64 range")?,
                    updated_at: u64::try_from(row.updated_at)
                        .context("updated_at row out of u64 range")?,
                })
            })
            .transpose()
        })
        .await
}

pub async fn set_rules(
    db: &Database,
    guild_id: u64,
    rules: &str,
    updated_by: u64,
    updated_at: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let updated_by_i64 = i64::try_from(updated_by).context("updated_by out of i64 range")?;
    let updated_at_i64 = i64::try_from(updated_at).context("updated_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO group_rules (guild_id, rules, updated_by, updated_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (guild_id) DO UPDATE SET
            rules = EXCLUDED.rules,
            updated_by = EXCLUDED.updated_by,
            updated_at = EXCLUDED.updated_at",
    )
    .bind(guild_id_i64)
    .bind(rules)
    .bind(updated_by_i64)
    .bind(updated_at_i64)
    .execute(db.pool())
    .await?;

    invalidate_rules(db.cache(), guild_id).await?;

    Ok(())
}
