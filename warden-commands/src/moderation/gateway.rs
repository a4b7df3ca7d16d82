use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use warden_engine::ModerationGateway;
use warden_utils::time::unix_secs_after;

/// Discord caps audit-log reasons at 512 characters.
const MAX_AUDIT_REASON_CHARS: usize = 512;

/// [`ModerationGateway`] over the Discord HTTP API.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

fn guild(group_id: u64) -> anyhow::Result<serenity::GuildId> {
    anyhow::ensure!(group_id != 0, "guild id must be non-zero");
    Ok(serenity::GuildId::new(group_id))
}

fn member(group_id: u64, user_id: u64) -> anyhow::Result<(serenity::GuildId, serenity::UserId)> {
    anyhow::ensure!(user_id != 0, "user id must be non-zero");
    Ok((guild(group_id)?, serenity::UserId::new(user_id)))
}

fn audit_reason(reason: &str) -> String {
    reason.chars().take(MAX_AUDIT_REASON_CHARS).collect()
}

#[async_trait]
impl ModerationGateway for SerenityGateway {
    async fn ban(&self, group_id: u64, user_id: u64, reason: &str) -> anyhow::Result<()> {
        let (guild_id, user_id) = member(group_id, user_id)?;
        guild_id
            .ban_with_reason(self.http.as_ref(), user_id, 0, audit_reason(reason))
            .await?;
        Ok(())
    }

    async fn mute(&self, group_id: u64, user_id: u64, duration: Duration) -> anyhow::Result<()> {
        let (guild_id, user_id) = member(group_id, user_id)?;
        let until_unix = i64::try_from(unix_secs_after(duration.as_secs()))
            .context("mute end out of i64 range")?;
        let until = serenity::Timestamp::from_unix_timestamp(until_unix)?;

        let edit = serenity::EditMember::new().disable_communication_until_datetime(until);
        guild_id.edit_member(self.http.as_ref(), user_id, edit).await?;
        Ok(())
    }

    async fn unmute(&self, group_id: u64, user_id: u64) -> anyhow::Result<()> {
        let (guild_id, user_id) = member(group_id, user_id)?;
        let edit = serenity::EditMember::new().enable_communication();
        guild_id.edit_member(self.http.as_ref(), user_id, edit).await?;
        Ok(())
    }

    async fn kick(&self, group_id: u64, user_id: u64, reason: &str) -> anyhow::Result<()> {
        let (guild_id, user_id) = member(group_id, user_id)?;
        guild_id
            .kick_with_reason(self.http.as_ref(), user_id, &audit_reason(reason))
            .await?;
        Ok(())
    }

    /// Posts into the guild's system channel.
    async fn send_message(&self, group_id: u64, text: &str) -> anyhow::Result<()> {
        let guild_id = guild(group_id)?;
        let channel_id = guild_id
            .to_partial_guild(self.http.as_ref())
            .await?
            .system_channel_id
            .with_context(|| format!("guild {group_id} has no system channel"))?;

        channel_id.say(self.http.as_ref(), text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_AUDIT_REASON_CHARS, audit_reason, member};

    #[test]
    fn zero_ids_are_rejected() {
        assert!(member(0, 1).is_err());
        assert!(member(1, 0).is_err());
        assert!(member(1, 2).is_ok());
    }

    #[test]
    fn long_reasons_are_truncated() {
        let reason = "x".repeat(MAX_AUDIT_REASON_CHARS + 40);
        assert_eq!(audit_reason(&reason).chars().count(), MAX_AUDIT_REASON_CHARS);
        assert_eq!(audit_reason("short"), "short");
    }
}
