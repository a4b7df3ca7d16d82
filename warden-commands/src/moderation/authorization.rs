//! The one admin-capability check every moderation command goes through.

use poise::serenity_prelude as serenity;

use crate::moderation::embeds::guild_only_message;
use warden_core::{Context, Error};
use warden_utils::permissions::has_user_permission;

pub const NOT_PERMITTED_MESSAGE: &str = "You are not permitted to use this command.";

/// Returns the guild when the author holds `required` there.
///
/// Replies to the author and returns `None` outside a guild or when the
/// permission is missing.
pub async fn require_permission(
    ctx: Context<'_>,
    required: serenity::Permissions,
) -> Result<Option<serenity::GuildId>, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(None);
    };

    if !has_user_permission(ctx.http(), guild_id, ctx.author().id, required).await? {
        ctx.say(NOT_PERMITTED_MESSAGE).await?;
        return Ok(None);
    }

    Ok(Some(guild_id))
}
