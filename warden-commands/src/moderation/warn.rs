use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::embeds::{
    moderation_bot_target_message, reply_required_message, warning_outcome_message,
};
use crate::moderation::target::resolve_target;
use warden_core::{Context, Error};
use warden_engine::{EscalationError, WarningRequest};

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Warn a user; reaching the limit bans them.",
    category: "moderation",
    usage: "!warn (in reply) [reason] | !warn <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: Option<serenity::User>,
    #[description = "Reason for warning"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::MANAGE_MESSAGES).await?
    else {
        return Ok(());
    };

    let target = resolve_target(ctx, user);
    if target.as_ref().is_some_and(|user| user.bot) {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }

    let target_user_id = target.as_ref().map(|user| user.id.get());
    let request = match WarningRequest::new(
        guild_id.get(),
        target_user_id,
        ctx.author().id.get(),
        reason,
    ) {
        Ok(request) => request,
        Err(EscalationError::InvalidRequest(_)) if target_user_id.is_none() => {
            ctx.say(reply_required_message()).await?;
            return Ok(());
        }
        Err(err) => {
            ctx.say(format!("⚠️ {err}")).await?;
            return Ok(());
        }
    };
    let user_id = request.pair.user_id;

    match ctx.data().engine.issue_warning(request).await {
        Ok(outcome) => {
            ctx.say(warning_outcome_message(user_id, &outcome)).await?;
        }
        Err(err) if err.is_retryable() => {
            warn!(%err, guild_id = %guild_id, user_id, "warning not recorded");
            ctx.say("I couldn't record that warning right now. Please try again.")
                .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
