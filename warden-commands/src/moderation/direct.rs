//! Shared flow for the direct ban/kick/mute/unmute commands.

use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    gateway_failure_message, moderation_action_embed, moderation_bot_target_message,
    moderation_self_action_message, usage_message,
};
use crate::moderation::target::resolve_target;
use warden_core::{Context, Error};
use warden_engine::{ModerationAction, Pair};

pub struct DirectAction<'a> {
    pub verb: &'static str,
    pub past_tense: &'static str,
    pub usage: &'static str,
    pub reason: Option<&'a str>,
    pub duration_label: Option<&'a str>,
}

/// Resolve the target, run `action` through the gateway and report back.
pub async fn run_direct_action(
    ctx: Context<'_>,
    guild_id: serenity::GuildId,
    explicit_user: Option<serenity::User>,
    action: ModerationAction,
    details: DirectAction<'_>,
) -> Result<(), Error> {
    let Some(user) = resolve_target(ctx, explicit_user) else {
        ctx.say(usage_message(details.usage)).await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message(details.verb)).await?;
        return Ok(());
    }

    if user.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }

    let pair = Pair::new(guild_id.get(), user.id.get());
    if ctx.data().engine.execute(pair, &action).await.is_err() {
        ctx.say(gateway_failure_message(details.verb)).await?;
        return Ok(());
    }

    let embed = moderation_action_embed(&user, details.past_tense, details.reason, details.duration_label);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
