use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::embeds::{display_name, usage_message, warning_history_lines};
use crate::moderation::target::resolve_target;
use warden_core::{Context, Error};
use warden_engine::Pair;
use warden_utils::embed::titled_embed;
use warden_utils::formatting::warning_progress;

pub const META: CommandMeta = CommandMeta {
    name: "warnings",
    desc: "Show a user's current warnings.",
    category: "moderation",
    usage: "!warnings <user>",
};

/// Only records since the last escalation are shown; escalation clears them.
#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "The user to check"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::MANAGE_MESSAGES).await?
    else {
        return Ok(());
    };

    let Some(user) = resolve_target(ctx, user) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let engine = &ctx.data().engine;
    let records = engine
        .warning_history(Pair::new(guild_id.get(), user.id.get()))
        .await?;
    let threshold = engine.policy().max_warnings;

    let mut description = format!("**{}**", warning_progress(records.len() as u64, threshold));
    if records.is_empty() {
        description.push_str("\n\nNo active warnings.");
    } else {
        description.push_str("\n\n");
        description.push_str(&warning_history_lines(&records));
    }

    let embed = titled_embed(&format!("Warnings for {}", display_name(&user)), description);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
